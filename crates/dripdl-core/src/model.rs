//! Catalog records as returned by the service API.
//!
//! These are read-only snapshots; unknown JSON fields are ignored.

use serde::Deserialize;

/// A label ("creative") the user can subscribe to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Label {
    #[serde(default)]
    pub id: u64,
    /// Display name, used for the top-level download directory.
    #[serde(default)]
    pub service_name: String,
    /// Routing slug used to address the label's releases.
    #[serde(default)]
    pub slug: String,
}

/// A subscription to one label.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Membership {
    pub creative: Label,
}

/// The authenticated user, as returned by the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    pub id: u64,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub memberships: Vec<Membership>,
}

impl User {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname).trim().to_string()
    }
}

/// One downloadable bundle of media.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    pub id: u64,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub creative_id: Option<u64>,
    pub creative: Label,
    /// Entitlement flag; a missing flag counts as locked.
    #[serde(default)]
    pub unlocked: bool,
}

impl Release {
    /// Numeric label id used by the download endpoint.
    pub fn label_id(&self) -> u64 {
        self.creative_id.unwrap_or(self.creative.id)
    }

    /// Slug if present and non-blank.
    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref().filter(|s| !s.trim().is_empty())
    }
}
