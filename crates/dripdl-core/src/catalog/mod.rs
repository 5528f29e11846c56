//! Release catalog: everything the authenticated user may download.
//!
//! Two retrieval strategies, chosen once at startup:
//! - [`CatalogMode::Paginated`] walks the user's aggregate release feed page by
//!   page until a page comes back empty.
//! - [`CatalogMode::LabelScoped`] lists one label's releases in one request.
//!
//! Either way locked releases are dropped. Any failed fetch aborts the listing;
//! a partial catalog is never returned.

use crate::model::Release;
use crate::session::SessionClient;
use crate::transport::{Transport, TransportError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogMode {
    /// `GET /api/users/{id}/releases?page=N`, N = 1, 2, ... until empty.
    Paginated,
    /// `GET /api/creatives/{slug}/releases`.
    LabelScoped { slug: String },
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("fetching {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: TransportError,
    },
    #[error("fetching {path} returned HTTP {status}")]
    Status { path: String, status: u32 },
    #[error("{path} did not return a release list: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

pub fn releases_page_path(user_id: u64, page: u32) -> String {
    format!("/api/users/{}/releases?page={}", user_id, page)
}

pub fn label_releases_path(label_slug: &str) -> String {
    format!("/api/creatives/{}/releases", label_slug)
}

/// Lists the releases the user is entitled to, in catalog order.
pub fn list_entitled_releases<T: Transport>(
    session: &mut SessionClient<T>,
    mode: &CatalogMode,
) -> Result<Vec<Release>, CatalogError> {
    let all = match mode {
        CatalogMode::Paginated => {
            let user_id = session.user().id;
            fetch_all_pages(session, user_id)?
        }
        CatalogMode::LabelScoped { slug } => fetch_list(session, &label_releases_path(slug))?,
    };

    let total = all.len();
    let entitled: Vec<Release> = all.into_iter().filter(|r| r.unlocked).collect();
    tracing::info!(
        total,
        entitled = entitled.len(),
        "catalog listed ({:?})",
        mode
    );
    Ok(entitled)
}

fn fetch_all_pages<T: Transport>(
    session: &mut SessionClient<T>,
    user_id: u64,
) -> Result<Vec<Release>, CatalogError> {
    let mut releases = Vec::new();
    let mut page = 1u32;
    loop {
        let part = fetch_list(session, &releases_page_path(user_id, page))?;
        tracing::debug!(page, count = part.len(), "fetched release page");
        if part.is_empty() {
            return Ok(releases);
        }
        releases.extend(part);
        page += 1;
    }
}

fn fetch_list<T: Transport>(
    session: &mut SessionClient<T>,
    path: &str,
) -> Result<Vec<Release>, CatalogError> {
    let response = session.get(path).map_err(|source| CatalogError::Transport {
        path: path.to_string(),
        source,
    })?;
    if response.head.is_error() {
        return Err(CatalogError::Status {
            path: path.to_string(),
            status: response.status(),
        });
    }
    serde_json::from_slice(&response.body).map_err(|source| CatalogError::Decode {
        path: path.to_string(),
        source,
    })
}
