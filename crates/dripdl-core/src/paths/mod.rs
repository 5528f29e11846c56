//! Path derivation for releases.
//!
//! Everything that turns catalog text into filesystem paths goes through
//! [`sanitize`], so titles, slugs and label names can never produce illegal or
//! escaping path segments.

mod layout;
mod presence;
mod sanitize;

pub use layout::ReleaseLayout;
pub use presence::{archive_present, dir_has_content, is_obtained, NoiseList};
pub use sanitize::{
    field_segment, sanitize_relative_path, sanitize_segment, truncate_field, MAX_FIELD_CHARS,
};
