//! On-disk locations for a release.

use super::sanitize::field_segment;
use crate::model::Release;
use std::path::{Path, PathBuf};

/// Where a release's archive and expanded tree live under the download root.
///
/// - archive: `<root>/<label>/<slug or id>.zip`
/// - unpack dir: `<root>/<label>/<artist>/<title>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseLayout {
    pub label_dir: PathBuf,
    pub archive: PathBuf,
    pub unpack_dir: PathBuf,
}

/// Field as a path segment, or `fallback` when nothing usable is left
/// (e.g. a title of `???`), so no segment ever collapses onto its parent.
fn segment_or(field: &str, fallback: u64) -> String {
    let segment = field_segment(field);
    if segment.is_empty() || segment == "." || segment == ".." {
        fallback.to_string()
    } else {
        segment
    }
}

impl ReleaseLayout {
    pub fn for_release(root: &Path, release: &Release) -> Self {
        let label_dir = root.join(segment_or(&release.creative.service_name, release.label_id()));

        let stem = segment_or(release.slug().unwrap_or_default(), release.id);
        let archive = label_dir.join(format!("{}.zip", stem));

        let unpack_dir = label_dir
            .join(segment_or(&release.artist, release.id))
            .join(segment_or(&release.title, release.id));

        Self {
            label_dir,
            archive,
            unpack_dir,
        }
    }

    /// Creates the label directory (no error if it already exists).
    pub fn ensure_label_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.label_dir)
    }
}
