//! "Already obtained" detection, evaluated before any network call.

use super::layout::ReleaseLayout;
use std::fs;
use std::path::Path;

/// Directory entries that do not count as content (OS thumbnail/metadata files).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoiseList(Vec<String>);

impl Default for NoiseList {
    fn default() -> Self {
        Self::new([".", "..", "Thumbs.db", ".DS_Store", "desktop.ini"])
    }
}

impl NoiseList {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }
}

/// True if `path` is a regular file with non-zero size.
pub fn archive_present(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| m.is_file() && m.len() > 0)
        .unwrap_or(false)
}

/// True if `dir` is a directory holding at least one entry not in `noise`.
pub fn dir_has_content(dir: &Path, noise: &NoiseList) -> bool {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return false,
    };
    entries
        .flatten()
        .any(|e| !noise.contains(&e.file_name().to_string_lossy()))
}

/// A release is obtained iff its archive exists with non-zero size, or its
/// unpack directory has at least one non-noise entry.
pub fn is_obtained(layout: &ReleaseLayout, noise: &NoiseList) -> bool {
    archive_present(&layout.archive) || dir_has_content(&layout.unpack_dir, noise)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::release;

    fn layout_in(root: &Path) -> ReleaseLayout {
        ReleaseLayout::for_release(root, &release(1, Some("ep"), "Title", "Artist", "Label"))
    }

    #[test]
    fn nothing_on_disk_is_not_obtained() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!is_obtained(&layout_in(dir.path()), &NoiseList::default()));
    }

    #[test]
    fn non_empty_archive_counts() {
        let dir = tempfile::tempdir().unwrap();
        let l = layout_in(dir.path());
        l.ensure_label_dir().unwrap();
        fs::write(&l.archive, b"PK").unwrap();
        assert!(is_obtained(&l, &NoiseList::default()));
    }

    #[test]
    fn zero_byte_archive_does_not_count() {
        let dir = tempfile::tempdir().unwrap();
        let l = layout_in(dir.path());
        l.ensure_label_dir().unwrap();
        fs::write(&l.archive, b"").unwrap();
        assert!(!is_obtained(&l, &NoiseList::default()));
    }

    #[test]
    fn unpack_dir_with_only_noise_does_not_count() {
        let dir = tempfile::tempdir().unwrap();
        let l = layout_in(dir.path());
        fs::create_dir_all(&l.unpack_dir).unwrap();
        fs::write(l.unpack_dir.join(".DS_Store"), b"x").unwrap();
        fs::write(l.unpack_dir.join("Thumbs.db"), b"x").unwrap();
        assert!(!is_obtained(&l, &NoiseList::default()));

        fs::write(l.unpack_dir.join("01.flac"), b"x").unwrap();
        assert!(is_obtained(&l, &NoiseList::default()));
    }

    #[test]
    fn noise_list_is_configurable() {
        let dir = tempfile::tempdir().unwrap();
        let l = layout_in(dir.path());
        fs::create_dir_all(&l.unpack_dir).unwrap();
        fs::write(l.unpack_dir.join(".directory"), b"x").unwrap();
        assert!(is_obtained(&l, &NoiseList::default()));
        assert!(!is_obtained(&l, &NoiseList::new([".directory"])));
    }
}
