//! Archive files on disk.
//!
//! Downloads are written to a `.part` file next to the final path and renamed
//! into place only after a successful response, so the archive path never
//! holds a truncated body that the presence check would mistake for a
//! finished download.

mod part;

pub use part::PartFile;

/// Temporary file suffix used before the rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `ep.zip` → `ep.zip.part`).
pub fn temp_path(final_path: &std::path::Path) -> std::path::PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    std::path::PathBuf::from(o)
}

/// Removes `path`, treating "already gone" as success.
pub fn remove_if_exists(path: &std::path::Path) -> std::io::Result<()> {
    match std::fs::remove_file(path) {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}
