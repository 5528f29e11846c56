//! Temp file that becomes the archive on success.

use super::temp_path;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Writable `.part` file for one download attempt.
///
/// Created truncated, so a retry never appends to a previous attempt's bytes.
/// Dropping without [`PartFile::finalize`] leaves the temp file behind; call
/// [`PartFile::discard`] on failure.
pub struct PartFile {
    file: File,
    temp_path: PathBuf,
    final_path: PathBuf,
    written: u64,
}

impl PartFile {
    pub fn create(final_path: &Path) -> io::Result<Self> {
        let temp_path = temp_path(final_path);
        let file = File::create(&temp_path)?;
        Ok(Self {
            file,
            temp_path,
            final_path: final_path.to_path_buf(),
            written: 0,
        })
    }

    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Syncs and renames the temp file onto the final path (replacing it).
    /// Returns the number of bytes written.
    pub fn finalize(self) -> io::Result<u64> {
        self.file.sync_all()?;
        drop(self.file);
        std::fs::rename(&self.temp_path, &self.final_path)?;
        Ok(self.written)
    }

    /// Removes the temp file.
    pub fn discard(self) {
        drop(self.file);
        if let Err(e) = super::remove_if_exists(&self.temp_path) {
            tracing::warn!(path = %self.temp_path.display(), "could not remove temp file: {}", e);
        }
    }
}

impl Write for PartFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.file.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}
