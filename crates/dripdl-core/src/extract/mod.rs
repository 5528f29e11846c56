//! Release archive expansion.
//!
//! Entry names come from the archive and are untrusted: each one is sanitized
//! segment by segment before it is joined onto the target directory, so no
//! entry can be written outside of it.

use crate::paths::sanitize_relative_path;
use crate::prompt::{Prompt, PromptError};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use zip::result::ZipError;

/// How an expansion ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpandOutcome {
    /// All entries extracted; lists the files written.
    Expanded { files: Vec<PathBuf> },
    /// No archive at the given path. Nothing was touched.
    SourceMissing,
    /// Extraction failed and the operator declined to retry. The target
    /// directory may be partially populated.
    Abandoned { reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum ExpandError {
    #[error("cannot read archive {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: ZipError,
    },
    #[error("cannot read entry #{index}: {source}")]
    Entry {
        index: usize,
        #[source]
        source: ZipError,
    },
    #[error("cannot write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Expands `archive` into `target`, offering the operator a full retry
/// (re-opening the archive) after each failure.
pub fn expand<P: Prompt + ?Sized>(
    archive: &Path,
    target: &Path,
    prompt: &mut P,
) -> Result<ExpandOutcome, PromptError> {
    loop {
        if !archive.is_file() {
            warn!(archive = %archive.display(), "archive to expand is missing");
            return Ok(ExpandOutcome::SourceMissing);
        }

        match extract_all(archive, target) {
            Ok(files) => {
                info!(
                    archive = %archive.display(),
                    extracted_count = files.len(),
                    "archive expanded"
                );
                return Ok(ExpandOutcome::Expanded { files });
            }
            Err(e) => {
                warn!(archive = %archive.display(), "expansion failed: {}", e);
                prompt.notice(&format!("[!] Something went wrong while unpacking: \"{}\"", e));
                if !prompt.confirm("[!] Wanna retry?")? {
                    return Ok(ExpandOutcome::Abandoned {
                        reason: e.to_string(),
                    });
                }
            }
        }
    }
}

/// Extracts every entry of the zip at `archive` under `target`.
pub fn extract_all(archive: &Path, target: &Path) -> Result<Vec<PathBuf>, ExpandError> {
    fs::create_dir_all(target).map_err(|source| ExpandError::Io {
        path: target.to_path_buf(),
        source,
    })?;

    let open_err = |source| ExpandError::Open {
        path: archive.to_path_buf(),
        source,
    };
    let file = File::open(archive).map_err(|e| open_err(ZipError::Io(e)))?;
    let mut zip = zip::ZipArchive::new(file).map_err(open_err)?;

    let mut written = Vec::new();
    for index in 0..zip.len() {
        let mut entry = zip
            .by_index(index)
            .map_err(|source| ExpandError::Entry { index, source })?;

        let relative = match sanitize_relative_path(entry.name()) {
            Some(r) => r,
            None => {
                debug!(name = entry.name(), "skipping entry with no usable path");
                continue;
            }
        };
        let out_path = target.join(&relative);
        let io_err = |source| ExpandError::Io {
            path: out_path.clone(),
            source,
        };

        if entry.is_dir() {
            fs::create_dir_all(&out_path).map_err(io_err)?;
            continue;
        }
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let mut out = File::create(&out_path).map_err(io_err)?;
        io::copy(&mut entry, &mut out).map_err(io_err)?;
        written.push(out_path);
    }

    Ok(written)
}
