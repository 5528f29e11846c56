//! Bounded-retry archive download.

use super::{download_path, Abort, FetchPipeline};
use crate::model::Release;
use crate::paths::ReleaseLayout;
use crate::prompt::Prompt;
use crate::retry::{DownloadError, RetryDecision};
use crate::storage::PartFile;
use crate::transport::Transport;
use std::path::Path;
use tracing::{info, warn};

impl<T: Transport, P: Prompt> FetchPipeline<T, P> {
    /// Downloads the archive in `format` to `layout.archive`.
    ///
    /// Each failed attempt re-authenticates before the next one (a late failure
    /// is usually an expired session). When the policy is exhausted the
    /// operator decides between another full round and giving up on the
    /// release. Returns the number of bytes written.
    pub(super) fn download_with_retry(
        &mut self,
        release: &Release,
        format: &str,
        layout: &ReleaseLayout,
    ) -> Result<u64, Abort> {
        let path = download_path(release, format);
        let policy = self.options.retry;

        loop {
            let mut attempt = 1u32;
            let last_error = loop {
                match self.try_download(&path, &layout.archive) {
                    Ok(bytes) => return Ok(bytes),
                    Err(e) => {
                        warn!(release_id = release.id, attempt, "download attempt failed: {}", e);
                        match policy.decide(attempt) {
                            RetryDecision::Exhausted => break e,
                            RetryDecision::RetryAfter(delay) => {
                                self.prompt.notice(&format!(
                                    "[!] An error occurred while downloading {}: \"{}\". Retrying.",
                                    release.title, e
                                ));
                                if !delay.is_zero() {
                                    std::thread::sleep(delay);
                                }
                                // A failed re-login just costs the next attempt.
                                if let Err(auth) = self.session.reauthenticate() {
                                    warn!(release_id = release.id, "reauthentication failed: {}", auth);
                                }
                                attempt += 1;
                            }
                        }
                    }
                }
            };

            self.prompt.notice(&format!(
                "[!] Could not download {} after {} attempts: \"{}\"",
                release.title, attempt, last_error
            ));
            if !self.prompt.confirm("[!] Wanna retry?")? {
                return Err(Abort::Failed(format!(
                    "download failed after {} attempts: {}",
                    attempt, last_error
                )));
            }
            info!(release_id = release.id, "operator requested another download round");
        }
    }

    /// One attempt: stream into `<archive>.part`, rename on success.
    fn try_download(&mut self, path: &str, archive: &Path) -> Result<u64, DownloadError> {
        let mut part = PartFile::create(archive).map_err(DownloadError::Storage)?;
        match self.session.download(path, &mut part) {
            Ok(head) if !head.is_error() => part.finalize().map_err(DownloadError::Storage),
            Ok(head) => {
                part.discard();
                Err(DownloadError::Http(head.status))
            }
            Err(e) => {
                part.discard();
                Err(e.into())
            }
        }
    }
}
