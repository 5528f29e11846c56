use crate::model::Release;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Archive or a populated unpack directory is already on disk.
    AlreadyPresent,
    /// The operator answered "n" to the per-release confirmation.
    Declined,
}

/// Terminal state of processing one release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Skipped(SkipReason),
    Downloaded,
    DownloadedAndUnpacked,
    Failed(String),
}

/// Tally of a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub skipped: usize,
    pub downloaded: usize,
    pub unpacked: usize,
    /// `(title, reason)` per failed release, in catalog order.
    pub failed: Vec<(String, String)>,
}

impl RunSummary {
    pub fn record(&mut self, release: &Release, outcome: &FetchOutcome) {
        match outcome {
            FetchOutcome::Skipped(_) => self.skipped += 1,
            FetchOutcome::Downloaded => self.downloaded += 1,
            FetchOutcome::DownloadedAndUnpacked => self.unpacked += 1,
            FetchOutcome::Failed(reason) => {
                self.failed.push((release.title.clone(), reason.clone()))
            }
        }
    }

    pub fn total(&self) -> usize {
        self.skipped + self.downloaded + self.unpacked + self.failed.len()
    }
}
