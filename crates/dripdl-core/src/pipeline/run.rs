use super::{DownloadSettings, FetchOutcome, FetchPipeline, RunSummary};
use crate::model::Release;
use crate::prompt::{Prompt, PromptError};
use crate::transport::Transport;

impl<T: Transport, P: Prompt> FetchPipeline<T, P> {
    /// Processes `releases` one after another, in catalog order.
    ///
    /// A failed release does not stop the run; a closed prompt does.
    pub fn run_all(
        &mut self,
        releases: &[Release],
        settings: &DownloadSettings,
    ) -> Result<RunSummary, PromptError> {
        let mut summary = RunSummary::default();

        for (index, release) in releases.iter().enumerate() {
            self.prompt.notice(&format!(
                "We've got \"{}\" by {}.",
                release.title, release.artist
            ));

            let outcome = self.process_release(release, settings)?;
            tracing::info!(
                release_id = release.id,
                position = index + 1,
                total = releases.len(),
                ?outcome,
                "release processed"
            );

            match &outcome {
                FetchOutcome::Downloaded | FetchOutcome::DownloadedAndUnpacked => {
                    self.prompt.notice("Done. :)")
                }
                FetchOutcome::Failed(reason) => self
                    .prompt
                    .notice(&format!("[!] Giving up on \"{}\": {}", release.title, reason)),
                FetchOutcome::Skipped(_) => {}
            }
            self.prompt.notice("========");

            summary.record(release, &outcome);
        }

        Ok(summary)
    }
}
