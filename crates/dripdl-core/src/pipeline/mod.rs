//! Per-release fetch pipeline.
//!
//! For each release, in order:
//! 1. skip if already on disk (no network I/O),
//! 2. optionally ask the operator,
//! 3. negotiate a format the release was published in,
//! 4. download with bounded retry, re-authenticating between attempts,
//! 5. optionally expand the archive,
//! 6. delete the archive when unpacking was requested.
//!
//! Releases are processed strictly one at a time; the session is not shared.

mod download;
mod outcome;
mod run;
mod settings;

pub use outcome::{FetchOutcome, RunSummary, SkipReason};
pub use settings::{DownloadSettings, FORMATS};

use crate::extract::{self, ExpandOutcome};
use crate::model::Release;
use crate::paths::{is_obtained, NoiseList, ReleaseLayout};
use crate::prompt::{Prompt, PromptError};
use crate::retry::RetryPolicy;
use crate::session::SessionClient;
use crate::storage;
use crate::transport::Transport;
use std::path::PathBuf;
use tracing::{info, warn};

pub fn formats_path(release: &Release) -> String {
    format!(
        "/api/creatives/{}/releases/{}/formats",
        release.creative.slug, release.id
    )
}

pub fn download_path(release: &Release, format: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("release_format", format)
        .finish();
    format!(
        "/api/creatives/{}/releases/{}/download?{}",
        release.label_id(),
        release.id,
        query
    )
}

/// Where and how the pipeline writes.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Download root; label directories are created below it.
    pub root: PathBuf,
    pub noise: NoiseList,
    pub retry: RetryPolicy,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            noise: NoiseList::default(),
            retry: RetryPolicy::default(),
        }
    }
}

/// Why a release stopped early.
enum Abort {
    /// The release failed; the run goes on.
    Failed(String),
    /// No operator to answer; the run cannot go on.
    Prompt(PromptError),
}

impl From<PromptError> for Abort {
    fn from(e: PromptError) -> Self {
        Abort::Prompt(e)
    }
}

pub struct FetchPipeline<T, P> {
    session: SessionClient<T>,
    prompt: P,
    options: PipelineOptions,
}

impl<T: Transport, P: Prompt> FetchPipeline<T, P> {
    pub fn new(session: SessionClient<T>, prompt: P, options: PipelineOptions) -> Self {
        Self {
            session,
            prompt,
            options,
        }
    }

    pub fn session(&self) -> &SessionClient<T> {
        &self.session
    }

    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    pub fn layout(&self, release: &Release) -> ReleaseLayout {
        ReleaseLayout::for_release(&self.options.root, release)
    }

    /// Runs the whole state machine for one release.
    ///
    /// A failing release yields `Ok(FetchOutcome::Failed(_))`; `Err` means the
    /// operator prompt is gone and the run has to stop.
    pub fn process_release(
        &mut self,
        release: &Release,
        settings: &DownloadSettings,
    ) -> Result<FetchOutcome, PromptError> {
        match self.fetch(release, settings) {
            Ok(outcome) => Ok(outcome),
            Err(Abort::Failed(reason)) => {
                warn!(release_id = release.id, "release failed: {}", reason);
                Ok(FetchOutcome::Failed(reason))
            }
            Err(Abort::Prompt(e)) => Err(e),
        }
    }

    fn fetch(
        &mut self,
        release: &Release,
        settings: &DownloadSettings,
    ) -> Result<FetchOutcome, Abort> {
        let layout = self.layout(release);
        if is_obtained(&layout, &self.options.noise) {
            info!(release_id = release.id, "already obtained, skipping");
            self.prompt
                .notice("It seems you've already got this release. Skipping.");
            return Ok(FetchOutcome::Skipped(SkipReason::AlreadyPresent));
        }

        if settings.confirm_each {
            let question = format!("Download \"{}\" by {}?", release.title, release.artist);
            if !self.prompt.confirm(&question)? {
                return Ok(FetchOutcome::Skipped(SkipReason::Declined));
            }
        }

        let format = self.negotiate_format(release, &settings.format)?;

        layout.ensure_label_dir().map_err(|e| {
            Abort::Failed(format!(
                "cannot create {}: {}",
                layout.label_dir.display(),
                e
            ))
        })?;
        self.prompt.notice(&format!(
            "Saving to \"{}\", please stand by while this release is being fetched...",
            layout.archive.display()
        ));
        let bytes = self.download_with_retry(release, &format, &layout)?;
        info!(release_id = release.id, bytes, format = %format, "archive downloaded");

        if !settings.unpack {
            return Ok(FetchOutcome::Downloaded);
        }
        self.unpack(release, &layout)
    }

    /// Picks the preferred format if the release has it, otherwise asks the
    /// operator among the available ones. The fallback is not remembered.
    fn negotiate_format(&mut self, release: &Release, preferred: &str) -> Result<String, Abort> {
        let path = formats_path(release);
        let response = self
            .session
            .get(&path)
            .map_err(|e| Abort::Failed(format!("could not query formats: {}", e)))?;
        if response.head.is_error() {
            return Err(Abort::Failed(format!(
                "formats query returned HTTP {}",
                response.status()
            )));
        }
        let available: Vec<String> = serde_json::from_slice(&response.body)
            .map_err(|e| Abort::Failed(format!("unreadable formats list: {}", e)))?;

        if available.iter().any(|f| f == preferred) {
            return Ok(preferred.to_string());
        }
        if available.is_empty() {
            return Err(Abort::Failed("release has no downloadable formats".into()));
        }

        info!(release_id = release.id, ?available, preferred, "preferred format unavailable");
        self.prompt
            .notice("[!] This release was not published with your preferred format.");
        let chosen = self
            .prompt
            .choose("[!] Please choose an available format", &available)?;
        Ok(chosen)
    }

    /// Expands the fresh archive, then deletes it whatever the result.
    fn unpack(&mut self, release: &Release, layout: &ReleaseLayout) -> Result<FetchOutcome, Abort> {
        self.prompt
            .notice(&format!("Unpacking {}...", release.title));
        let expanded = extract::expand(&layout.archive, &layout.unpack_dir, &mut self.prompt);

        if let Err(e) = storage::remove_if_exists(&layout.archive) {
            warn!(archive = %layout.archive.display(), "could not remove archive: {}", e);
        }

        match expanded? {
            ExpandOutcome::Expanded { .. } => Ok(FetchOutcome::DownloadedAndUnpacked),
            ExpandOutcome::SourceMissing => {
                self.prompt.notice(
                    "Source zip file could not be found! Release could not be unpacked :(",
                );
                Ok(FetchOutcome::Downloaded)
            }
            ExpandOutcome::Abandoned { reason } => {
                self.prompt.notice(&format!(
                    "[!] \"{}\" was left partially unpacked in \"{}\": {}",
                    release.title,
                    layout.unpack_dir.display(),
                    reason
                ));
                Ok(FetchOutcome::Downloaded)
            }
        }
    }
}
