//! `dripdl` / `dripdl fetch` – download every entitled release.

use anyhow::{Context, Result};
use dripdl_core::catalog;
use dripdl_core::config::DripConfig;
use dripdl_core::pipeline::{FetchPipeline, PipelineOptions, RunSummary};
use dripdl_core::prompt;

use super::login::connect;
use crate::cli::{interactive, AccountArgs, FetchArgs};

pub fn run_fetch(cfg: &DripConfig, account: &AccountArgs, args: &FetchArgs) -> Result<()> {
    let mut console = prompt::stdio();
    let mut session = connect(cfg, account, &mut console)?;

    let mode = interactive::catalog_mode(&mut console, account, session.user())?;
    let releases = catalog::list_entitled_releases(&mut session, &mode)
        .context("could not list your releases")?;
    println!("It looks like you have {} releases available.", releases.len());
    if releases.is_empty() {
        return Ok(());
    }

    let settings = interactive::download_settings(&mut console, args, cfg.default_format.as_deref())?;
    let root = match &args.dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };
    tracing::info!(root = %root.display(), ?settings, "starting download run");

    let options = PipelineOptions {
        root,
        noise: cfg.noise_list(),
        retry: cfg.retry_policy(),
    };
    let mut pipeline = FetchPipeline::new(session, &mut console, options);
    let summary = pipeline.run_all(&releases, &settings)?;
    drop(pipeline);

    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!(
        "{} releases: {} downloaded, {} unpacked, {} already there or skipped, {} failed.",
        summary.total(),
        summary.downloaded,
        summary.unpacked,
        summary.skipped,
        summary.failed.len()
    );
    for (title, reason) in &summary.failed {
        println!("  [!] {}: {}", title, reason);
    }
}
