//! `dripdl list` – show entitled releases without downloading.

use anyhow::{Context, Result};
use dripdl_core::catalog;
use dripdl_core::config::DripConfig;
use dripdl_core::prompt;

use super::login::connect;
use crate::cli::{interactive, AccountArgs};

pub fn run_list(cfg: &DripConfig, account: &AccountArgs) -> Result<()> {
    let mut console = prompt::stdio();
    let mut session = connect(cfg, account, &mut console)?;
    let mode = interactive::catalog_mode(&mut console, account, session.user())?;
    let releases = catalog::list_entitled_releases(&mut session, &mode)
        .context("could not list your releases")?;

    if releases.is_empty() {
        println!("No releases available.");
        return Ok(());
    }
    println!("{:<8} {:<24} {:<24} {}", "ID", "LABEL", "ARTIST", "TITLE");
    for r in &releases {
        println!(
            "{:<8} {:<24} {:<24} {}",
            r.id, r.creative.service_name, r.artist, r.title
        );
    }
    Ok(())
}
