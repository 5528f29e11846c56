//! `dripdl labels` – show the account's label subscriptions.

use anyhow::Result;
use dripdl_core::config::DripConfig;
use dripdl_core::prompt;

use super::login::connect;
use crate::cli::AccountArgs;

pub fn run_labels(cfg: &DripConfig, account: &AccountArgs) -> Result<()> {
    let mut console = prompt::stdio();
    let session = connect(cfg, account, &mut console)?;
    let memberships = &session.user().memberships;

    if memberships.is_empty() {
        println!("No label subscriptions.");
    } else {
        println!("{:<24} {}", "SLUG", "LABEL");
        for m in memberships {
            println!("{:<24} {}", m.creative.slug, m.creative.service_name);
        }
    }
    Ok(())
}
