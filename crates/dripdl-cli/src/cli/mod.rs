//! CLI for dripdl, the label-subscription archive downloader.

mod commands;
mod interactive;

use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::{Args, Parser, Subcommand};
use dripdl_core::config;
use dripdl_core::pipeline::FORMATS;
use std::path::PathBuf;

use commands::{run_fetch, run_labels, run_list};

/// Top-level CLI. Without a subcommand, downloads every entitled release.
#[derive(Debug, Parser)]
#[command(name = "dripdl")]
#[command(
    about = "dripdl: download every release your label subscriptions entitle you to",
    long_about = None
)]
pub struct Cli {
    #[command(flatten)]
    pub account: AccountArgs,

    #[command(flatten)]
    pub fetch: FetchArgs,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

/// Login and catalog selection, accepted before or after a subcommand.
#[derive(Debug, Clone, Default, Args)]
pub struct AccountArgs {
    /// Account email (asked if missing).
    #[arg(long, global = true, value_name = "EMAIL")]
    pub email: Option<String>,

    /// Account password (asked if missing).
    #[arg(long, global = true, env = "DRIP_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Only list releases of the label with this slug.
    #[arg(long, global = true, value_name = "SLUG", conflicts_with = "paginated")]
    pub label: Option<String>,

    /// Walk the account-wide release feed page by page.
    #[arg(long, global = true)]
    pub paginated: bool,
}

/// Per-run download choices. Anything left out is asked once up front.
#[derive(Debug, Clone, Default, Args)]
pub struct FetchArgs {
    /// Preferred archive format.
    #[arg(long, value_parser = PossibleValuesParser::new(FORMATS))]
    pub format: Option<String>,

    /// Expand each archive and delete the zip afterwards.
    #[arg(long, conflicts_with = "no_unpack")]
    pub unpack: bool,

    /// Keep the zip archives as downloaded.
    #[arg(long)]
    pub no_unpack: bool,

    /// Ask before downloading each release.
    #[arg(long)]
    pub confirm_each: bool,

    /// Download directory (default: current directory).
    #[arg(long, value_name = "PATH")]
    pub dir: Option<PathBuf>,
}

impl FetchArgs {
    /// `Some` when `--unpack` or `--no-unpack` was given.
    pub fn unpack_choice(&self) -> Option<bool> {
        match (self.unpack, self.no_unpack) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Download all entitled releases (the default).
    Fetch,

    /// List entitled releases without downloading.
    List,

    /// Show the labels the account is subscribed to.
    Labels,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command.unwrap_or(CliCommand::Fetch) {
            CliCommand::Fetch => run_fetch(&cfg, &cli.account, &cli.fetch)?,
            CliCommand::List => run_list(&cfg, &cli.account)?,
            CliCommand::Labels => run_labels(&cfg, &cli.account)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
