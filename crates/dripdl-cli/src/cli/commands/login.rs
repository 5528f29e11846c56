//! Shared login step: build the transport, get credentials, greet.

use anyhow::{Context, Result};
use dripdl_core::config::DripConfig;
use dripdl_core::prompt::LinePrompt;
use dripdl_core::session::SessionClient;
use dripdl_core::transport::CurlTransport;
use std::io::{BufRead, Write};

use crate::cli::{interactive, AccountArgs};

pub fn connect<R: BufRead, W: Write>(
    cfg: &DripConfig,
    account: &AccountArgs,
    prompt: &mut LinePrompt<R, W>,
) -> Result<SessionClient<CurlTransport>> {
    let transport = CurlTransport::new(&cfg.base_url)
        .with_context(|| format!("invalid base_url {:?} in config", cfg.base_url))?
        .with_timeouts(cfg.connect_timeout(), cfg.timeout());

    tracing::debug!(base_url = %transport.base_url(), "connecting");

    let credentials = interactive::credentials(prompt, account, interactive::read_password)?;
    let email = credentials.email().to_string();
    let session = SessionClient::login(transport, credentials)
        .with_context(|| format!("could not log in as {}", email))?;

    println!("Hi, {}! :)", session.user().display_name());
    Ok(session)
}
