//! Up-front questions for whatever the command line left open.

use anyhow::{bail, Result};
use console::Term;
use dripdl_core::catalog::CatalogMode;
use dripdl_core::model::User;
use dripdl_core::pipeline::{DownloadSettings, FORMATS};
use dripdl_core::prompt::{LinePrompt, Prompt};
use dripdl_core::session::Credentials;
use std::io::{BufRead, Write};

use super::{AccountArgs, FetchArgs};

/// Label choice meaning "walk the whole account feed".
pub const ALL_LABELS: &str = "all";

fn ask_non_empty<R: BufRead, W: Write>(prompt: &mut LinePrompt<R, W>, question: &str) -> Result<String> {
    loop {
        let answer = prompt.ask(question)?;
        if !answer.is_empty() {
            return Ok(answer);
        }
    }
}

/// Reads the password from the terminal without echoing it.
pub fn read_password() -> Result<String> {
    let term = Term::stderr();
    if !term.is_term() {
        bail!("no terminal to read the password from; use --password or DRIP_PASSWORD");
    }
    term.write_str("Password: ")?;
    Ok(term.read_secure_line()?)
}

/// Flags first, then the prompt. A missing password comes from `read_secret`.
pub fn credentials<R, W, F>(
    prompt: &mut LinePrompt<R, W>,
    account: &AccountArgs,
    mut read_secret: F,
) -> Result<Credentials>
where
    R: BufRead,
    W: Write,
    F: FnMut() -> Result<String>,
{
    let email = match &account.email {
        Some(email) => email.clone(),
        None => ask_non_empty(prompt, "Email")?,
    };
    let password = match &account.password {
        Some(password) => password.clone(),
        None => loop {
            let secret = read_secret()?;
            if !secret.is_empty() {
                break secret;
            }
        },
    };
    Ok(Credentials::new(email, password))
}

/// `--label` wins, then `--paginated`; otherwise the operator picks one of
/// the user's labels or the whole feed.
pub fn catalog_mode<P: Prompt>(prompt: &mut P, account: &AccountArgs, user: &User) -> Result<CatalogMode> {
    if let Some(slug) = &account.label {
        return Ok(CatalogMode::LabelScoped { slug: slug.clone() });
    }
    if account.paginated {
        return Ok(CatalogMode::Paginated);
    }

    let mut choices = vec![ALL_LABELS.to_string()];
    choices.extend(
        user.memberships
            .iter()
            .map(|m| m.creative.slug.clone())
            .filter(|slug| !slug.is_empty() && slug != ALL_LABELS),
    );
    if choices.len() == 1 {
        return Ok(CatalogMode::Paginated);
    }

    let choice = prompt.choose("Which label should be downloaded? (all = every subscription)", &choices)?;
    if choice == ALL_LABELS {
        Ok(CatalogMode::Paginated)
    } else {
        Ok(CatalogMode::LabelScoped { slug: choice })
    }
}

/// Format from `--format`, then the config default, then the prompt.
pub fn download_settings<P: Prompt>(
    prompt: &mut P,
    args: &FetchArgs,
    default_format: Option<&str>,
) -> Result<DownloadSettings> {
    let configured = default_format.filter(|f| {
        let known = FORMATS.contains(f);
        if !known {
            tracing::warn!(format = f, "ignoring unknown default_format from config");
        }
        known
    });
    let format = match (&args.format, configured) {
        (Some(format), _) => format.clone(),
        (None, Some(format)) => format.to_string(),
        (None, None) => {
            let formats: Vec<String> = FORMATS.iter().map(|f| f.to_string()).collect();
            prompt.choose("Preferred format", &formats)?
        }
    };

    if format == "aiff" {
        prompt.notice("FLAC is superior, you Apple loving hipster. But AIFF it is.");
    }

    let unpack = match args.unpack_choice() {
        Some(unpack) => unpack,
        None => prompt.confirm("Unpack the archives after download?")?,
    };

    Ok(DownloadSettings::new(format, unpack).confirm_each(args.confirm_each))
}
