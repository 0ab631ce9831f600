use crate::cli::{
    actions::{Action, server, sync},
    commands::{self, descope},
};
use anyhow::{Context, Result, bail};
use secrecy::SecretString;

/// # Errors
/// Returns an error if required arguments are missing or no subcommand was given.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    match matches.subcommand() {
        Some((commands::CMD_SERVER, sub_m)) => server_args(sub_m).map(Action::Server),
        Some((commands::CMD_SYNC, sub_m)) => sync_args(sub_m).map(Action::Sync),
        Some((other, _)) => bail!("unknown subcommand: {other}"),
        None => bail!("missing subcommand"),
    }
}

fn dsn(matches: &clap::ArgMatches) -> Result<String> {
    matches
        .get_one::<String>(commands::ARG_DSN)
        .cloned()
        .context("missing required argument: --dsn")
}

fn server_args(matches: &clap::ArgMatches) -> Result<server::Args> {
    let port = matches
        .get_one::<u16>(commands::ARG_PORT)
        .copied()
        .unwrap_or(commands::DEFAULT_PORT);

    Ok(server::Args {
        port,
        dsn: dsn(matches)?,
    })
}

fn sync_args(matches: &clap::ArgMatches) -> Result<sync::Args> {
    let project_id = matches
        .get_one::<String>(descope::ARG_PROJECT_ID)
        .cloned()
        .context("missing required argument: --descope-project-id")?;
    let management_key = matches
        .get_one::<String>(descope::ARG_MANAGEMENT_KEY)
        .cloned()
        .map(SecretString::from)
        .context("missing required argument: --descope-management-key")?;
    let base_url = matches
        .get_one::<String>(descope::ARG_BASE_URL)
        .cloned()
        .unwrap_or_else(|| descope::DEFAULT_BASE_URL.to_string());
    let page_size = matches
        .get_one::<u32>(descope::ARG_PAGE_SIZE)
        .copied()
        .unwrap_or(100);

    Ok(sync::Args {
        dsn: dsn(matches)?,
        project_id,
        management_key,
        base_url,
        page_size,
    })
}
