use crate::{api, cli::actions::startup, users::repo};
use anyhow::{Context, Result};

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub dsn: String,
}

/// Execute the server action
/// # Errors
/// Returns an error if the database is unreachable or the listener fails to bind.
pub async fn execute(args: Args) -> Result<()> {
    startup::log_entries(
        "Startup configuration",
        &[
            ("Port", args.port.to_string()),
            ("DSN", startup::redact_dsn(&args.dsn)),
        ],
    );

    let pool = repo::connect(&args.dsn)
        .await
        .context("Failed to connect to database")?;

    repo::ensure_schema(&pool)
        .await
        .context("Failed to apply database schema")?;

    api::new(args.port, pool).await
}
