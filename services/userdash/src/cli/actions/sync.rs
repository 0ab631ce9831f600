use crate::{
    cli::actions::startup,
    descope::{
        DescopeClient,
        sync::{self, SyncReport, percent},
    },
    users::repo,
};
use anyhow::{Context, Result};
use secrecy::SecretString;
use tracing::{info, warn};

#[derive(Debug)]
pub struct Args {
    pub dsn: String,
    pub project_id: String,
    pub management_key: SecretString,
    pub base_url: String,
    pub page_size: u32,
}

/// Execute the sync action
/// # Errors
/// Returns an error if the database is unreachable or Descope rejects the search.
pub async fn execute(args: Args) -> Result<()> {
    startup::log_entries(
        "Sync configuration",
        &[
            ("DSN", startup::redact_dsn(&args.dsn)),
            ("Descope URL", args.base_url.clone()),
            ("Project", args.project_id.clone()),
            ("Page size", args.page_size.to_string()),
        ],
    );

    let pool = repo::connect(&args.dsn)
        .await
        .context("Failed to connect to database")?;

    repo::ensure_schema(&pool)
        .await
        .context("Failed to apply database schema")?;

    let client = DescopeClient::new(&args.base_url, args.project_id, args.management_key)
        .context("Failed to build Descope client")?;

    let report = sync::run(&client, &pool, args.page_size)
        .await
        .context("Failed to fetch users from Descope")?;

    info!(
        total_processed = report.total_processed,
        synced = report.synced,
        errors = report.errors,
        emails_from_login = report.emails_from_login,
        "Descope sync finished"
    );
    log_data_quality(&report);

    Ok(())
}

fn log_data_quality(report: &SyncReport) {
    let total = report.synced;
    let quality = &report.quality;

    info!(
        "Data quality: {} synced users, {} without email ({:.1}%), {} without country ({:.1}%), {} without roles ({:.1}%)",
        total,
        quality.without_email,
        percent(quality.without_email, total),
        quality.without_country,
        percent(quality.without_country, total),
        quality.without_roles,
        percent(quality.without_roles, total),
    );

    if !quality.email_less_sample.is_empty() {
        match serde_json::to_string_pretty(&quality.email_less_sample) {
            Ok(sample) => info!("Sample of users without email:\n{sample}"),
            Err(err) => warn!("Failed to render users without email: {err}"),
        }
    }
}
