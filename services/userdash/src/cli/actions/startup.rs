//! Startup banner and configuration summary shared by every action.

use tracing::info;
use url::Url;

/// Logs the banner followed by aligned `key: value` entries.
pub(crate) fn log_entries(title: &str, entries: &[(&str, String)]) {
    let max_key_len = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    let mut message = format!("{}\n\n{title}:", banner());
    for (key, value) in entries {
        let padding = " ".repeat(max_key_len.saturating_sub(key.len()));
        let _ =
            std::fmt::Write::write_fmt(&mut message, format_args!("\n  {key}:{padding} {value}"));
    }
    info!("{message}");
}

/// Hides the password of a connection string before it reaches the logs.
pub(crate) fn redact_dsn(dsn: &str) -> String {
    match Url::parse(dsn) {
        Ok(mut parsed) => {
            if parsed.password().is_some() {
                let _ = parsed.set_password(Some("REDACTED"));
            }
            parsed.to_string()
        }
        Err(_) => "invalid-dsn".to_string(),
    }
}

fn banner() -> String {
    let short_hash = short_commit(crate::GIT_COMMIT_HASH);
    USERDASH_BANNER.replace(
        "{VERSION}",
        &format!(" - {} - {}", env!("CARGO_PKG_VERSION"), short_hash),
    )
}

fn short_commit(hash: &str) -> String {
    hash.trim().chars().take(7).collect()
}

const USERDASH_BANNER: &str = r"
  +--------+
  |  o  o  |
  |   __   |   U S E R D A S H {VERSION}
  +--------+";
