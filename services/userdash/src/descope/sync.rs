//! Copy Descope users into the `users` table.

use crate::{
    descope::{DescopeClient, client::user_id, email::extract_email, error::Result},
    users::{NewUser, repo},
};
use chrono::{DateTime, NaiveDateTime};
use serde_json::{Value, json};
use sqlx::PgPool;
use std::future::Future;
use tracing::{error, info};

/// `createdTime` values above this are milliseconds.
const MILLIS_THRESHOLD: i64 = 100_000_000_000;

/// Users without an email kept in [`DataQuality::email_less_sample`].
pub const EMAIL_LESS_SAMPLE: usize = 5;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub total_processed: usize,
    pub synced: usize,
    pub errors: usize,
    pub emails_from_login: usize,
    pub quality: DataQuality,
}

/// Gaps in the stored users, counted over the ones that were synced.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DataQuality {
    pub without_email: usize,
    pub without_country: usize,
    pub without_roles: usize,
    /// The fields email extraction looks at, for the first users it failed on.
    pub email_less_sample: Vec<Value>,
}

impl DataQuality {
    /// Gaps of a single user.
    fn of(user: &NewUser) -> Self {
        Self {
            without_email: usize::from(user.email.is_none()),
            without_country: usize::from(user.country.is_none()),
            without_roles: usize::from(user.user_roles.is_none()),
            email_less_sample: if user.email.is_none() {
                vec![email_fields(&user.raw_data)]
            } else {
                Vec::new()
            },
        }
    }

    fn merge(&mut self, other: Self) {
        self.without_email += other.without_email;
        self.without_country += other.without_country;
        self.without_roles += other.without_roles;
        let room = EMAIL_LESS_SAMPLE.saturating_sub(self.email_less_sample.len());
        self.email_less_sample
            .extend(other.email_less_sample.into_iter().take(room));
    }
}

/// Share of `count` in `total` as a percentage, 0 for an empty run.
#[must_use]
pub fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let share = count as f64 / total as f64;
    share * 100.0
}

fn email_fields(payload: &Value) -> Value {
    let field = |key: &str, default: Value| payload.get(key).cloned().unwrap_or(default);
    json!({
        "userId": field("userId", Value::Null),
        "loginIds": field("loginIds", json!([])),
        "email": field("email", Value::Null),
        "name": field("name", json!({})),
        "customAttributes": field("customAttributes", json!({})),
    })
}

/// Fetch every Descope user and upsert it.
/// # Errors
/// Returns an error only if fetching from Descope fails; per-user failures are counted.
pub async fn run(client: &DescopeClient, pool: &PgPool, page_size: u32) -> Result<SyncReport> {
    let users = client.fetch_all_users(page_size).await?;

    Ok(sync_users(&users, |user| async move { repo::upsert_user(pool, &user).await }).await)
}

/// Map and store each user with `store`, counting outcomes.
pub async fn sync_users<F, Fut>(users: &[Value], mut store: F) -> SyncReport
where
    F: FnMut(NewUser) -> Fut,
    Fut: Future<Output = std::result::Result<bool, sqlx::Error>>,
{
    let mut report = SyncReport {
        total_processed: users.len(),
        ..SyncReport::default()
    };

    for payload in users {
        let Some(user) = map_user(payload) else {
            report.errors += 1;
            error!("Error syncing user: missing userId");
            continue;
        };

        let derived = payload
            .get("email")
            .and_then(Value::as_str)
            .is_none_or(str::is_empty)
            && user.email.is_some();
        let login_id = user.login_id.clone();
        let gaps = DataQuality::of(&user);

        match store(user).await {
            Ok(_) => {
                report.synced += 1;
                report.quality.merge(gaps);
                if derived {
                    report.emails_from_login += 1;
                }
                if report.synced % 1000 == 0 {
                    info!(
                        "Progress: {} users processed. Found {} emails in login IDs.",
                        report.synced, report.emails_from_login
                    );
                }
            }
            Err(err) => {
                report.errors += 1;
                error!("Error syncing user {login_id}: {err}");
            }
        }
    }

    report
}

/// Translate a Descope payload into a row. `None` when it carries no user id.
#[must_use]
pub fn map_user(payload: &Value) -> Option<NewUser> {
    let login_id = user_id(payload)?.to_string();
    let email = Some(extract_email(payload)).filter(|email| !email.is_empty());

    if payload.is_string() {
        return Some(NewUser {
            raw_data: json!({ "userId": login_id }),
            login_id,
            email,
            created_time: None,
            country: None,
            user_roles: None,
        });
    }

    let custom = payload.get("customAttributes");
    let country = custom
        .and_then(|attrs| attrs.get("country"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|country| !country.is_empty())
        .map(str::to_string);

    Some(NewUser {
        login_id,
        email,
        created_time: payload.get("createdTime").and_then(created_time),
        country,
        user_roles: user_roles(payload),
        raw_data: payload.clone(),
    })
}

/// `customAttributes.userRoles` (string, or list joined with `", "`), else
/// `roleNames` joined with `,`.
fn user_roles(payload: &Value) -> Option<String> {
    let joined = |values: &Vec<Value>, separator: &str| {
        values
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(separator)
    };

    let roles = match payload
        .get("customAttributes")
        .and_then(|attrs| attrs.get("userRoles"))
    {
        Some(Value::String(roles)) => roles.clone(),
        Some(Value::Array(roles)) => joined(roles, ", "),
        _ => payload
            .get("roleNames")
            .and_then(Value::as_array)
            .map(|roles| joined(roles, ","))
            .unwrap_or_default(),
    };

    (!roles.trim().is_empty()).then_some(roles)
}

fn created_time(value: &Value) -> Option<NaiveDateTime> {
    let raw = value
        .as_i64()
        .or_else(|| value.as_f64().map(|secs| secs as i64))?;
    let seconds = if raw > MILLIS_THRESHOLD {
        raw / 1000
    } else {
        raw
    };
    (seconds > 0)
        .then(|| DateTime::from_timestamp(seconds, 0))
        .flatten()
        .map(|dt| dt.naive_utc())
}
