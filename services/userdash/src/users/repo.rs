//! Postgres access for the `users` table.

use crate::users::models::{NewUser, PageRequest, User, UsersPage};
use sqlx::{PgPool, Row, postgres::PgPoolOptions};
use std::time::Duration;

const SCHEMA_SQL: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../db/sql/01_users.sql"
));

/// Connect the shared pool used by both the API and the sync job.
/// # Errors
/// Returns an error if the first connection cannot be established.
pub async fn connect(dsn: &str) -> Result<PgPool, sqlx::Error> {
    pool_options().connect(dsn).await
}

/// Like [`connect`] but defers dialing until the first query.
/// # Errors
/// Returns an error if the DSN cannot be parsed.
pub fn connect_lazy(dsn: &str) -> Result<PgPool, sqlx::Error> {
    pool_options().connect_lazy(dsn)
}

fn pool_options() -> PgPoolOptions {
    PgPoolOptions::new()
        .min_connections(1)
        .max_connections(5)
        .max_lifetime(Duration::from_secs(60 * 2))
        .test_before_acquire(true)
}

/// Apply `db/sql/01_users.sql`; every statement is idempotent.
/// # Errors
/// Returns an error if the schema cannot be applied.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA_SQL).execute(pool).await?;
    Ok(())
}

/// Fetch one page of users, newest first.
/// # Errors
/// Returns an error if either query fails.
pub async fn fetch_page(pool: &PgPool, request: PageRequest) -> Result<UsersPage, sqlx::Error> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    let query = r"
        SELECT id, login_id, email, created_time, country, user_roles, last_sync
        FROM users
        ORDER BY created_time DESC NULLS LAST, id DESC
        OFFSET $1
        LIMIT $2
    ";
    let rows = sqlx::query(query)
        .bind(request.offset())
        .bind(request.per_page)
        .fetch_all(pool)
        .await?;

    let users = rows
        .into_iter()
        .map(|row| {
            Ok(User {
                id: row.try_get("id")?,
                login_id: row.try_get("login_id")?,
                email: row.try_get("email")?,
                created_time: row.try_get("created_time")?,
                country: row.try_get("country")?,
                user_roles: row.try_get("user_roles")?,
                last_sync: row.try_get("last_sync")?,
            })
        })
        .collect::<Result<Vec<_>, sqlx::Error>>()?;

    Ok(UsersPage {
        users,
        total,
        page: request.page,
        per_page: request.per_page,
        total_pages: request.total_pages(total),
    })
}

/// Insert or refresh a user by `login_id`. A known `created_time` is never
/// overwritten. Returns `true` when the row was inserted.
/// # Errors
/// Returns an error if the statement fails.
pub async fn upsert_user(pool: &PgPool, user: &NewUser) -> Result<bool, sqlx::Error> {
    let query = r"
        INSERT INTO users (login_id, email, created_time, country, user_roles, raw_data, last_sync)
        VALUES ($1, $2, $3, $4, $5, $6, now() AT TIME ZONE 'utc')
        ON CONFLICT (login_id) DO UPDATE SET
            email = EXCLUDED.email,
            created_time = COALESCE(users.created_time, EXCLUDED.created_time),
            country = EXCLUDED.country,
            user_roles = EXCLUDED.user_roles,
            raw_data = EXCLUDED.raw_data,
            last_sync = EXCLUDED.last_sync
        RETURNING (xmax = 0) AS inserted
    ";
    let row = sqlx::query(query)
        .bind(&user.login_id)
        .bind(&user.email)
        .bind(user.created_time)
        .bind(&user.country)
        .bind(&user.user_roles)
        .bind(&user.raw_data)
        .fetch_one(pool)
        .await?;

    row.try_get("inserted")
}
