//! # Userdash (User Directory API)
//!
//! `userdash` backs the user dashboard. It serves one page of the user directory
//! at a time over HTTP and keeps that directory filled from the Descope identity
//! provider.
//!
//! ## Serving
//!
//! `userdash server` answers `GET /api/users?page=&per_page=` with a JSON envelope
//! (`users`, `total`, `page`, `per_page`, `total_pages`). Records are ordered by
//! creation time, newest first, with users lacking a creation time at the end.
//! The raw provider payload stored alongside each user is never exposed.
//!
//! ## Sync
//!
//! `userdash sync` pages through the Descope management API, derives an email
//! address for users that do not carry one, and upserts every user by login id.
//! Failures on a single user are counted and logged; the run keeps going.
//!
//! ## Schema
//!
//! The `users` table is defined in `db/sql/01_users.sql` and applied at startup,
//! so both subcommands work against an empty database.

pub mod api;
pub mod cli;
pub mod descope;
pub mod users;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
