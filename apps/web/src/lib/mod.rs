//! Shared frontend utilities for API access, configuration, errors, and build metadata.
//!
//! The dashboard talks to a single read-only endpoint, `GET /api/users`, on the
//! configured API base URL. Requests carry no credentials. Every request is
//! bounded by an abort timeout so a stalled backend never leaves the loading
//! indicator up forever.

#[cfg(target_arch = "wasm32")]
pub(crate) mod api;
pub(crate) mod build_info;
pub(crate) mod config;
pub(crate) mod errors;
#[cfg(target_arch = "wasm32")]
pub(crate) mod theme;

#[cfg(target_arch = "wasm32")]
pub(crate) use api::get_json;
pub(crate) use errors::AppError;
