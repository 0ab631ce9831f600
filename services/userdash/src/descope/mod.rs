//! Descope management API: user search, email derivation and the sync job.

pub mod client;
pub mod email;
pub mod error;
pub mod sync;

pub use client::DescopeClient;
pub use error::DescopeError;
pub use sync::SyncReport;
