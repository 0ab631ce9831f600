//! The users list feature: wire types, card view model, list state and the
//! API client.

pub(crate) mod card;
#[cfg(target_arch = "wasm32")]
pub(crate) mod client;
pub(crate) mod format;
pub(crate) mod state;
pub(crate) mod types;
