//! Domain-level frontend features and their shared logic. Routes import these
//! modules to keep view code focused on markup.

pub(crate) mod users;
