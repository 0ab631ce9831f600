//! User route group re-exported by the top-level routing module.

mod card;
mod list;

pub(crate) use list::UsersListPage;
