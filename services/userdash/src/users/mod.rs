//! The user directory: page math, API models and the Postgres repository.

pub mod models;
pub mod repo;

pub use models::{NewUser, PageQuery, PageRequest, User, UsersPage};
