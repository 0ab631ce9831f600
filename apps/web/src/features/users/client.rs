//! Client helper for the users endpoint. The path is built in one place so the
//! route only deals with page numbers.

use crate::{
    app_lib::{AppError, get_json},
    features::users::types::{UsersPage, users_path},
};

/// Fetches one page of users.
pub async fn list_users(page: u32, per_page: u32) -> Result<UsersPage, AppError> {
    get_json(&users_path(page, per_page)).await
}
