//! `GET /api/users`: one page of the user directory.

use crate::users::{PageQuery, PageRequest, UsersPage, repo};
use axum::{
    Json,
    extract::{Extension, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{debug, error};
use utoipa::ToSchema;

pub const FETCH_FAILED: &str = "Failed to fetch users";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug)]
pub enum UsersError {
    Database(sqlx::Error),
}

impl IntoResponse for UsersError {
    fn into_response(self) -> Response {
        match self {
            Self::Database(err) => {
                error!("Failed to fetch users: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        error: FETCH_FAILED.to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/users",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of users, newest first.", body = UsersPage),
        (status = 500, description = "Database error.", body = ErrorBody),
    ),
    tag = "users"
)]
pub async fn list_users(
    Query(query): Query<PageQuery>,
    pool: Extension<PgPool>,
) -> Result<Json<UsersPage>, UsersError> {
    let request = PageRequest::from_query(&query);
    debug!(page = request.page, per_page = request.per_page, "listing users");

    repo::fetch_page(&pool.0, request)
        .await
        .map(Json)
        .map_err(UsersError::Database)
}
