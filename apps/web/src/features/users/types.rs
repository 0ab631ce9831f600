use serde::{Deserialize, Serialize};

/// One user record as served by `GET /api/users`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub login_id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub created_time: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub user_roles: Option<String>,
    #[serde(default)]
    pub last_sync: Option<String>,
}

/// Paginated envelope. `total_pages` is kept verbatim from the server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsersPage {
    pub users: Vec<User>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
}

/// Request path for one page of users.
pub fn users_path(page: u32, per_page: u32) -> String {
    format!("/api/users?page={page}&per_page={per_page}")
}
