use super::{
    format::{NO_EMAIL, NOT_AVAILABLE, format_date, or_placeholder, split_roles},
    types::User,
};

/// Everything a user card renders, with placeholders already applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserCard {
    pub id: i64,
    pub title: String,
    pub roles: Vec<String>,
    pub login_id: String,
    pub country: String,
    pub created: Option<String>,
    pub last_sync: Option<String>,
}

impl From<&User> for UserCard {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            title: or_placeholder(user.email.as_deref(), NO_EMAIL),
            roles: user
                .user_roles
                .as_deref()
                .map(split_roles)
                .unwrap_or_default(),
            login_id: or_placeholder(Some(user.login_id.as_str()), NOT_AVAILABLE),
            country: or_placeholder(user.country.as_deref(), NOT_AVAILABLE),
            created: user.created_time.as_deref().and_then(format_date),
            last_sync: user.last_sync.as_deref().and_then(format_date),
        }
    }
}
