use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PER_PAGE: i64 = 20;
pub const MAX_PER_PAGE: i64 = 1000;

/// One user as exposed by the API. `raw_data` stays in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: i64,
    pub login_id: String,
    pub email: Option<String>,
    pub created_time: Option<NaiveDateTime>,
    pub country: Option<String>,
    pub user_roles: Option<String>,
    pub last_sync: Option<NaiveDateTime>,
}

/// A user as written by the sync job, keyed by `login_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub login_id: String,
    pub email: Option<String>,
    pub created_time: Option<NaiveDateTime>,
    pub country: Option<String>,
    pub user_roles: Option<String>,
    pub raw_data: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UsersPage {
    pub users: Vec<User>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

/// Raw query string. Values stay strings so junk falls back to the defaults
/// instead of rejecting the request.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// 1-based page number (default 1)
    pub page: Option<String>,
    /// Users per page (default 20, max 1000)
    pub per_page: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub per_page: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl PageRequest {
    #[must_use]
    pub fn from_query(query: &PageQuery) -> Self {
        let page = parse_or(query.page.as_deref(), DEFAULT_PAGE).max(1);
        let per_page = match parse_or(query.per_page.as_deref(), DEFAULT_PER_PAGE) {
            n if n < 1 => DEFAULT_PER_PAGE,
            n => n.min(MAX_PER_PAGE),
        };
        Self { page, per_page }
    }

    #[must_use]
    pub const fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    /// Ceiling of `total / per_page`, zero for an empty directory.
    #[must_use]
    pub const fn total_pages(&self, total: i64) -> i64 {
        if total <= 0 {
            return 0;
        }
        (total + self.per_page - 1) / self.per_page
    }
}

fn parse_or(value: Option<&str>, default: i64) -> i64 {
    value
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<&str>, per_page: Option<&str>) -> PageQuery {
        PageQuery {
            page: page.map(str::to_string),
            per_page: per_page.map(str::to_string),
        }
    }

    #[test]
    fn defaults_when_absent() {
        assert_eq!(
            PageRequest::from_query(&PageQuery::default()),
            PageRequest::default()
        );
    }

    #[test]
    fn junk_falls_back_to_defaults() {
        let request = PageRequest::from_query(&query(Some("two"), Some("lots")));
        assert_eq!(request.page, DEFAULT_PAGE);
        assert_eq!(request.per_page, DEFAULT_PER_PAGE);
    }

    #[test]
    fn clamps_out_of_range_values() {
        let request = PageRequest::from_query(&query(Some("0"), Some("-5")));
        assert_eq!(request, PageRequest { page: 1, per_page: 20 });

        let request = PageRequest::from_query(&query(Some("-3"), Some("5000")));
        assert_eq!(request, PageRequest { page: 1, per_page: 1000 });
    }

    #[test]
    fn keeps_valid_values() {
        let request = PageRequest::from_query(&query(Some("3"), Some(" 50 ")));
        assert_eq!(request, PageRequest { page: 3, per_page: 50 });
        assert_eq!(request.offset(), 100);
    }

    #[test]
    fn offset_does_not_overflow() {
        let request = PageRequest {
            page: i64::MAX,
            per_page: MAX_PER_PAGE,
        };
        assert_eq!(request.offset(), i64::MAX);
    }

    #[test]
    fn total_pages_is_a_ceiling() {
        let request = PageRequest { page: 1, per_page: 50 };
        assert_eq!(request.total_pages(0), 0);
        assert_eq!(request.total_pages(1), 1);
        assert_eq!(request.total_pages(50), 1);
        assert_eq!(request.total_pages(51), 2);
        assert_eq!(request.total_pages(120), 3);
    }

    #[test]
    fn user_serializes_without_raw_data() -> Result<(), serde_json::Error> {
        let user = User {
            id: 7,
            login_id: "U2abc".to_string(),
            email: None,
            created_time: chrono::NaiveDate::from_ymd_opt(2024, 1, 15)
                .and_then(|d| d.and_hms_opt(10, 30, 0)),
            country: Some("DE".to_string()),
            user_roles: Some("admin,viewer".to_string()),
            last_sync: None,
        };
        let value = serde_json::to_value(&user)?;
        assert_eq!(value["created_time"], "2024-01-15T10:30:00");
        assert!(value["email"].is_null());
        assert!(value.get("raw_data").is_none());
        Ok(())
    }
}
