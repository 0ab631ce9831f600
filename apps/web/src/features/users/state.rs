//! Local state of the users list: current page, counters, records and the
//! loading/error flags. Kept free of Leptos so the transitions are testable
//! natively; the route wraps it in a signal.

use super::types::{User, UsersPage};
use crate::app_lib::AppError;

/// Records requested per page.
pub const PER_PAGE: u32 = 50;

/// The only failure text shown to users; details go to the console.
pub const FETCH_FAILED: &str = "Failed to fetch users";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserListState {
    page: u32,
    total_pages: u32,
    total_users: u64,
    users: Vec<User>,
    loading: bool,
    error: Option<&'static str>,
}

/// What the list area shows.
#[derive(Debug, PartialEq, Eq)]
pub enum ListView<'a> {
    Loading,
    Failed(&'static str),
    Ready(&'a [User]),
}

impl Default for UserListState {
    fn default() -> Self {
        Self::new()
    }
}

impl UserListState {
    /// Page 1 of 1, nothing loaded yet, loading.
    pub fn new() -> Self {
        Self {
            page: 1,
            total_pages: 1,
            total_users: 0,
            users: Vec::new(),
            loading: true,
            error: None,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn begin_fetch(&mut self) {
        self.loading = true;
    }

    /// Settle the outstanding request. A failure keeps the previous records.
    pub fn apply(&mut self, result: Result<UsersPage, AppError>) {
        match result {
            Ok(page) => {
                self.users = page.users;
                self.total_pages = page.total_pages;
                self.total_users = page.total;
                self.error = None;
            }
            Err(_) => {
                self.error = Some(FETCH_FAILED);
            }
        }
        self.loading = false;
    }

    pub fn can_previous(&self) -> bool {
        self.page > 1
    }

    pub fn can_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Step back one page; `false` when already on page 1.
    pub fn previous(&mut self) -> bool {
        if self.can_previous() {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Step forward one page; `false` when already on the last page.
    pub fn next(&mut self) -> bool {
        if self.can_next() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    pub fn view(&self) -> ListView<'_> {
        if self.loading {
            ListView::Loading
        } else if let Some(message) = self.error {
            ListView::Failed(message)
        } else {
            ListView::Ready(&self.users)
        }
    }

    pub fn total_label(&self) -> String {
        format!("Total Users: {}", self.total_users)
    }

    pub fn showing_label(&self) -> String {
        format!("Showing {} users per page", self.users.len())
    }

    pub fn page_label(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::users::card::UserCard;

    fn user(id: i64, roles: &str) -> User {
        User {
            id,
            login_id: format!("U{id}"),
            email: Some(format!("user{id}@example.com")),
            created_time: None,
            country: None,
            user_roles: Some(roles.to_string()),
            last_sync: None,
        }
    }

    fn page(page: u32, total: u64, total_pages: u32, users: Vec<User>) -> UsersPage {
        UsersPage {
            users,
            total,
            page,
            per_page: PER_PAGE,
            total_pages,
        }
    }

    fn loaded(total: u64, total_pages: u32, users: Vec<User>) -> UserListState {
        let mut state = UserListState::new();
        state.apply(Ok(page(1, total, total_pages, users)));
        state
    }

    #[test]
    fn starts_loading_on_page_one() {
        let state = UserListState::new();
        assert_eq!(state.page(), 1);
        assert_eq!(state.page_label(), "Page 1 of 1");
        assert_eq!(state.total_label(), "Total Users: 0");
        assert_eq!(state.view(), ListView::Loading);
        assert!(!state.can_previous());
        assert!(!state.can_next());
    }

    #[test]
    fn first_of_three_pages() {
        let state = loaded(120, 3, vec![user(1, "")]);
        assert!(!state.can_previous());
        assert!(state.can_next());
    }

    #[test]
    fn last_page_disables_next() {
        let mut state = loaded(120, 3, vec![user(1, "")]);
        assert!(state.next());
        assert!(state.next());
        assert_eq!(state.page(), 3);
        assert!(!state.can_next());
        assert!(state.can_previous());
        assert!(!state.next());
        assert_eq!(state.page(), 3);
    }

    #[test]
    fn previous_is_clamped_at_one() {
        let mut state = loaded(120, 3, Vec::new());
        assert!(!state.previous());
        assert_eq!(state.page(), 1);
        assert!(state.next());
        assert!(state.previous());
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn empty_directory() {
        let state = loaded(0, 0, Vec::new());
        assert_eq!(state.view(), ListView::Ready(&[]));
        assert_eq!(state.total_label(), "Total Users: 0");
        assert_eq!(state.showing_label(), "Showing 0 users per page");
        assert!(!state.can_next());
        assert_eq!(state.page_label(), "Page 1 of 0");
    }

    #[test]
    fn roles_become_badges_in_order() {
        let state = loaded(1, 1, vec![user(1, "admin,viewer")]);
        let ListView::Ready(users) = state.view() else {
            panic!("expected ready view");
        };
        let cards: Vec<UserCard> = users.iter().map(UserCard::from).collect();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].roles, vec!["admin", "viewer"]);
    }

    #[test]
    fn failure_shows_message_and_keeps_records() {
        let mut state = loaded(2, 1, vec![user(1, ""), user(2, "")]);
        state.begin_fetch();
        state.apply(Err(AppError::Network("offline".to_string())));

        assert_eq!(state.view(), ListView::Failed(FETCH_FAILED));
        assert_eq!(state.showing_label(), "Showing 2 users per page");
        assert_eq!(state.total_label(), "Total Users: 2");
    }

    #[test]
    fn success_clears_previous_error() {
        let mut state = UserListState::new();
        state.apply(Err(AppError::http(500, "boom")));
        assert_eq!(state.view(), ListView::Failed(FETCH_FAILED));

        state.begin_fetch();
        assert_eq!(state.view(), ListView::Loading);
        state.apply(Ok(page(1, 1, 1, vec![user(1, "")])));
        assert_eq!(state.view(), ListView::Ready(&[user(1, "")]));
    }

    #[test]
    fn total_pages_is_shown_verbatim() {
        let state = loaded(120, 3, Vec::new());
        assert_eq!(state.page_label(), "Page 1 of 3");
        assert_eq!(state.total_label(), "Total Users: 120");
    }

    #[test]
    fn showing_label_counts_records_on_page() {
        let users = (1..=50).map(|id| user(id, "")).collect();
        let state = loaded(120, 3, users);
        assert_eq!(state.showing_label(), "Showing 50 users per page");
    }
}
