//! Minimal client for the Descope user search endpoint.

use crate::{
    APP_USER_AGENT,
    descope::error::{DescopeError, Result},
};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};
use std::{collections::HashSet, time::Duration};
use tracing::{debug, info, instrument, warn};
use url::Url;

const SEARCH_PATH: &str = "/v1/mgmt/user/search";

/// Upper bound on pages read in one run.
pub const MAX_PAGES: u32 = 1000;

pub struct DescopeClient {
    http: Client,
    search_url: Url,
    project_id: String,
    management_key: SecretString,
}

impl std::fmt::Debug for DescopeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DescopeClient")
            .field("search_url", &self.search_url.as_str())
            .field("project_id", &self.project_id)
            .finish_non_exhaustive()
    }
}

impl DescopeClient {
    /// # Errors
    /// Returns an error if `base_url` is not an http(s) URL or the HTTP client cannot be built.
    pub fn new(base_url: &str, project_id: String, management_key: SecretString) -> Result<Self> {
        let base = Url::parse(base_url).map_err(|e| DescopeError::InvalidUrl(e.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(DescopeError::InvalidUrl(format!(
                "unsupported scheme {}",
                base.scheme()
            )));
        }

        let search_url = base
            .join(SEARCH_PATH)
            .map_err(|e| DescopeError::InvalidUrl(e.to_string()))?;

        let http = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http,
            search_url,
            project_id,
            management_key,
        })
    }

    /// Request one page (0-based) of users.
    /// # Errors
    /// Returns an error on transport failures, non-success statuses, or a body without `users`.
    #[instrument(skip(self))]
    pub async fn search_page(&self, page: u32, limit: u32) -> Result<Vec<Value>> {
        let bearer = format!(
            "Bearer {}:{}",
            self.project_id,
            self.management_key.expose_secret()
        );

        let response = self
            .http
            .post(self.search_url.clone())
            .header(reqwest::header::AUTHORIZATION, bearer)
            .json(&json!({ "limit": limit, "page": page }))
            .send()
            .await?;

        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);

        if !status.is_success() {
            return Err(DescopeError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        match body.get("users") {
            Some(Value::Array(users)) => {
                debug!(count = users.len(), "search page received");
                Ok(users.clone())
            }
            Some(Value::Null) => Ok(Vec::new()),
            _ => Err(DescopeError::UnexpectedResponse(
                "missing `users` array".to_string(),
            )),
        }
    }

    /// Page through every user, dropping ids already seen.
    ///
    /// Stops on an empty page, a page that adds nothing new, a short page, or
    /// after [`MAX_PAGES`].
    /// # Errors
    /// Returns the first request error.
    pub async fn fetch_all_users(&self, page_size: u32) -> Result<Vec<Value>> {
        let mut seen = HashSet::new();
        let mut users = Vec::new();

        for page in 0..MAX_PAGES {
            let batch = self.search_page(page, page_size).await?;
            if batch.is_empty() {
                break;
            }

            let batch_len = batch.len();
            let mut new_users = 0_usize;
            for user in batch {
                let Some(id) = user_id(&user) else {
                    warn!("Skipping Descope user without userId");
                    continue;
                };
                if seen.insert(id.to_string()) {
                    users.push(user);
                    new_users += 1;
                }
            }

            info!(
                page,
                new_users,
                total = users.len(),
                "Fetched Descope users page"
            );

            if new_users == 0 || batch_len < page_size as usize {
                break;
            }
        }

        info!("Total unique users fetched: {}", users.len());

        Ok(users)
    }
}

/// `userId` of a user object, or the value itself when Descope returns bare ids.
#[must_use]
pub fn user_id(user: &Value) -> Option<&str> {
    let id = match user {
        Value::String(id) => Some(id.as_str()),
        Value::Object(fields) => fields.get("userId").and_then(Value::as_str),
        _ => None,
    };
    id.filter(|id| !id.is_empty())
}

fn error_message(body: &Value) -> String {
    ["errorDescription", "errorMessage"]
        .iter()
        .find_map(|key| body.get(key).and_then(Value::as_str))
        .filter(|message| !message.is_empty())
        .unwrap_or("unknown error")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::net::TcpListener;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, header, method, path},
    };

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn client(server: &MockServer) -> Result<DescopeClient> {
        Ok(DescopeClient::new(
            &server.uri(),
            "P2abc".to_string(),
            SecretString::from("K2secret".to_string()),
        )?)
    }

    fn users(ids: &[&str]) -> Value {
        json!({
            "users": ids
                .iter()
                .map(|id| json!({ "userId": id, "email": format!("{id}@example.com") }))
                .collect::<Vec<_>>()
        })
    }

    async fn mount_page(server: &MockServer, page: u32, limit: u32, body: Value) {
        Mock::given(method("POST"))
            .and(path(SEARCH_PATH))
            .and(header("Authorization", "Bearer P2abc:K2secret"))
            .and(body_json(json!({ "limit": limit, "page": page })))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    #[test]
    fn rejects_non_http_base_url() {
        let result = DescopeClient::new(
            "ftp://api.descope.com",
            "P2abc".to_string(),
            SecretString::from("K2secret".to_string()),
        );
        assert!(matches!(result, Err(DescopeError::InvalidUrl(_))));
    }

    #[test]
    fn debug_hides_management_key() -> Result<()> {
        let client = DescopeClient::new(
            "https://api.descope.com",
            "P2abc".to_string(),
            SecretString::from("K2secret".to_string()),
        )?;
        let rendered = format!("{client:?}");
        assert!(rendered.contains("https://api.descope.com/v1/mgmt/user/search"));
        assert!(!rendered.contains("K2secret"));
        Ok(())
    }

    #[test]
    fn user_id_accepts_objects_and_bare_strings() {
        assert_eq!(user_id(&json!({ "userId": "U1" })), Some("U1"));
        assert_eq!(user_id(&json!("U2")), Some("U2"));
        assert_eq!(user_id(&json!({ "userId": "" })), None);
        assert_eq!(user_id(&json!({ "email": "a@b.co" })), None);
        assert_eq!(user_id(&json!(42)), None);
    }

    #[tokio::test]
    async fn search_page_sends_bearer_and_paging() -> Result<()> {
        if !can_bind_localhost() {
            return Ok(());
        }
        let server = MockServer::start().await;
        mount_page(&server, 0, 2, users(&["U1", "U2"])).await;

        let page = client(&server)?.search_page(0, 2).await?;
        assert_eq!(page.len(), 2);
        assert_eq!(user_id(&page[0]), Some("U1"));
        Ok(())
    }

    #[tokio::test]
    async fn search_page_surfaces_api_errors() -> Result<()> {
        if !can_bind_localhost() {
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(SEARCH_PATH))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "errorCode": "E011003",
                "errorDescription": "Request is unauthorized"
            })))
            .mount(&server)
            .await;

        let err = client(&server)?.search_page(0, 10).await;
        match err {
            Err(DescopeError::Api { status, message }) => {
                assert_eq!(status, 401);
                assert_eq!(message, "Request is unauthorized");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn search_page_rejects_body_without_users() -> Result<()> {
        if !can_bind_localhost() {
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(SEARCH_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
            .mount(&server)
            .await;

        let err = client(&server)?.search_page(0, 10).await;
        assert!(matches!(err, Err(DescopeError::UnexpectedResponse(_))));
        Ok(())
    }

    #[tokio::test]
    async fn fetch_all_pages_until_empty_and_dedupes() -> Result<()> {
        if !can_bind_localhost() {
            return Ok(());
        }
        let server = MockServer::start().await;
        mount_page(&server, 0, 2, users(&["U1", "U2"])).await;
        mount_page(&server, 1, 2, users(&["U2", "U3"])).await;
        mount_page(&server, 2, 2, users(&[])).await;

        let all = client(&server)?.fetch_all_users(2).await?;
        let ids: Vec<_> = all.iter().filter_map(user_id).collect();
        assert_eq!(ids, vec!["U1", "U2", "U3"]);
        Ok(())
    }

    #[tokio::test]
    async fn fetch_all_stops_on_short_page() -> Result<()> {
        if !can_bind_localhost() {
            return Ok(());
        }
        let server = MockServer::start().await;
        mount_page(&server, 0, 2, users(&["U1", "U2"])).await;
        mount_page(&server, 1, 2, users(&["U3"])).await;
        Mock::given(method("POST"))
            .and(path(SEARCH_PATH))
            .and(body_json(json!({ "limit": 2, "page": 2 })))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let all = client(&server)?.fetch_all_users(2).await?;
        assert_eq!(all.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn fetch_all_stops_when_page_repeats() -> Result<()> {
        if !can_bind_localhost() {
            return Ok(());
        }
        let server = MockServer::start().await;
        // Descope ignoring `page` would return the same users forever.
        Mock::given(method("POST"))
            .and(path(SEARCH_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(users(&["U1", "U2"])))
            .expect(2)
            .mount(&server)
            .await;

        let all = client(&server)?.fetch_all_users(2).await?;
        assert_eq!(all.len(), 2);
        Ok(())
    }
}
