//! Jira REST v2 client (Jira Server / Data Center).

use async_trait::async_trait;
use retasc_core::{Error, IssueFields, IssueRecord, Result};
use serde_json::Value;
use tracing::{debug, warn};

use crate::api::JiraApi;
use crate::types::{FieldsPayload, SearchResponse};
use crate::urls::ApiUrls;

/// Page size used when collecting JQL results.
const SEARCH_PAGE_SIZE: u32 = 50;

/// User agent sent with every request.
const USER_AGENT: &str = "retasc";

/// reqwest-backed [`JiraApi`] implementation.
pub struct RestJira {
    urls: ApiUrls,
    token: Option<String>,
    client: reqwest::Client,
}

impl RestJira {
    /// Create a client for a Jira instance. No request is made.
    ///
    /// A token containing `:` is treated as `user:password` and sent with
    /// Basic auth; any other token is sent as a Bearer personal access token.
    pub fn new(api_url: impl AsRef<str>, token: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            urls: ApiUrls::new(api_url),
            token,
            client,
        })
    }

    /// URL builders for the configured instance.
    pub fn urls(&self) -> &ApiUrls {
        &self.urls
    }

    /// Fetch the authenticated user. Useful to check credentials.
    pub async fn myself(&self) -> Result<Value> {
        self.get(&self.urls.myself()).await
    }

    /// Build request with auth header.
    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        let builder = self
            .client
            .request(method, url)
            .header("Accept", "application/json")
            .header("Content-Type", "application/json");

        match self.token.as_deref() {
            Some(token) if token.contains(':') => {
                builder.header("Authorization", format!("Basic {}", base64_encode(token)))
            }
            Some(token) => builder.header("Authorization", format!("Bearer {}", token)),
            None => builder,
        }
    }

    /// Make an authenticated GET request.
    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(url = url, "Jira GET request");

        let response = self
            .request(reqwest::Method::GET, url)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        self.handle_response(response).await
    }

    /// Make an authenticated POST request.
    async fn post<T: serde::de::DeserializeOwned, B: serde::Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T> {
        debug!(url = url, "Jira POST request");

        let response = self
            .request(reqwest::Method::POST, url)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        self.handle_response(response).await
    }

    /// Make an authenticated PUT request (Jira PUT returns 204 No Content).
    async fn put<B: serde::Serialize>(&self, url: &str, body: &B) -> Result<()> {
        debug!(url = url, "Jira PUT request");

        let response = self
            .request(reqwest::Method::PUT, url)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        check_status(response).await.map(|_| ())
    }

    /// Handle response and map errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| Error::InvalidData(format!("Failed to parse response: {}", e)))
    }

    /// Fetch one page of search results.
    async fn search_page(&self, query: &str, start_at: u32) -> Result<SearchResponse> {
        let url = self.urls.search();
        let start_at = start_at.to_string();
        let max_results = SEARCH_PAGE_SIZE.to_string();
        let params = [
            ("jql", query),
            ("startAt", start_at.as_str()),
            ("maxResults", max_results.as_str()),
            ("fields", "*all"),
        ];

        debug!(url = %url, params = ?params, "Jira search");

        let response = self
            .request(reqwest::Method::GET, &url)
            .query(&params)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        self.handle_response(response).await
    }
}

#[async_trait]
impl JiraApi for RestJira {
    async fn edit_issue(&self, key: &str, fields: IssueFields, notify_users: bool) -> Result<()> {
        let url = self.urls.edit_issue(key, notify_users);
        self.put(&url, &FieldsPayload { fields: &fields }).await
    }

    async fn create_issue(&self, fields: IssueFields) -> Result<IssueRecord> {
        let url = self.urls.create_issue();
        self.post(&url, &FieldsPayload { fields: &fields }).await
    }

    async fn jql(&self, query: &str) -> Result<Vec<IssueRecord>> {
        let mut issues: Vec<IssueRecord> = Vec::new();
        let mut start_at = 0u32;

        loop {
            let page = self.search_page(query, start_at).await?;
            let page_len = page.issues.len() as u32;
            issues.extend(page.issues);
            start_at += page_len;

            let more = match page.total {
                Some(total) => start_at < total,
                // without a total, only a full page can be followed by another
                None => page_len == SEARCH_PAGE_SIZE,
            };
            if page_len == 0 || !more {
                break;
            }
        }

        debug!(query = query, count = issues.len(), "Jira search complete");
        Ok(issues)
    }

    async fn issue(&self, key: &str) -> Result<IssueRecord> {
        self.get(&self.urls.issue(Some(key))).await
    }
}

/// Turn a non-success response into an error, logging its body.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let status_code = status.as_u16();
    let message = response.text().await.unwrap_or_default();
    warn!(
        status = status_code,
        message = message,
        "Jira API error response"
    );
    Err(Error::from_status(status_code, message))
}

fn base64_encode(input: &str) -> String {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD.encode(input)
}

// =============================================================================
// Tests
// =============================================================================
