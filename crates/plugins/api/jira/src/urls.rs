//! Jira REST v2 URL builders.

/// REST API prefix appended to the instance URL.
const API_PREFIX: &str = "rest/api/2";

/// Builds Jira REST v2 endpoint URLs from an instance URL.
///
/// Issue keys are embedded verbatim; no escaping or validation happens here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiUrls {
    base: String,
}

impl ApiUrls {
    /// Create URL builders for an instance URL. Trailing slashes are dropped.
    pub fn new(api_url: impl AsRef<str>) -> Self {
        Self {
            base: api_url.as_ref().trim_end_matches('/').to_string(),
        }
    }

    /// Instance URL without trailing slashes.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Single issue resource, or the issue collection when `key` is `None`.
    pub fn issue(&self, key: Option<&str>) -> String {
        format!("{}/{}/issue/{}", self.base, API_PREFIX, key.unwrap_or(""))
    }

    /// Issue creation endpoint.
    ///
    /// History tracking is always off: automated callers must not show up in
    /// the acting user's "recently viewed" list.
    pub fn create_issue(&self) -> String {
        format!("{}/{}/issue?updateHistory=false", self.base, API_PREFIX)
    }

    /// Issue update endpoint; `notify_users` controls watcher notifications.
    pub fn edit_issue(&self, key: &str, notify_users: bool) -> String {
        format!(
            "{}/{}/issue/{}?notifyUsers={}",
            self.base, API_PREFIX, key, notify_users
        )
    }

    /// Search endpoint with a fixed example query (`project = TEST`).
    pub fn search_example(&self) -> String {
        format!(
            "{}/{}/search?startAt=0&fields=%2Aall&jql=project+%3D+TEST",
            self.base, API_PREFIX
        )
    }

    /// Search endpoint without query parameters.
    pub fn search(&self) -> String {
        format!("{}/{}/search", self.base, API_PREFIX)
    }

    /// Currently authenticated user.
    pub fn myself(&self) -> String {
        format!("{}/{}/myself", self.base, API_PREFIX)
    }
}
