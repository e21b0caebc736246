//! Issue facade over a Jira collaborator.
//!
//! [`JiraClient`] names the handful of operations retasc needs and forwards
//! each one to a [`JiraApi`] implementation, returning its results and errors
//! untouched. Log events are emitted inside a span owned by the client, so
//! callers decide where they end up.

use std::sync::Arc;

use retasc_core::{merge_fields, required_fields, IssueFields, IssueRecord, Result};
use tracing::{info, info_span, Instrument, Span};

use crate::api::JiraApi;
use crate::rest::RestJira;
use crate::urls::ApiUrls;

/// Jira client facade.
pub struct JiraClient {
    urls: ApiUrls,
    api: Arc<dyn JiraApi>,
    span: Span,
}

impl JiraClient {
    /// Create a client backed by [`RestJira`]. No request is made.
    pub fn new(api_url: impl Into<String>, token: Option<String>) -> Result<Self> {
        let api_url = api_url.into();
        let api = RestJira::new(&api_url, token)?;
        Ok(Self::with_api(api_url, Arc::new(api)))
    }

    /// Create a client over any collaborator.
    ///
    /// The default `jira_client` span is created here, against the subscriber
    /// active at construction time. Build the client after installing a
    /// subscriber, or pass a span with [`with_span`](Self::with_span).
    pub fn with_api(api_url: impl Into<String>, api: Arc<dyn JiraApi>) -> Self {
        let api_url: String = api_url.into();
        let urls = ApiUrls::new(api_url);
        let span = info_span!("jira_client", api_url = %urls.base());
        Self { urls, api, span }
    }

    /// Replace the span log events are recorded in.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Configured instance URL, without trailing slashes.
    pub fn api_url(&self) -> &str {
        self.urls.base()
    }

    pub fn api_url_issue(&self, issue_key: Option<&str>) -> String {
        self.urls.issue(issue_key)
    }

    pub fn api_url_create_issue(&self) -> String {
        self.urls.create_issue()
    }

    pub fn api_url_edit_issue(&self, issue_key: &str, notify_users: bool) -> String {
        self.urls.edit_issue(issue_key, notify_users)
    }

    /// Search URL for the fixed example query `project = TEST`.
    pub fn api_url_search_issue(&self) -> String {
        self.urls.search_example()
    }

    /// Update an issue with the given fields.
    ///
    /// Fails with [`retasc_core::Error::NotFound`] when the issue does not
    /// exist (as reported by the collaborator).
    pub async fn edit_issue(
        &self,
        issue_key: &str,
        fields: IssueFields,
        notify_users: bool,
    ) -> Result<()> {
        async {
            info!(
                issue_key = issue_key,
                fields = ?fields,
                "Updating Jira issue"
            );
            self.api.edit_issue(issue_key, fields, notify_users).await
        }
        .instrument(self.span.clone())
        .await
    }

    /// [`edit_issue`](Self::edit_issue) with watcher notifications on.
    pub async fn edit_issue_notify(&self, issue_key: &str, fields: IssueFields) -> Result<()> {
        self.edit_issue(issue_key, fields, true).await
    }

    /// Create an issue.
    ///
    /// `fields` are merged over the required project, summary, description,
    /// and issue type fields; on collision the value from `fields` wins.
    pub async fn create_issue(
        &self,
        project_key: &str,
        summary: &str,
        description: &str,
        issue_type: &str,
        fields: Option<IssueFields>,
    ) -> Result<IssueRecord> {
        let issue_fields = merge_fields(
            required_fields(project_key, summary, description, issue_type),
            fields.unwrap_or_default(),
        );

        async {
            info!(fields = ?issue_fields, "Creating new Jira issue");
            self.api.create_issue(issue_fields).await
        }
        .instrument(self.span.clone())
        .await
    }

    /// Search issues by JQL, e.g.
    /// `project = DEMO AND status NOT IN (Closed, Resolved) ORDER BY issuekey`.
    pub async fn search_issue(&self, jql: &str) -> Result<Vec<IssueRecord>> {
        self.api.jql(jql).instrument(self.span.clone()).await
    }

    pub async fn get_issue(&self, issue_key: &str) -> Result<IssueRecord> {
        self.api.issue(issue_key).instrument(self.span.clone()).await
    }
}

// =============================================================================
// Tests
// =============================================================================
