//! Collaborator trait the facade delegates to.

use async_trait::async_trait;
use retasc_core::{IssueFields, IssueRecord, Result};

/// Remote Jira operations.
///
/// Implementations own transport, authentication, and response parsing.
/// Errors are returned as-is to the facade, which does not translate them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JiraApi: Send + Sync {
    /// Apply a partial update to an issue.
    async fn edit_issue(&self, key: &str, fields: IssueFields, notify_users: bool) -> Result<()>;

    /// Create an issue from a complete field mapping.
    async fn create_issue(&self, fields: IssueFields) -> Result<IssueRecord>;

    /// Run a JQL query and return every matching issue.
    async fn jql(&self, query: &str) -> Result<Vec<IssueRecord>>;

    /// Fetch a single issue.
    async fn issue(&self, key: &str) -> Result<IssueRecord>;
}
