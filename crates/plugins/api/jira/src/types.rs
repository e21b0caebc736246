//! Jira REST v2 request and response bodies.
//!
//! Issues themselves stay opaque JSON; only the envelopes are typed.

use retasc_core::{IssueFields, IssueRecord};
use serde::{Deserialize, Serialize};

/// Request body for creating or updating an issue.
#[derive(Debug, Clone, Serialize)]
pub struct FieldsPayload<'a> {
    /// Issue fields
    pub fields: &'a IssueFields,
}

/// Search response from GET /search.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    /// Issues on this page
    #[serde(default)]
    pub issues: Vec<IssueRecord>,
    /// Starting index
    #[serde(default, rename = "startAt")]
    pub start_at: Option<u32>,
    /// Max results per page
    #[serde(default, rename = "maxResults")]
    pub max_results: Option<u32>,
    /// Total number of results
    #[serde(default)]
    pub total: Option<u32>,
}
