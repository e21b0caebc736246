//! Jira integration for retasc.
//!
//! [`JiraClient`] is the facade callers use: it builds Jira REST v2 URLs and
//! forwards issue operations to a [`JiraApi`] collaborator. [`RestJira`] is the
//! reqwest-backed collaborator that talks to a Jira Server / Data Center
//! instance.

mod api;
mod client;
mod rest;
mod types;
mod urls;

pub use api::JiraApi;
pub use client::JiraClient;
pub use rest::RestJira;
pub use urls::ApiUrls;
