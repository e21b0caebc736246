//! Issue field mappings and records.
//!
//! Both are opaque JSON to this layer: fields are sent to Jira verbatim and
//! records are handed back to callers without inspection.

use serde_json::{json, Map, Value};

/// Field name to value mapping sent to Jira (nested mappings allowed).
pub type IssueFields = Map<String, Value>;

/// Issue representation returned by Jira.
pub type IssueRecord = Value;

/// Build the fields every new issue needs.
pub fn required_fields(
    project_key: &str,
    summary: &str,
    description: &str,
    issue_type: &str,
) -> IssueFields {
    let mut fields = IssueFields::new();
    fields.insert("project".to_string(), json!({ "key": project_key }));
    fields.insert("summary".to_string(), Value::String(summary.to_string()));
    fields.insert(
        "description".to_string(),
        Value::String(description.to_string()),
    );
    fields.insert("issuetype".to_string(), json!({ "name": issue_type }));
    fields
}

/// Combine two field mappings.
///
/// The result holds every top-level key of both inputs. When a key is present
/// in both, the value from `overrides` is kept. Nested mappings are replaced
/// as a whole, not merged.
pub fn merge_fields(base: IssueFields, overrides: IssueFields) -> IssueFields {
    let mut merged = base;
    for (name, value) in overrides {
        merged.insert(name, value);
    }
    merged
}
