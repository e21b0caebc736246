//! Core types, error handling, and configuration for retasc.
//!
//! This crate provides the pieces shared by the Jira client and the CLI:
//! the error type, the opaque issue field/record model, and config loading.

pub mod config;
pub mod error;
pub mod fields;

pub use error::{Error, Result};
pub use fields::{merge_fields, required_fields, IssueFields, IssueRecord};
