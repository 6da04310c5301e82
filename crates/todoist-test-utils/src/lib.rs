//! Shared test utilities for the todoist-mcp workspace.
//!
//! This crate provides an in-memory stand-in for the Todoist API and entity
//! fixtures. It is a dev-dependency only — never published.
//!
//! # Modules
//!
//! - [`fake`] — [`FakeTodoist`], an in-memory [`todoist_api::TodoistApi`]
//! - [`fixtures`] — minimal task, project and section builders

pub mod fake;
pub mod fixtures;

pub use fake::FakeTodoist;
pub use fixtures::{project, section, task};
