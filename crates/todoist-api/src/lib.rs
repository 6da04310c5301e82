//! Todoist REST API client
//!
//! Exposes the subset of the Todoist REST v2 API the MCP server needs behind
//! the [`TodoistApi`] trait, so the server can be driven by the real HTTP
//! client or by an in-memory fake.

pub mod client;
pub mod error;
pub mod models;
pub mod rest;

pub use client::TodoistApi;
pub use error::{Error, Result};
pub use models::{
    AddProjectArgs, AddSectionArgs, AddTaskArgs, Due, Project, Section, Task, TaskQuery,
    UpdateProjectArgs, UpdateSectionArgs, UpdateTaskArgs,
};
pub use rest::{RestClient, RestConfig, DEFAULT_BASE_URL};
