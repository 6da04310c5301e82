//! MCP Server for Todoist
//!
//! This crate exposes a Todoist account to AI assistants via the Model Context
//! Protocol (MCP): thirteen tools covering tasks, projects and sections.
//!
//! # Architecture
//!
//! ```text
//! [ MCP Client ]
//!        | (JSON-RPC over stdio)
//!        v
//! [ server ] -> [ handlers ] -> [ args ] (validation)
//!                    |       -> [ format ] (text results)
//!                    v
//! [ todoist_api::TodoistApi ] (REST client, or a fake in tests)
//! ```
//!
//! # Tools
//!
//! - Tasks: create, get, update, delete, complete
//! - Projects: get, create, update, delete
//! - Sections: get, create, update, delete
//!
//! Update, delete and complete tools locate their target by a
//! case-insensitive substring of its name; the first match wins.

pub mod args;
pub mod config;
pub mod error;
pub mod format;
pub mod handlers;
pub mod protocol;
pub mod server;
pub mod tools;

pub use config::{Args, Config};
pub use error::{Error, Result};
pub use handlers::handle_tool_call;
pub use server::TodoistMcpServer;
pub use tools::{Tool, ToolContent, ToolDefinition, ToolResult, tool_definitions};
