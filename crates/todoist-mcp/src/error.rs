//! Error types for the MCP server

use thiserror::Error;

use crate::tools::{Tool, ToolResult};

/// Result type alias for MCP operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during MCP server operations
#[derive(Debug, Error)]
pub enum Error {
    /// Failure reported by the Todoist API or its transport
    #[error(transparent)]
    Api(#[from] todoist_api::Error),

    /// Error during JSON serialization/deserialization
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Arguments missing, or not matching the tool's required fields
    #[error("{message}")]
    InvalidArguments { message: String },

    #[error("Could not find a task matching \"{term}\"")]
    TaskNotFound { term: String },

    #[error("Could not find a project matching \"{term}\"")]
    ProjectNotFound { term: String },

    #[error("Could not find a section matching \"{term}\" in project \"{project}\"")]
    SectionNotFound { term: String, project: String },

    /// Unknown tool requested
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No API token configured
    #[error("TODOIST_API_TOKEN environment variable is required")]
    MissingToken,
}

impl Error {
    pub fn no_arguments() -> Self {
        Error::InvalidArguments {
            message: "No arguments provided".to_string(),
        }
    }

    pub fn invalid_arguments(tool: Tool, reason: impl std::fmt::Display) -> Self {
        Error::InvalidArguments {
            message: format!("Invalid arguments for {}: {}", tool.name(), reason),
        }
    }

    /// Render the error as an error-flagged tool result.
    ///
    /// Lookup misses and unknown tools carry their own message; everything
    /// else is prefixed with `Error: `.
    pub fn into_tool_result(self) -> ToolResult {
        match self {
            Error::UnknownTool(_)
            | Error::TaskNotFound { .. }
            | Error::ProjectNotFound { .. }
            | Error::SectionNotFound { .. } => ToolResult::error(self.to_string()),
            other => ToolResult::error(format!("Error: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn unknown_tool_is_not_prefixed() {
        let result = Error::UnknownTool("todoist_frobnicate".to_string()).into_tool_result();
        assert!(result.is_error);
        assert_eq!(result.text_content(), "Unknown tool: todoist_frobnicate");
    }

    #[test]
    fn not_found_names_search_term() {
        let result = Error::SectionNotFound {
            term: "Backlog".to_string(),
            project: "Work".to_string(),
        }
        .into_tool_result();
        assert!(result.is_error);
        assert_eq!(
            result.text_content(),
            "Could not find a section matching \"Backlog\" in project \"Work\""
        );
    }

    #[test]
    fn api_failures_pass_message_through() {
        let error = Error::from(todoist_api::Error::Status {
            status: 403,
            body: "Forbidden".to_string(),
        });
        assert_eq!(
            error.into_tool_result().text_content(),
            "Error: Todoist API request failed with status 403: Forbidden"
        );
    }

    #[test]
    fn invalid_arguments_name_the_tool() {
        let error = Error::invalid_arguments(Tool::CreateTask, "missing required field 'content'");
        assert_eq!(
            error.into_tool_result().text_content(),
            "Error: Invalid arguments for todoist_create_task: missing required field 'content'"
        );
    }
}
