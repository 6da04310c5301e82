//! Error types for todoist-api

/// Result type for todoist-api operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when talking to the Todoist API
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Todoist API request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}
