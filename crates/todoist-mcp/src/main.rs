//! Todoist MCP Server
//!
//! A Model Context Protocol server that lets AI assistants manage Todoist
//! tasks, projects and sections.
//!
//! # Usage
//!
//! ```bash
//! TODOIST_API_TOKEN=... todoist-mcp [--api-base-url <url>] [--timeout-secs <n>]
//! ```
//!
//! # Environment Variables
//!
//! - `TODOIST_API_TOKEN`: Todoist API token (required)
//! - `TODOIST_API_BASE_URL`: REST API base URL
//! - `TODOIST_TIMEOUT_SECS`: per-request timeout (default: 30)
//! - `RUST_LOG`: Control log verbosity (default: `todoist_mcp=info`)
//!
//! # Protocol
//!
//! The server communicates via JSON-RPC 2.0 over stdio:
//! - Requests/responses go through stdout
//! - Logs go to stderr (to avoid interfering with the protocol)

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use todoist_api::RestClient;
use todoist_mcp::config::MISSING_TOKEN_HELP;
use todoist_mcp::{Args, Config, Error, TodoistMcpServer};

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Initialize logging to stderr (stdout is reserved for MCP protocol)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("todoist_mcp=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::from_args(Args::parse()) {
        Ok(config) => config,
        Err(Error::MissingToken) => {
            for line in MISSING_TOKEN_HELP {
                eprintln!("{}", line);
            }
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(base_url = %config.api_base_url, "Starting todoist-mcp server");

    let api = RestClient::new(&config.api_token, config.rest_config())?;
    let server = TodoistMcpServer::new(Arc::new(api));
    server.run().await?;

    Ok(ExitCode::SUCCESS)
}
