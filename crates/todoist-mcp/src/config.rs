//! Process configuration
//!
//! Command-line flags with environment fallbacks. The token is optional at the
//! parser level so a missing token can be reported with setup instructions
//! instead of a usage error.

use std::time::Duration;

use clap::Parser;
use todoist_api::{DEFAULT_BASE_URL, RestConfig};

use crate::{Error, Result};

/// MCP server for Todoist
#[derive(Debug, Clone, Parser)]
#[command(name = "todoist-mcp")]
#[command(about = "MCP server exposing Todoist tasks, projects and sections")]
#[command(version)]
pub struct Args {
    /// Todoist API token
    #[arg(long, env = "TODOIST_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Base URL of the Todoist REST API
    #[arg(long, env = "TODOIST_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub api_base_url: String,

    /// Timeout for each Todoist request, in seconds
    #[arg(long, env = "TODOIST_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

/// Validated configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_token: String,
    pub api_base_url: String,
    pub timeout: Duration,
}

impl Config {
    /// Validate parsed arguments; a missing or blank token is an error.
    pub fn from_args(args: Args) -> Result<Self> {
        let api_token = args
            .api_token
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
            .ok_or(Error::MissingToken)?;

        Ok(Self {
            api_token,
            api_base_url: args.api_base_url,
            timeout: Duration::from_secs(args.timeout_secs),
        })
    }

    pub fn rest_config(&self) -> RestConfig {
        RestConfig {
            base_url: self.api_base_url.clone(),
            timeout: self.timeout,
        }
    }
}

/// Lines printed to stderr when no token is configured
pub const MISSING_TOKEN_HELP: [&str; 3] = [
    "Error: TODOIST_API_TOKEN environment variable is required",
    "Set it in your MCP client configuration or pass --api-token",
    "You can find your token in Todoist under Settings > Integrations > Developer",
];
