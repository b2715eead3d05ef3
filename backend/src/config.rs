//! Process configuration, parsed once at startup.

use crate::error::{Result, WallError};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// Where the wall document lives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StorageBackend {
    /// JSON file on the local disk
    #[default]
    Local,
    /// File committed to a GitHub repository through the contents API
    Github,
}

/// Creator wall server configuration
#[derive(Parser, Debug, Clone)]
#[command(name = "creator-wall")]
#[command(about = "Creator wall public page and admin API")]
pub struct Config {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind
    #[arg(long, env = "PORT", default_value = "3400")]
    pub port: u16,

    /// Shared secret for the admin endpoints
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    pub admin_password: String,

    /// Persistence backend
    #[arg(long = "storage", env = "STORAGE_BACKEND", value_enum, default_value = "local")]
    pub storage: StorageBackend,

    /// Data file used by the local backend
    #[arg(long, env = "DATA_FILE", default_value = "data/influencers.json")]
    pub data_file: PathBuf,

    /// Token used by the github backend
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Repository (`owner/name`) used by the github backend
    #[arg(long, env = "GITHUB_REPO")]
    pub github_repo: Option<String>,

    /// Path of the data file inside the repository
    #[arg(long, env = "GITHUB_FILE_PATH", default_value = "public/data/influencers.json")]
    pub github_file_path: String,

    /// Branch the data file is read from and committed to
    #[arg(long, env = "GITHUB_BRANCH", default_value = "main")]
    pub github_branch: String,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    pub github_api_url: String,

    /// Upper bound in seconds for every remote call
    #[arg(long, env = "REMOTE_TIMEOUT_SECS", default_value = "10")]
    pub remote_timeout_secs: u64,

    /// URL POSTed (fire and forget) after every successful write
    #[arg(long, env = "DEPLOY_HOOK_URL")]
    pub deploy_hook_url: Option<String>,

    /// Request body size limit in bytes
    #[arg(long, env = "JSON_LIMIT", default_value = "1048576")]
    pub json_limit: usize,
}

impl Config {
    /// Validate configuration at startup
    pub fn validate(&self) -> Result<()> {
        if self.admin_password.is_empty() {
            return Err(WallError::Config("ADMIN_PASSWORD must not be empty".to_string()));
        }
        if self.remote_timeout_secs == 0 {
            return Err(WallError::Config(
                "REMOTE_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }
        if self.storage == StorageBackend::Github {
            if self.github_token.as_deref().map_or(true, str::is_empty) {
                return Err(WallError::Config(
                    "GITHUB_TOKEN not configured - cannot use the github backend".to_string(),
                ));
            }
            if self.github_repo.as_deref().map_or(true, str::is_empty) {
                return Err(WallError::Config(
                    "GITHUB_REPO not configured - cannot use the github backend".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn remote_timeout(&self) -> Duration {
        Duration::from_secs(self.remote_timeout_secs)
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}
