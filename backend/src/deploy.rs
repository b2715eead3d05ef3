//! Redeploy notification sent after a successful save.

use crate::error::{Result, WallError};
use log::{info, warn};
use std::time::Duration;

/// POSTs to a deploy hook (Vercel, Netlify, ...) without waiting for it.
///
/// The save it follows is already durable, so the outcome of the hook is only
/// logged and never reaches the admin response.
#[derive(Debug, Clone)]
pub struct DeployNotifier {
    hook_url: Option<String>,
    http: reqwest::Client,
}

impl DeployNotifier {
    pub fn new(hook_url: Option<String>, timeout: Duration) -> Result<Self> {
        let Some(hook_url) = hook_url.filter(|url| !url.is_empty()) else {
            return Ok(DeployNotifier::disabled());
        };
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WallError::Config(format!("could not build HTTP client: {}", e)))?;
        Ok(DeployNotifier {
            hook_url: Some(hook_url),
            http,
        })
    }

    pub fn disabled() -> Self {
        DeployNotifier {
            hook_url: None,
            http: reqwest::Client::new(),
        }
    }

    /// Fires the hook on the runtime and returns immediately.
    ///
    /// Returns `true` when a notification was dispatched. Must be called from
    /// within a Tokio runtime.
    pub fn notify(&self) -> bool {
        let Some(url) = self.hook_url.clone() else {
            return false;
        };
        let http = self.http.clone();
        tokio::spawn(async move {
            match http.post(&url).send().await {
                Ok(resp) if resp.status().is_success() => {
                    info!("Deploy hook accepted ({})", resp.status());
                }
                Ok(resp) => warn!("Deploy hook answered {}", resp.status()),
                Err(e) => warn!("Deploy hook failed: {}", e),
            }
        });
        true
    }
}
