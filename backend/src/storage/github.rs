//! GitHub contents API backend.
//!
//! The document is a file in a repository. Reading returns the file's blob
//! sha, and writing commits a new revision with that sha as precondition, so
//! GitHub itself enforces compare-and-swap. A static host watching the
//! repository redeploys after each commit.

use crate::error::{Result, WallError};
use crate::storage::{encode_dataset, DatasetStore, Snapshot, VersionToken};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use common::model::dataset::Dataset;
use log::{debug, warn};
use reqwest::header::ACCEPT;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

const COMMIT_MESSAGE: &str = "Update influencers via admin panel";
const USER_AGENT: &str = "creator-wall";

#[derive(Debug, Clone)]
pub struct GitHubSettings {
    /// API base, e.g. `https://api.github.com`
    pub api_url: String,
    /// `owner/name`
    pub repo: String,
    /// Path of the data file inside the repository
    pub file_path: String,
    pub branch: String,
    pub token: String,
    /// Bound applied to every request, connect through body
    pub timeout: Duration,
}

/// `GET /repos/{repo}/contents/{path}` response, reduced to what we use.
#[derive(Debug, Deserialize)]
struct ContentsFile {
    sha: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    encoding: String,
}

/// `PUT /repos/{repo}/contents/{path}` request body.
#[derive(Debug, Serialize)]
struct PutContents<'a> {
    message: &'a str,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
    branch: &'a str,
}

#[derive(Debug, Deserialize)]
struct PutResponse {
    content: Option<CommittedFile>,
}

#[derive(Debug, Deserialize)]
struct CommittedFile {
    sha: String,
}

#[derive(Debug, Default, Deserialize)]
struct ApiMessage {
    #[serde(default)]
    message: String,
}

#[derive(Debug)]
pub struct GitHubContentStore {
    settings: GitHubSettings,
    http: reqwest::Client,
}

impl GitHubContentStore {
    pub fn new(settings: GitHubSettings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| WallError::Config(format!("could not build HTTP client: {}", e)))?;
        Ok(GitHubContentStore { settings, http })
    }

    fn contents_url(&self) -> String {
        format!(
            "{}/repos/{}/contents/{}",
            self.settings.api_url.trim_end_matches('/'),
            self.settings.repo,
            self.settings.file_path.trim_start_matches('/'),
        )
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .bearer_auth(&self.settings.token)
            .header(ACCEPT, "application/vnd.github+json")
    }

    fn read_error(&self, e: reqwest::Error) -> WallError {
        if e.is_timeout() {
            WallError::Timeout(self.settings.timeout)
        } else {
            WallError::Read(e.to_string())
        }
    }

    fn write_error(&self, e: reqwest::Error) -> WallError {
        if e.is_timeout() {
            WallError::Timeout(self.settings.timeout)
        } else {
            WallError::Write(e.to_string())
        }
    }
}

/// Message GitHub attached to a failed call, or a generic one with the status.
async fn api_message(status: StatusCode, resp: Response) -> String {
    let body: ApiMessage = resp.json().await.unwrap_or_default();
    if body.message.is_empty() {
        format!("GitHub API error: {}", status.as_u16())
    } else {
        body.message
    }
}

fn decode_file(file: &ContentsFile) -> Result<Dataset> {
    if file.encoding != "base64" {
        return Err(WallError::Read(format!(
            "unsupported content encoding {:?}",
            file.encoding
        )));
    }
    // GitHub wraps the base64 payload at 60 columns.
    let packed: String = file.content.split_whitespace().collect();
    let bytes = BASE64
        .decode(packed)
        .map_err(|e| WallError::Read(format!("invalid base64 content: {}", e)))?;

    match serde_json::from_slice::<Value>(&bytes) {
        Ok(document) => Ok(Dataset::from_value(document)),
        Err(e) => {
            warn!("Remote data file is not valid JSON: {}; using defaults", e);
            Ok(Dataset::default())
        }
    }
}

#[async_trait]
impl DatasetStore for GitHubContentStore {
    async fn read(&self) -> Result<Snapshot> {
        let url = self.contents_url();
        debug!("GET {} (ref {})", url, self.settings.branch);

        let resp = self
            .request(Method::GET, &url)
            .query(&[("ref", self.settings.branch.as_str())])
            .send()
            .await
            .map_err(|e| self.read_error(e))?;

        match resp.status() {
            StatusCode::OK => {
                let file: ContentsFile = resp.json().await.map_err(|e| self.read_error(e))?;
                let dataset = decode_file(&file)?;
                debug!("Read remote data file at {}", file.sha);
                Ok(Snapshot {
                    dataset,
                    version: Some(VersionToken::new(file.sha)),
                })
            }
            StatusCode::NOT_FOUND => {
                warn!("Remote data file {} not found; using defaults", url);
                Ok(Snapshot::default())
            }
            status => Err(WallError::Read(api_message(status, resp).await)),
        }
    }

    async fn write(
        &self,
        dataset: &Dataset,
        expected: Option<&VersionToken>,
    ) -> Result<Option<VersionToken>> {
        let url = self.contents_url();
        let body = PutContents {
            message: COMMIT_MESSAGE,
            content: BASE64.encode(encode_dataset(dataset)?),
            sha: expected.map(VersionToken::as_str),
            branch: &self.settings.branch,
        };
        debug!(
            "PUT {} (expected {})",
            url,
            expected.map_or("none", VersionToken::as_str)
        );

        let resp = self
            .request(Method::PUT, &url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.write_error(e))?;

        match resp.status() {
            StatusCode::OK | StatusCode::CREATED => {
                let committed: PutResponse = resp.json().await.map_err(|e| self.write_error(e))?;
                Ok(committed.content.map(|file| VersionToken::new(file.sha)))
            }
            // A sha mismatch is a 409. Without a sha GitHub answers 422 when
            // the file already exists, i.e. someone created it after our read.
            StatusCode::CONFLICT => Err(WallError::Conflict {
                expected: expected.map_or_else(|| "none".to_string(), |token| token.to_string()),
            }),
            StatusCode::UNPROCESSABLE_ENTITY if expected.is_none() => Err(WallError::Conflict {
                expected: "none".to_string(),
            }),
            status => Err(WallError::Write(api_message(status, resp).await)),
        }
    }
}
