//! GitHub REST API client
//!
//! This module provides the HTTP client behind the analysis pipeline. It
//! translates three logical queries into GET requests against the GitHub
//! REST API: resolving a branch head, resolving a repository's default
//! branch, and listing the submodule (gitlink) entries of a commit's tree.
//!
//! # Example
//!
//! ```no_run
//! use polyrepo::github::client::GitHubClient;
//! use polyrepo::github::host::RepositoryHost;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GitHubClient::new();
//!
//! let sha = client.branch_commit("acme", "widget", "main", None).await?;
//! let submodules = client.submodules("acme", "widget", &sha, None).await?;
//! for entry in submodules {
//!     println!("{} @ {}", entry.path, entry.sha);
//! }
//! # Ok(())
//! # }
//! ```

use crate::analysis::types::SubmoduleEntry;
use crate::github::host::{HostError, RepositoryHost};
use async_trait::async_trait;
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Default request timeout for GitHub API calls
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default GitHub REST API endpoint
const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Identifying user agent sent on every request; GitHub rejects requests
/// without one
const USER_AGENT: &str = concat!("polyrepo/", env!("CARGO_PKG_VERSION"));

/// Tree entry mode marking a gitlink
const GITLINK_MODE: &str = "160000";

/// Tree entry type marking a commit reference
const GITLINK_TYPE: &str = "commit";

/// HTTP client for the GitHub REST API
///
/// Implements [`RepositoryHost`] for the real provider. The underlying
/// `reqwest::Client` is built once and pools connections across calls; the
/// client itself holds no per-call state and can be shared across threads
/// using `Arc`.
///
/// # Configuration
///
/// - **base_url**: API endpoint, overridable for tests and proxies
/// - **timeout**: per-request timeout duration
pub struct GitHubClient {
    /// API endpoint URL, without a trailing slash
    base_url: String,

    /// Shared HTTP client with connection pooling
    http_client: Client,

    /// Request timeout duration
    timeout: Duration,
}

impl GitHubClient {
    /// Creates a client against the public GitHub API with the default timeout
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a client against the public GitHub API with a custom timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string(), timeout)
    }

    /// Creates a client against a custom API endpoint
    ///
    /// Intended for tests and proxies that mimic the GitHub REST shape.
    pub fn with_base_url(base_url: String, timeout: Duration) -> Self {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            base_url,
            http_client,
            timeout,
        }
    }

    /// Sends a GET request and decodes the 2xx body as JSON
    ///
    /// Non-2xx responses become [`HostError::Status`] carrying the status
    /// code and raw body; undecodable 2xx bodies become
    /// [`HostError::Malformed`].
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        url: &str,
        token: Option<&str>,
    ) -> Result<T, HostError> {
        debug!("GET {}", url);

        let mut request = self
            .http_client
            .get(url)
            .header(header::USER_AGENT, USER_AGENT);

        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                error!("GitHub request timed out after {:?}", self.timeout);
            } else if e.is_connect() {
                error!("Cannot connect to GitHub at {}", self.base_url);
            } else {
                error!("GitHub request error: {}", e);
            }
            HostError::Transport(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("GitHub {} lookup returned {}: {}", endpoint, status, body);
            return Err(HostError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            error!("Failed to decode GitHub {} response: {}", endpoint, e);
            HostError::Malformed {
                endpoint,
                reason: format!("JSON decode failed: {}", e),
            }
        })
    }
}

impl Default for GitHubClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RepositoryHost for GitHubClient {
    async fn branch_commit(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        token: Option<&str>,
    ) -> Result<String, HostError> {
        let url = format!(
            "{}/repos/{}/{}/branches/{}",
            self.base_url, owner, repo, branch
        );

        let decoded: BranchResponse = self.get_json("branch", &url, token).await?;
        let sha = decoded
            .commit
            .and_then(|commit| commit.sha)
            .ok_or_else(|| HostError::missing_field("branch", "commit.sha"))?;

        info!("Resolved {}/{}@{} to {}", owner, repo, branch, sha);
        Ok(sha)
    }

    async fn default_branch(
        &self,
        owner: &str,
        repo: &str,
        token: Option<&str>,
    ) -> Result<String, HostError> {
        let url = format!("{}/repos/{}/{}", self.base_url, owner, repo);

        let decoded: RepoResponse = self.get_json("repository", &url, token).await?;
        decoded
            .default_branch
            .ok_or_else(|| HostError::missing_field("repository", "default_branch"))
    }

    async fn submodules(
        &self,
        owner: &str,
        repo: &str,
        commit: &str,
        token: Option<&str>,
    ) -> Result<Vec<SubmoduleEntry>, HostError> {
        let url = format!(
            "{}/repos/{}/{}/git/trees/{}?recursive=1",
            self.base_url, owner, repo, commit
        );

        let decoded: TreeResponse = self.get_json("tree", &url, token).await?;
        let submodules = submodules_from_tree(decoded);

        info!(
            "Found {} submodule entries in {}/{}@{}",
            submodules.len(),
            owner,
            repo,
            commit
        );
        Ok(submodules)
    }

    fn name(&self) -> &str {
        "github"
    }
}

impl fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Selects the gitlink entries out of a decoded tree listing
///
/// Entries qualify only with `type == "commit"` and `mode == "160000"`;
/// anything else is skipped without error. Tree order is preserved.
fn submodules_from_tree(response: TreeResponse) -> Vec<SubmoduleEntry> {
    response
        .tree
        .into_iter()
        .filter_map(TreeEntry::into_gitlink)
        .collect()
}

/// Response body of `GET /repos/{owner}/{repo}/branches/{branch}`
#[derive(Debug, Deserialize)]
struct BranchResponse {
    /// Head commit of the branch
    commit: Option<BranchCommit>,
}

/// Commit object nested in a branch response
#[derive(Debug, Deserialize)]
struct BranchCommit {
    /// Commit hash
    sha: Option<String>,
}

/// Response body of `GET /repos/{owner}/{repo}`
#[derive(Debug, Deserialize)]
struct RepoResponse {
    /// Name of the repository's default branch
    default_branch: Option<String>,
}

/// Response body of `GET /repos/{owner}/{repo}/git/trees/{sha}`
#[derive(Debug, Deserialize)]
struct TreeResponse {
    /// Flattened tree entries; absent when the tree is empty
    #[serde(default)]
    tree: Vec<TreeEntry>,
}

/// One entry of a tree listing
#[derive(Debug, Clone, Deserialize)]
struct TreeEntry {
    /// Repository-relative path
    #[serde(default)]
    path: Option<String>,

    /// File mode string, `160000` for gitlinks
    #[serde(default)]
    mode: Option<String>,

    /// Entry type: `blob`, `tree` or `commit`
    #[serde(default, rename = "type")]
    kind: Option<String>,

    /// Object hash
    #[serde(default)]
    sha: Option<String>,
}

impl TreeEntry {
    /// Converts this entry into a submodule record if it is a gitlink
    fn into_gitlink(self) -> Option<SubmoduleEntry> {
        if self.kind.as_deref() != Some(GITLINK_TYPE) || self.mode.as_deref() != Some(GITLINK_MODE)
        {
            return None;
        }
        match (self.path, self.sha) {
            (Some(path), Some(sha)) => Some(SubmoduleEntry::pinned(path, sha)),
            _ => None,
        }
    }
}
