//! Repository analysis orchestration
//!
//! The analyzer ties the URL parser and the hosting provider client into a
//! single sequential flow: parse the URL, resolve the requested branch to a
//! commit, list the submodules pinned by that commit, and rewrite each
//! submodule's URL under the superproject's owner.

use crate::analysis::types::{RepositoryAnalysis, SubmoduleEntry};
use crate::github::host::{HostError, RepositoryHost};
use crate::github::url::{GitHubUrlParser, InvalidRepoUrl, RepoUrlParser};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors surfaced by [`RepositoryAnalyzer::analyze`]
///
/// Either the input URL was rejected before any remote call, or one of the
/// remote lookups failed. There is no partial result in either case.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The repository URL did not contain an owner and a name
    #[error(transparent)]
    InvalidUrl(#[from] InvalidRepoUrl),

    /// A remote lookup failed
    #[error(transparent)]
    Host(#[from] HostError),
}

/// Orchestrates one repository analysis per call
///
/// Collaborators are constructor-injected so tests can substitute either
/// one. Each `analyze` call builds fresh call-scoped data; the analyzer
/// itself holds no mutable state and can be shared using `Arc`.
pub struct RepositoryAnalyzer {
    parser: Arc<dyn RepoUrlParser>,
    host: Arc<dyn RepositoryHost>,
}

impl RepositoryAnalyzer {
    /// Creates an analyzer over the given host with the default URL parser
    pub fn new(host: Arc<dyn RepositoryHost>) -> Self {
        Self::with_parser(Arc::new(GitHubUrlParser), host)
    }

    /// Creates an analyzer with an explicit parser and host
    pub fn with_parser(parser: Arc<dyn RepoUrlParser>, host: Arc<dyn RepositoryHost>) -> Self {
        Self { parser, host }
    }

    /// Analyzes the repository at `repo_url` on `branch`
    ///
    /// Steps run strictly in order and the first failure aborts the call:
    /// parse the URL, resolve the branch head commit, list the submodules of
    /// that commit, then attach a URL to every entry. The superproject keeps
    /// the input URL verbatim; each submodule's URL is reconstructed as
    /// `https://github.com/{owner}/{path}`, assuming it is hosted under the
    /// same owner with a name equal to its checkout path. A submodule hosted
    /// elsewhere keeps its pinned commit but gets a URL that may not resolve.
    ///
    /// No remote call is retried, and nothing is cached between calls.
    pub async fn analyze(
        &self,
        repo_url: &str,
        branch: &str,
        token: Option<&str>,
    ) -> Result<RepositoryAnalysis, AnalysisError> {
        let reference = self.parser.parse(repo_url)?;
        info!(
            owner = %reference.owner,
            repo = %reference.name,
            branch,
            host = self.host.name(),
            "analyzing repository"
        );

        let sha = self
            .host
            .branch_commit(&reference.owner, &reference.name, branch, token)
            .await?;
        debug!(%sha, "resolved branch head");

        let superproject =
            SubmoduleEntry::pinned(reference.name.clone(), sha.clone()).with_url(repo_url);

        let raw = self
            .host
            .submodules(&reference.owner, &reference.name, &sha, token)
            .await?;
        debug!(count = raw.len(), "fetched submodule entries");

        let submodules = raw
            .into_iter()
            .map(|entry| {
                let url = format!("https://github.com/{}/{}", reference.owner, entry.path);
                entry.with_url(url)
            })
            .collect();

        Ok(RepositoryAnalysis {
            superproject,
            submodules,
        })
    }
}
