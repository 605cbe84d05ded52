//! Hosting provider abstraction
//!
//! This module defines the trait implemented by remote repository hosts and
//! the error taxonomy shared by every remote lookup. The production
//! implementation is [`GitHubClient`](crate::github::client::GitHubClient);
//! tests substitute [`MockHost`](crate::github::mock::MockHost).

use crate::analysis::types::SubmoduleEntry;
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during a remote repository lookup
#[derive(Debug, Error)]
pub enum HostError {
    /// The provider answered with a non-2xx status
    #[error("host returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code of the response
        status: u16,
        /// Raw response body text
        body: String,
    },

    /// A 2xx response whose body lacks an expected field or shape
    #[error("malformed response from {endpoint} lookup: {reason}")]
    Malformed {
        /// Logical endpoint the response came from
        endpoint: &'static str,
        /// What was missing or undecodable
        reason: String,
    },

    /// The request failed before any HTTP status existed
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl HostError {
    /// Shorthand for a missing-field failure on a 2xx response
    pub(crate) fn missing_field(endpoint: &'static str, field: &str) -> Self {
        HostError::Malformed {
            endpoint,
            reason: format!("missing field `{}`", field),
        }
    }
}

/// Remote lookups against a repository hosting provider
///
/// All three operations are read-only GETs. A bearer token is forwarded
/// unchanged when present; without one the provider's unauthenticated rate
/// limits apply. No call mutates shared state, and a failed call is never
/// retried here.
#[async_trait]
pub trait RepositoryHost: Send + Sync {
    /// Resolves a branch to the commit hash at its head
    async fn branch_commit(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        token: Option<&str>,
    ) -> Result<String, HostError>;

    /// Resolves a repository's default branch name
    async fn default_branch(
        &self,
        owner: &str,
        repo: &str,
        token: Option<&str>,
    ) -> Result<String, HostError>;

    /// Lists the gitlink entries pinned by the given commit, in tree order
    ///
    /// Entries in the returned vec carry a path and commit hash but no URL.
    /// A tree with no gitlinks yields an empty vec, not an error.
    async fn submodules(
        &self,
        owner: &str,
        repo: &str,
        commit: &str,
        token: Option<&str>,
    ) -> Result<Vec<SubmoduleEntry>, HostError>;

    /// Returns the human-readable name of this host
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display_keeps_code_and_body() {
        let err = HostError::Status {
            status: 404,
            body: "{\"message\":\"Not Found\"}".to_string(),
        };
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("Not Found"));
    }

    #[test]
    fn test_missing_field_display() {
        let err = HostError::missing_field("branch", "commit.sha");
        assert!(err.to_string().contains("branch"));
        assert!(err.to_string().contains("commit.sha"));
    }
}
