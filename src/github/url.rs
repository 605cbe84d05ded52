//! GitHub repository URL parsing

use crate::analysis::types::RepositoryReference;
use thiserror::Error;

/// A repository URL that does not contain at least an owner and a name
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid GitHub repository URL '{url}': expected at least owner and repository segments")]
pub struct InvalidRepoUrl {
    /// The URL string as supplied by the caller
    pub url: String,
}

/// Extracts an owner/repository pair from a repository URL string
///
/// A trait rather than a free function so the analyzer can take a
/// substitute implementation in tests.
pub trait RepoUrlParser: Send + Sync {
    fn parse(&self, url: &str) -> Result<RepositoryReference, InvalidRepoUrl>;
}

/// Default parser for GitHub-style repository URLs
///
/// Accepts anything of the form `.../{owner}/{name}`, optionally suffixed
/// with `.git` or a trailing slash. Scheme, host and character set are not
/// validated.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitHubUrlParser;

impl RepoUrlParser for GitHubUrlParser {
    fn parse(&self, url: &str) -> Result<RepositoryReference, InvalidRepoUrl> {
        let trimmed = url.strip_suffix('/').unwrap_or(url);
        // Removes the first ".git" found anywhere in the string, not a
        // suffix-anchored strip. Callers rely on this exact behavior.
        let cleaned = trimmed.replacen(".git", "", 1);

        let segments: Vec<&str> = cleaned.split('/').collect();
        if segments.len() < 2 {
            return Err(InvalidRepoUrl {
                url: url.to_string(),
            });
        }

        Ok(RepositoryReference {
            owner: segments[segments.len() - 2].to_string(),
            name: segments[segments.len() - 1].to_string(),
        })
    }
}
