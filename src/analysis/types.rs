//! Data types shared across the analysis pipeline
//!
//! These types describe the externally visible result of analyzing a GitHub
//! superproject: the repository reference extracted from a URL, the pinned
//! submodule entries found in its tree, and the aggregate analysis record.

use serde::{Deserialize, Serialize};

/// An owner/repository pair extracted from a repository URL
///
/// Exists only for the duration of one analysis call. Carries no information
/// about scheme or host; the parser takes the last two path segments as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryReference {
    /// Account or organization owning the repository
    pub owner: String,

    /// Repository name
    pub name: String,
}

/// One git submodule entry, or the superproject itself reused as the same record
///
/// `path` is the repository-relative checkout directory for a submodule, or
/// the repository name for the superproject. `sha` is the pinned commit hash,
/// treated as an opaque string. `url` is absent when the entry comes straight
/// from the tree listing and is filled in by the analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmoduleEntry {
    /// Repository-relative path of the submodule checkout
    pub path: String,

    /// Pinned commit hash
    pub sha: String,

    /// Browsable repository URL, populated by the analyzer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl SubmoduleEntry {
    /// Creates an entry without a URL, as returned by the tree listing
    pub fn pinned(path: impl Into<String>, sha: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            sha: sha.into(),
            url: None,
        }
    }

    /// Returns a copy of this entry with the given URL attached
    pub fn with_url(self, url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..self
        }
    }
}

/// Final result of analyzing a superproject at a branch
///
/// `submodules` preserves the order of the remote tree listing. The value is
/// constructed once per analysis call and handed to the caller; nothing is
/// persisted or cached between calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryAnalysis {
    /// The superproject itself, with its branch head commit
    pub superproject: SubmoduleEntry,

    /// Submodules pinned by the superproject, in tree order
    pub submodules: Vec<SubmoduleEntry>,
}
