//! GitHub integration
//!
//! This module provides the remote half of the analysis pipeline: the URL
//! parser that extracts an owner/repository pair, the hosting provider
//! abstraction, the REST client for the real GitHub API, and a scripted
//! mock host for tests.

pub mod client;
pub mod host;
pub mod mock;
pub mod url;

// Re-export commonly used types
pub use client::GitHubClient;
pub use host::{HostError, RepositoryHost};
pub use mock::{MockHost, MockReply, RecordedCall};
pub use url::{GitHubUrlParser, InvalidRepoUrl, RepoUrlParser};
