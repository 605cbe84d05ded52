//! polyrepo - GitHub superproject and submodule analysis
//!
//! This library resolves a GitHub repository URL into a commit on a
//! requested branch, fetches that commit's tree, extracts the gitlink
//! (submodule) entries, and reconstructs each submodule's repository URL
//! under the same owner.
//!
//! # Core Concepts
//!
//! - **Superproject**: the top-level repository containing submodule
//!   references
//! - **Gitlink**: a tree entry of type `commit` and mode `160000`, marking
//!   a submodule pointer rather than a regular file or directory
//! - **Repository host**: the remote provider answering branch, repository
//!   and tree lookups; pluggable behind a trait so tests run without a
//!   network
//!
//! # Example Usage
//!
//! ```no_run
//! use polyrepo::{GitHubClient, RepositoryAnalyzer};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(GitHubClient::new());
//! let analyzer = RepositoryAnalyzer::new(client);
//!
//! let analysis = analyzer
//!     .analyze("https://github.com/acme/widget", "main", None)
//!     .await?;
//!
//! println!(
//!     "{} is at {}",
//!     analysis.superproject.path, analysis.superproject.sha
//! );
//! for submodule in &analysis.submodules {
//!     println!("  {} @ {}", submodule.path, submodule.sha);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Project Structure
//!
//! - [`github`]: URL parsing, the host abstraction and the REST client
//! - [`analysis`]: the analyzer orchestrating one lookup flow per call
//! - [`config`]: environment-based process configuration
//! - [`cli`]: argument parsing and output formatting for the binary

// Public modules
pub mod analysis;
pub mod cli;
pub mod config;
pub mod github;
pub mod util;

// Re-export key types for convenient access
pub use analysis::analyzer::{AnalysisError, RepositoryAnalyzer};
pub use analysis::types::{RepositoryAnalysis, RepositoryReference, SubmoduleEntry};
pub use config::{ConfigError, PolyrepoConfig};
pub use github::client::GitHubClient;
pub use github::host::{HostError, RepositoryHost};
pub use github::url::{GitHubUrlParser, InvalidRepoUrl, RepoUrlParser};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
