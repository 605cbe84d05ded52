pub mod analyzer;
pub mod types;

pub use analyzer::{AnalysisError, RepositoryAnalyzer};
pub use types::{RepositoryAnalysis, RepositoryReference, SubmoduleEntry};
