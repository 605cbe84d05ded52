//! Output formatting for analysis results
//!
//! Formatters for the supported output formats: JSON for machine
//! consumption and a human-readable text rendering.

use anyhow::{Context, Result};

use crate::analysis::types::RepositoryAnalysis;
use crate::cli::commands::OutputFormatArg;

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// Human-readable formatted text
    Human,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Human => OutputFormat::Human,
        }
    }
}

/// Output formatter for analysis results
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    /// Creates a new output formatter with the specified format
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats an analysis result according to the configured format
    pub fn format(&self, analysis: &RepositoryAnalysis) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_json(analysis),
            OutputFormat::Human => Ok(self.format_human(analysis)),
        }
    }

    fn format_json(&self, analysis: &RepositoryAnalysis) -> Result<String> {
        serde_json::to_string_pretty(analysis).context("Failed to serialize analysis to JSON")
    }

    fn format_human(&self, analysis: &RepositoryAnalysis) -> String {
        let mut lines = Vec::new();

        lines.push("Superproject".to_string());
        lines.push(format!(
            "  {} @ {}",
            analysis.superproject.path, analysis.superproject.sha
        ));
        if let Some(url) = &analysis.superproject.url {
            lines.push(format!("  {}", url));
        }

        lines.push(String::new());
        lines.push(format!("Submodules ({})", analysis.submodules.len()));
        if analysis.submodules.is_empty() {
            lines.push("  (none)".to_string());
        }
        for entry in &analysis.submodules {
            lines.push(format!("  {} @ {}", entry.path, entry.sha));
            if let Some(url) = &entry.url {
                lines.push(format!("    {}", url));
            }
        }

        lines.join("\n")
    }
}
