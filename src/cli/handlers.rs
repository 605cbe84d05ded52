//! Command handlers wiring configuration, client and analyzer together
//!
//! Handlers are pass-through glue: they resolve inputs from arguments and
//! the environment, run the analysis pipeline and render the result. All
//! logic lives in the library modules; handlers only translate outcomes
//! into exit codes.

use crate::analysis::analyzer::RepositoryAnalyzer;
use crate::cli::commands::AnalyzeArgs;
use crate::cli::output::{OutputFormat, OutputFormatter};
use crate::config::{ConfigError, PolyrepoConfig};
use crate::github::client::GitHubClient;
use std::sync::Arc;
use tracing::{debug, error};

/// Exit code for usage and configuration problems
const EXIT_CONFIG: i32 = 2;

/// Exit code for a failed analysis
const EXIT_FAILURE: i32 = 1;

/// Handles `polyrepo analyze`
pub async fn handle_analyze(args: &AnalyzeArgs) -> i32 {
    let config = match resolve_config(args) {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {}", e);
            eprintln!("Error: {}", e);
            return EXIT_CONFIG;
        }
    };

    debug!(
        url = %config.superproject_url,
        branch = %config.branch,
        authenticated = config.token.is_some(),
        "resolved analysis inputs"
    );

    let client = Arc::new(GitHubClient::with_timeout(config.request_timeout()));
    let analyzer = RepositoryAnalyzer::new(client);

    let analysis = match analyzer
        .analyze(
            &config.superproject_url,
            &config.branch,
            config.token.as_deref(),
        )
        .await
    {
        Ok(analysis) => analysis,
        Err(e) => {
            error!("Analysis failed: {}", e);
            eprintln!("Error: {}", e);
            return EXIT_FAILURE;
        }
    };

    let formatter = OutputFormatter::new(OutputFormat::from(args.format));
    match formatter.format(&analysis) {
        Ok(output) => {
            println!("{}", output);
            0
        }
        Err(e) => {
            error!("Failed to format output: {}", e);
            eprintln!("Error: {}", e);
            EXIT_FAILURE
        }
    }
}

/// Merges CLI arguments over the environment configuration
///
/// A URL given on the command line takes priority over the environment;
/// without either the command fails. Branch, token and timeout flags
/// override their environment counterparts individually.
fn resolve_config(args: &AnalyzeArgs) -> Result<PolyrepoConfig, ConfigError> {
    let mut config = match &args.repository {
        Some(url) => PolyrepoConfig::from_env_with_url(url.clone())?,
        None => PolyrepoConfig::from_env()?,
    };

    if let Some(branch) = &args.branch {
        config.branch = branch.clone();
    }
    if let Some(token) = &args.token {
        config.token = Some(token.clone());
    }
    if let Some(timeout) = args.timeout {
        config.request_timeout_secs = timeout;
    }

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::OutputFormatArg;
    use serial_test::serial;
    use std::env;

    fn analyze_args(repository: Option<&str>) -> AnalyzeArgs {
        AnalyzeArgs {
            repository: repository.map(str::to_string),
            branch: None,
            token: None,
            format: OutputFormatArg::Human,
            timeout: None,
        }
    }

    fn clear_env() {
        for key in [
            "POLYREPO_SUPERPROJECT",
            "POLYREPO_BRANCH",
            "POLYREPO_TOKEN",
            "GITHUB_TOKEN",
            "POLYREPO_REQUEST_TIMEOUT",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_resolve_config_requires_some_url() {
        clear_env();
        let result = resolve_config(&analyze_args(None));
        assert!(matches!(result, Err(ConfigError::MissingSuperproject)));
    }

    #[test]
    #[serial]
    fn test_resolve_config_argument_beats_environment() {
        clear_env();
        env::set_var("POLYREPO_SUPERPROJECT", "https://github.com/acme/other");

        let config = resolve_config(&analyze_args(Some("https://github.com/acme/widget"))).unwrap();
        assert_eq!(config.superproject_url, "https://github.com/acme/widget");
    }

    #[test]
    #[serial]
    fn test_resolve_config_flag_overrides() {
        clear_env();
        env::set_var("POLYREPO_BRANCH", "develop");

        let mut args = analyze_args(Some("https://github.com/acme/widget"));
        args.branch = Some("release".to_string());
        args.token = Some("tok".to_string());
        args.timeout = Some(7);

        let config = resolve_config(&args).unwrap();
        assert_eq!(config.branch, "release");
        assert_eq!(config.token.as_deref(), Some("tok"));
        assert_eq!(config.request_timeout_secs, 7);
    }

    #[test]
    #[serial]
    fn test_resolve_config_rejects_zero_timeout_flag() {
        clear_env();
        let mut args = analyze_args(Some("https://github.com/acme/widget"));
        args.timeout = Some(0);

        let result = resolve_config(&args);
        assert!(matches!(result, Err(ConfigError::ValidationFailed(_))));
    }
}
