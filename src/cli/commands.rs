use clap::{Parser, Subcommand, ValueEnum};

/// GitHub superproject and submodule analysis
#[derive(Parser, Debug)]
#[command(
    name = "polyrepo",
    about = "GitHub superproject and submodule analysis",
    version,
    author,
    long_about = "polyrepo resolves a GitHub repository URL into a commit on a branch, \
                  lists the submodules pinned by that commit, and reconstructs each \
                  submodule's repository URL under the same owner."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Increase verbosity")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Analyze a superproject and its submodules",
        long_about = "Resolves the branch head of a repository, lists its submodule \
                      entries and prints the result.\n\n\
                      Examples:\n  \
                      polyrepo analyze https://github.com/acme/widget\n  \
                      polyrepo analyze https://github.com/acme/widget --branch develop\n  \
                      polyrepo analyze --format json"
    )]
    Analyze(AnalyzeArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    #[arg(
        value_name = "URL",
        help = "Repository URL (defaults to POLYREPO_SUPERPROJECT)"
    )]
    pub repository: Option<String>,

    #[arg(
        short = 'b',
        long,
        value_name = "BRANCH",
        help = "Branch to analyze (defaults to POLYREPO_BRANCH or 'main')"
    )]
    pub branch: Option<String>,

    #[arg(
        short = 't',
        long,
        value_name = "TOKEN",
        help = "Bearer token for the GitHub API (defaults to POLYREPO_TOKEN)"
    )]
    pub token: Option<String>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        long,
        value_name = "SECONDS",
        help = "Request timeout in seconds (defaults to POLYREPO_REQUEST_TIMEOUT or 30)"
    )]
    pub timeout: Option<u64>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    /// Human-readable formatted text
    Human,
    /// JSON format (machine-readable)
    Json,
}
