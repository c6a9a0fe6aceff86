use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Clone)]
#[command(
    name = "dependabot-csv",
    version,
    about = "Export open high and critical runtime Dependabot alerts to CSV"
)]
pub struct Cli {
    /// GitHub token with access to the repository's Dependabot alerts
    /// (falls back to GITHUB_TOKEN; `$NAME` reads the named variable)
    #[arg(long, env = "INPUT_GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Organization or user that owns the repository
    #[arg(long, env = "INPUT_ORG_NAME")]
    pub org: String,

    /// Repository name
    #[arg(long, env = "INPUT_REPO_NAME")]
    pub repo: String,

    /// CSV report path (appended to; parent directories are created)
    #[arg(long, env = "INPUT_CSV_PATH")]
    pub csv_path: PathBuf,

    /// GraphQL endpoint (GitHub Enterprise Server: https://HOST/api/graphql)
    #[arg(long, env = "GITHUB_GRAPHQL_URL", default_value = "https://api.github.com/graphql")]
    pub api_url: String,

    /// Host used when building alert links
    #[arg(long, default_value = "github.com")]
    pub web_host: String,

    /// Write to <csv-path>.partial and move it into place only if every page succeeds
    #[arg(long)]
    pub atomic: bool,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}
