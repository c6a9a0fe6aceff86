use clap::Parser;
use dependabot_csv::actions::error_command;
use dependabot_csv::cli::{self, Cli};
use dependabot_csv::config::{redact_credentials, resolve_credential};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .init();

    if let Err(e) = cli::export::handle_export(&cli).await {
        let secrets: Vec<String> = cli.token.iter().cloned()
            .chain(std::env::var("GITHUB_TOKEN").ok())
            .map(|t| resolve_credential(&t))
            .collect();
        let secret_refs: Vec<&str> = secrets.iter().map(String::as_str).collect();
        let message = redact_credentials(&e.to_string(), &secret_refs);

        let classification = e.classify();
        error!(error_type = classification.error_type, "{}", message);
        println!("{}", error_command(&message));
        std::process::exit(classification.exit_code);
    }
}
