// Entrypoint for the gist sync tool.
// - Loads `.env` before parsing flags so clap's env fallbacks can see it.
// - A missing token is the only fatal condition of a run; problems with a
//   single example are logged by the sync loop and the run carries on.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use gist_sync::api::{GistClient, DEFAULT_API_URL};
use gist_sync::config::Config;
use gist_sync::sync::sync_all;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "gist-sync",
    version,
    about = "Push the docs site example sources to their GitHub gists"
)]
struct Cli {
    #[arg(
        long,
        env = "GIST_SYNC_ROOT",
        default_value = ".",
        help = "Repository root containing docs_site/static/examples (relative paths resolve against the current directory)"
    )]
    root: PathBuf,

    #[arg(
        long,
        env = "GIST_API_URL",
        default_value = DEFAULT_API_URL,
        help = "Base URL of the GitHub API"
    )]
    api_url: String,
}

fn main() -> ExitCode {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Failed to load .env file: {}", e);
            return ExitCode::FAILURE;
        }
    }

    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false),
        )
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Read the configuration and push every example. Per-example failures are
/// part of the report, not an error of the run.
fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let client = GistClient::new(&cli.api_url, &config.token)?;

    // Rejected updates echo the API response body here.
    let mut stdout = std::io::stdout().lock();
    sync_all(&client, &config, &cli.root, &mut stdout);
    Ok(())
}
