//! cartridge-console: terminal front end for the cartridge accounting API
//!
//! Each invocation runs one page command. Protected commands pass the
//! session guard first; the session itself lives in `--session-dir`.

mod app;
mod cli;
mod config;
mod logger;
mod pages;
mod render;
mod routes;

use std::process::ExitCode;

use clap::Parser;

use app::App;
use cli::Cli;
use config::ConsoleConfig;

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file; real environment variables win
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = ConsoleConfig::from_args(&cli.global)?;
    logger::init_logger(&config.log_level, config.log_dir.as_deref())?;

    tracing::debug!(
        api_url = %config.api_url,
        session_dir = %config.session_dir.display(),
        "console starting"
    );

    let app = App::new(config)?;
    app.dispatch(cli.command).await
}
