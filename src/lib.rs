pub mod cli;
pub mod config;
pub mod deployment_manager;
pub mod error;
pub mod git_client;
pub mod github_client;
pub mod output;
pub mod payload;
pub mod types;

use clap::Parser;
pub use cli::{CLI, deploy};
use config::Config;
pub use error::DeployError;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

pub async fn run() -> ExitCode {
    let cli = CLI::parse();
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("gh_deploy={}", level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let work_dir = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Error: cannot read current directory: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let stdout = std::io::stdout();
    match deploy(&cli, &work_dir, &mut stdout.lock()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e @ DeployError::InvalidPayloadJson(_)) => {
            eprintln!("{}", e);
            ExitCode::from(e.exit_code())
        }
        Err(e @ DeployError::MalformedRemoteUrl { .. }) => {
            eprintln!("Error: {}", e);
            eprintln!();
            Config::show_configuration_help();
            ExitCode::from(e.exit_code())
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
