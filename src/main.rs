mod commands;
mod domain;
mod server;
mod services;
#[cfg(test)]
mod test_support;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::commands::base_commands::{CliArgs, Commands};
use crate::commands::completions_cmd::completions_command;
use crate::commands::serve_cmd::{load_server_config, serve_command};
use crate::commands::simulate_cmd::simulate_command;
use crate::services::config::DEFAULT_LOG_LEVEL;

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    match args.command {
        Commands::Serve { config, host, port } => {
            let config = match load_server_config(config.as_deref(), host, port) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("{e}");
                    return ExitCode::FAILURE;
                }
            };
            init_tracing(&config.log_level);
            serve_command(config).await
        }
        cmd @ Commands::Simulate { .. } => {
            init_tracing(DEFAULT_LOG_LEVEL);
            simulate_command(cmd)
        }
        Commands::Completions { shell } => completions_command(shell),
    }
}
