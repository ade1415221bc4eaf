use std::path::Path;
use std::process::ExitCode;

use crate::server::serve;
use crate::services::config::ServerConfig;

/// Resolves the server config; a missing `--config` means defaults.
pub fn load_server_config(
    config: Option<&str>,
    host: Option<String>,
    port: Option<u16>,
) -> Result<ServerConfig, String> {
    let base = match config {
        Some(path) => ServerConfig::load(Path::new(path))
            .map_err(|e| format!("Failed to load server config {path}: {e}"))?,
        None => ServerConfig::default(),
    };
    Ok(base.with_overrides(host, port))
}

pub async fn serve_command(config: ServerConfig) -> ExitCode {
    match serve(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server failed: {e}");
            ExitCode::FAILURE
        }
    }
}
