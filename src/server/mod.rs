pub mod error;
pub mod handlers;
pub mod routes;
pub mod upload;

use std::io;
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::services::config::{ConfigError, ServerConfig};
use crate::services::session_state::SessionState;

#[derive(Error, Debug)]
pub enum ServeError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to resolve {address}: {source}")]
    Resolve { address: String, source: io::Error },
    #[error("no socket address found for {0}")]
    NoAddress(String),
    #[error("failed to bind server: {0}")]
    Bind(#[from] warp::Error),
}

/// Serves the API until Ctrl-C is received.
pub async fn serve(config: ServerConfig) -> Result<(), ServeError> {
    config.validate()?;
    let address = config.bind_address();
    let socket = tokio::net::lookup_host(address.as_str())
        .await
        .map_err(|source| ServeError::Resolve {
            address: address.clone(),
            source,
        })?
        .next()
        .ok_or_else(|| ServeError::NoAddress(address.clone()))?;

    let state = Arc::new(SessionState::new());
    let routes = routes::api(state, config);
    let (bound, server) = warp::serve(routes).try_bind_with_graceful_shutdown(socket, async {
        let _ = tokio::signal::ctrl_c().await;
    })?;

    info!(address = %bound, "FulfillSmart API listening");
    server.await;
    info!("server stopped");
    Ok(())
}
