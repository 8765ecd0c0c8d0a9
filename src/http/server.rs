//! HTTP server startup.
//!
//! Plain HTTP only; TLS is expected to terminate at the load balancer in front
//! of the container. There is no graceful shutdown: the process serves until
//! it is killed.

use std::net::SocketAddr;

use axum::Router;

use crate::config::AppConfig;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid listen address '{0}'")]
    Address(String),

    #[error("Failed to bind server: {0}")]
    Bind(#[source] std::io::Error),

    #[error("Server error: {0}")]
    Server(#[source] std::io::Error),
}

/// Resolve the configured listen address.
pub fn listen_addr(config: &AppConfig) -> Result<SocketAddr, ServerError> {
    let addr = format!("{}:{}", config.http.host, config.http.port);
    addr.parse().map_err(|_| ServerError::Address(addr))
}

/// Bind the listener and serve `app`.
///
/// This function blocks until the server fails.
pub async fn start_server(app: Router, config: &AppConfig) -> Result<(), ServerError> {
    let addr = listen_addr(config)?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(ServerError::Bind)?;
    tracing::info!(%addr, mode = config.mode.as_str(), "Starting HTTP server");

    axum::serve(listener, app).await.map_err(ServerError::Server)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listen_addr_from_config() {
        let config = AppConfig::default();
        assert_eq!(listen_addr(&config).unwrap().to_string(), "0.0.0.0:80");
    }

    #[test]
    fn test_listen_addr_rejects_hostname() {
        let mut config = AppConfig::default();
        config.http.host = "not a host".to_string();
        assert!(matches!(listen_addr(&config), Err(ServerError::Address(_))));
    }
}
