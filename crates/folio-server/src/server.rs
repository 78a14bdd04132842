//! HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use folio_site::Site;

use crate::error::ServerError;
use crate::routes::create_router;

/// Configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// Socket address to listen on.
    pub fn addr(&self) -> Result<SocketAddr, ServerError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|_| ServerError::InvalidAddress(addr))
    }
}

/// Serves a loaded site until the process is terminated.
pub struct Server {
    config: ServerConfig,
    site: Arc<Site>,
}

impl Server {
    /// Create a server for an already loaded site.
    pub fn new(config: ServerConfig, site: Site) -> Self {
        Self {
            config,
            site: Arc::new(site),
        }
    }

    /// Bind the listener and serve requests.
    ///
    /// Routes are bound before the listener opens, so a site that cannot be
    /// routed never accepts a connection.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr = self.config.addr()?;
        let app = create_router(self.site)?;

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(addr, e))?;

        tracing::info!("Serving at http://{}", addr);

        axum::serve(listener, app)
            .await
            .map_err(ServerError::ServeError)?;

        Ok(())
    }
}
