//! Error types for the HTTP server.

use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use folio_md::MarkdownError;
use tokio::task::JoinError;

/// Errors that stop the server from starting or running.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid listen address {0}")]
    InvalidAddress(String),

    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, std::io::Error),

    #[error("Server error: {0}")]
    ServeError(std::io::Error),

    #[error("Page {0:?} cannot be served: its route is reserved")]
    ReservedRoute(String),
}

/// Errors raised while answering a single request.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error(transparent)]
    Render(#[from] MarkdownError),

    #[error("Render task failed: {0}")]
    RenderTask(#[from] JoinError),

    #[error("Failed to execute template {template}: {source}")]
    Template {
        template: &'static str,
        #[source]
        source: minijinja::Error,
    },
}

impl HandlerError {
    /// Whether the content source is missing or unreadable.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Render(e) if e.is_unavailable())
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let message = match &self {
            Self::Render(_) | Self::RenderTask(_) => {
                tracing::error!("render: {}", self);
                "could not render markdown"
            }
            Self::Template { .. } => {
                tracing::error!("execute: {}", self);
                "template error"
            }
        };

        (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
    }
}
