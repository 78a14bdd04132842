//! HTTP server for folio sites.
//!
//! Pages and policy documents are bound to routes once at startup and
//! rendered from Markdown on every request.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;

pub use error::{HandlerError, ServerError};
pub use routes::{create_router, page_route};
pub use server::{Server, ServerConfig};
