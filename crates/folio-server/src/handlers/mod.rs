//! Request handlers.

pub mod page;
pub mod policy;

use std::path::Path;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use folio_site::{Site, TrustedHtml};

use crate::error::HandlerError;

/// Render a content file on the blocking pool.
pub(crate) async fn render_source(
    site: &Arc<Site>,
    path: &Path,
) -> Result<TrustedHtml, HandlerError> {
    let site = Arc::clone(site);
    let path = path.to_path_buf();

    let html = tokio::task::spawn_blocking(move || site.renderer.render(&path)).await??;

    Ok(TrustedHtml::new(html))
}

/// Fallback for paths no route matches.
pub(crate) async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "404 page not found")
}
