//! Router construction.
//!
//! Every indexed page gets its own route, bound once at startup. The route
//! table never changes while the server runs.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::Router;
use folio_site::{Site, INDEX_SLUG};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::error::ServerError;
use crate::handlers;

/// Prefix static assets are served under.
pub const STATIC_PREFIX: &str = "static";

/// Characters escaped when a slug becomes a path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Route path for a page slug.
///
/// The `index` page is served at `/`; other pages at `/{slug}`.
pub fn page_route(slug: &str) -> Result<String, ServerError> {
    if slug == INDEX_SLUG {
        return Ok("/".to_string());
    }

    if slug.is_empty() || slug == STATIC_PREFIX {
        return Err(ServerError::ReservedRoute(slug.to_string()));
    }

    Ok(format!("/{}", utf8_percent_encode(slug, PATH_SEGMENT)))
}

/// Create the application router.
///
/// # Arguments
///
/// * `site` - Loaded site shared by every handler
pub fn create_router(site: Arc<Site>) -> Result<Router, ServerError> {
    // Slugs like `:draft` are literal segments, not 0.7-style captures.
    let mut router: Router<Arc<Site>> = Router::new().without_v07_checks();

    for page in &site.pages {
        let route = page_route(&page.slug)?;
        tracing::debug!(route = %route, source = %page.path.display(), "Binding page");

        let page = Arc::new(page.clone());
        router = router.route(
            &route,
            get(move |State(site): State<Arc<Site>>| {
                handlers::page::show(site, Arc::clone(&page))
            }),
        );
    }

    let static_dir = ServeDir::new(&site.layout.static_dir);

    Ok(router
        .route("/policy/{id}", get(handlers::policy::show))
        .nest_service(&format!("/{STATIC_PREFIX}"), static_dir)
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(site))
}
