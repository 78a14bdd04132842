//! Content page handler.

use std::sync::Arc;

use axum::response::Html;
use folio_site::templates::BASE_TEMPLATE;
use folio_site::{PageInfo, PresentationRecord, Site};

use crate::error::HandlerError;
use crate::handlers::render_source;

/// Render a page and expand it through the base template.
///
/// The page is re-rendered from disk on every request.
pub(crate) async fn show(
    site: Arc<Site>,
    page: Arc<PageInfo>,
) -> Result<Html<String>, HandlerError> {
    let body = render_source(&site, &page.path).await?;

    let title = (!page.title.is_empty()).then(|| page.title.clone());
    let record = PresentationRecord::content(title, body, Arc::clone(&site.config));

    let html = site
        .templates
        .render(BASE_TEMPLATE, &record)
        .map_err(|source| HandlerError::Template {
            template: BASE_TEMPLATE,
            source,
        })?;

    Ok(Html(html))
}
