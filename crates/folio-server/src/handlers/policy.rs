//! Policy document lookup.
//!
//! `GET /policy/{id}` resolves `id` against the policy index on every
//! request. Unknown ids and missing files answer 404 through the policy
//! template; other failures answer 500.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use folio_site::templates::POLICY_TEMPLATE;
use folio_site::{PresentationRecord, Site};

use crate::error::HandlerError;
use crate::handlers::render_source;

pub const NOT_FOUND_TITLE: &str = "Policy Not Found";
pub const NOT_FOUND_MESSAGE: &str = "Policy not found.";
pub const UNAVAILABLE_MESSAGE: &str = "Unable to load policy document.";

/// Handle GET /policy/{id}.
pub(crate) async fn show(State(site): State<Arc<Site>>, Path(id): Path<String>) -> Response {
    let config = Arc::clone(&site.config);

    let (status, record) = match site.policies.get(&id) {
        None => (
            StatusCode::NOT_FOUND,
            PresentationRecord::failure(
                Some(NOT_FOUND_TITLE.to_string()),
                NOT_FOUND_MESSAGE,
                config,
            ),
        ),
        Some(policy) => match render_source(&site, &policy.path).await {
            Ok(body) => {
                let title = (!policy.title.is_empty()).then(|| policy.title.clone());
                (
                    StatusCode::OK,
                    PresentationRecord::content(title, body, config),
                )
            }
            Err(e) => {
                let status = if e.is_unavailable() {
                    StatusCode::NOT_FOUND
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR
                };
                tracing::warn!(policy = %id, status = status.as_u16(), "render: {}", e);
                (
                    status,
                    PresentationRecord::failure(None, UNAVAILABLE_MESSAGE, config),
                )
            }
        },
    };

    match site.templates.render(POLICY_TEMPLATE, &record) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(source) => HandlerError::Template {
            template: POLICY_TEMPLATE,
            source,
        }
        .into_response(),
    }
}
