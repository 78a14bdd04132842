//! Check command: load everything `serve` would, then report the routes.

use std::sync::Arc;

use anyhow::{Context, Result};
use folio_server::{create_router, page_route};
use folio_site::{Site, SiteLayout};

/// Run the check command.
pub fn run(layout: SiteLayout) -> Result<()> {
    let site = Arc::new(Site::load(layout).context("Failed to load site")?);

    let _router = create_router(Arc::clone(&site)).context("Failed to bind routes")?;

    for page in &site.pages {
        let route = page_route(&page.slug)?;
        tracing::info!("{} -> {} ({})", route, page.path.display(), page.title);
    }

    for policy in &site.policies {
        tracing::info!(
            "/policy/{} -> {} ({})",
            policy.slug,
            policy.path.display(),
            policy.title
        );
    }

    tracing::info!(
        "Site OK: {} pages, {} policies",
        site.pages.len(),
        site.policies.len()
    );

    Ok(())
}
