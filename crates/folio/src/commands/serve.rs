//! Serve command.

use anyhow::{Context, Result};
use folio_server::{Server, ServerConfig};
use folio_site::{Site, SiteLayout};

/// Run the serve command.
pub async fn run(layout: SiteLayout, host: String, port: u16) -> Result<()> {
    let site = Site::load(layout).context("Failed to load site")?;

    let config = ServerConfig { host, port };

    Server::new(config, site).start().await?;

    Ok(())
}
