//! Content indexing, site configuration and templates for folio.
//!
//! Everything in this crate is built once at startup and then only read.

pub mod config;
pub mod index;
pub mod site;
pub mod templates;

pub use config::{ConfigError, NavItem, SiteConfig};
pub use index::{build_index, slug_for, ContentIndex, IndexError, PageInfo, INDEX_SLUG};
pub use site::{Site, SiteError, SiteLayout};
pub use templates::{PresentationRecord, TemplateEngine, TemplateError, TrustedHtml};
