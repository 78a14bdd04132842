//! Markdown front-matter extraction and HTML rendering.
//!
//! This crate provides the two content operations folio needs: reading the
//! YAML front-matter of a page without rendering it, and converting a page
//! to HTML with a fixed, process-wide set of extensions.

pub mod codeblock;
pub mod emoji;
pub mod error;
pub mod frontmatter;
pub mod render;

pub use codeblock::{FenceInfo, Highlighter};
pub use error::MarkdownError;
pub use frontmatter::{extract_metadata, parse_frontmatter, FrontmatterError, Metadata};
pub use render::Renderer;
