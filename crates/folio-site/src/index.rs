//! Content directory scanning.
//!
//! A content directory is a flat folder of Markdown files. Each file becomes
//! one [`PageInfo`] keyed by a slug derived from its file name, so
//! `static/pages/Contact Us.md` is served as `/Contact_Us`.

use std::collections::btree_map::{self, BTreeMap};
use std::path::{Path, PathBuf};

use folio_md::{extract_metadata, frontmatter, MarkdownError};
use rayon::prelude::*;
use serde::Serialize;
use walkdir::WalkDir;

/// Extension of content files.
pub const CONTENT_EXTENSION: &str = "md";

/// Slug that is served at the site root.
pub const INDEX_SLUG: &str = "index";

/// A discovered content file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    /// Display title (front-matter `title`, else the file name)
    pub title: String,

    /// Source file path
    pub path: PathBuf,

    /// Route identifier
    pub slug: String,
}

/// Content files of one directory, keyed by slug.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentIndex {
    entries: BTreeMap<String, PageInfo>,
}

impl ContentIndex {
    /// Look up a page by slug.
    pub fn get(&self, slug: &str) -> Option<&PageInfo> {
        self.entries.get(slug)
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.entries.contains_key(slug)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate pages in slug order.
    pub fn iter(&self) -> btree_map::Values<'_, String, PageInfo> {
        self.entries.values()
    }

    /// Insert a page, returning the page it replaced.
    fn insert(&mut self, page: PageInfo) -> Option<PageInfo> {
        self.entries.insert(page.slug.clone(), page)
    }
}

impl<'a> IntoIterator for &'a ContentIndex {
    type Item = &'a PageInfo;
    type IntoIter = btree_map::Values<'a, String, PageInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Errors that can occur when indexing a content directory.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("could not find markdown files in {}", dir.display())]
    NoContent {
        dir: PathBuf,
        #[source]
        source: Option<walkdir::Error>,
    },

    #[error("could not read metadata for {}: {source}", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: MarkdownError,
    },
}

/// Build the index for a content directory.
///
/// Fails when the directory cannot be read, holds no content files, or any
/// of them cannot be read. Front-matter that does not parse only costs the
/// page its title. When two files map to the same slug the
/// one sorting later by file name wins.
pub fn build_index(dir: &Path) -> Result<ContentIndex, IndexError> {
    let files = discover(dir)?;

    let pages = files
        .par_iter()
        .map(|path| page_info(path))
        .collect::<Result<Vec<_>, _>>()?;

    let mut index = ContentIndex::default();
    for page in pages {
        let source = page.path.clone();
        if let Some(replaced) = index.insert(page) {
            tracing::warn!(
                slug = %replaced.slug,
                kept = %source.display(),
                dropped = %replaced.path.display(),
                "Slug collision, later file wins"
            );
        }
    }

    tracing::debug!("Indexed {} pages in {}", index.len(), dir.display());

    Ok(index)
}

/// Find content files directly under `dir`, sorted by file name.
fn discover(dir: &Path) -> Result<Vec<PathBuf>, IndexError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| IndexError::NoContent {
            dir: dir.to_path_buf(),
            source: Some(source),
        })?;

        if entry.file_type().is_file() && is_content_file(entry.path()) {
            files.push(entry.into_path());
        }
    }

    if files.is_empty() {
        return Err(IndexError::NoContent {
            dir: dir.to_path_buf(),
            source: None,
        });
    }

    Ok(files)
}

fn is_content_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };

    !name.starts_with('.')
        && path.extension().and_then(|e| e.to_str()) == Some(CONTENT_EXTENSION)
}

fn page_info(path: &Path) -> Result<PageInfo, IndexError> {
    let metadata = extract_metadata(path).map_err(|source| IndexError::Metadata {
        path: path.to_path_buf(),
        source,
    })?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let title = match frontmatter::title(&metadata) {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => file_name.clone(),
    };

    Ok(PageInfo {
        title,
        path: path.to_path_buf(),
        slug: slug_for(&file_name),
    })
}

/// Derive the route identifier for a content file name.
///
/// Surrounding whitespace and the extension are removed, and spaces become
/// underscores: `"Terms of Use.md"` is `"Terms_of_Use"`.
pub fn slug_for(file_name: &str) -> String {
    let name = file_name.trim();
    let stem = match name.rfind('.') {
        Some(dot) => &name[..dot],
        None => name,
    };
    stem.replace(' ', "_")
}
