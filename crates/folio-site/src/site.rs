//! Startup loading of everything a request needs.

use std::path::PathBuf;
use std::sync::Arc;

use folio_md::Renderer;

use crate::config::{ConfigError, SiteConfig};
use crate::index::{build_index, ContentIndex, IndexError};
use crate::templates::{TemplateEngine, TemplateError};

/// Where the site's inputs live on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteLayout {
    /// JSON site configuration
    pub config_path: PathBuf,

    /// Directory holding the page and policy templates
    pub templates_dir: PathBuf,

    /// Content pages, one route each
    pub pages_dir: PathBuf,

    /// Policy documents, served under /policy/{id}
    pub policies_dir: PathBuf,

    /// Static assets, served under /static
    pub static_dir: PathBuf,
}

impl Default for SiteLayout {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from("config.json"),
            templates_dir: PathBuf::from("static/templates"),
            pages_dir: PathBuf::from("static/pages"),
            policies_dir: PathBuf::from("static/policies"),
            static_dir: PathBuf::from("static"),
        }
    }
}

/// Errors that prevent the site from starting.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Templates(#[from] TemplateError),

    #[error("could not parse pages: {0}")]
    Pages(#[source] IndexError),

    #[error("could not parse policies: {0}")]
    Policies(#[source] IndexError),
}

/// Loaded site: configuration, templates, content indexes and renderer.
///
/// Built once before the server accepts connections and never modified.
pub struct Site {
    pub layout: SiteLayout,
    pub config: Arc<SiteConfig>,
    pub templates: TemplateEngine,
    pub pages: ContentIndex,
    pub policies: ContentIndex,
    pub renderer: Renderer,
}

impl Site {
    /// Load configuration, templates and both content indexes.
    ///
    /// Stops at the first failure; nothing is partially loaded.
    pub fn load(layout: SiteLayout) -> Result<Self, SiteError> {
        let config = SiteConfig::load(&layout.config_path)?;
        let templates = TemplateEngine::load(&layout.templates_dir)?;
        let pages = build_index(&layout.pages_dir).map_err(SiteError::Pages)?;
        let policies = build_index(&layout.policies_dir).map_err(SiteError::Policies)?;

        tracing::info!(
            pages = pages.len(),
            policies = policies.len(),
            "Loaded site content"
        );

        Ok(Self {
            layout,
            config: Arc::new(config),
            templates,
            pages,
            policies,
            renderer: Renderer::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::TEMPLATE_FILES;
    use std::fs;
    use std::path::Path;

    fn scaffold(root: &Path) -> SiteLayout {
        let layout = SiteLayout {
            config_path: root.join("config.json"),
            templates_dir: root.join("templates"),
            pages_dir: root.join("pages"),
            policies_dir: root.join("policies"),
            static_dir: root.join("static"),
        };

        fs::write(&layout.config_path, r#"{"nav": [], "footer": "f"}"#).unwrap();
        fs::create_dir_all(&layout.templates_dir).unwrap();
        for name in TEMPLATE_FILES {
            fs::write(layout.templates_dir.join(name), "{{ body }}").unwrap();
        }
        fs::create_dir_all(&layout.pages_dir).unwrap();
        fs::write(layout.pages_dir.join("index.md"), "# Home").unwrap();
        fs::create_dir_all(&layout.policies_dir).unwrap();
        fs::write(layout.policies_dir.join("privacy.md"), "# Privacy").unwrap();

        layout
    }

    #[test]
    fn loads_complete_site() {
        let dir = tempfile::tempdir().unwrap();
        let layout = scaffold(dir.path());

        let site = Site::load(layout).unwrap();

        assert!(site.pages.contains("index"));
        assert!(site.policies.contains("privacy"));
        assert_eq!(site.config.footer, "f");
    }

    #[test]
    fn empty_pages_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let layout = scaffold(dir.path());
        fs::remove_file(layout.pages_dir.join("index.md")).unwrap();

        let result = Site::load(layout);

        assert!(matches!(
            result,
            Err(SiteError::Pages(IndexError::NoContent { .. }))
        ));
    }

    #[test]
    fn empty_policies_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let layout = scaffold(dir.path());
        fs::remove_file(layout.policies_dir.join("privacy.md")).unwrap();

        let result = Site::load(layout);

        assert!(matches!(
            result,
            Err(SiteError::Policies(IndexError::NoContent { .. }))
        ));
    }

    #[test]
    fn missing_config_fails_first() {
        let dir = tempfile::tempdir().unwrap();
        let layout = scaffold(dir.path());
        fs::remove_file(&layout.config_path).unwrap();
        fs::remove_dir_all(&layout.templates_dir).unwrap();

        let result = Site::load(layout);

        assert!(matches!(result, Err(SiteError::Config(_))));
    }

    #[test]
    fn missing_template_fails() {
        let dir = tempfile::tempdir().unwrap();
        let layout = scaffold(dir.path());
        fs::remove_file(layout.templates_dir.join("policy.html")).unwrap();

        let result = Site::load(layout);

        assert!(matches!(result, Err(SiteError::Templates(_))));
    }
}
