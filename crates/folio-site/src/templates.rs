//! Template engine for rendering pages and policy documents.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use minijinja::{context, Environment, Value};

use crate::config::SiteConfig;

/// Layout used for content pages.
pub const BASE_TEMPLATE: &str = "base.html";
/// Partial included by the layouts for the site header.
pub const HEADER_TEMPLATE: &str = "header.html";
/// Partial included by the layouts for the site footer.
pub const FOOTER_TEMPLATE: &str = "footer.html";
/// Layout used for policy documents.
pub const POLICY_TEMPLATE: &str = "policy.html";

/// Every template loaded at startup, in load order.
pub const TEMPLATE_FILES: [&str; 4] = [
    BASE_TEMPLATE,
    HEADER_TEMPLATE,
    FOOTER_TEMPLATE,
    POLICY_TEMPLATE,
];

/// HTML produced by the render pipeline.
///
/// Templates emit it without escaping, so only rendered Markdown should be
/// wrapped in this type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrustedHtml(String);

impl TrustedHtml {
    /// Mark rendered markup as safe to embed.
    pub fn new(html: String) -> Self {
        Self(html)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Data handed to a template for a single response.
#[derive(Debug, Clone)]
pub struct PresentationRecord {
    /// Page title
    pub title: Option<String>,
    /// Rendered content
    pub body: TrustedHtml,
    /// User-facing error message
    pub error: Option<String>,
    /// Site-wide settings
    pub config: Arc<SiteConfig>,
}

impl PresentationRecord {
    /// Record for successfully rendered content.
    pub fn content(title: Option<String>, body: TrustedHtml, config: Arc<SiteConfig>) -> Self {
        Self {
            title,
            body,
            error: None,
            config,
        }
    }

    /// Record for a failed lookup; the body stays empty.
    pub fn failure(
        title: Option<String>,
        error: impl Into<String>,
        config: Arc<SiteConfig>,
    ) -> Self {
        Self {
            title,
            body: TrustedHtml::default(),
            error: Some(error.into()),
            config,
        }
    }
}

/// Errors that can occur when loading templates.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Failed to read template {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to compile template {name}: {source}")]
    Compile {
        name: String,
        #[source]
        source: minijinja::Error,
    },
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Load and compile every template in [`TEMPLATE_FILES`] from `dir`.
    pub fn load(dir: &Path) -> Result<Self, TemplateError> {
        let mut sources = Vec::with_capacity(TEMPLATE_FILES.len());

        for name in TEMPLATE_FILES {
            let path = dir.join(name);
            let source = fs::read_to_string(&path)
                .map_err(|source| TemplateError::Read { path, source })?;
            sources.push((name.to_string(), source));
        }

        let engine = Self::from_sources(sources)?;
        tracing::debug!("Loaded {} templates from {}", TEMPLATE_FILES.len(), dir.display());
        Ok(engine)
    }

    /// Compile templates from in-memory `(name, source)` pairs.
    pub fn from_sources(
        sources: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self, TemplateError> {
        let mut env = Environment::new();

        for (name, source) in sources {
            env.add_template_owned(name.clone(), source)
                .map_err(|source| TemplateError::Compile { name, source })?;
        }

        Ok(Self { env })
    }

    /// Expand the named template with a presentation record.
    ///
    /// Missing titles and errors render as empty strings.
    pub fn render(
        &self,
        template: &str,
        record: &PresentationRecord,
    ) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template)?;

        tmpl.render(context! {
            title => record.title.as_deref().unwrap_or_default(),
            body => Value::from_safe_string(record.body.as_str().to_string()),
            error => record.error.as_deref().unwrap_or_default(),
            config => record.config.as_ref(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NavItem;

    const BASE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><title>{{ title }}</title></head>
<body>
{% include "header.html" %}
<main>{{ body }}</main>
{% include "footer.html" %}
</body>
</html>"#;

    const HEADER: &str = r#"<nav>{% for item in config.nav %}<a href="{{ item.url }}">{{ item.title }}</a>{% endfor %}</nav>"#;

    const FOOTER: &str = r#"<footer>{{ config.footer }}</footer>"#;

    const POLICY: &str = r#"{% include "header.html" %}
<h1>{{ title }}</h1>
{% if error %}<p class="error">{{ error }}</p>{% endif %}
<article>{{ body }}</article>"#;

    fn engine() -> TemplateEngine {
        TemplateEngine::from_sources([
            (BASE_TEMPLATE.to_string(), BASE.to_string()),
            (HEADER_TEMPLATE.to_string(), HEADER.to_string()),
            (FOOTER_TEMPLATE.to_string(), FOOTER.to_string()),
            (POLICY_TEMPLATE.to_string(), POLICY.to_string()),
        ])
        .unwrap()
    }

    fn config() -> Arc<SiteConfig> {
        Arc::new(SiteConfig {
            nav: vec![NavItem {
                title: "Home".to_string(),
                url: "/".to_string(),
            }],
            footer: "All rights reserved".to_string(),
        })
    }

    #[test]
    fn renders_page_with_trusted_body() {
        let record = PresentationRecord::content(
            Some("About".to_string()),
            TrustedHtml::new("<p>Hello <em>world</em></p>".to_string()),
            config(),
        );

        let html = engine().render(BASE_TEMPLATE, &record).unwrap();

        assert!(html.contains("<title>About</title>"));
        assert!(html.contains("<main><p>Hello <em>world</em></p></main>"));
        assert!(html.contains(">Home</a>"));
        assert!(html.contains("<footer>All rights reserved</footer>"));
    }

    #[test]
    fn escapes_title_and_error() {
        let record = PresentationRecord::failure(
            Some("Tom & Jerry".to_string()),
            "<b>oops</b>",
            config(),
        );

        let html = engine().render(POLICY_TEMPLATE, &record).unwrap();

        assert!(html.contains("<h1>Tom &amp; Jerry</h1>"));
        assert!(html.contains("&lt;b&gt;oops"));
        assert!(!html.contains("<b>oops"));
    }

    #[test]
    fn missing_title_renders_empty() {
        let record = PresentationRecord::content(None, TrustedHtml::default(), config());

        let html = engine().render(POLICY_TEMPLATE, &record).unwrap();

        assert!(html.contains("<h1></h1>"));
        assert!(!html.contains("class=\"error\""));
    }

    #[test]
    fn unknown_template_is_an_error() {
        let record = PresentationRecord::content(None, TrustedHtml::default(), config());
        assert!(engine().render("missing.html", &record).is_err());
    }

    #[test]
    fn rejects_invalid_template_syntax() {
        let result = TemplateEngine::from_sources([(
            BASE_TEMPLATE.to_string(),
            "{% if %}".to_string(),
        )]);

        assert!(matches!(result, Err(TemplateError::Compile { .. })));
    }

    #[test]
    fn load_reads_all_templates_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        for (name, source) in [
            (BASE_TEMPLATE, BASE),
            (HEADER_TEMPLATE, HEADER),
            (FOOTER_TEMPLATE, FOOTER),
            (POLICY_TEMPLATE, POLICY),
        ] {
            fs::write(dir.path().join(name), source).unwrap();
        }

        let engine = TemplateEngine::load(dir.path()).unwrap();
        let record = PresentationRecord::content(
            Some("Home".to_string()),
            TrustedHtml::new("<p>x</p>".to_string()),
            config(),
        );

        assert!(engine.render(BASE_TEMPLATE, &record).is_ok());
    }

    #[test]
    fn load_fails_on_missing_template() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(BASE_TEMPLATE), BASE).unwrap();

        let result = TemplateEngine::load(dir.path());

        match result {
            Err(TemplateError::Read { path, .. }) => {
                assert!(path.ends_with(HEADER_TEMPLATE));
            }
            _ => panic!("Expected missing header template"),
        }
    }
}
