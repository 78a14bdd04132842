//! Site configuration (config.json).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A navigation link shown on every page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    /// Display title
    #[serde(default)]
    pub title: String,
    /// Link target
    #[serde(default)]
    pub url: String,
}

/// Site-wide settings shared by every request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Navigation links, in display order
    #[serde(default)]
    pub nav: Vec<NavItem>,
    /// Footer text
    #[serde(default)]
    pub footer: String,
}

/// Errors that can occur when loading the site configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl SiteConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: SiteConfig =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::debug!(
            nav_items = config.nav.len(),
            "Loaded config from {}",
            path.display()
        );

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn loads_navigation_and_footer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{
  "nav": [
    {"title": "Home", "url": "/"},
    {"title": "Privacy", "url": "/policy/privacy"}
  ],
  "footer": "(c) Example Ltd"
}"#,
        )
        .unwrap();

        let config = SiteConfig::load(&path).unwrap();

        assert_eq!(
            config.nav,
            vec![
                NavItem {
                    title: "Home".to_string(),
                    url: "/".to_string(),
                },
                NavItem {
                    title: "Privacy".to_string(),
                    url: "/policy/privacy".to_string(),
                },
            ]
        );
        assert_eq!(config.footer, "(c) Example Ltd");
    }

    #[test]
    fn missing_fields_default_and_unknown_fields_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"theme": "dark"}"#).unwrap();

        let config = SiteConfig::load(&path).unwrap();

        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn errors_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();

        let result = SiteConfig::load(&dir.path().join("config.json"));

        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn errors_on_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"nav": [}"#).unwrap();

        let result = SiteConfig::load(&path);

        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }
}
