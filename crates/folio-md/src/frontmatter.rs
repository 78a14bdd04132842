//! Frontmatter extraction and parsing.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde_yaml::Value;

use crate::error::MarkdownError;

/// Front-matter key/value pairs of a content file.
pub type Metadata = BTreeMap<String, Value>;

/// Errors that can occur when parsing frontmatter.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("Invalid YAML in frontmatter: {0}")]
    InvalidYaml(String),

    #[error("Frontmatter must be a mapping, found {0}")]
    NotAMapping(&'static str),
}

/// Split a document into its raw front-matter block and the remaining content.
///
/// A block starts when the very first line is `---` and ends at the next
/// line that is `---` or `...`. A block that is never closed runs to the end
/// of the document. Documents without a block are returned as-is.
pub fn split_frontmatter(source: &str) -> (Option<&str>, &str) {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);

    let Some((first, _)) = source.split_once('\n') else {
        return (None, source);
    };

    if first.trim_end_matches('\r') != "---" {
        return (None, source);
    }

    let yaml_start = first.len() + 1;
    let mut offset = yaml_start;

    for line in source[yaml_start..].split_inclusive('\n') {
        let bare = line.trim_end_matches(['\r', '\n']);
        if bare == "---" || bare == "..." {
            let yaml = &source[yaml_start..offset];
            let remaining = &source[offset + line.len()..];
            return (Some(yaml), remaining);
        }
        offset += line.len();
    }

    (Some(&source[yaml_start..]), "")
}

/// Extract frontmatter from Markdown content.
///
/// Returns the parsed mapping (empty when the document has no block) and the
/// remaining content after the block.
pub fn parse_frontmatter(source: &str) -> Result<(Metadata, &str), FrontmatterError> {
    let (yaml, content) = split_frontmatter(source);

    let Some(yaml) = yaml else {
        return Ok((Metadata::new(), content));
    };

    let value: Value =
        serde_yaml::from_str(yaml).map_err(|e| FrontmatterError::InvalidYaml(e.to_string()))?;

    let metadata = match value {
        Value::Null => Metadata::new(),
        Value::Mapping(_) => serde_yaml::from_value(value)
            .map_err(|e| FrontmatterError::InvalidYaml(e.to_string()))?,
        Value::Bool(_) => return Err(FrontmatterError::NotAMapping("a boolean")),
        Value::Number(_) => return Err(FrontmatterError::NotAMapping("a number")),
        Value::String(_) => return Err(FrontmatterError::NotAMapping("a string")),
        Value::Sequence(_) => return Err(FrontmatterError::NotAMapping("a sequence")),
        Value::Tagged(_) => return Err(FrontmatterError::NotAMapping("a tagged value")),
    };

    Ok((metadata, content))
}

/// Read only the front-matter of the file at `path`.
///
/// The Markdown body is never converted, so this is cheap enough to run over
/// a whole content directory at startup. Only reading the file can fail: a
/// block that does not parse as a YAML mapping is logged and treated as
/// empty, and invalid UTF-8 is replaced.
pub fn extract_metadata(path: &Path) -> Result<Metadata, MarkdownError> {
    let bytes = fs::read(path).map_err(|source| MarkdownError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let source = String::from_utf8_lossy(&bytes);

    match parse_frontmatter(&source) {
        Ok((metadata, _)) => Ok(metadata),
        Err(e) => {
            tracing::warn!(path = %path.display(), "Ignoring front-matter: {}", e);
            Ok(Metadata::new())
        }
    }
}

/// The `title` entry, when present and string-typed.
pub fn title(metadata: &Metadata) -> Option<&str> {
    metadata.get("title").and_then(Value::as_str)
}
