//! Fenced code block handling: diagrams and syntax highlighting.

use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::{SyntaxReference, SyntaxSet};

/// Theme used for highlighted code.
pub const THEME: &str = "InspiredGitHub";

/// Fence languages rendered as client-side diagrams.
const DIAGRAM_LANGUAGES: &[&str] = &["mermaid"];

/// Script appended once to documents containing diagrams.
pub const DIAGRAM_SCRIPT: &str = r#"<script src="https://cdn.jsdelivr.net/npm/mermaid/dist/mermaid.min.js"></script><script>mermaid.initialize({startOnLoad: true});</script>"#;

/// Parsed code fence info string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FenceInfo {
    /// Language token, if the fence names one
    pub language: Option<String>,
}

impl FenceInfo {
    /// Parse a code fence info string.
    ///
    /// Supports plain tokens (`rust`) and attribute suffixes (`rust{.numbered}`).
    pub fn parse(info: &str) -> Self {
        let token = info
            .split_whitespace()
            .next()
            .unwrap_or("")
            .split('{')
            .next()
            .unwrap_or("")
            .trim();

        Self {
            language: (!token.is_empty()).then(|| token.to_string()),
        }
    }

    /// Check if this block should be rendered as a diagram.
    pub fn is_diagram(&self) -> bool {
        self.language
            .as_deref()
            .is_some_and(|lang| DIAGRAM_LANGUAGES.contains(&lang.to_lowercase().as_str()))
    }
}

/// Render a diagram block for client-side drawing.
pub fn diagram_html(source: &str) -> String {
    format!(r#"<pre class="mermaid">{}</pre>"#, html_escape(source))
}

/// Syntax highlighter using syntect.
pub struct Highlighter {
    syntax_set: SyntaxSet,
    theme: Theme,
}

impl Highlighter {
    /// Create a highlighter with the default syntaxes and theme.
    pub fn new() -> Self {
        let mut themes = ThemeSet::load_defaults().themes;
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme: themes.remove(THEME).unwrap_or_default(),
        }
    }

    /// Find a syntax for a code block.
    ///
    /// Uses the fence language when it is known, then falls back to guessing
    /// from the first line (shebangs, modelines, XML declarations).
    pub fn detect(&self, code: &str, language: Option<&str>) -> Option<&SyntaxReference> {
        language
            .and_then(|lang| self.syntax_set.find_syntax_by_token(lang))
            .or_else(|| {
                let first_line = code.lines().next().unwrap_or("");
                self.syntax_set.find_syntax_by_first_line(first_line)
            })
    }

    /// Highlight a code block.
    ///
    /// Unknown languages are highlighted as plain text.
    pub fn highlight(&self, code: &str, language: Option<&str>) -> String {
        let syntax = self
            .detect(code, language)
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        match highlighted_html_for_string(code, &self.syntax_set, syntax, &self.theme) {
            Ok(html) => html,
            Err(_) => fallback_html(code, language),
        }
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

fn fallback_html(code: &str, language: Option<&str>) -> String {
    let class = language
        .map(|l| format!(r#" class="language-{}""#, html_escape(l)))
        .unwrap_or_default();
    format!("<pre><code{class}>{}</code></pre>", html_escape(code))
}

/// Simple HTML escaping
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
