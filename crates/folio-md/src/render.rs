//! Markdown to HTML rendering.

use std::fs;
use std::path::Path;

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};

use crate::codeblock::{diagram_html, FenceInfo, Highlighter, DIAGRAM_SCRIPT};
use crate::emoji::EmojiReplacer;
use crate::error::MarkdownError;
use crate::frontmatter::split_frontmatter;

/// Where the event loop currently is relative to code blocks.
enum CodeState {
    Outside,
    Indented,
    Fenced { info: FenceInfo, source: String },
}

/// Markdown renderer with a fixed extension set.
///
/// Build one at startup and share it; every call to [`Renderer::render`]
/// uses its own parser state, so concurrent renders never see each other's
/// front-matter or footnote definitions.
pub struct Renderer {
    options: Options,
    highlighter: Highlighter,
    emoji: EmojiReplacer,
}

impl Renderer {
    /// Create a renderer with folio's extensions enabled.
    pub fn new() -> Self {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_DEFINITION_LIST
            | Options::ENABLE_GFM;

        Self {
            options,
            highlighter: Highlighter::new(),
            emoji: EmojiReplacer::new(),
        }
    }

    /// Render the file at `path` to HTML.
    ///
    /// Fails only when the file cannot be read.
    pub fn render(&self, path: &Path) -> Result<String, MarkdownError> {
        let bytes = fs::read(path).map_err(|source| MarkdownError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(self.render_bytes(&bytes))
    }

    /// Render raw file contents, front-matter included, to HTML.
    ///
    /// Invalid UTF-8 sequences become U+FFFD. The front-matter block is
    /// dropped whether or not it parses.
    pub fn render_bytes(&self, bytes: &[u8]) -> String {
        let source = String::from_utf8_lossy(bytes);
        let (_, content) = split_frontmatter(&source);
        self.render_markdown(content)
    }

    /// Render Markdown without front-matter to HTML.
    pub fn render_markdown(&self, content: &str) -> String {
        let parser = Parser::new_ext(content, self.options);

        let mut events: Vec<Event> = Vec::new();
        let mut state = CodeState::Outside;
        let mut has_diagram = false;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                    state = CodeState::Fenced {
                        info: FenceInfo::parse(&info),
                        source: String::new(),
                    };
                }
                Event::Start(Tag::CodeBlock(CodeBlockKind::Indented)) => {
                    state = CodeState::Indented;
                    events.push(event);
                }
                Event::End(TagEnd::CodeBlock) => {
                    match std::mem::replace(&mut state, CodeState::Outside) {
                        CodeState::Fenced { info, source } => {
                            let block = if info.is_diagram() {
                                has_diagram = true;
                                diagram_html(&source)
                            } else {
                                self.highlighter
                                    .highlight(&source, info.language.as_deref())
                            };
                            events.push(Event::Html(CowStr::from(block)));
                        }
                        CodeState::Indented | CodeState::Outside => events.push(event),
                    }
                }
                Event::Text(text) => match &mut state {
                    CodeState::Fenced { source, .. } => source.push_str(&text),
                    CodeState::Indented => events.push(Event::Text(text)),
                    CodeState::Outside => {
                        let replaced = self.emoji.replace(&text).into_owned();
                        events.push(Event::Text(CowStr::from(replaced)));
                    }
                },
                Event::SoftBreak => events.push(Event::HardBreak),
                _ => events.push(event),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        if has_diagram {
            html_output.push_str(DIAGRAM_SCRIPT);
        }

        html_output
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
