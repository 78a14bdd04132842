//! Emoji shortcode substitution (`:tada:` becomes 🎉).

use std::borrow::Cow;

use regex::{Captures, Regex};

/// Replaces GitHub-style emoji shortcodes in text.
pub struct EmojiReplacer {
    pattern: Regex,
}

impl EmojiReplacer {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r":([a-z0-9_+\-]+):").expect("emoji shortcode pattern is valid"),
        }
    }

    /// Replace every known shortcode in `text`; unknown ones are left untouched.
    pub fn replace<'t>(&self, text: &'t str) -> Cow<'t, str> {
        if !text.contains(':') {
            return Cow::Borrowed(text);
        }

        self.pattern.replace_all(text, |caps: &Captures| {
            match emojis::get_by_shortcode(&caps[1]) {
                Some(emoji) => emoji.as_str().to_string(),
                None => caps[0].to_string(),
            }
        })
    }
}

impl Default for EmojiReplacer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_known_shortcodes() {
        let replacer = EmojiReplacer::new();
        assert_eq!(replacer.replace("Ship it :rocket:"), "Ship it 🚀");
        assert_eq!(replacer.replace(":+1: and :tada:"), "👍 and 🎉");
    }

    #[test]
    fn leaves_unknown_shortcodes() {
        let replacer = EmojiReplacer::new();
        assert_eq!(
            replacer.replace("see :not_an_emoji_name:"),
            "see :not_an_emoji_name:"
        );
    }

    #[test]
    fn borrows_text_without_colons() {
        let replacer = EmojiReplacer::new();
        assert!(matches!(replacer.replace("plain text"), Cow::Borrowed(_)));
    }

    #[test]
    fn ignores_times_of_day() {
        let replacer = EmojiReplacer::new();
        assert_eq!(replacer.replace("at 10:30:00"), "at 10:30:00");
    }
}
