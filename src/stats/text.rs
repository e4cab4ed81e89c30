//! Per-message text measurements.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::AnalysisConfig;

static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+|www\.\S+").expect("link pattern is valid"));

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("word pattern is valid"));

/// Emoji live in the supplementary planes; BMP symbols are not counted.
pub fn count_emojis(text: &str) -> usize {
    text.chars().filter(|&c| c >= '\u{10000}').count()
}

/// Counts `http://`, `https://` and `www.` links.
pub fn count_links(text: &str) -> usize {
    LINK.find_iter(text).count()
}

/// A message is a question when it ends in `?`, ignoring trailing whitespace.
pub fn is_question(text: &str) -> bool {
    text.trim_end().ends_with('?')
}

/// Lower-cased alphabetic tokens of a message, in order.
///
/// Tokens are maximal runs of word characters; those containing digits or
/// underscores are dropped.
pub fn alphabetic_tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    WORD.find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .filter(|token| token.chars().all(char::is_alphabetic))
}

/// Everything measured on a single message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessageMetrics {
    /// Whitespace-separated words.
    pub words: usize,
    /// Unicode scalar values.
    pub chars: usize,
    pub emojis: usize,
    pub links: usize,
    pub is_question: bool,
    /// Body is exactly the media placeholder.
    pub is_media: bool,
}

impl MessageMetrics {
    pub fn measure(text: &str, config: &AnalysisConfig) -> Self {
        Self {
            words: text.split_whitespace().count(),
            chars: text.chars().count(),
            emojis: count_emojis(text),
            links: count_links(text),
            is_question: is_question(text),
            is_media: text == config.media_placeholder,
        }
    }
}
