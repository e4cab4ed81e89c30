//! Line normalization and noise filters for WhatsApp exports.
//!
//! Exports are littered with things that look like messages but are not:
//! group notifications, posts from the built-in assistant and messages from
//! numbers that are not in the exporter's address book. The predicates here
//! decide which header lines are dropped before a record is opened.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::AnalysisConfig;

/// Invisible left-to-right mark WhatsApp sprinkles around names and events.
pub const DIRECTION_MARK: char = '\u{200E}';

/// Byte order mark some exporters put at the start of the file.
pub const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Unsaved contacts show up as their phone number: `+34 612 345 678`.
static PHONE_AUTHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+\d[\d\s]+").expect("phone pattern is valid"));

/// Why a header line was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterReason {
    /// Author is a bare phone number.
    UnregisteredContact,
    /// Author is the automated assistant.
    Assistant,
    /// Body is a group notification.
    SystemEvent,
}

impl fmt::Display for FilterReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FilterReason::UnregisteredContact => "unregistered contact",
            FilterReason::Assistant => "assistant",
            FilterReason::SystemEvent => "system event",
        };
        f.write_str(label)
    }
}

/// Removes direction marks, byte order marks and NUL bytes, then trims
/// surrounding whitespace.
pub fn normalize_line(line: &str) -> String {
    line.chars()
        .filter(|&c| !matches!(c, DIRECTION_MARK | BYTE_ORDER_MARK | '\0'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Check if the author is an unsaved contact shown as a phone number.
pub fn is_unregistered_contact(author: &str) -> bool {
    PHONE_AUTHOR.is_match(author.trim())
}

/// Check if the author is the automated assistant.
pub fn is_assistant(author: &str, config: &AnalysisConfig) -> bool {
    author.trim() == config.assistant_identity
}

/// Check if a message body is a group notification.
///
/// Templates may appear after the actor's name ("Ana añadió a Pablo"), so
/// they are searched anywhere in the marker-free body.
pub fn is_system_event(body: &str, config: &AnalysisConfig) -> bool {
    let cleaned: String = body.chars().filter(|&c| c != DIRECTION_MARK).collect();
    config
        .system_templates
        .iter()
        .any(|template| cleaned.contains(template.as_str()))
}

/// Applies the exclusion predicates in order and reports the first that
/// matches, or `None` if the message should be kept.
pub fn exclusion_reason(author: &str, body: &str, config: &AnalysisConfig) -> Option<FilterReason> {
    if is_unregistered_contact(author) {
        Some(FilterReason::UnregisteredContact)
    } else if is_assistant(author, config) {
        Some(FilterReason::Assistant)
    } else if is_system_event(body, config) {
        Some(FilterReason::SystemEvent)
    } else {
        None
    }
}
