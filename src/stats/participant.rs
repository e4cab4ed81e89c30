//! Per-participant accumulation and the finalized statistics row.

use serde::{Deserialize, Serialize};

use super::RankedItem;
use super::counter::OrderedCounter;
use super::text::{MessageMetrics, alphabetic_tokens};
use crate::Record;
use crate::config::AnalysisConfig;

/// Finalized statistics for one participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantStats {
    /// Canonical identity.
    pub name: String,
    pub message_count: usize,
    pub word_count: usize,
    /// Sum of message lengths in characters.
    pub total_length: usize,
    /// Mean message length, rounded to two decimals.
    pub average_length: f64,
    /// Hour of day with the most messages; earliest-seen hour wins ties.
    pub favorite_hour: Option<u32>,
    pub emoji_count: usize,
    pub link_count: usize,
    pub question_count: usize,
    pub media_count: usize,
    /// Most used words, highest first.
    pub top_words: Vec<RankedItem>,
    /// Participants this one mentioned most, highest first.
    pub top_mentions: Vec<RankedItem>,
}

impl ParticipantStats {
    /// `word (n), word (n)` rendering of the top words.
    pub fn top_words_summary(&self) -> String {
        RankedItem::summarize(&self.top_words)
    }

    /// `name (n), name (n)` rendering of the outbound mentions.
    pub fn top_mentions_summary(&self) -> String {
        RankedItem::summarize(&self.top_mentions)
    }
}

/// Running totals for one participant during the pass.
#[derive(Debug)]
pub(crate) struct ParticipantAccumulator {
    name: String,
    messages: usize,
    words: usize,
    chars: usize,
    emojis: usize,
    links: usize,
    questions: usize,
    media: usize,
    hours: OrderedCounter<u32>,
    vocabulary: OrderedCounter<String>,
}

impl ParticipantAccumulator {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            messages: 0,
            words: 0,
            chars: 0,
            emojis: 0,
            links: 0,
            questions: 0,
            media: 0,
            hours: OrderedCounter::new(),
            vocabulary: OrderedCounter::new(),
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn observe(&mut self, record: &Record, config: &AnalysisConfig) {
        let metrics = MessageMetrics::measure(&record.text, config);

        self.messages += 1;
        self.words += metrics.words;
        self.chars += metrics.chars;
        self.emojis += metrics.emojis;
        self.links += metrics.links;
        self.questions += usize::from(metrics.is_question);
        self.media += usize::from(metrics.is_media);
        self.hours.add(record.hour());

        for token in alphabetic_tokens(&record.text) {
            if !config.is_excluded(&token) {
                self.vocabulary.add(token);
            }
        }
    }

    pub(crate) fn finish(self, top_words: usize, top_mentions: Vec<RankedItem>) -> ParticipantStats {
        let average_length = if self.messages == 0 {
            0.0
        } else {
            round2(self.chars as f64 / self.messages as f64)
        };

        ParticipantStats {
            favorite_hour: self.hours.mode().copied(),
            top_words: RankedItem::from_counts(self.vocabulary.most_common(top_words)),
            name: self.name,
            message_count: self.messages,
            word_count: self.words,
            total_length: self.chars,
            average_length,
            emoji_count: self.emojis,
            link_count: self.links,
            question_count: self.questions,
            media_count: self.media,
            top_mentions,
        }
    }
}

/// Rounds to two decimals, ties to even (`1.125` becomes `1.12`).
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
