//! Mention detection and the who-mentions-whom tally.
//!
//! A participant mentions another when the other's name appears in the
//! message as a whole word, ignoring case. Names shorter than three
//! characters are never searched for; they match far too much ordinary text.

use std::collections::HashSet;

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::counter::OrderedCounter;
use super::RankedItem;

/// Names shorter than this (in characters, lower-cased) are not searched.
pub const MIN_MENTION_LEN: usize = 3;

/// Searches message bodies for a fixed set of identities.
#[derive(Debug, Clone)]
pub struct MentionMatcher {
    candidates: Vec<(String, Regex)>,
}

impl MentionMatcher {
    /// Compiles one word-boundary pattern per searchable identity.
    ///
    /// Duplicate identities are searched once.
    pub fn new<I, S>(identities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut candidates = Vec::new();

        for identity in identities {
            let identity = identity.as_ref();
            if !seen.insert(identity.to_string()) {
                continue;
            }

            let lower = identity.to_lowercase();
            if lower.chars().count() < MIN_MENTION_LEN {
                continue;
            }

            match Regex::new(&format!(r"\b{}\b", regex::escape(&lower))) {
                Ok(pattern) => candidates.push((identity.to_string(), pattern)),
                Err(e) => warn!(identity, error = %e, "cannot search for mentions of identity"),
            }
        }

        Self { candidates }
    }

    /// Number of identities that can be detected.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Returns `true` if no identity is searchable.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Identities mentioned in `text`, each at most once, in candidate order.
    pub fn mentioned_in(&self, text: &str) -> Vec<&str> {
        let lower = text.to_lowercase();
        self.candidates
            .iter()
            .filter(|(_, pattern)| pattern.is_match(&lower))
            .map(|(identity, _)| identity.as_str())
            .collect()
    }
}

/// One directed, weighted mention relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionEdge {
    pub mentioner: String,
    pub mentioned: String,
    pub count: usize,
}

/// Global mention ranking plus the full edge list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MentionReport {
    /// The single most mentioned identity; `None` when nobody was mentioned.
    pub most_mentioned: Option<RankedItem>,
    /// The most mentioned identities, highest first.
    pub top: Vec<RankedItem>,
    /// Every nonzero `(mentioner, mentioned)` pair.
    pub edges: Vec<MentionEdge>,
}

impl MentionReport {
    /// Sum of edge counts pointing at `identity`.
    pub fn inbound(&self, identity: &str) -> usize {
        self.edges
            .iter()
            .filter(|edge| edge.mentioned == identity)
            .map(|edge| edge.count)
            .sum()
    }
}

/// Outbound tallies per author and the global inbound tally.
#[derive(Debug, Clone, Default)]
pub(crate) struct MentionTally {
    outbound: IndexMap<String, OrderedCounter<String>>,
    global: OrderedCounter<String>,
}

impl MentionTally {
    pub(crate) fn record(&mut self, mentioner: &str, mentioned: &str) {
        self.outbound
            .entry(mentioner.to_string())
            .or_default()
            .add(mentioned.to_string());
        self.global.add(mentioned.to_string());
    }

    /// The `n` identities `mentioner` mentioned most.
    pub(crate) fn top_outbound(&self, mentioner: &str, n: usize) -> Vec<RankedItem> {
        self.outbound
            .get(mentioner)
            .map(|counter| RankedItem::from_counts(counter.most_common(n)))
            .unwrap_or_default()
    }

    pub(crate) fn into_report(self, top_n: usize) -> MentionReport {
        let top = RankedItem::from_counts(self.global.most_common(top_n));
        let most_mentioned = top.first().cloned();

        let edges = self
            .outbound
            .iter()
            .flat_map(|(mentioner, counter)| {
                counter.iter().map(move |(mentioned, count)| MentionEdge {
                    mentioner: mentioner.clone(),
                    mentioned: mentioned.clone(),
                    count,
                })
            })
            .collect();

        MentionReport {
            most_mentioned,
            top,
            edges,
        }
    }
}
