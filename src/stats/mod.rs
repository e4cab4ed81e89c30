//! Statistics aggregation over parsed records.
//!
//! [`StatsAggregator`] folds the record sequence in a single ordered pass and
//! then finalizes the fields that need the whole set (averages, modes,
//! rankings). The result is a [`StatsReport`] holding every derived table.
//!
//! # Example
//!
//! ```rust
//! use chatstats::config::AnalysisConfig;
//! use chatstats::parser::TranscriptParser;
//! use chatstats::stats::StatsAggregator;
//!
//! let config = AnalysisConfig::default();
//! let records = TranscriptParser::new(&config).parse_str(
//!     "01/01/24, 10:00 - Ana: hola Pablo\n\
//!      01/01/24, 10:01 - Pablo: hola que tal",
//! );
//!
//! let report = StatsAggregator::new(&config).analyze(&records);
//! assert_eq!(report.participants.len(), 2);
//! assert_eq!(report.mentions.edges.len(), 1);
//! assert_eq!(report.hours.len(), 24 * 2);
//! ```
//!
//! # Ordering
//!
//! Favorite hour, top words and top mentions break ties by first
//! occurrence, so the pass must see records in transcript order. Any future
//! parallel version has to merge raw observations in that order before
//! ranking, not merge per-shard rankings.

pub mod buckets;
pub mod counter;
pub mod mentions;
pub mod participant;
pub mod text;

use std::fmt;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::Record;
use crate::config::AnalysisConfig;

pub use buckets::{HourCount, MonthCount, WEEKDAY_NAMES, WeekdayCount};
pub use counter::OrderedCounter;
pub use mentions::{MentionEdge, MentionMatcher, MentionReport};
pub use participant::ParticipantStats;

use buckets::BucketTally;
use mentions::MentionTally;
use participant::ParticipantAccumulator;

/// Outbound mentions kept per participant.
pub const TOP_MENTIONS: usize = 3;

/// Identities kept in the global mention ranking.
pub const TOP_GLOBAL_MENTIONS: usize = 5;

/// A value with its frequency, as found in a ranking.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RankedItem {
    pub item: String,
    pub count: usize,
}

impl RankedItem {
    pub fn new(item: impl Into<String>, count: usize) -> Self {
        Self {
            item: item.into(),
            count,
        }
    }

    pub(crate) fn from_counts(counts: Vec<(String, usize)>) -> Vec<Self> {
        counts
            .into_iter()
            .map(|(item, count)| Self { item, count })
            .collect()
    }

    /// Joins a ranking as `a (3), b (1)`.
    pub fn summarize(items: &[RankedItem]) -> String {
        items
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for RankedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.item, self.count)
    }
}

/// Every table derived from a transcript.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
    /// One row per author, in order of first message.
    pub participants: Vec<ParticipantStats>,
    /// Sparse `(year, month, participant)` counts.
    pub months: Vec<MonthCount>,
    /// Dense `hour x participant` grid.
    pub hours: Vec<HourCount>,
    /// Dense `weekday x participant` grid.
    pub weekdays: Vec<WeekdayCount>,
    pub mentions: MentionReport,
}

impl StatsReport {
    /// Looks up a participant's row.
    pub fn participant(&self, name: &str) -> Option<&ParticipantStats> {
        self.participants.iter().find(|p| p.name == name)
    }

    /// Messages across all participants.
    pub fn total_messages(&self) -> usize {
        self.participants.iter().map(|p| p.message_count).sum()
    }

    /// Returns `true` if no record made it into the report.
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}

/// Distinct authors in order of first appearance.
pub fn observed_identities(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.participant.as_str())
        .collect::<IndexSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Builds a [`StatsReport`] from records.
#[derive(Debug, Clone, Copy)]
pub struct StatsAggregator<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> StatsAggregator<'a> {
    /// Creates an aggregator using the given configuration.
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    /// Aggregates records, searching for mentions of every author in them.
    pub fn analyze(&self, records: &[Record]) -> StatsReport {
        let identities = observed_identities(records);
        self.aggregate(records, &identities)
    }

    /// Aggregates records, searching for mentions of `identities`.
    ///
    /// The identity set is fixed before the pass starts, so a name is
    /// detected even in messages written before its owner first posts.
    pub fn aggregate(&self, records: &[Record], identities: &[String]) -> StatsReport {
        let matcher = MentionMatcher::new(identities);
        debug!(
            identities = identities.len(),
            searchable = matcher.len(),
            "mention matcher ready"
        );

        let mut accumulators: IndexMap<&str, ParticipantAccumulator> = IndexMap::new();
        let mut mentions = MentionTally::default();
        let mut buckets = BucketTally::default();

        for record in records {
            accumulators
                .entry(record.participant.as_str())
                .or_insert_with(|| ParticipantAccumulator::new(&record.participant))
                .observe(record, self.config);
            buckets.observe(record);

            for mentioned in matcher.mentioned_in(&record.text) {
                if mentioned != record.participant {
                    mentions.record(&record.participant, mentioned);
                }
            }
        }

        let mut participant_names: Vec<String> =
            accumulators.keys().map(|name| (*name).to_string()).collect();
        participant_names.sort();

        let participants: Vec<ParticipantStats> = accumulators
            .into_values()
            .map(|acc| {
                let top_mentions = mentions.top_outbound(acc.name(), TOP_MENTIONS);
                acc.finish(self.config.top_words, top_mentions)
            })
            .collect();

        let report = StatsReport {
            participants,
            months: buckets.months(),
            hours: buckets.hours(&participant_names),
            weekdays: buckets.weekdays(&participant_names),
            mentions: mentions.into_report(TOP_GLOBAL_MENTIONS),
        };

        info!(
            records = records.len(),
            participants = report.participants.len(),
            mention_edges = report.mentions.edges.len(),
            "aggregated statistics"
        );
        report
    }
}
