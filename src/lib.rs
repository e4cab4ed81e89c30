//! # Chatstats
//!
//! A Rust library for turning WhatsApp group chat exports into statistics:
//! who writes, when, with which words, and who mentions whom.
//!
//! ## Overview
//!
//! The pipeline has two stages and no feedback between them:
//! - **Parsing** - [`parser::TranscriptParser`] recovers messages from the
//!   export's loosely structured lines, folds multi-line messages, drops
//!   system noise and canonicalizes author names.
//! - **Aggregation** - [`stats::StatsAggregator`] folds the records in one
//!   ordered pass into a [`stats::StatsReport`] with per-participant stats,
//!   month/hour/weekday counts and the mention graph.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatstats::prelude::*;
//! use std::path::Path;
//!
//! fn main() -> Result<()> {
//!     let config = AnalysisConfig::from_files(
//!         Some(Path::new("aliases.json")),
//!         Some(Path::new("stopwords_es.txt")),
//!     )?;
//!
//!     let records = TranscriptParser::new(&config).parse_path(Path::new("chat.txt"))?;
//!     let report = StatsAggregator::new(&config).analyze(&records);
//!
//!     write_tables(&report, "stats", &OutputConfig::new())?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`config`] - [`AnalysisConfig`](config::AnalysisConfig): aliases, exclusion words, noise filters
//! - [`parser`] - [`TranscriptParser`](parser::TranscriptParser), [`LineMachine`](parser::LineMachine)
//! - [`filter`] - line normalization and exclusion predicates
//! - [`stats`] - [`StatsAggregator`](stats::StatsAggregator), [`StatsReport`](stats::StatsReport)
//! - [`output`] - CSV tables, records CSV and JSON report writers
//! - [`error`] - Unified error types ([`ChatstatsError`], [`Result`])
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod output;
pub mod parser;
pub mod record;
pub mod stats;

// Re-export the main types at the crate root for convenience
pub use error::{ChatstatsError, Result};
pub use record::Record;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatstats::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Record;

    // Error types
    pub use crate::error::{ChatstatsError, Result};

    // Configuration
    pub use crate::config::AnalysisConfig;

    // Parsing
    pub use crate::parser::{ParseSummary, TranscriptParser};

    // Aggregation
    pub use crate::stats::{ParticipantStats, RankedItem, StatsAggregator, StatsReport};

    // Output
    pub use crate::output::{OutputConfig, Table};
    #[cfg(feature = "csv-output")]
    pub use crate::output::{read_records_csv, write_records_csv, write_tables};
    #[cfg(feature = "json-output")]
    pub use crate::output::{to_json, write_json};
}
