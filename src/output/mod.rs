//! Tabular output for reports and records.
//!
//! Every statistic ends up as a flat [`Table`] with a fixed column order:
//! - [`StatsReport::tables`](crate::stats::StatsReport::tables) lists the six report tables
//! - [`write_tables`] / [`to_csv`] - one CSV file per table - requires `csv-output` feature
//! - [`write_records_csv`] / [`read_records_csv`] - the normalized record set - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - the whole report as one JSON document - requires `json-output` feature
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(feature = "csv-output")]
//! # fn main() -> chatstats::Result<()> {
//! use chatstats::config::AnalysisConfig;
//! use chatstats::output::{OutputConfig, write_tables};
//! use chatstats::parser::TranscriptParser;
//! use chatstats::stats::StatsAggregator;
//! use std::path::Path;
//!
//! let config = AnalysisConfig::default();
//! let records = TranscriptParser::new(&config).parse_path(Path::new("chat.txt"))?;
//! let report = StatsAggregator::new(&config).analyze(&records);
//!
//! write_tables(&report, "stats", &OutputConfig::new())?;
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "csv-output"))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
mod tables;

#[cfg(feature = "csv-output")]
pub use csv_writer::{read_records_csv, to_csv, write_records_csv, write_table, write_tables};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
pub use tables::{
    HOURS_TABLE, MENTION_EDGES_TABLE, MENTION_RANKING_TABLE, MONTHS_TABLE, PARTICIPANTS_TABLE,
    RECORD_COLUMNS, WEEKDAYS_TABLE,
};

/// A named table with a header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// File stem the table is written under.
    pub name: &'static str,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates an empty table.
    pub fn new(name: &'static str, headers: Vec<&'static str>) -> Self {
        Self {
            name,
            headers,
            rows: Vec::new(),
        }
    }

    /// Appends a row. Rows must have one cell per header.
    pub fn push_row(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.headers.len(), "row width for {}", self.name);
        self.rows.push(row);
    }

    /// `name.csv`
    pub fn file_name(&self) -> String {
        format!("{}.csv", self.name)
    }

    /// Returns `true` if the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Settings for CSV writers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    /// Field delimiter (default: `,`)
    pub delimiter: u8,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl OutputConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the field delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}
