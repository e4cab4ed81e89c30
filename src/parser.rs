//! WhatsApp TXT transcript parser.
//!
//! Exports look like this (Android, Spanish locale):
//!
//! ```text
//! 01/01/24, 10:00 - Ana: hola Pablo
//! 01/01/24, 10:01 - Pablo: hola que tal
//! segunda linea
//! ```
//!
//! A line matching `date, time - author: body` starts a new message; any
//! other line continues the message that is currently open. Parsing is a
//! small state machine ([`LineMachine`]) fed one physical line at a time.
//!
//! # Example
//!
//! ```rust
//! use chatstats::config::AnalysisConfig;
//! use chatstats::parser::TranscriptParser;
//!
//! let config = AnalysisConfig::default();
//! let parser = TranscriptParser::new(&config);
//! let records = parser.parse_str(
//!     "01/01/24, 10:00 - Ana: hola Pablo\n\
//!      01/01/24, 10:01 - Pablo: hola que tal\n\
//!      segunda linea",
//! );
//!
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[1].text, "hola que tal\nsegunda linea");
//! ```

use std::fs;
use std::io::BufRead;
use std::path::Path;
use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;
use tracing::{debug, info};

use crate::Record;
use crate::config::AnalysisConfig;
use crate::error::{ChatstatsError, Result};
use crate::filter::{FilterReason, exclusion_reason, normalize_line};

/// `DD/MM/YY, HH:MM - Sender: Message`
static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2}/\d{1,2}/\d{2,4}), (\d{1,2}:\d{2}) - ([^:]+): (.+)$")
        .expect("header pattern is valid")
});

/// Day-first layouts, two-digit years tried first.
const TIMESTAMP_FORMATS: &[&str] = &["%d/%m/%y %H:%M", "%d/%m/%Y %H:%M"];

/// Parse a day-first export timestamp.
///
/// Returns `None` for impossible dates or times (`31/02/24`, `25:00`).
pub fn parse_timestamp(date_str: &str, time_str: &str) -> Option<NaiveDateTime> {
    let datetime_str = format!("{date_str} {time_str}");

    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(&datetime_str, format).ok())
}

/// Where the machine stands between two lines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ParseState {
    /// No message seen yet: continuation lines have nowhere to go.
    #[default]
    Idle,
    /// A message is being accumulated.
    Open(Record),
    /// The last header was rejected; its continuation lines are dropped too.
    Suppressed,
}

impl ParseState {
    fn into_record(self) -> Option<Record> {
        match self {
            ParseState::Open(record) => Some(record),
            ParseState::Idle | ParseState::Suppressed => None,
        }
    }
}

/// Per-run counters describing what happened to each line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseSummary {
    /// Physical lines fed.
    pub lines: usize,
    /// Headers that opened a record.
    pub accepted: usize,
    /// Headers from unsaved phone numbers.
    pub unregistered_contacts: usize,
    /// Headers from the automated assistant.
    pub assistant_messages: usize,
    /// Headers carrying group notifications.
    pub system_events: usize,
    /// Headers whose date or time did not parse.
    pub bad_timestamps: usize,
    /// Lines folded into an open record.
    pub continuations: usize,
    /// Non-header lines with no open record to attach to.
    pub dropped_lines: usize,
}

impl ParseSummary {
    /// Total headers rejected for any reason.
    pub fn rejected(&self) -> usize {
        self.unregistered_contacts + self.assistant_messages + self.system_events + self.bad_timestamps
    }

    fn count_filtered(&mut self, reason: FilterReason) {
        match reason {
            FilterReason::UnregisteredContact => self.unregistered_contacts += 1,
            FilterReason::Assistant => self.assistant_messages += 1,
            FilterReason::SystemEvent => self.system_events += 1,
        }
    }
}

/// The line classifier and continuation state machine.
///
/// Feed lines in transcript order; a record is handed back when the next
/// header closes it, and the last one comes out of [`finish`](Self::finish).
#[derive(Debug)]
pub struct LineMachine<'a> {
    config: &'a AnalysisConfig,
    state: ParseState,
    summary: ParseSummary,
}

impl<'a> LineMachine<'a> {
    /// Creates a machine in the [`ParseState::Idle`] state.
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self {
            config,
            state: ParseState::Idle,
            summary: ParseSummary::default(),
        }
    }

    /// Current state.
    pub fn state(&self) -> &ParseState {
        &self.state
    }

    /// Counters so far.
    pub fn summary(&self) -> ParseSummary {
        self.summary
    }

    /// Processes one physical line, returning the record it closed, if any.
    pub fn feed(&mut self, raw: &str) -> Option<Record> {
        self.summary.lines += 1;
        let line = normalize_line(raw);

        if let Some(caps) = HEADER.captures(&line) {
            let opened = self.open_record(&caps[1], &caps[2], caps[3].trim(), caps[4].trim());
            let next = match opened {
                Some(record) => ParseState::Open(record),
                None => ParseState::Suppressed,
            };
            return std::mem::replace(&mut self.state, next).into_record();
        }

        match &mut self.state {
            ParseState::Open(record) => {
                record.push_line(&line);
                self.summary.continuations += 1;
            }
            ParseState::Idle | ParseState::Suppressed => self.summary.dropped_lines += 1,
        }
        None
    }

    /// Ends the input, returning the record still open.
    pub fn finish(&mut self) -> Option<Record> {
        std::mem::take(&mut self.state).into_record()
    }

    fn open_record(&mut self, date: &str, time: &str, author: &str, body: &str) -> Option<Record> {
        if let Some(reason) = exclusion_reason(author, body, self.config) {
            self.summary.count_filtered(reason);
            return None;
        }

        let participant = self.config.resolve_alias(author);

        let Some(timestamp) = parse_timestamp(date, time) else {
            self.summary.bad_timestamps += 1;
            return None;
        };

        self.summary.accepted += 1;
        Some(Record::new(timestamp, participant, body))
    }
}

/// Parser for WhatsApp TXT exports.
///
/// Borrows the analysis configuration for its alias table and noise filters.
#[derive(Debug, Clone, Copy)]
pub struct TranscriptParser<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> TranscriptParser<'a> {
    /// Creates a parser using the given configuration.
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &'a AnalysisConfig {
        self.config
    }

    /// Parses lines in order.
    pub fn parse_lines<I, S>(&self, lines: I) -> Vec<Record>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.parse_lines_with_summary(lines).0
    }

    /// Parses lines in order and reports what happened to them.
    pub fn parse_lines_with_summary<I, S>(&self, lines: I) -> (Vec<Record>, ParseSummary)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut machine = LineMachine::new(self.config);
        let mut records = Vec::new();

        for line in lines {
            records.extend(machine.feed(line.as_ref()));
        }
        records.extend(machine.finish());

        let summary = machine.summary();
        debug!(?summary, "transcript parsed");
        info!(
            records = records.len(),
            rejected = summary.rejected(),
            "parsed transcript"
        );
        (records, summary)
    }

    /// Parses an in-memory transcript.
    pub fn parse_str(&self, content: &str) -> Vec<Record> {
        self.parse_lines(content.lines())
    }

    /// Reads and parses a transcript file.
    ///
    /// Fails if the file cannot be read or is not valid UTF-8.
    pub fn parse_path(&self, path: &Path) -> Result<Vec<Record>> {
        let bytes = fs::read(path)?;
        let content = String::from_utf8(bytes).map_err(|e| ChatstatsError::utf8(path, e))?;
        Ok(self.parse_str(&content))
    }

    /// Parses everything a reader yields.
    pub fn parse_reader<R: BufRead>(&self, reader: R) -> Result<Vec<Record>> {
        self.records(reader).collect()
    }

    /// Lazily parses records from a reader, one line at a time.
    pub fn records<R: BufRead>(&self, reader: R) -> RecordIterator<'a, R> {
        RecordIterator {
            reader,
            machine: LineMachine::new(self.config),
            buffer: Vec::new(),
            finished: false,
        }
    }
}

/// Iterator over records read from a [`BufRead`].
///
/// A read or decoding failure is yielded once as `Err` and ends iteration.
pub struct RecordIterator<'a, R: BufRead> {
    reader: R,
    machine: LineMachine<'a>,
    buffer: Vec<u8>,
    finished: bool,
}

impl<R: BufRead> RecordIterator<'_, R> {
    /// Counters so far.
    pub fn summary(&self) -> ParseSummary {
        self.machine.summary()
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        self.buffer.clear();
        if self.reader.read_until(b'\n', &mut self.buffer)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8(std::mem::take(&mut self.buffer))?;
        Ok(Some(line))
    }
}

impl<R: BufRead> Iterator for RecordIterator<'_, R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            match self.read_line() {
                Ok(Some(line)) => {
                    if let Some(record) = self.machine.feed(&line) {
                        return Some(Ok(record));
                    }
                }
                Ok(None) => {
                    self.finished = true;
                    return self.machine.finish().map(Ok);
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            }
        }
        None
    }
}
