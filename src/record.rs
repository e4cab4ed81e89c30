//! The normalized record type produced by the transcript parser.
//!
//! A [`Record`] is one logical chat message: who sent it, when, and the full
//! text including any continuation lines folded into it.
//!
//! # Examples
//!
//! ```
//! use chatstats::Record;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 1, 1)
//!     .unwrap()
//!     .and_hms_opt(10, 0, 0)
//!     .unwrap();
//! let record = Record::new(ts, "Ana", "hola Pablo");
//!
//! assert_eq!(record.participant(), "Ana");
//! assert_eq!(record.to_transcript_line(), "01/01/2024, 10:00 - Ana: hola Pablo");
//! ```

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Timestamp layout used when writing records back out.
pub const RECORD_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A single parsed chat message.
///
/// Records are immutable once the parser emits them and keep transcript
/// order. Timestamps carry minute precision; exports do not include seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// When the message was sent (local time of the exporting device).
    pub timestamp: NaiveDateTime,

    /// Canonical identity of the author, after alias resolution.
    pub participant: String,

    /// Message body. May contain newlines for multi-line messages.
    pub text: String,
}

impl Record {
    /// Creates a new record.
    pub fn new(
        timestamp: NaiveDateTime,
        participant: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            participant: participant.into(),
            text: text.into(),
        }
    }

    /// Returns the author's canonical identity.
    pub fn participant(&self) -> &str {
        &self.participant
    }

    /// Returns the message text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Hour of day, 0-23.
    pub fn hour(&self) -> u32 {
        self.timestamp.hour()
    }

    /// Day of week, 0 = Monday ... 6 = Sunday.
    pub fn weekday(&self) -> u32 {
        self.timestamp.weekday().num_days_from_monday()
    }

    /// Calendar `(year, month)` of the message.
    pub fn year_month(&self) -> (i32, u32) {
        (self.timestamp.year(), self.timestamp.month())
    }

    /// Appends a continuation line to the message body.
    pub(crate) fn push_line(&mut self, line: &str) {
        self.text.push('\n');
        self.text.push_str(line);
    }

    /// Renders the record in export header form, `dd/mm/yyyy, HH:MM - name: text`.
    ///
    /// Multi-line text is emitted as-is, so the continuation lines follow the
    /// header exactly as they would in an export.
    pub fn to_transcript_line(&self) -> String {
        format!(
            "{} - {}: {}",
            self.timestamp.format("%d/%m/%Y, %H:%M"),
            self.participant,
            self.text
        )
    }
}
