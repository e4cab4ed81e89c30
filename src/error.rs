//! Unified error types for chatstats.
//!
//! Only stream-level failures surface here. Individual transcript lines that
//! are malformed, filtered or carry a bad timestamp are dropped by the parser
//! and never become errors; the aggregator has no error path at all.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// A specialized [`Result`] type for chatstats operations.
///
/// # Example
///
/// ```rust
/// use chatstats::error::Result;
/// use chatstats::Record;
///
/// fn load() -> Result<Vec<Record>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatstatsError>;

/// The error type for all chatstats operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatstatsError {
    /// An I/O error occurred while reading a transcript or writing a table.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The input is not valid UTF-8.
    #[error("UTF-8 encoding error{}: {source}", path.as_ref().map(|p| format!(" in {}", p.display())).unwrap_or_default())]
    Utf8 {
        /// The file path, if available
        path: Option<PathBuf>,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// An external resource (alias table, exclusion list) exists but could
    /// not be understood.
    #[error("Invalid resource {}: {message}", path.display())]
    InvalidResource {
        /// Path of the offending file
        path: PathBuf,
        /// Description of what's wrong
        message: String,
    },

    /// A row of a records CSV could not be turned into a record.
    #[error("Invalid record at line {line}: {message}")]
    InvalidRecord {
        /// 1-based line number in the source file
        line: u64,
        /// Description of what's wrong
        message: String,
    },

    /// CSV reading or writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parsing/serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<std::string::FromUtf8Error> for ChatstatsError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatstatsError::Utf8 {
            path: None,
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatstatsError {
    /// Creates a UTF-8 error tied to the file it came from.
    pub fn utf8(path: impl AsRef<Path>, source: std::string::FromUtf8Error) -> Self {
        ChatstatsError::Utf8 {
            path: Some(path.as_ref().to_path_buf()),
            source,
        }
    }

    /// Creates an invalid resource error.
    pub fn invalid_resource(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        ChatstatsError::InvalidResource {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Creates an invalid record error.
    pub fn invalid_record(line: u64, message: impl Into<String>) -> Self {
        ChatstatsError::InvalidRecord {
            line,
            message: message.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatstatsError::Io(_))
    }

    /// Returns `true` if the input could not be decoded as UTF-8.
    pub fn is_utf8(&self) -> bool {
        matches!(self, ChatstatsError::Utf8 { .. })
    }

    /// Returns `true` if an external resource was malformed.
    pub fn is_invalid_resource(&self) -> bool {
        matches!(self, ChatstatsError::InvalidResource { .. })
    }
}
