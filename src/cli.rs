//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`Command`] - the `parse` and `analyze` subcommands
//! - [`ReportFormat`] - how `analyze` writes its report
//! - [`InputKind`] - raw transcript or normalized records CSV
//!
//! # Example
//!
//! ```rust
//! use chatstats::cli::{InputKind, ReportFormat};
//! use std::path::Path;
//!
//! assert_eq!(InputKind::from_path(Path::new("mensajes.csv")), InputKind::Records);
//! assert_eq!(InputKind::from_path(Path::new("chat.txt")), InputKind::Transcript);
//! assert_eq!(ReportFormat::Json.to_string(), "JSON");
//! ```

use std::path::{Path, PathBuf};

use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Turn WhatsApp group chat exports into participation statistics.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatstats")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatstats parse chat.txt -o mensajes.csv --aliases aliases.json
    chatstats analyze mensajes.csv --out-dir stats --stopwords stopwords_es.txt
    chatstats analyze chat.txt --format json --top-k 5
    chatstats -vv analyze chat.txt")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Parse a transcript into a normalized records CSV (fecha, nombre, mensaje)
    Parse(ParseArgs),

    /// Compute statistics from a transcript or a records CSV
    Analyze(AnalyzeArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ParseArgs {
    /// Path to the exported transcript (.txt)
    pub input: PathBuf,

    /// Path to the records CSV
    #[arg(short, long, default_value = "mensajes.csv")]
    pub output: PathBuf,

    /// JSON object mapping display-name variants to canonical names
    #[arg(long, value_name = "FILE")]
    pub aliases: Option<PathBuf>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Transcript (.txt) or records CSV (.csv)
    pub input: PathBuf,

    /// Directory receiving the report
    #[arg(short = 'd', long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Report format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: ReportFormat,

    /// Alias file, applied when the input is a transcript
    #[arg(long, value_name = "FILE")]
    pub aliases: Option<PathBuf>,

    /// Word list excluded from top words, one per line
    #[arg(long, value_name = "FILE")]
    pub stopwords: Option<PathBuf>,

    /// Number of top words kept per participant
    #[arg(long, value_name = "N")]
    pub top_k: Option<usize>,
}

/// Report format for `analyze`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Six CSV tables (default)
    #[default]
    Csv,

    /// A single report.json
    Json,
}

impl ReportFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Json => "json",
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Csv => write!(f, "CSV"),
            ReportFormat::Json => write!(f, "JSON"),
        }
    }
}

/// What an `analyze` input file holds, judged by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Raw exported transcript
    Transcript,
    /// Records CSV written by `parse`
    Records,
}

impl InputKind {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => InputKind::Records,
            _ => InputKind::Transcript,
        }
    }
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputKind::Transcript => write!(f, "transcript"),
            InputKind::Records => write!(f, "records CSV"),
        }
    }
}
