//! Error types for the bibliographic timeline pipeline.
//!
//! Every failure aborts the run. Errors carry:
//! - A stable numeric code for machine parsing
//! - A kind classifying the pipeline stage that failed
//! - A short headline and a remediation hint for humans
//!
//! # Human-Facing Output
//!
//! ```text
//! ✗ Unparseable Publication Date
//!   Reason: row 5: cannot parse publication date "unknown"
//!   Fix: Use a calendar date such as 2020-03-15 in the publication date column.
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for bibliographic timeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure classes, one per pipeline concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Input file missing, unreadable, or lacking a required column.
    Load,
    /// A publication date could not be interpreted.
    DateParse,
    /// An output file could not be written or a referenced one is missing.
    Write,
    /// Too few records for the report statistics.
    StatisticalPrecondition,
    /// Invalid configuration.
    Config,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Load => write!(f, "load"),
            ErrorKind::DateParse => write!(f, "date_parse"),
            ErrorKind::Write => write!(f, "write"),
            ErrorKind::StatisticalPrecondition => write!(f, "statistical_precondition"),
            ErrorKind::Config => write!(f, "config"),
        }
    }
}

/// Unified error type.
#[derive(Error, Debug)]
pub enum Error {
    // Load errors (10-19)
    #[error("input file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("failed to read {}: {reason}", path.display())]
    InputUnreadable { path: PathBuf, reason: String },

    #[error("unsupported input format for {}: expected .xlsx, .xlsm, .xlsb, .xls, .ods or .csv", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("{}: missing required column {column:?}", path.display())]
    MissingColumn { path: PathBuf, column: String },

    // Date errors (20-29)
    #[error("row {row}: cannot parse publication date {value:?}")]
    DateParse { row: usize, value: String },

    // Write errors (30-39)
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("referenced output is missing: {}", path.display())]
    MissingArtifact { path: PathBuf },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Statistics errors (40-49)
    #[error("report statistics need at least {required} records, found {found}")]
    StatisticalPrecondition { required: usize, found: usize },

    // Configuration errors (50-59)
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns the stable error code.
    ///
    /// - 10-19: Load errors
    /// - 20-29: Date parse errors
    /// - 30-39: Write errors
    /// - 40-49: Statistical precondition errors
    /// - 50-59: Configuration errors
    pub fn code(&self) -> u32 {
        match self {
            Error::InputNotFound { .. } => 10,
            Error::InputUnreadable { .. } => 11,
            Error::UnsupportedFormat { .. } => 12,
            Error::MissingColumn { .. } => 13,
            Error::DateParse { .. } => 20,
            Error::Write { .. } => 30,
            Error::MissingArtifact { .. } => 31,
            Error::Json(_) => 32,
            Error::StatisticalPrecondition { .. } => 40,
            Error::Config(_) => 50,
        }
    }

    /// Returns the failure class.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InputNotFound { .. }
            | Error::InputUnreadable { .. }
            | Error::UnsupportedFormat { .. }
            | Error::MissingColumn { .. } => ErrorKind::Load,

            Error::DateParse { .. } => ErrorKind::DateParse,

            Error::Write { .. } | Error::MissingArtifact { .. } | Error::Json(_) => {
                ErrorKind::Write
            }

            Error::StatisticalPrecondition { .. } => ErrorKind::StatisticalPrecondition,

            Error::Config(_) => ErrorKind::Config,
        }
    }

    /// Returns a short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::InputNotFound { .. } => "Input File Not Found",
            Error::InputUnreadable { .. } => "Input File Unreadable",
            Error::UnsupportedFormat { .. } => "Unsupported Input Format",
            Error::MissingColumn { .. } => "Missing Required Column",
            Error::DateParse { .. } => "Unparseable Publication Date",
            Error::Write { .. } => "Output Write Failed",
            Error::MissingArtifact { .. } => "Chart Document Missing",
            Error::Json(_) => "Chart Serialization Failed",
            Error::StatisticalPrecondition { .. } => "Not Enough Records",
            Error::Config(_) => "Configuration Error",
        }
    }

    /// Returns a human-readable remediation hint.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::InputNotFound { .. } => {
                "Place the spreadsheet next to the program or pass '--input <path>'."
            }
            Error::InputUnreadable { .. } => {
                "Check that the file is a valid workbook or CSV and is not open in another program."
            }
            Error::UnsupportedFormat { .. } => {
                "Save the sheet as .xlsx or .csv, or pass '--input' with a supported file."
            }
            Error::MissingColumn { .. } => {
                "Rename the header cell to the expected name or set [input.columns] in the config file."
            }
            Error::DateParse { .. } => {
                "Use a calendar date such as 2020-03-15 in the publication date column."
            }
            Error::Write { .. } => {
                "Check that the output directory exists and is writable, or pass '--output-dir'."
            }
            Error::MissingArtifact { .. } => {
                "Chart documents must be written before the report. Rerun the full pipeline."
            }
            Error::Json(_) => "Internal serialization issue. Please report it with the input file.",
            Error::StatisticalPrecondition { .. } => {
                "Average publication interval needs at least two dated records. Add records and rerun."
            }
            Error::Config(_) => "Fix the reported field in the config file or remove the file to use defaults.",
        }
    }

    /// Multi-line human rendering: headline, reason, fix.
    pub fn format_human(&self) -> String {
        format!(
            "✗ {}\n  Reason: {}\n  Fix: {}",
            self.headline(),
            self,
            self.remediation()
        )
    }
}
