//! Error types for chart and report generation.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that can occur during chart and report generation.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Output file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Inline script could not be read.
    #[error("failed to read inline script {}: {source}", path.display())]
    AssetReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A chart document the report embeds is not on disk.
    #[error("chart document not found: {}", path.display())]
    MissingChart { path: PathBuf },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Not enough records for the report statistics.
    #[error("report statistics need at least {required} records, found {found}")]
    InsufficientRecords { required: usize, found: usize },

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<ReportError> for bt_common::Error {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::WriteError { path, source } => bt_common::Error::Write { path, source },
            ReportError::AssetReadError { path, source } => bt_common::Error::Config(format!(
                "cannot read inline script {}: {source}",
                path.display()
            )),
            ReportError::MissingChart { path } => bt_common::Error::MissingArtifact { path },
            ReportError::JsonError(e) => bt_common::Error::Json(e),
            ReportError::InsufficientRecords { required, found } => {
                bt_common::Error::StatisticalPrecondition { required, found }
            }
            ReportError::InvalidConfig(msg) => bt_common::Error::Config(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bt_common::ErrorKind;

    #[test]
    fn test_conversion_preserves_kind() {
        let err: bt_common::Error = ReportError::InsufficientRecords {
            required: 2,
            found: 1,
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::StatisticalPrecondition);

        let err: bt_common::Error = ReportError::MissingChart {
            path: PathBuf::from("year.html"),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Write);
    }
}
