//! Exit codes for the bt-core CLI.
//!
//! Exit code ranges:
//! - 0: Success, all five documents written
//! - 10-19: User/input errors (recoverable by fixing arguments, config or data)
//! - 20-29: Internal and output errors

use bt_common::{Error, ErrorKind};

/// Exit codes for bt-core runs.
///
/// These codes are a stable contract for automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success: charts and report written
    Clean = 0,

    // ========================================================================
    // User / Input Errors (10-19)
    // ========================================================================
    /// Invalid arguments
    ArgsError = 10,

    /// Config file missing, malformed, or invalid
    ConfigError = 11,

    /// Input missing, unreadable, unsupported, or lacking a column
    LoadError = 12,

    /// A publication date could not be parsed
    DateParseError = 13,

    /// Too few records for the report statistics
    PreconditionError = 14,

    // ========================================================================
    // Internal / Output Errors (20-29)
    // ========================================================================
    /// Internal error (bug - please report)
    InternalError = 20,

    /// Output could not be written
    IoError = 21,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn is_success(self) -> bool {
        self == ExitCode::Clean
    }

    /// Codes 10-19: resolvable by the user.
    pub fn is_user_error(self) -> bool {
        (10..20).contains(&(self as i32))
    }

    /// Get the error code name as a string constant (for JSON logs).
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Clean => "OK",
            ExitCode::ArgsError => "ERR_ARGS",
            ExitCode::ConfigError => "ERR_CONFIG",
            ExitCode::LoadError => "ERR_LOAD",
            ExitCode::DateParseError => "ERR_DATE_PARSE",
            ExitCode::PreconditionError => "ERR_PRECONDITION",
            ExitCode::InternalError => "ERR_INTERNAL",
            ExitCode::IoError => "ERR_IO",
        }
    }
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        if matches!(err, Error::Json(_)) {
            return ExitCode::InternalError;
        }
        match err.kind() {
            ErrorKind::Load => ExitCode::LoadError,
            ErrorKind::DateParse => ExitCode::DateParseError,
            ErrorKind::Write => ExitCode::IoError,
            ErrorKind::StatisticalPrecondition => ExitCode::PreconditionError,
            ErrorKind::Config => ExitCode::ConfigError,
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code_name(), self.as_i32())
    }
}
