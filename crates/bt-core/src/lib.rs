//! Bibliographic timeline core.
//!
//! Loads a spreadsheet of titles, authors and publication dates, normalizes
//! the dates, and drives `bt-report` to write four chart documents and one
//! composite HTML report.
//!
//! # Modules
//!
//! - [`loader`]: workbook and CSV input
//! - [`normalize`]: publication date parsing
//! - [`config`]: TOML configuration and resolution order
//! - [`pipeline`]: the end-to-end run
//! - [`logging`]: tracing subscriber setup
//! - [`exit_codes`]: stable process exit codes

pub mod config;
pub mod exit_codes;
pub mod loader;
pub mod logging;
pub mod normalize;
pub mod pipeline;

pub use pipeline::{Pipeline, RunSummary};
