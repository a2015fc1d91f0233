//! Chart and HTML report generator for bibliographic timelines.
//!
//! Produces five static documents from a normalized corpus:
//! four standalone chart documents and one composite report that embeds
//! them by relative path.
//!
//! # Features
//!
//! - **Standalone charts**: each chart is its own HTML file with an ECharts instance
//! - **Offline mode**: `inline_script` inlines a local ECharts build for `file://` usage
//! - **CDN pinning**: the chart library uses a pinned version, with optional SRI hash
//! - **Deterministic output**: charts contain no timestamps; the report only its generation date
//!
//! # Sections
//!
//! - Overview: record count, author count, year range, full data table
//! - Years: per-year bar chart, mode year, span, yearly average
//! - Months: per-month bar chart, most and least published month
//! - Timeline: chronological line chart, date span, average interval
//! - Authors: per-author bar chart, top author
//!
//! # Example
//!
//! ```no_run
//! use bt_report::{ChartRenderer, ReportConfig, ReportData, ReportGenerator};
//! use bt_common::{Aggregates, Corpus};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), bt_report::ReportError> {
//! let corpus = Corpus::default();
//! let aggregates = Aggregates::compute(&corpus);
//! let data = ReportData::build(&corpus, &aggregates, chrono::Local::now())?;
//!
//! let out = Path::new(".");
//! ChartRenderer::new(ReportConfig::default())?.write_all(&aggregates, out)?;
//! ReportGenerator::new(ReportConfig::default()).write(&data, out)?;
//! # Ok(())
//! # }
//! ```

pub mod charts;
pub mod config;
pub mod error;
pub mod generator;
pub mod html;
pub mod sections;

pub use charts::{ChartKind, ChartRenderer};
pub use config::{CdnConfig, CdnLibrary, ChartStyle, OutputFiles, ReportConfig, ReportTheme};
pub use error::{ReportError, Result};
pub use generator::{ReportData, ReportGenerator};
