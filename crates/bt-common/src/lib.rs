//! Bibliographic timeline common types and errors.
//!
//! This crate provides the types shared by the loader, the aggregator and
//! the report generator:
//! - Normalized bibliographic records and the corpus that holds them
//! - Count-by-key aggregates and the chronological sequence
//! - The unified error type with stable codes and remediation hints

pub mod aggregate;
pub mod error;
pub mod record;

pub use aggregate::{
    Aggregates, AuthorCount, KeyCounts, MonthCount, Timeline, TimelineEntry, YearCount,
};
pub use error::{Error, ErrorKind, Result};
pub use record::{Corpus, Record};

/// Generator identifier embedded in every produced document.
pub const GENERATOR_NAME: &str = "biblio-timeline";
