//! Year distribution narrative.

use bt_common::YearCount;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearsSection {
    /// Year with the most records. Ties resolve to the earliest year.
    pub mode_year: i32,
    /// `max_year - min_year`.
    pub span_years: i32,
    /// Records per calendar year across the inclusive span.
    pub average_per_year: f64,
}

impl YearsSection {
    /// Build from the ascending year counts, `None` when empty.
    pub fn from_counts(counts: &YearCount) -> Option<Self> {
        let (min_year, _) = *counts.first()?;
        let (max_year, _) = *counts.last()?;
        // Keys ascend, so the first maximum seen is the earliest year.
        let mut mode = counts.first()?;
        for entry in counts.entries() {
            if entry.1 > mode.1 {
                mode = entry;
            }
        }
        let span_years = max_year - min_year;
        Some(Self {
            mode_year: mode.0,
            span_years,
            average_per_year: counts.total() as f64 / f64::from(span_years + 1),
        })
    }

    /// Average formatted with one decimal place.
    pub fn average_formatted(&self) -> String {
        format!("{:.1}", self.average_per_year)
    }
}
