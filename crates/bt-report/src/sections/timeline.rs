//! Timeline narrative.

use crate::error::{ReportError, Result};
use crate::sections::MIN_RECORDS;
use bt_common::Timeline;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineSection {
    pub earliest: NaiveDate,
    pub latest: NaiveDate,
    /// Whole days between first and last publication over `n - 1` gaps.
    pub average_interval_days: f64,
}

impl TimelineSection {
    /// Build from the chronological sequence.
    ///
    /// Fails with [`ReportError::InsufficientRecords`] below two records.
    pub fn from_timeline(timeline: &Timeline) -> Result<Self> {
        let n = timeline.len();
        let (first, last) = match (timeline.first(), timeline.last()) {
            (Some(first), Some(last)) if n >= MIN_RECORDS => (first, last),
            _ => {
                return Err(ReportError::InsufficientRecords {
                    required: MIN_RECORDS,
                    found: n,
                })
            }
        };
        let earliest = first.record.publication_date;
        let latest = last.record.publication_date;
        let days = (latest - earliest).num_days();
        Ok(Self {
            earliest,
            latest,
            average_interval_days: days as f64 / (n - 1) as f64,
        })
    }

    pub fn earliest_formatted(&self) -> String {
        self.earliest.format("%Y年%m月").to_string()
    }

    pub fn latest_formatted(&self) -> String {
        self.latest.format("%Y年%m月").to_string()
    }

    /// Average interval rounded to whole days.
    pub fn interval_formatted(&self) -> String {
        format!("{:.0}", self.average_interval_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bt_common::{aggregate::chronological, Corpus, Record};

    fn timeline(dates: &[(i32, u32, u32)]) -> Timeline {
        chronological(&Corpus::new(
            dates
                .iter()
                .enumerate()
                .map(|(i, &(y, m, d))| {
                    Record::new(i + 2, "t", "a", NaiveDate::from_ymd_opt(y, m, d).unwrap())
                })
                .collect(),
        ))
    }

    #[test]
    fn test_average_interval() {
        let section =
            TimelineSection::from_timeline(&timeline(&[(2020, 1, 1), (2020, 1, 31), (2020, 3, 1)]))
                .unwrap();
        // 60 days over 2 gaps
        assert_eq!(section.interval_formatted(), "30");
        assert_eq!(section.earliest_formatted(), "2020年01月");
        assert_eq!(section.latest_formatted(), "2020年03月");
    }

    #[test]
    fn test_single_record_is_precondition_failure() {
        let err = TimelineSection::from_timeline(&timeline(&[(2020, 1, 1)])).unwrap_err();
        assert!(matches!(
            err,
            ReportError::InsufficientRecords {
                required: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_empty_timeline_is_precondition_failure() {
        let err = TimelineSection::from_timeline(&Timeline::default()).unwrap_err();
        assert!(matches!(err, ReportError::InsufficientRecords { found: 0, .. }));
    }
}
