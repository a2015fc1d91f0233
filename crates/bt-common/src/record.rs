//! Bibliographic records and the corpus that holds them.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One normalized bibliographic entry.
///
/// `year` and `month` are derived from `publication_date` when the record is
/// built and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Sheet row the record was read from (1-based, header is row 1).
    pub row: usize,
    /// Work title.
    pub title: String,
    /// Author name as written in the sheet.
    pub author: String,
    /// Publication date.
    pub publication_date: NaiveDate,
    /// Publication year.
    pub year: i32,
    /// Publication month (1-12).
    pub month: u32,
}

impl Record {
    /// Build a record, deriving `year` and `month` from the date.
    pub fn new(
        row: usize,
        title: impl Into<String>,
        author: impl Into<String>,
        publication_date: NaiveDate,
    ) -> Self {
        Self {
            row,
            title: title.into(),
            author: author.into(),
            year: publication_date.year(),
            month: publication_date.month(),
            publication_date,
        }
    }
}

/// Records in spreadsheet row order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpus {
    records: Vec<Record>,
}

impl Corpus {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct author names.
    pub fn authors(&self) -> BTreeSet<&str> {
        self.records.iter().map(|r| r.author.as_str()).collect()
    }

    /// Earliest and latest publication dates, `None` when empty.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.records.iter().map(|r| r.publication_date).min()?;
        let max = self.records.iter().map(|r| r.publication_date).max()?;
        Some((min, max))
    }

    /// Smallest and largest publication years, `None` when empty.
    pub fn year_range(&self) -> Option<(i32, i32)> {
        self.date_range().map(|(min, max)| (min.year(), max.year()))
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl FromIterator<Record> for Corpus {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_record_derives_year_and_month() {
        let record = Record::new(2, "景德镇瓷艺", "王锡良", date(2019, 11, 3));
        assert_eq!(record.year, 2019);
        assert_eq!(record.month, 11);
    }

    #[test]
    fn test_corpus_ranges() {
        let corpus: Corpus = vec![
            Record::new(2, "a", "甲", date(2021, 5, 1)),
            Record::new(3, "b", "乙", date(2018, 2, 14)),
            Record::new(4, "c", "甲", date(2020, 7, 9)),
        ]
        .into_iter()
        .collect();

        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus.date_range(), Some((date(2018, 2, 14), date(2021, 5, 1))));
        assert_eq!(corpus.year_range(), Some((2018, 2021)));
        assert_eq!(corpus.authors().len(), 2);
    }

    #[test]
    fn test_empty_corpus_has_no_range() {
        let corpus = Corpus::default();
        assert!(corpus.is_empty());
        assert_eq!(corpus.date_range(), None);
    }
}
