//! Count-by-key aggregates over a corpus.
//!
//! All four aggregations are pure functions of the corpus:
//! - [`count_by_year`]: ascending by year
//! - [`count_by_month`]: descending by count
//! - [`count_by_author`]: descending by count
//! - [`chronological`]: stable sort by publication date, 1-based sequence
//!
//! Equal counts keep first-encountered corpus order, so every aggregate is
//! fully determined by the input and reruns produce identical output.

use crate::record::{Corpus, Record};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

/// Ordered `(key, count)` pairs with unique keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyCounts<K> {
    entries: Vec<(K, usize)>,
}

/// Records per publication year, ascending by year.
pub type YearCount = KeyCounts<i32>;

/// Records per publication month, descending by count.
pub type MonthCount = KeyCounts<u32>;

/// Records per author, descending by count.
pub type AuthorCount = KeyCounts<String>;

impl<K> Default for KeyCounts<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: PartialEq> KeyCounts<K> {
    /// Wrap pre-ordered entries. Keys must be unique.
    pub fn from_entries(entries: Vec<(K, usize)>) -> Self {
        debug_assert!(
            entries
                .iter()
                .enumerate()
                .all(|(i, (k, _))| entries[..i].iter().all(|(prev, _)| prev != k)),
            "duplicate key in KeyCounts"
        );
        Self { entries }
    }

    pub fn entries(&self) -> &[(K, usize)] {
        &self.entries
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn counts(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|(_, c)| *c)
    }

    /// Count for `key`, zero when absent.
    pub fn get(&self, key: &K) -> usize {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.counts().sum()
    }

    pub fn first(&self) -> Option<&(K, usize)> {
        self.entries.first()
    }

    pub fn last(&self) -> Option<&(K, usize)> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One point of the chronological sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// 1-based rank in chronological order.
    pub sequence: usize,
    pub record: Record,
}

/// Records ordered by publication date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    entries: Vec<TimelineEntry>,
}

impl Timeline {
    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn first(&self) -> Option<&TimelineEntry> {
        self.entries.first()
    }

    pub fn last(&self) -> Option<&TimelineEntry> {
        self.entries.last()
    }
}

/// The four aggregates computed once per run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregates {
    pub by_year: YearCount,
    pub by_month: MonthCount,
    pub timeline: Timeline,
    pub by_author: AuthorCount,
}

impl Aggregates {
    pub fn compute(corpus: &Corpus) -> Self {
        Self {
            by_year: count_by_year(corpus),
            by_month: count_by_month(corpus),
            timeline: chronological(corpus),
            by_author: count_by_author(corpus),
        }
    }
}

/// Group by year, ascending by year.
pub fn count_by_year(corpus: &Corpus) -> YearCount {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for record in corpus {
        *counts.entry(record.year).or_default() += 1;
    }
    KeyCounts {
        entries: counts.into_iter().collect(),
    }
}

/// Group by month, most-published month first.
pub fn count_by_month(corpus: &Corpus) -> MonthCount {
    by_frequency(corpus.iter().map(|r| r.month))
}

/// Group by author, most prolific author first.
pub fn count_by_author(corpus: &Corpus) -> AuthorCount {
    by_frequency(corpus.iter().map(|r| r.author.clone()))
}

/// Stable sort by publication date with 1-based sequence numbers.
///
/// Records sharing a date keep their corpus order.
pub fn chronological(corpus: &Corpus) -> Timeline {
    let mut sorted: Vec<&Record> = corpus.iter().collect();
    sorted.sort_by_key(|r| r.publication_date);
    Timeline {
        entries: sorted
            .into_iter()
            .enumerate()
            .map(|(i, record)| TimelineEntry {
                sequence: i + 1,
                record: record.clone(),
            })
            .collect(),
    }
}

/// Count keys in first-seen order, then stable-sort by descending count.
fn by_frequency<K, I>(keys: I) -> KeyCounts<K>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let mut entries: Vec<(K, usize)> = Vec::new();
    let mut index: HashMap<K, usize> = HashMap::new();
    for key in keys {
        match index.get(&key) {
            Some(&i) => entries[i].1 += 1,
            None => {
                index.insert(key.clone(), entries.len());
                entries.push((key, 1));
            }
        }
    }
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    KeyCounts { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(row: usize, author: &str, y: i32, m: u32, d: u32) -> Record {
        Record::new(
            row,
            format!("title-{row}"),
            author,
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
        )
    }

    #[test]
    fn test_three_records_same_year() {
        let corpus = Corpus::new(vec![
            record(2, "张", 2020, 1, 10),
            record(3, "李", 2020, 3, 2),
            record(4, "张", 2020, 3, 28),
        ]);

        let by_year = count_by_year(&corpus);
        assert_eq!(by_year.entries(), &[(2020, 3)]);

        let by_month = count_by_month(&corpus);
        assert_eq!(by_month.entries(), &[(3, 2), (1, 1)]);

        let by_author = count_by_author(&corpus);
        assert_eq!(by_author.total(), 3);
        assert_eq!(by_author.first(), Some(&("张".to_string(), 2)));
    }

    #[test]
    fn test_years_ascending() {
        let corpus = Corpus::new(vec![
            record(2, "a", 2022, 1, 1),
            record(3, "a", 2015, 1, 1),
            record(4, "a", 2019, 1, 1),
            record(5, "a", 2015, 6, 1),
        ]);
        let keys: Vec<i32> = count_by_year(&corpus).keys().copied().collect();
        assert_eq!(keys, vec![2015, 2019, 2022]);
    }

    #[test]
    fn test_frequency_ties_keep_first_seen_order() {
        let corpus = Corpus::new(vec![
            record(2, "乙", 2020, 5, 1),
            record(3, "甲", 2020, 2, 1),
            record(4, "丙", 2020, 9, 1),
            record(5, "甲", 2020, 2, 9),
        ]);
        let by_author = count_by_author(&corpus);
        let authors: Vec<&str> = by_author.keys().map(String::as_str).collect();
        assert_eq!(authors, vec!["甲", "乙", "丙"]);

        let months: Vec<u32> = count_by_month(&corpus).keys().copied().collect();
        assert_eq!(months, vec![2, 5, 9]);
    }

    #[test]
    fn test_chronological_same_date_is_stable() {
        let corpus = Corpus::new(vec![
            record(2, "a", 2021, 4, 1),
            record(3, "b", 2019, 8, 8),
            record(4, "c", 2019, 8, 8),
        ]);
        let timeline = chronological(&corpus);
        let rows: Vec<(usize, usize)> = timeline
            .entries()
            .iter()
            .map(|e| (e.sequence, e.record.row))
            .collect();
        assert_eq!(rows, vec![(1, 3), (2, 4), (3, 2)]);
    }

    #[test]
    fn test_empty_corpus_yields_empty_aggregates() {
        let aggregates = Aggregates::compute(&Corpus::default());
        assert!(aggregates.by_year.is_empty());
        assert!(aggregates.by_month.is_empty());
        assert!(aggregates.timeline.is_empty());
        assert!(aggregates.by_author.is_empty());
    }

    #[test]
    fn test_get_missing_key_is_zero() {
        let counts = KeyCounts::from_entries(vec![(3u32, 2), (1, 1)]);
        assert_eq!(counts.get(&3), 2);
        assert_eq!(counts.get(&12), 0);
    }
}
