//! Overview section data.

use bt_common::Corpus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the full data table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRow {
    pub title: String,
    pub author: String,
    pub publication_date: NaiveDate,
}

impl RecordRow {
    /// Date as shown in the table.
    pub fn date_formatted(&self) -> String {
        self.publication_date.format("%Y-%m-%d").to_string()
    }
}

/// Summary grid plus the full record table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverviewSection {
    /// Total records.
    pub total_records: usize,
    /// Distinct authors.
    pub distinct_authors: usize,
    /// Earliest publication year.
    pub min_year: i32,
    /// Latest publication year.
    pub max_year: i32,
    /// Every record in corpus order.
    pub rows: Vec<RecordRow>,
}

impl OverviewSection {
    /// Build from a corpus, `None` when the corpus is empty.
    pub fn from_corpus(corpus: &Corpus) -> Option<Self> {
        let (min_year, max_year) = corpus.year_range()?;
        Some(Self {
            total_records: corpus.len(),
            distinct_authors: corpus.authors().len(),
            min_year,
            max_year,
            rows: corpus
                .iter()
                .map(|r| RecordRow {
                    title: r.title.clone(),
                    author: r.author.clone(),
                    publication_date: r.publication_date,
                })
                .collect(),
        })
    }
}
