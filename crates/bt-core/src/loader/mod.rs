//! Spreadsheet loading.
//!
//! Reads the three required columns out of a workbook or CSV file and
//! returns one [`RawRecord`] per non-blank data row. Dates are kept in
//! their cell form; [`crate::normalize`] turns them into calendar dates.
//!
//! Format is chosen by file extension:
//! - `.xlsx`, `.xlsm`, `.xlsb`, `.xls`, `.ods`: workbook reader
//! - `.csv`: CSV reader

pub mod delimited;
pub mod workbook;

use bt_common::{Error, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Workbook extensions handled by the workbook reader.
const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Header strings of the three required columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnNames {
    #[serde(default = "default_title_column")]
    pub title: String,
    #[serde(default = "default_author_column")]
    pub author: String,
    #[serde(default = "default_date_column")]
    pub publication_date: String,
}

fn default_title_column() -> String {
    "书名".to_string()
}

fn default_author_column() -> String {
    "作者".to_string()
}

fn default_date_column() -> String {
    "出版日期".to_string()
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            title: default_title_column(),
            author: default_author_column(),
            publication_date: default_date_column(),
        }
    }
}

impl ColumnNames {
    /// Columns in lookup order.
    pub fn all(&self) -> [&str; 3] {
        [
            self.title.as_str(),
            self.author.as_str(),
            self.publication_date.as_str(),
        ]
    }
}

/// Options for a single load.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    pub columns: ColumnNames,
    /// Worksheet name. `None` reads the first worksheet.
    pub sheet: Option<String>,
}

/// Publication date as found in the cell.
#[derive(Debug, Clone, PartialEq)]
pub enum RawDate {
    /// Text cell, trimmed.
    Text(String),
    /// Numeric cell holding a spreadsheet serial day number.
    Serial(f64),
    /// Native datetime cell.
    DateTime(NaiveDateTime),
    /// Empty cell.
    Missing,
}

impl RawDate {
    pub fn is_missing(&self) -> bool {
        matches!(self, RawDate::Missing)
    }

    /// Cell content as shown in error messages.
    pub fn display_value(&self) -> String {
        match self {
            RawDate::Text(s) => s.clone(),
            RawDate::Serial(n) => n.to_string(),
            RawDate::DateTime(dt) => dt.to_string(),
            RawDate::Missing => String::new(),
        }
    }
}

/// One data row before date normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// Sheet row (1-based, header is row 1).
    pub row: usize,
    pub title: String,
    pub author: String,
    pub date: RawDate,
}

impl RawRecord {
    fn is_blank(&self) -> bool {
        self.title.is_empty() && self.author.is_empty() && self.date.is_missing()
    }
}

/// Positions of the required columns within the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct HeaderIndex {
    pub title: usize,
    pub author: usize,
    pub date: usize,
}

impl HeaderIndex {
    /// Locate the required columns by exact header match.
    ///
    /// The first missing column is reported, in title, author, date order.
    pub(crate) fn locate<S: AsRef<str>>(
        headers: &[S],
        columns: &ColumnNames,
        path: &Path,
    ) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.as_ref() == name)
                .ok_or_else(|| Error::MissingColumn {
                    path: path.to_path_buf(),
                    column: name.to_string(),
                })
        };
        Ok(Self {
            title: find(&columns.title)?,
            author: find(&columns.author)?,
            date: find(&columns.publication_date)?,
        })
    }
}

/// Load raw records from `path`.
///
/// Fails with a load error when the file is missing, unreadable, has an
/// unsupported extension, or lacks a required column.
pub fn load(path: &Path, options: &LoadOptions) -> Result<Vec<RawRecord>> {
    if !path.is_file() {
        return Err(Error::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let rows = if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
        workbook::read(path, options)?
    } else if extension == "csv" {
        delimited::read(path, options)?
    } else {
        return Err(Error::UnsupportedFormat {
            path: path.to_path_buf(),
        });
    };

    let total = rows.len();
    let records: Vec<RawRecord> = rows.into_iter().filter(|r| !r.is_blank()).collect();
    info!(
        path = %path.display(),
        format = %extension,
        records = records.len(),
        skipped_blank = total - records.len(),
        "Input loaded"
    );
    for record in records.iter().take(5) {
        debug!(
            row = record.row,
            title = %record.title,
            author = %record.author,
            date = %record.date.display_value(),
            "Loaded row"
        );
    }
    Ok(records)
}
