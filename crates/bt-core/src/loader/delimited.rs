//! CSV input.

use super::{HeaderIndex, LoadOptions, RawDate, RawRecord};
use bt_common::{Error, Result};
use std::path::Path;

/// Read every data row of a CSV file with a header line.
pub fn read(path: &Path, options: &LoadOptions) -> Result<Vec<RawRecord>> {
    let unreadable = |e: ::csv::Error| Error::InputUnreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(unreadable)?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(unreadable)?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();
    let index = HeaderIndex::locate(&headers, &options.columns, path)?;

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(unreadable)?;
        let row = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(i + 2);
        let field = |at: usize| record.get(at).unwrap_or("");
        let date = match field(index.date).trim() {
            "" => RawDate::Missing,
            text => RawDate::Text(text.to_string()),
        };
        rows.push(RawRecord {
            row,
            title: field(index.title).to_string(),
            author: field(index.author).to_string(),
            date,
        });
    }
    Ok(rows)
}
