//! Workbook input (xlsx, xlsm, xlsb, xls, ods).

use super::{HeaderIndex, LoadOptions, RawDate, RawRecord};
use bt_common::{Error, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;
use tracing::debug;

static EMPTY: Data = Data::Empty;

/// Read every data row of the configured worksheet.
///
/// The first row of the used range is the header row.
pub fn read(path: &Path, options: &LoadOptions) -> Result<Vec<RawRecord>> {
    let unreadable = |reason: String| Error::InputUnreadable {
        path: path.to_path_buf(),
        reason,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| unreadable(e.to_string()))?;
    let range: Range<Data> = match &options.sheet {
        Some(name) => workbook
            .worksheet_range(name)
            .map_err(|e| unreadable(format!("worksheet {name:?}: {e}")))?,
        None => workbook
            .worksheet_range_at(0)
            .ok_or_else(|| unreadable("workbook has no worksheets".to_string()))?
            .map_err(|e| unreadable(e.to_string()))?,
    };
    debug!(
        sheet = options.sheet.as_deref().unwrap_or("<first>"),
        height = range.height(),
        width = range.width(),
        "Worksheet opened"
    );

    let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|cells| cells.iter().map(cell_text).collect())
        .unwrap_or_default();
    let index = HeaderIndex::locate(&headers, &options.columns, path)?;

    let records = rows
        .enumerate()
        .map(|(i, cells)| {
            let cell = |at: usize| cells.get(at).unwrap_or(&EMPTY);
            RawRecord {
                // Header sits at sheet row first_row + 1.
                row: first_row + i + 2,
                title: cell_text(cell(index.title)),
                author: cell_text(cell(index.author)),
                date: raw_date(cell(index.date)),
            }
        })
        .collect();
    Ok(records)
}

/// Render a cell as text, as written. Whole-number floats lose their `.0`.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        other => other.to_string(),
    }
}

fn raw_date(cell: &Data) -> RawDate {
    match cell {
        Data::Empty => RawDate::Missing,
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => RawDate::DateTime(datetime),
            None => RawDate::Serial(dt.as_f64()),
        },
        Data::Float(f) => RawDate::Serial(*f),
        Data::Int(i) => RawDate::Serial(*i as f64),
        Data::String(s) | Data::DateTimeIso(s) => match s.trim() {
            "" => RawDate::Missing,
            text => RawDate::Text(text.to_string()),
        },
        other => RawDate::Text(other.to_string()),
    }
}
