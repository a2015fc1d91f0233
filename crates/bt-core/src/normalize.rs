//! Publication date normalization.
//!
//! Turns loader output into [`Record`]s with a calendar date. Time of day
//! is dropped and no time zone conversion happens: an RFC 3339 value keeps
//! the calendar date written in it.

use crate::loader::{RawDate, RawRecord};
use bt_common::{Corpus, Error, Record, Result};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use tracing::info;

/// Full date layouts, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%Y年%m月%d日"];

/// Time-of-day suffixes accepted after a full date.
const TIME_SUFFIXES: &[&str] = &[" %H:%M:%S", " %H:%M", "T%H:%M:%S", "T%H:%M", " %H:%M:%S%.f", "T%H:%M:%S%.f"];

/// Year-and-month layouts; the day is supplied as the first of the month.
const MONTH_FORMATS: &[&str] = &["%Y-%m", "%Y/%m", "%Y.%m", "%Y年%m月"];

/// Largest serial Excel can represent (9999-12-31).
const MAX_EXCEL_SERIAL: f64 = 2_958_465.0;

/// Normalize every raw record, failing on the first unparseable date.
pub fn normalize(raw: Vec<RawRecord>) -> Result<Corpus> {
    let records = raw
        .into_iter()
        .map(|r| {
            let date = parse_date(&r.date).ok_or_else(|| Error::DateParse {
                row: r.row,
                value: r.date.display_value(),
            })?;
            Ok(Record::new(r.row, r.title, r.author, date))
        })
        .collect::<Result<Vec<_>>>()?;

    let corpus = Corpus::new(records);
    if let Some((first, last)) = corpus.date_range() {
        info!(records = corpus.len(), %first, %last, "Dates normalized");
    }
    Ok(corpus)
}

/// Interpret a cell as a calendar date.
pub fn parse_date(raw: &RawDate) -> Option<NaiveDate> {
    match raw {
        RawDate::DateTime(dt) => Some(dt.date()),
        RawDate::Serial(serial) => from_excel_serial(*serial),
        RawDate::Text(text) => parse_date_text(text),
        RawDate::Missing => None,
    }
}

/// Convert a 1900-system serial day number. Fractions (time of day) are dropped.
///
/// The base is 1899-12-30 so that serials after the phantom 1900-02-29 map
/// to the dates Excel displays.
pub fn from_excel_serial(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || !(1.0..=MAX_EXCEL_SERIAL).contains(&serial) {
        return None;
    }
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    base.checked_add_signed(Duration::days(serial.trunc() as i64))
}

/// Parse a date written as text.
pub fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date);
        }
        for suffix in TIME_SUFFIXES {
            if let Ok(dt) = NaiveDateTime::parse_from_str(text, &format!("{format}{suffix}")) {
                return Some(dt.date());
            }
        }
    }

    if let Some(date) = compact_digits(text) {
        return Some(date);
    }

    for format in MONTH_FORMATS {
        let padded = format!("{text} 1");
        if let Ok(date) = NaiveDate::parse_from_str(&padded, &format!("{format} %d")) {
            return Some(date);
        }
    }

    None
}

/// `YYYYMMDD` or a bare `YYYY`.
fn compact_digits(text: &str) -> Option<NaiveDate> {
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let number = |range: std::ops::Range<usize>| text.get(range)?.parse::<u32>().ok();
    match text.len() {
        8 => NaiveDate::from_ymd_opt(number(0..4)? as i32, number(4..6)?, number(6..8)?),
        4 => NaiveDate::from_ymd_opt(number(0..4)? as i32, 1, 1),
        _ => None,
    }
}
