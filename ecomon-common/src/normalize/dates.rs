//! Date parsing and validation
//!
//! Sources deliver dates as ISO strings, slash/dash strings in either
//! day-first or month-first order, or Excel serial numbers. The order of
//! ambiguous formats is fixed by an explicit flag on the ingester record,
//! never guessed from locale.

use crate::frame::{Cell, RawFrame};
use crate::{Error, Result};
use chrono::{Datelike, Duration, NaiveDate};
use tracing::{debug, warn};

/// Excel serial day 0 (the 1900 date system, with its leap-year quirk baked in)
const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

/// How to handle rows whose date cell cannot be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatePolicy {
    /// Drop the row and count it
    #[default]
    StrictDrop,
    /// Fail the whole call on the first unparseable date
    StrictFail,
}

/// Options for `parse_dates`
#[derive(Debug, Clone, Copy, Default)]
pub struct DateOptions {
    /// Resolve `03/06/2024` as 3 June rather than 6 March
    pub day_first: bool,
    pub policy: DatePolicy,
}

/// Parse one date string. Tries ISO first, then the slash/dash order
/// selected by `day_first`.
pub fn parse_date_str(s: &str, day_first: bool) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    const ISO: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y-%m-%dT%H:%M:%S"];
    const DAY_FIRST: &[&str] = &["%d/%m/%Y", "%d-%m-%Y", "%d/%m/%y"];
    const MONTH_FIRST: &[&str] = &["%m/%d/%Y", "%m-%d-%Y", "%m/%d/%y"];

    let ordered = if day_first { DAY_FIRST } else { MONTH_FIRST };
    ISO.iter()
        .chain(ordered.iter())
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Convert an Excel serial number to a calendar date.
///
/// Rejects serials before 1.0 and past year 2200, which in practice are
/// stray numeric cells rather than dates.
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    let days = serial.trunc() as i64;
    let epoch = NaiveDate::from_ymd_opt(EXCEL_EPOCH.0, EXCEL_EPOCH.1, EXCEL_EPOCH.2)?;
    let date = epoch.checked_add_signed(Duration::days(days))?;
    (date.year() <= 2200).then_some(date)
}

/// Format a date the way the store keys it (ISO). `parse_date_str` of the
/// result round-trips to the same date.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Coerce the date column of a raw frame to calendar dates.
///
/// With `StrictDrop`, unparseable rows are dropped and counted; the call
/// still fails when a majority of rows drop, since that means the declared
/// geometry is wrong rather than the data dirty.
pub fn parse_dates(raw: &RawFrame, opts: &DateOptions) -> Result<Vec<(NaiveDate, Cell)>> {
    let mut out = Vec::with_capacity(raw.len());
    let mut dropped = 0usize;

    for (date_cell, value_cell) in &raw.rows {
        let parsed = match date_cell {
            Cell::Date(d) => Some(*d),
            Cell::Number(n) => excel_serial_to_date(*n),
            Cell::Text(s) => parse_date_str(s, opts.day_first),
            Cell::Empty => None,
        };

        match parsed {
            Some(date) => out.push((date, value_cell.clone())),
            None => match opts.policy {
                DatePolicy::StrictFail => {
                    return Err(Error::Parse(format!("unparseable date cell: {:?}", date_cell)));
                }
                DatePolicy::StrictDrop => {
                    debug!("Dropping row with unparseable date cell: {:?}", date_cell);
                    dropped += 1;
                }
            },
        }
    }

    if dropped > 0 {
        warn!("Dropped {} row(s) with unparseable dates", dropped);
    }
    if dropped > out.len() {
        return Err(Error::Parse(format!(
            "date column unusable: {} of {} rows failed to parse",
            dropped,
            dropped + out.len()
        )));
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn parses_iso_and_slash_formats() {
        assert_eq!(parse_date_str("2024-06-03", false), Some(d(2024, 6, 3)));
        assert_eq!(parse_date_str("03/06/2024", true), Some(d(2024, 6, 3)));
        assert_eq!(parse_date_str("03/06/2024", false), Some(d(2024, 3, 6)));
        assert_eq!(parse_date_str("31-12-2023", true), Some(d(2023, 12, 31)));
        assert_eq!(parse_date_str("not a date", true), None);
    }

    #[test]
    fn excel_serials_map_to_dates() {
        // 45292 is 2024-01-01 in the 1900 date system
        assert_eq!(excel_serial_to_date(45292.0), Some(d(2024, 1, 1)));
        assert_eq!(excel_serial_to_date(0.5), None);
        assert_eq!(excel_serial_to_date(f64::NAN), None);
    }

    #[test]
    fn format_then_parse_is_identity() {
        for date in [d(2024, 1, 1), d(1999, 12, 31), d(2024, 2, 29)] {
            assert_eq!(parse_date_str(&format_date(date), true), Some(date));
        }
    }

    #[test]
    fn strict_drop_counts_and_keeps_going() {
        let raw = RawFrame::new(vec![
            (Cell::Text("2024-01-15".into()), Cell::Number(1.0)),
            (Cell::Text("garbage".into()), Cell::Number(2.0)),
            (Cell::Text("2024-02-15".into()), Cell::Number(3.0)),
        ]);
        let rows = parse_dates(&raw, &DateOptions::default()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].0, d(2024, 1, 15));
    }

    #[test]
    fn strict_fail_errors_on_first_bad_date() {
        let raw = RawFrame::new(vec![(Cell::Text("garbage".into()), Cell::Number(1.0))]);
        let opts = DateOptions {
            policy: DatePolicy::StrictFail,
            ..Default::default()
        };
        assert!(matches!(parse_dates(&raw, &opts), Err(Error::Parse(_))));
    }

    #[test]
    fn majority_drop_is_a_parse_error() {
        let raw = RawFrame::new(vec![
            (Cell::Text("x".into()), Cell::Number(1.0)),
            (Cell::Text("y".into()), Cell::Number(2.0)),
            (Cell::Text("2024-01-15".into()), Cell::Number(3.0)),
        ]);
        assert!(matches!(
            parse_dates(&raw, &DateOptions::default()),
            Err(Error::Parse(_))
        ));
    }
}
