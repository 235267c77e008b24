//! Locale-aware numeric coercion
//!
//! Regional sources publish `1.234,50` and `6,50%`; others publish plain
//! `1234.50`. The decimal-comma convention is declared per ingester record.

use crate::frame::{Cell, Frame};
use crate::{Error, Result};
use chrono::NaiveDate;
use tracing::{debug, warn};

/// Options for `coerce_numeric`
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericOptions {
    /// Treat `,` as the decimal separator and `.` as the thousands separator
    pub decimal_comma: bool,
}

/// Outcome of a coercion pass
#[derive(Debug)]
pub struct CoerceReport {
    pub frame: Frame,
    /// Rows dropped because the value cell held unparseable text
    pub dropped: usize,
}

/// Coerce one value cell. `Ok(None)` is a present-but-empty cell.
fn coerce_cell(cell: &Cell, opts: &NumericOptions) -> std::result::Result<Option<f64>, ()> {
    match cell {
        Cell::Number(n) => Ok(Some(*n)),
        Cell::Empty => Ok(None),
        Cell::Date(_) => Err(()),
        Cell::Text(s) => {
            let mut s = s.trim().trim_end_matches('%').trim().to_string();
            s.retain(|c| c != ' ' && c != '\u{a0}');
            if s.is_empty() {
                return Ok(None);
            }
            if opts.decimal_comma {
                s.retain(|c| c != '.');
                s = s.replace(',', ".");
            } else {
                s.retain(|c| c != ',');
            }
            s.parse::<f64>().map(Some).map_err(|_| ())
        }
    }
}

/// Coerce the value column of date-parsed rows to reals.
///
/// Unparseable text drops the row and counts a warning; the call fails when
/// a majority of rows drop. Empty cells survive as `None` so that daily
/// calendar completion can forward-fill them.
pub fn coerce_numeric(
    rows: Vec<(NaiveDate, Cell)>,
    opts: &NumericOptions,
) -> Result<CoerceReport> {
    let total = rows.len();
    let mut out = Vec::with_capacity(total);
    let mut dropped = 0usize;

    for (date, cell) in rows {
        match coerce_cell(&cell, opts) {
            Ok(value) => out.push((date, value)),
            Err(()) => {
                debug!("Dropping {} with non-numeric value cell: {:?}", date, cell);
                dropped += 1;
            }
        }
    }

    if dropped > 0 {
        warn!("Dropped {} row(s) with non-numeric values", dropped);
    }
    if dropped > out.len() {
        return Err(Error::Parse(format!(
            "value column unusable: {} of {} rows failed to coerce",
            dropped, total
        )));
    }

    Ok(CoerceReport {
        frame: Frame::new(out),
        dropped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMMA: NumericOptions = NumericOptions { decimal_comma: true };
    const DOT: NumericOptions = NumericOptions { decimal_comma: false };

    fn coerce(s: &str, opts: &NumericOptions) -> Option<f64> {
        coerce_cell(&Cell::Text(s.to_string()), opts).unwrap()
    }

    #[test]
    fn decimal_comma_and_percent() {
        assert_eq!(coerce("6,50%", &COMMA), Some(6.5));
        assert_eq!(coerce("1.234,50 %", &COMMA), Some(1234.5));
        assert_eq!(coerce("38,65", &COMMA), Some(38.65));
    }

    #[test]
    fn thousands_separator_equivalence() {
        assert_eq!(coerce("1.234,50 %", &COMMA), coerce("1234.50", &DOT));
        assert_eq!(coerce("1,234.50", &DOT), Some(1234.5));
    }

    #[test]
    fn empty_cells_become_null_rows() {
        assert_eq!(coerce_cell(&Cell::Empty, &DOT).unwrap(), None);
        assert_eq!(coerce("  ", &DOT), None);
    }

    #[test]
    fn unparseable_text_drops_the_row() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let rows = vec![
            (date, Cell::Text("n/d".into())),
            (date, Cell::Number(1.5)),
            (date, Cell::Number(2.5)),
        ];
        let report = coerce_numeric(rows, &DOT).unwrap();
        assert_eq!(report.dropped, 1);
        assert_eq!(report.frame.len(), 2);
    }

    #[test]
    fn majority_drop_is_a_parse_error() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let rows = vec![
            (date, Cell::Text("n/d".into())),
            (date, Cell::Text("s/d".into())),
            (date, Cell::Number(1.0)),
        ];
        assert!(matches!(coerce_numeric(rows, &DOT), Err(Error::Parse(_))));
    }
}
