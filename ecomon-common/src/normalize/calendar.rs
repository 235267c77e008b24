//! Calendar validation and completion
//!
//! Daily market series arrive with holes (holidays, silent days); the store
//! contract is a dense weekday calendar with the last known value carried
//! forward. Weekly and monthly series are never fill-expanded; that policy
//! lives on the ingester record.

use crate::frame::Frame;
use crate::{Error, Result};
use chrono::{Datelike, Duration, NaiveDate, Weekday};

fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Count of weekdays in the closed interval `[from, to]`.
pub fn business_day_count(from: NaiveDate, to: NaiveDate) -> i64 {
    let mut count = 0;
    let mut date = from;
    while date <= to {
        if is_weekday(date) {
            count += 1;
        }
        date += Duration::days(1);
    }
    count
}

/// Sort ascending and de-duplicate by date, keeping the last occurrence.
/// The result is strictly increasing.
pub fn validate_dates(frame: Frame) -> Frame {
    let mut rows = frame.rows;
    // Stable sort preserves source order inside a date group, so "last
    // occurrence wins" survives the sort.
    rows.sort_by_key(|(date, _)| *date);

    let mut out: Vec<(NaiveDate, Option<f64>)> = Vec::with_capacity(rows.len());
    for row in rows {
        match out.last_mut() {
            Some(last) if last.0 == row.0 => *last = row,
            _ => out.push(row),
        }
    }
    Frame::new(out)
}

/// Snap every date to the first day of its month, keeping the last
/// observation inside each month.
pub fn normalize_monthly(frame: Frame) -> Frame {
    let snapped = frame
        .rows
        .into_iter()
        .map(|(date, value)| (date - Duration::days(date.day0() as i64), value))
        .collect();
    validate_dates(Frame::new(snapped))
}

/// Expand an irregular daily frame to a dense calendar over `[min, max]`,
/// forward-filling missing values from the last known observation.
///
/// With `weekday_only`, weekend rows are discarded and the output calendar
/// skips Saturdays and Sundays. The first kept date must carry a value.
pub fn fill_business_days(frame: Frame, weekday_only: bool) -> Result<Frame> {
    let frame = validate_dates(frame);
    let rows: Vec<_> = frame
        .rows
        .into_iter()
        .filter(|(date, _)| !weekday_only || is_weekday(*date))
        .collect();

    let (first, last) = match (rows.first(), rows.last()) {
        (Some(f), Some(l)) => (f.0, l.0),
        _ => return Ok(Frame::default()),
    };
    if rows[0].1.is_none() {
        return Err(Error::LeadingGap(first));
    }

    let mut out = Vec::with_capacity(rows.len());
    let mut known = rows.into_iter().peekable();
    let mut carry = 0.0;
    let mut date = first;
    while date <= last {
        if !weekday_only || is_weekday(date) {
            if let Some((_, value)) = known.next_if(|(d, _)| *d == date) {
                if let Some(v) = value {
                    carry = v;
                }
            }
            out.push((date, Some(carry)));
        }
        date += Duration::days(1);
    }

    Ok(Frame::new(out))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn validate_sorts_and_keeps_last_on_ties() {
        let frame = Frame::new(vec![
            (d(2024, 3, 1), Some(3.0)),
            (d(2024, 1, 1), Some(1.0)),
            (d(2024, 3, 1), Some(9.0)),
        ]);
        let frame = validate_dates(frame);
        assert_eq!(
            frame.rows,
            vec![(d(2024, 1, 1), Some(1.0)), (d(2024, 3, 1), Some(9.0))]
        );
    }

    #[test]
    fn monthly_snaps_to_first_of_month() {
        let frame = Frame::new(vec![
            (d(2024, 1, 15), Some(100.0)),
            (d(2024, 2, 20), Some(100.8)),
            (d(2024, 3, 10), Some(101.5)),
        ]);
        let frame = normalize_monthly(frame);
        let dates: Vec<_> = frame.rows.iter().map(|(d, _)| *d).collect();
        assert_eq!(dates, vec![d(2024, 1, 1), d(2024, 2, 1), d(2024, 3, 1)]);
        assert!(frame.rows.iter().all(|(date, _)| date.day() == 1));
    }

    #[test]
    fn monthly_collapses_duplicates_keeping_last() {
        let frame = Frame::new(vec![
            (d(2024, 1, 5), Some(1.0)),
            (d(2024, 1, 25), Some(2.0)),
        ]);
        let frame = normalize_monthly(frame);
        assert_eq!(frame.rows, vec![(d(2024, 1, 1), Some(2.0))]);
    }

    #[test]
    fn fill_produces_dense_weekday_calendar() {
        // Mon 3rd, Wed 5th, Fri 7th of June 2024
        let frame = Frame::from_pairs(vec![
            (d(2024, 6, 3), 38.50),
            (d(2024, 6, 5), 38.65),
            (d(2024, 6, 7), 38.80),
        ]);
        let frame = fill_business_days(frame, true).unwrap();
        assert_eq!(
            frame.rows,
            vec![
                (d(2024, 6, 3), Some(38.50)),
                (d(2024, 6, 4), Some(38.50)),
                (d(2024, 6, 5), Some(38.65)),
                (d(2024, 6, 6), Some(38.65)),
                (d(2024, 6, 7), Some(38.80)),
            ]
        );
    }

    #[test]
    fn fill_spans_weekends_without_emitting_them() {
        // Fri 7th to Tue 11th: Sat/Sun absent, Mon forward-filled
        let frame = Frame::from_pairs(vec![(d(2024, 6, 7), 1.0), (d(2024, 6, 11), 2.0)]);
        let frame = fill_business_days(frame, true).unwrap();
        assert_eq!(
            frame.rows,
            vec![
                (d(2024, 6, 7), Some(1.0)),
                (d(2024, 6, 10), Some(1.0)),
                (d(2024, 6, 11), Some(2.0)),
            ]
        );
    }

    #[test]
    fn leading_null_is_an_error() {
        let frame = Frame::new(vec![(d(2024, 6, 3), None), (d(2024, 6, 4), Some(1.0))]);
        match fill_business_days(frame, true) {
            Err(Error::LeadingGap(date)) => assert_eq!(date, d(2024, 6, 3)),
            other => panic!("expected LeadingGap, got {:?}", other.map(|f| f.rows)),
        }
    }

    #[test]
    fn empty_frame_stays_empty() {
        assert!(fill_business_days(Frame::default(), true).unwrap().is_empty());
    }

    #[test]
    fn interior_nulls_are_forward_filled() {
        let frame = Frame::new(vec![
            (d(2024, 6, 3), Some(5.0)),
            (d(2024, 6, 4), None),
            (d(2024, 6, 5), Some(6.0)),
        ]);
        let frame = fill_business_days(frame, true).unwrap();
        assert_eq!(frame.rows[1], (d(2024, 6, 4), Some(5.0)));
    }

    #[test]
    fn business_day_count_closed_interval() {
        assert_eq!(business_day_count(d(2024, 6, 3), d(2024, 6, 7)), 5);
        assert_eq!(business_day_count(d(2024, 6, 7), d(2024, 6, 10)), 2);
    }
}
