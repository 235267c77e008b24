//! Frame types exchanged between extraction, normalization, and the Loader
//!
//! A `RawFrame` holds the two projected spreadsheet columns exactly as read;
//! the normalization library turns it into a typed `Frame` of
//! (date, optional value) rows. A `None` value marks a cell that was present
//! but empty: daily calendar completion forward-fills it, the Loader drops it.

use chrono::NaiveDate;

/// A projected spreadsheet cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

/// Two projected columns (date, value), straight out of the source
#[derive(Debug, Clone, Default)]
pub struct RawFrame {
    pub rows: Vec<(Cell, Cell)>,
}

impl RawFrame {
    pub fn new(rows: Vec<(Cell, Cell)>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A normalized two-column frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub rows: Vec<(NaiveDate, Option<f64>)>,
}

impl Frame {
    pub fn new(rows: Vec<(NaiveDate, Option<f64>)>) -> Self {
        Self { rows }
    }

    /// Build a frame where every row carries a value.
    pub fn from_pairs(pairs: Vec<(NaiveDate, f64)>) -> Self {
        Self {
            rows: pairs.into_iter().map(|(d, v)| (d, Some(v))).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.rows.first().map(|(d, _)| *d)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.rows.last().map(|(d, _)| *d)
    }

    /// Rows that carry a value, in frame order.
    pub fn valued_rows(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.rows.iter().filter_map(|(d, v)| v.map(|v| (*d, v)))
    }
}
