//! Positional extraction: workbook/CSV bytes to a projected two-column frame
//!
//! The ingester record declares the geometry (sheet, leading rows to skip,
//! date and value column indices); everything downstream of this module
//! works on the projected frame and never sees the source layout.

use crate::registry::{IngesterSpec, Sheet};
use crate::source::RawSource;
use calamine::{Data, Reader};
use ecomon_common::{Cell, Error, RawFrame, Result};
use std::io::Cursor;

/// Extract the declared (date, value) columns from raw source bytes.
///
/// An extraction that yields zero rows means the declared geometry does not
/// match the file, which is a parse failure rather than an empty series.
pub fn extract(raw: &RawSource, spec: &IngesterSpec) -> Result<RawFrame> {
    let frame = if is_csv(&raw.origin) {
        extract_csv(&raw.bytes, spec)?
    } else {
        extract_workbook(&raw.bytes, spec)?
    };

    if frame.is_empty() {
        return Err(Error::Parse(format!(
            "{}: positional extraction produced an empty frame",
            raw.origin
        )));
    }
    Ok(frame)
}

fn is_csv(origin: &str) -> bool {
    let name = origin.rsplit('/').next().unwrap_or(origin);
    name.rsplit('.')
        .next()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv") || ext.eq_ignore_ascii_case("txt"))
}

fn extract_workbook(bytes: &[u8], spec: &IngesterSpec) -> Result<RawFrame> {
    let mut workbook = calamine::open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| Error::Parse(format!("cannot open workbook: {}", e)))?;

    let sheet_name = match spec.sheet {
        Sheet::Name(name) => name.to_string(),
        Sheet::Index(idx) => workbook
            .sheet_names()
            .get(idx)
            .cloned()
            .ok_or_else(|| Error::Parse(format!("workbook has no sheet #{}", idx)))?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| Error::Parse(format!("cannot read sheet '{}': {}", sheet_name, e)))?;

    let mut rows = Vec::new();
    for row in range.rows().skip(spec.skip_rows) {
        let date = cell_from_data(row.get(spec.date_col));
        let value = cell_from_data(row.get(spec.value_col));
        if date.is_empty() && value.is_empty() {
            continue;
        }
        rows.push((date, value));
    }
    Ok(RawFrame::new(rows))
}

fn cell_from_data(data: Option<&Data>) -> Cell {
    match data {
        None | Some(Data::Empty) => Cell::Empty,
        Some(Data::String(s)) => {
            if s.trim().is_empty() {
                Cell::Empty
            } else {
                Cell::Text(s.clone())
            }
        }
        Some(Data::Float(f)) => Cell::Number(*f),
        Some(Data::Int(i)) => Cell::Number(*i as f64),
        Some(Data::DateTime(dt)) => Cell::Number(dt.as_f64()),
        Some(Data::DateTimeIso(s)) | Some(Data::DurationIso(s)) => Cell::Text(s.clone()),
        // Booleans and error cells carry nothing a series can use
        Some(Data::Bool(_)) | Some(Data::Error(_)) => Cell::Empty,
    }
}

fn extract_csv(bytes: &[u8], spec: &IngesterSpec) -> Result<RawFrame> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(|e| Error::Parse(format!("CSV row {}: {}", i + 1, e)))?;
        if i < spec.skip_rows {
            continue;
        }
        let date = cell_from_str(record.get(spec.date_col));
        let value = cell_from_str(record.get(spec.value_col));
        if date.is_empty() && value.is_empty() {
            continue;
        }
        rows.push((date, value));
    }
    Ok(RawFrame::new(rows))
}

fn cell_from_str(field: Option<&str>) -> Cell {
    match field {
        None => Cell::Empty,
        Some(s) if s.trim().is_empty() => Cell::Empty,
        Some(s) => Cell::Text(s.to_string()),
    }
}
