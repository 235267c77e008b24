//! Catalog bootstrap from the canonical workbook
//!
//! The reference taxonomy lives in a hand-maintained workbook with one sheet
//! per table (`family`, `sub_family`, `country`, `variable`, `master`), one
//! header row each. Re-running the bootstrap is harmless: rows are inserted
//! with INSERT OR IGNORE and only the master active flag follows the
//! workbook on re-runs. Deletions are not supported; deactivate instead.

use calamine::{Data, Reader};
use ecomon_common::db::{Catalog, Periodicity, Series, TypeOfSeries, Variable};
use ecomon_common::{Error, Result};
use std::path::Path;
use tracing::info;

/// Row counts applied from the workbook
#[derive(Debug, Default, Clone, Copy)]
pub struct BootstrapReport {
    pub families: usize,
    pub sub_families: usize,
    pub countries: usize,
    pub variables: usize,
    pub series: usize,
}

pub async fn bootstrap(catalog: &Catalog, workbook_path: &Path) -> Result<BootstrapReport> {
    let mut workbook = calamine::open_workbook_auto(workbook_path)
        .map_err(|e| Error::Source(format!("cannot open {}: {}", workbook_path.display(), e)))?;

    catalog.ensure_type_of_series_seeded().await?;

    let mut report = BootstrapReport::default();

    for row in sheet_rows(&mut workbook, "family")? {
        let id = cell_i64(&row, 0)?;
        let name = cell_str(&row, 1)?;
        catalog.upsert_family(id, &name).await?;
        report.families += 1;
    }

    for row in sheet_rows(&mut workbook, "sub_family")? {
        let id = cell_i64(&row, 0)?;
        let family_id = cell_i64(&row, 1)?;
        let name = cell_str(&row, 2)?;
        catalog.upsert_sub_family(id, family_id, &name).await?;
        report.sub_families += 1;
    }

    for row in sheet_rows(&mut workbook, "country")? {
        let id = cell_i64(&row, 0)?;
        let name = cell_str(&row, 1)?;
        catalog.upsert_country(id, &name).await?;
        report.countries += 1;
    }

    for row in sheet_rows(&mut workbook, "variable")? {
        let variable = Variable {
            id: cell_i64(&row, 0)?,
            sub_family_id: cell_i64(&row, 1)?,
            name: cell_str(&row, 2)?,
            currency: cell_opt_str(&row, 3),
            is_real: cell_i64(&row, 4).unwrap_or(0) != 0,
        };
        catalog.upsert_variable(&variable).await?;
        report.variables += 1;
    }

    for row in sheet_rows(&mut workbook, "master")? {
        let periodicity_code = cell_str(&row, 3)?;
        let series = Series {
            variable_id: cell_i64(&row, 0)?,
            country_id: cell_i64(&row, 1)?,
            type_of_series: TypeOfSeries::from_id(cell_i64(&row, 2).unwrap_or(1))
                .ok_or_else(|| Error::Parse("master row with unknown type_of_series".to_string()))?,
            periodicity: Periodicity::from_code(&periodicity_code).ok_or_else(|| {
                Error::Parse(format!("master row with unknown periodicity '{}'", periodicity_code))
            })?,
            source: cell_opt_str(&row, 4),
            source_url: cell_opt_str(&row, 5),
            tag: cell_opt_str(&row, 6),
            active: cell_i64(&row, 7).unwrap_or(1) != 0,
        };
        catalog.upsert_series(&series).await?;
        report.series += 1;
    }

    info!(
        "Bootstrap applied: {} families, {} sub-families, {} countries, {} variables, {} series",
        report.families, report.sub_families, report.countries, report.variables, report.series
    );
    Ok(report)
}

/// Data rows of one sheet, header row dropped. Fully blank rows are skipped.
fn sheet_rows<RS>(workbook: &mut calamine::Sheets<RS>, name: &str) -> Result<Vec<Vec<Data>>>
where
    RS: std::io::Read + std::io::Seek,
{
    let range = workbook
        .worksheet_range(name)
        .map_err(|e| Error::Parse(format!("catalog workbook has no '{}' sheet: {}", name, e)))?;

    Ok(range
        .rows()
        .skip(1)
        .filter(|row| !row.iter().all(is_blank))
        .map(|row| row.to_vec())
        .collect())
}

fn is_blank(data: &Data) -> bool {
    match data {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn cell_i64(row: &[Data], col: usize) -> Result<i64> {
    match row.get(col) {
        Some(Data::Int(i)) => Ok(*i),
        Some(Data::Float(f)) => Ok(*f as i64),
        Some(Data::String(s)) => s
            .trim()
            .parse()
            .map_err(|_| Error::Parse(format!("expected integer in column {}, got '{}'", col, s))),
        other => Err(Error::Parse(format!(
            "expected integer in column {}, got {:?}",
            col, other
        ))),
    }
}

fn cell_str(row: &[Data], col: usize) -> Result<String> {
    cell_opt_str(row, col)
        .ok_or_else(|| Error::Parse(format!("expected text in column {}", col)))
}

fn cell_opt_str(row: &[Data], col: usize) -> Option<String> {
    match row.get(col) {
        Some(Data::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Data::Int(i)) => Some(i.to_string()),
        Some(Data::Float(f)) => Some(f.to_string()),
        _ => None,
    }
}
