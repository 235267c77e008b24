//! Declarative ingester registry
//!
//! One record per source series. The record fixes identity, source,
//! spreadsheet geometry, and normalization switches; a generic pipeline in
//! the runner consumes it. The registry is constructed once at startup and
//! passed explicitly to the batch runner.

use ecomon_common::db::{Periodicity, SeriesKey, TypeOfSeries};
use ecomon_common::{Error, Result};
use std::str::FromStr;

/// Where the raw frame comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A file deposited by the download stage under the staging directory
    StagedFile(&'static str),
    /// Remote endpoint, with an optional staged fallback file.
    /// The staged file is authoritative whenever it exists.
    Url {
        url: &'static str,
        fallback: Option<&'static str>,
    },
    /// Multi-year extract under the historical directory, loaded once
    HistoricalFile(&'static str),
}

/// Worksheet selection inside a workbook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sheet {
    Index(usize),
    Name(&'static str),
}

/// Calendar completion policy. Only ever set on daily records; weekly and
/// monthly series must never be fill-expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fill {
    #[default]
    None,
    BusinessDays,
}

/// A single source series: identity, source, geometry, normalization
#[derive(Debug, Clone)]
pub struct IngesterSpec {
    pub tag: &'static str,
    pub variable_id: i64,
    pub country_id: i64,
    pub type_of_series: TypeOfSeries,
    pub periodicity: Periodicity,
    pub source: Source,
    pub sheet: Sheet,
    pub skip_rows: usize,
    pub date_col: usize,
    pub value_col: usize,
    pub day_first: bool,
    pub decimal_comma: bool,
    pub fill: Fill,
}

impl IngesterSpec {
    pub fn new(
        tag: &'static str,
        variable_id: i64,
        country_id: i64,
        periodicity: Periodicity,
        source: Source,
    ) -> Self {
        Self {
            tag,
            variable_id,
            country_id,
            type_of_series: TypeOfSeries::Original,
            periodicity,
            source,
            sheet: Sheet::Index(0),
            skip_rows: 0,
            date_col: 0,
            value_col: 1,
            day_first: false,
            decimal_comma: false,
            fill: Fill::None,
        }
    }

    pub fn key(&self) -> SeriesKey {
        SeriesKey::new(self.variable_id, self.country_id, self.type_of_series)
    }

    // -- record builders ----------------------------------------------------

    pub fn sheet(mut self, sheet: Sheet) -> Self {
        self.sheet = sheet;
        self
    }

    pub fn skip(mut self, rows: usize) -> Self {
        self.skip_rows = rows;
        self
    }

    pub fn cols(mut self, date_col: usize, value_col: usize) -> Self {
        self.date_col = date_col;
        self.value_col = value_col;
        self
    }

    pub fn day_first(mut self) -> Self {
        self.day_first = true;
        self
    }

    pub fn decimal_comma(mut self) -> Self {
        self.decimal_comma = true;
        self
    }

    pub fn fill_business_days(mut self) -> Self {
        debug_assert!(self.periodicity == Periodicity::Daily);
        self.fill = Fill::BusinessDays;
        self
    }

    pub fn seasonally_adjusted(mut self) -> Self {
        self.type_of_series = TypeOfSeries::SeasonallyAdjusted;
        self
    }

    pub fn trend_cycle(mut self) -> Self {
        self.type_of_series = TypeOfSeries::TrendCycle;
        self
    }
}

/// The full set of declared ingesters
pub struct Registry {
    specs: Vec<IngesterSpec>,
}

impl Registry {
    /// All ingesters shipped with the warehouse, grouped by source family.
    pub fn standard() -> Self {
        Self::from_specs(crate::ingesters::all())
    }

    pub fn from_specs(specs: Vec<IngesterSpec>) -> Self {
        Self { specs }
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IngesterSpec> {
        self.specs.iter()
    }

    /// Records matching a selector, in declaration order.
    pub fn select(&self, selector: &Selector) -> Vec<&IngesterSpec> {
        self.specs
            .iter()
            .filter(|spec| match selector {
                Selector::All => true,
                Selector::Key(key) => spec.key() == *key,
                Selector::Tag(tag) => spec.tag == tag,
            })
            .collect()
    }
}

/// Which series a batch run covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    All,
    /// `variable_id:country_id[:type_of_series_id]`
    Key(SeriesKey),
    /// Symbolic tag from the ingester record
    Tag(String),
}

impl FromStr for Selector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::Config("empty series selector".to_string()));
        }

        // Numeric tuple selectors contain a colon; anything else is a tag.
        if !s.contains(':') {
            return Ok(Selector::Tag(s.to_string()));
        }

        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() < 2 || parts.len() > 3 {
            return Err(Error::Config(format!(
                "selector '{}' is not variable_id:country_id[:type_of_series_id]",
                s
            )));
        }
        let parse = |p: &str| {
            p.parse::<i64>()
                .map_err(|_| Error::Config(format!("selector '{}' has non-numeric part '{}'", s, p)))
        };
        let variable_id = parse(parts[0])?;
        let country_id = parse(parts[1])?;
        let type_of_series = match parts.get(2) {
            None => TypeOfSeries::Original,
            Some(p) => TypeOfSeries::from_id(parse(p)?).ok_or_else(|| {
                Error::Config(format!("selector '{}' has unknown type_of_series", s))
            })?,
        };
        Ok(Selector::Key(SeriesKey::new(
            variable_id,
            country_id,
            type_of_series,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_parses_tuple_and_tag() {
        assert_eq!(
            "11:858".parse::<Selector>().unwrap(),
            Selector::Key(SeriesKey::original(11, 858))
        );
        assert_eq!(
            "41:858:2".parse::<Selector>().unwrap(),
            Selector::Key(SeriesKey::new(41, 858, TypeOfSeries::SeasonallyAdjusted))
        );
        assert_eq!(
            "ipc_uy".parse::<Selector>().unwrap(),
            Selector::Tag("ipc_uy".to_string())
        );
        assert!("11:858:9".parse::<Selector>().is_err());
        assert!("11:abc".parse::<Selector>().is_err());
    }

    #[test]
    fn registry_selects_by_key_and_tag() {
        let registry = Registry::standard();
        assert!(registry.len() >= 35, "expected a full registry, got {}", registry.len());

        let by_tag = registry.select(&Selector::Tag("ipc_uy".to_string()));
        assert_eq!(by_tag.len(), 1);

        // A key may match both the live record and a historical one
        let by_key = registry.select(&Selector::Key(by_tag[0].key()));
        assert!(by_key.iter().any(|s| s.tag == "ipc_uy"));
    }

    #[test]
    fn tags_are_unique_across_the_registry() {
        let registry = Registry::standard();
        let mut tags: Vec<_> = registry.iter().map(|s| s.tag).collect();
        tags.sort_unstable();
        let before = tags.len();
        tags.dedup();
        assert_eq!(before, tags.len(), "duplicate ingester tag");
    }

    #[test]
    fn fill_is_declared_only_on_dailies() {
        let registry = Registry::standard();
        for spec in registry.iter() {
            if spec.fill == Fill::BusinessDays {
                assert_eq!(
                    spec.periodicity,
                    Periodicity::Daily,
                    "{} fill-expands a non-daily series",
                    spec.tag
                );
            }
        }
    }
}
