//! Database models

use serde::{Deserialize, Serialize};

/// Sampling cadence of a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Periodicity {
    Daily,
    Weekly,
    Monthly,
}

impl Periodicity {
    pub fn code(self) -> &'static str {
        match self {
            Periodicity::Daily => "D",
            Periodicity::Weekly => "W",
            Periodicity::Monthly => "M",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "D" => Some(Periodicity::Daily),
            "W" => Some(Periodicity::Weekly),
            "M" => Some(Periodicity::Monthly),
            _ => None,
        }
    }
}

impl std::fmt::Display for Periodicity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Transformation state of a series. Closed enumeration, seeded in the
/// `type_of_series` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TypeOfSeries {
    #[default]
    Original,
    SeasonallyAdjusted,
    TrendCycle,
}

impl TypeOfSeries {
    pub fn id(self) -> i64 {
        match self {
            TypeOfSeries::Original => 1,
            TypeOfSeries::SeasonallyAdjusted => 2,
            TypeOfSeries::TrendCycle => 3,
        }
    }

    pub fn from_id(id: i64) -> Option<Self> {
        match id {
            1 => Some(TypeOfSeries::Original),
            2 => Some(TypeOfSeries::SeasonallyAdjusted),
            3 => Some(TypeOfSeries::TrendCycle),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TypeOfSeries::Original => "Original",
            TypeOfSeries::SeasonallyAdjusted => "Seasonally-Adjusted",
            TypeOfSeries::TrendCycle => "Trend-Cycle",
        }
    }

    pub const ALL: [TypeOfSeries; 3] = [
        TypeOfSeries::Original,
        TypeOfSeries::SeasonallyAdjusted,
        TypeOfSeries::TrendCycle,
    ];
}

/// The natural identity under which observations are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesKey {
    pub variable_id: i64,
    pub country_id: i64,
    pub type_of_series: TypeOfSeries,
}

impl SeriesKey {
    pub fn new(variable_id: i64, country_id: i64, type_of_series: TypeOfSeries) -> Self {
        Self {
            variable_id,
            country_id,
            type_of_series,
        }
    }

    /// Identity with the default Original type.
    pub fn original(variable_id: i64, country_id: i64) -> Self {
        Self::new(variable_id, country_id, TypeOfSeries::Original)
    }
}

impl std::fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.variable_id,
            self.country_id,
            self.type_of_series.id()
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Family {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubFamily {
    pub id: i64,
    pub family_id: i64,
    pub name: String,
}

/// Countries and multi-country groups share this table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Country {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variable {
    pub id: i64,
    pub sub_family_id: i64,
    pub name: String,
    pub currency: Option<String>,
    pub is_real: bool,
}

/// An active, ingestible series (a `master` row)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Series {
    pub variable_id: i64,
    pub country_id: i64,
    pub type_of_series: TypeOfSeries,
    pub periodicity: Periodicity,
    pub source: Option<String>,
    pub source_url: Option<String>,
    pub tag: Option<String>,
    pub active: bool,
}

impl Series {
    pub fn key(&self) -> SeriesKey {
        SeriesKey::new(self.variable_id, self.country_id, self.type_of_series)
    }
}
