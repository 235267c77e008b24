//! Inspection subcommands
//!
//! One command with subcommands, backed only by the catalog and observation
//! store APIs: `series` (coverage per active series), `missing-data`
//! (weekday holes and stale dailies), `categories` (the taxonomy tree).

use chrono::NaiveDate;
use ecomon_common::db::{Catalog, ObservationStore, Series, SeriesFilter};
use ecomon_common::normalize::calendar::business_day_count;
use ecomon_common::Result;
use serde::Serialize;

/// Coverage summary for one active series
#[derive(Debug, Serialize)]
pub struct SeriesInfo {
    pub variable_id: i64,
    pub country_id: i64,
    pub type_of_series_id: i64,
    pub variable: String,
    pub country: String,
    pub periodicity: String,
    pub tag: Option<String>,
    pub observations: i64,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

pub async fn series_info(
    catalog: &Catalog,
    store: &ObservationStore,
    filter: &SeriesFilter,
) -> Result<Vec<SeriesInfo>> {
    let mut out = Vec::new();
    for series in catalog.list_active_series(filter).await? {
        let key = series.key();
        let range = store.range_for(key).await?;
        out.push(SeriesInfo {
            variable_id: series.variable_id,
            country_id: series.country_id,
            type_of_series_id: series.type_of_series.id(),
            variable: name_or_id(catalog.variable_name(series.variable_id).await?, series.variable_id),
            country: name_or_id(catalog.country_name(series.country_id).await?, series.country_id),
            periodicity: series.periodicity.code().to_string(),
            tag: series.tag.clone(),
            observations: store.count_for(key).await?,
            first_date: range.map(|(min, _)| min),
            last_date: range.map(|(_, max)| max),
        });
    }
    Ok(out)
}

fn name_or_id(name: Option<String>, id: i64) -> String {
    name.unwrap_or_else(|| id.to_string())
}

/// A daily series whose stored calendar is not dense, or which is empty
#[derive(Debug, Serialize)]
pub struct MissingDataInfo {
    pub tag: Option<String>,
    pub variable: String,
    pub country: String,
    pub observations: i64,
    pub expected: i64,
    pub missing: i64,
}

/// Daily series where the stored weekday calendar has holes. A correctly
/// completed series reports zero missing days, so anything listed here means
/// an ingester is misbehaving or a load was interrupted.
pub async fn missing_data(
    catalog: &Catalog,
    store: &ObservationStore,
) -> Result<Vec<MissingDataInfo>> {
    let filter = SeriesFilter {
        periodicity: Some(ecomon_common::db::Periodicity::Daily),
        ..Default::default()
    };

    let mut out = Vec::new();
    for series in catalog.list_active_series(&filter).await? {
        let key = series.key();
        let count = store.count_for(key).await?;
        let expected = match store.range_for(key).await? {
            Some((min, max)) => business_day_count(min, max),
            None => 0,
        };
        let missing = expected - count;
        if missing != 0 || count == 0 {
            out.push(MissingDataInfo {
                tag: series.tag.clone(),
                variable: name_or_id(catalog.variable_name(series.variable_id).await?, series.variable_id),
                country: name_or_id(catalog.country_name(series.country_id).await?, series.country_id),
                observations: count,
                expected,
                missing,
            });
        }
    }
    Ok(out)
}

/// The taxonomy tree with per-variable active series counts
#[derive(Debug, Serialize)]
pub struct CategoryTree {
    pub families: Vec<FamilyNode>,
}

#[derive(Debug, Serialize)]
pub struct FamilyNode {
    pub id: i64,
    pub name: String,
    pub sub_families: Vec<SubFamilyNode>,
}

#[derive(Debug, Serialize)]
pub struct SubFamilyNode {
    pub id: i64,
    pub name: String,
    pub variables: Vec<VariableNode>,
}

#[derive(Debug, Serialize)]
pub struct VariableNode {
    pub id: i64,
    pub name: String,
    pub active_series: usize,
}

pub async fn categories(catalog: &Catalog) -> Result<CategoryTree> {
    let all_active = catalog.list_active_series(&SeriesFilter::default()).await?;
    let count_for = |variable_id: i64| {
        all_active
            .iter()
            .filter(|s: &&Series| s.variable_id == variable_id)
            .count()
    };

    let mut families = Vec::new();
    for family in catalog.list_families().await? {
        let mut sub_families = Vec::new();
        for sub in catalog.list_sub_families(family.id).await? {
            let variables = catalog
                .list_variables(sub.id)
                .await?
                .into_iter()
                .map(|v| VariableNode {
                    active_series: count_for(v.id),
                    id: v.id,
                    name: v.name,
                })
                .collect();
            sub_families.push(SubFamilyNode {
                id: sub.id,
                name: sub.name,
                variables,
            });
        }
        families.push(FamilyNode {
            id: family.id,
            name: family.name,
            sub_families,
        });
    }
    Ok(CategoryTree { families })
}
