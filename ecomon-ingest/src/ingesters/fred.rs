//! United States reference series, via the St. Louis Fed CSV endpoint
//!
//! FRED CSVs are uniform: one header row, ISO dates, dot decimals, missing
//! observations published as a period character (dropped by coercion).

use crate::registry::{IngesterSpec, Source};
use ecomon_common::db::Periodicity::{Daily, Monthly};

fn fred(tag: &'static str, variable_id: i64, country_id: i64, url: &'static str, fallback: &'static str) -> IngesterSpec {
    IngesterSpec::new(
        tag,
        variable_id,
        country_id,
        Daily,
        Source::Url {
            url,
            fallback: Some(fallback),
        },
    )
    .skip(1)
    .cols(0, 1)
}

pub fn specs() -> Vec<IngesterSpec> {
    vec![
        IngesterSpec::new(
            "ipc_us",
            11,
            840,
            Monthly,
            Source::Url {
                url: "https://fred.stlouisfed.org/graph/fredgraph.csv?id=CPIAUCSL",
                fallback: Some("fred_cpiaucsl.csv"),
            },
        )
        .skip(1)
        .cols(0, 1),
        fred(
            "fedfunds_us",
            33,
            840,
            "https://fred.stlouisfed.org/graph/fredgraph.csv?id=DFF",
            "fred_dff.csv",
        )
        .fill_business_days(),
        fred(
            "ust10y_us",
            34,
            840,
            "https://fred.stlouisfed.org/graph/fredgraph.csv?id=DGS10",
            "fred_dgs10.csv",
        )
        .fill_business_days(),
        fred(
            "eurusd",
            24,
            840,
            "https://fred.stlouisfed.org/graph/fredgraph.csv?id=DEXUSEU",
            "fred_dexuseu.csv",
        )
        .fill_business_days(),
    ]
}
