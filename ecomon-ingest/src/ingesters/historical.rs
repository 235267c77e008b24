//! One-shot multi-year extracts under the historical directory
//!
//! These cover the years before the live workbooks begin. They share the
//! identity of the live series, so re-running them is harmless: the live
//! loader wins on any overlapping dates because later calls overwrite.

use crate::registry::{IngesterSpec, Sheet, Source};
use ecomon_common::db::Periodicity::{Daily, Monthly, Weekly};

pub fn specs() -> Vec<IngesterSpec> {
    vec![
        IngesterSpec::new(
            "ipc_uy_hist",
            11,
            858,
            Monthly,
            Source::HistoricalFile("ipc_1937_2010.xlsx"),
        )
        .skip(2)
        .cols(0, 1)
        .day_first()
        .decimal_comma(),
        IngesterSpec::new(
            "tc_usd_uy_hist",
            21,
            858,
            Daily,
            Source::HistoricalFile("dolar_1990_2010.xlsx"),
        )
        .sheet(Sheet::Name("Serie"))
        .skip(1)
        .cols(0, 1)
        .day_first()
        .decimal_comma()
        .fill_business_days(),
        IngesterSpec::new(
            "novillo_uy_hist",
            71,
            858,
            Weekly,
            Source::HistoricalFile("novillo_1980_2010.xlsx"),
        )
        .skip(1)
        .cols(0, 1)
        .day_first()
        .decimal_comma(),
    ]
}
