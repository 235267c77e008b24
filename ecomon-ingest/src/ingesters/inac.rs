//! Livestock weeklies: INAC steer/cow quotes and the SUL wool market
//!
//! Weekly series are stored on their published date and never fill-expanded.

use crate::registry::{IngesterSpec, Sheet, Source};
use ecomon_common::db::Periodicity::Weekly;

const CATTLE: &str = "inac_haciendas.xlsx";

pub fn specs() -> Vec<IngesterSpec> {
    vec![
        // USD per kg carcass weight, weekly auction average
        IngesterSpec::new("novillo_uy", 71, 858, Weekly, Source::StagedFile(CATTLE))
            .sheet(Sheet::Name("Novillo"))
            .skip(2)
            .cols(0, 1)
            .day_first()
            .decimal_comma(),
        IngesterSpec::new("vaca_uy", 72, 858, Weekly, Source::StagedFile(CATTLE))
            .sheet(Sheet::Name("Vaca"))
            .skip(2)
            .cols(0, 1)
            .day_first()
            .decimal_comma(),
        IngesterSpec::new("lana_uy", 73, 858, Weekly, Source::StagedFile("sul_lana.xlsx"))
            .skip(1)
            .cols(0, 2)
            .day_first()
            .decimal_comma(),
    ]
}
