//! World commodity prices relevant to the export basket

use crate::registry::{IngesterSpec, Sheet, Source};
use ecomon_common::db::Periodicity::{Daily, Weekly};

const CBOT: &str = "cbot_granos.xlsx";

pub fn specs() -> Vec<IngesterSpec> {
    vec![
        // Chicago front-month settlements, USD per ton
        IngesterSpec::new("soy_cbot", 74, 840, Daily, Source::StagedFile(CBOT))
            .sheet(Sheet::Name("Soja"))
            .skip(1)
            .cols(0, 1)
            .fill_business_days(),
        IngesterSpec::new("wheat_cbot", 75, 840, Daily, Source::StagedFile(CBOT))
            .sheet(Sheet::Name("Trigo"))
            .skip(1)
            .cols(0, 1)
            .fill_business_days(),
        IngesterSpec::new("maize_cbot", 76, 840, Daily, Source::StagedFile(CBOT))
            .sheet(Sheet::Name("Maiz"))
            .skip(1)
            .cols(0, 1)
            .fill_business_days(),
        IngesterSpec::new("wti", 81, 840, Daily, Source::StagedFile("energia_crudo.xlsx"))
            .sheet(Sheet::Name("WTI"))
            .skip(1)
            .cols(0, 1)
            .fill_business_days(),
        IngesterSpec::new("brent", 82, 826, Daily, Source::StagedFile("energia_crudo.xlsx"))
            .sheet(Sheet::Name("Brent"))
            .skip(1)
            .cols(0, 1)
            .fill_business_days(),
        // GlobalDairyTrade whole milk powder auction average
        IngesterSpec::new("wmp_gdt", 77, 554, Weekly, Source::StagedFile("gdt_wmp.csv"))
            .skip(1)
            .cols(0, 1),
    ]
}
