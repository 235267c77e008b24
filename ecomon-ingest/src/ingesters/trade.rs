//! Foreign trade monthlies (customs aggregates)

use crate::registry::{IngesterSpec, Sheet, Source};
use ecomon_common::db::Periodicity::Monthly;

const TRADE: &str = "comercio_exterior.xlsx";

pub fn specs() -> Vec<IngesterSpec> {
    vec![
        IngesterSpec::new("exports_uy", 61, 858, Monthly, Source::StagedFile(TRADE))
            .sheet(Sheet::Name("Exportaciones"))
            .skip(3)
            .cols(0, 1)
            .day_first()
            .decimal_comma(),
        IngesterSpec::new("imports_uy", 62, 858, Monthly, Source::StagedFile(TRADE))
            .sheet(Sheet::Name("Importaciones"))
            .skip(3)
            .cols(0, 1)
            .day_first()
            .decimal_comma(),
        // Exports to the bloc, same workbook, regional aggregate column
        IngesterSpec::new("exports_mercosur", 61, 900, Monthly, Source::StagedFile(TRADE))
            .sheet(Sheet::Name("Exportaciones"))
            .skip(3)
            .cols(0, 4)
            .day_first()
            .decimal_comma(),
    ]
}
