//! Banco Central del Uruguay: daily market series
//!
//! The download stage deposits the daily quotations workbook and the
//! monetary indicators workbook under staging. All BCU sheets use Spanish
//! day-first dates and decimal commas, with two header rows before data.

use crate::registry::{IngesterSpec, Sheet, Source};
use ecomon_common::db::Periodicity::Daily;

const QUOTATIONS: &str = "bcu_cotizaciones.xlsx";
const MONETARY: &str = "bcu_indicadores_monetarios.xlsx";

pub fn specs() -> Vec<IngesterSpec> {
    vec![
        // Interbank USD closing rate; silent days carry the last quote
        IngesterSpec::new("tc_usd_uy", 21, 858, Daily, Source::StagedFile(QUOTATIONS))
            .sheet(Sheet::Name("Dolar"))
            .skip(2)
            .cols(0, 3)
            .day_first()
            .decimal_comma()
            .fill_business_days(),
        // Unidad Indexada, published for every calendar day; weekends drop
        IngesterSpec::new("ui_uy", 22, 858, Daily, Source::StagedFile(QUOTATIONS))
            .sheet(Sheet::Name("UI"))
            .skip(2)
            .cols(0, 1)
            .day_first()
            .decimal_comma()
            .fill_business_days(),
        IngesterSpec::new("call_uy", 31, 858, Daily, Source::StagedFile(MONETARY))
            .sheet(Sheet::Name("Call"))
            .skip(3)
            .cols(0, 2)
            .day_first()
            .decimal_comma()
            .fill_business_days(),
        // Republica AFAP sovereign spread index, basis points
        IngesterSpec::new("ubi_uy", 32, 858, Daily, Source::StagedFile("bcu_ubi.xlsx"))
            .skip(1)
            .cols(0, 1)
            .day_first()
            .fill_business_days(),
        IngesterSpec::new("reserves_uy", 63, 858, Daily, Source::StagedFile(MONETARY))
            .sheet(Sheet::Name("Activos de Reserva"))
            .skip(3)
            .cols(0, 1)
            .day_first()
            .decimal_comma()
            .fill_business_days(),
    ]
}
