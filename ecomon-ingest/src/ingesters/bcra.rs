//! Argentina: central bank FX and the INDEC consumer price index

use crate::registry::{IngesterSpec, Source};
use ecomon_common::db::Periodicity::{Daily, Monthly};

pub fn specs() -> Vec<IngesterSpec> {
    vec![
        IngesterSpec::new(
            "tc_ars",
            21,
            32,
            Daily,
            Source::Url {
                url: "https://www.bcra.gob.ar/Pdfs/PublicacionesEstadisticas/com3500.xls",
                fallback: Some("bcra_com3500.xls"),
            },
        )
        .skip(3)
        .cols(0, 2)
        .day_first()
        .decimal_comma()
        .fill_business_days(),
        IngesterSpec::new("ipc_ar", 11, 32, Monthly, Source::StagedFile("indec_ipc.xlsx"))
            .skip(5)
            .cols(0, 1)
            .day_first()
            .decimal_comma(),
        // JP Morgan EMBI spread for Argentina, daily close
        IngesterSpec::new("embi_ar", 32, 32, Daily, Source::StagedFile("embi_ar.csv"))
            .skip(1)
            .cols(0, 1)
            .fill_business_days(),
    ]
}
