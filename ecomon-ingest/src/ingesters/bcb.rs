//! Brazil: central bank FX, Selic, IPCA, and the EMBI spread

use crate::registry::{IngesterSpec, Source};
use ecomon_common::db::Periodicity::{Daily, Monthly};

pub fn specs() -> Vec<IngesterSpec> {
    vec![
        IngesterSpec::new(
            "tc_brl",
            21,
            76,
            Daily,
            Source::Url {
                url: "https://ptax.bcb.gov.br/ptax_internet/consultaBoletim.do?method=gerarCSV",
                fallback: Some("bcb_ptax.csv"),
            },
        )
        .skip(1)
        .cols(0, 4)
        .day_first()
        .decimal_comma()
        .fill_business_days(),
        IngesterSpec::new(
            "selic_br",
            33,
            76,
            Daily,
            Source::Url {
                url: "https://api.bcb.gov.br/dados/serie/bcdata.sgs.11/dados?formato=csv",
                fallback: Some("bcb_selic.csv"),
            },
        )
        .skip(1)
        .cols(0, 1)
        .day_first()
        .decimal_comma()
        .fill_business_days(),
        IngesterSpec::new("ipc_br", 11, 76, Monthly, Source::StagedFile("ibge_ipca.xlsx"))
            .skip(4)
            .cols(0, 1)
            .day_first()
            .decimal_comma(),
        IngesterSpec::new("embi_br", 32, 76, Daily, Source::StagedFile("embi_br.csv"))
            .skip(1)
            .cols(0, 1)
            .fill_business_days(),
    ]
}
