//! Instituto Nacional de Estadistica: monthly indices for Uruguay
//!
//! INE publishes one workbook per index with a generous preamble (title,
//! base period, methodology notes) before the data block. Dates arrive as
//! mid-month strings or Excel serials; normalization snaps them to the
//! first of the month.

use crate::registry::{IngesterSpec, Sheet, Source};
use ecomon_common::db::Periodicity::Monthly;

pub fn specs() -> Vec<IngesterSpec> {
    vec![
        IngesterSpec::new("ipc_uy", 11, 858, Monthly, Source::StagedFile("ine_ipc.xlsx"))
            .skip(6)
            .cols(0, 1)
            .day_first()
            .decimal_comma(),
        IngesterSpec::new("ippi_uy", 12, 858, Monthly, Source::StagedFile("ine_ippi.xlsx"))
            .skip(6)
            .cols(0, 1)
            .day_first()
            .decimal_comma(),
        // Physical volume index of manufacturing, three transformation states
        // from the same workbook
        IngesterSpec::new("ivf_uy", 41, 858, Monthly, Source::StagedFile("ine_ivf.xlsx"))
            .sheet(Sheet::Name("IVF"))
            .skip(4)
            .cols(0, 1)
            .day_first()
            .decimal_comma(),
        IngesterSpec::new("ivf_uy_sa", 41, 858, Monthly, Source::StagedFile("ine_ivf.xlsx"))
            .sheet(Sheet::Name("IVF"))
            .skip(4)
            .cols(0, 2)
            .day_first()
            .decimal_comma()
            .seasonally_adjusted(),
        IngesterSpec::new("ivf_uy_tc", 41, 858, Monthly, Source::StagedFile("ine_ivf.xlsx"))
            .sheet(Sheet::Name("IVF"))
            .skip(4)
            .cols(0, 3)
            .day_first()
            .decimal_comma()
            .trend_cycle(),
        IngesterSpec::new(
            "unemployment_uy",
            51,
            858,
            Monthly,
            Source::StagedFile("ine_ech_actividad.xlsx"),
        )
        .sheet(Sheet::Name("Desempleo"))
        .skip(5)
        .cols(0, 1)
        .day_first()
        .decimal_comma(),
        IngesterSpec::new(
            "employment_uy",
            52,
            858,
            Monthly,
            Source::StagedFile("ine_ech_actividad.xlsx"),
        )
        .sheet(Sheet::Name("Empleo"))
        .skip(5)
        .cols(0, 1)
        .day_first()
        .decimal_comma(),
        IngesterSpec::new("wages_uy", 53, 858, Monthly, Source::StagedFile("ine_ims.xlsx"))
            .skip(6)
            .cols(0, 2)
            .day_first()
            .decimal_comma(),
    ]
}
