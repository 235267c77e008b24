//! Ingester records, grouped by source family
//!
//! Each module declares the series published by one institution. Adding a
//! series means adding one record here and one master row to the canonical
//! catalog workbook; the pipeline itself never changes.

pub mod bcb;
pub mod bcra;
pub mod bcu;
pub mod commodities;
pub mod fred;
pub mod historical;
pub mod inac;
pub mod ine;
pub mod trade;

use crate::registry::IngesterSpec;

/// Every declared ingester, in source-family order.
pub fn all() -> Vec<IngesterSpec> {
    let mut specs = Vec::new();
    specs.extend(bcu::specs());
    specs.extend(ine::specs());
    specs.extend(trade::specs());
    specs.extend(inac::specs());
    specs.extend(bcra::specs());
    specs.extend(bcb::specs());
    specs.extend(fred::specs());
    specs.extend(commodities::specs());
    specs.extend(historical::specs());
    specs
}
