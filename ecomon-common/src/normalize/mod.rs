//! Normalization library
//!
//! Shared routines every ingester depends on: date parsing and validation,
//! locale-aware numeric coercion, monthly first-of-month snapping, and
//! business-day calendar completion for daily series. Centralizing these
//! transforms is what keeps the ingester records small and uniform.

pub mod calendar;
pub mod dates;
pub mod numeric;

pub use calendar::{fill_business_days, normalize_monthly, validate_dates};
pub use dates::{excel_serial_to_date, format_date, parse_date_str, parse_dates, DateOptions, DatePolicy};
pub use numeric::{coerce_numeric, CoerceReport, NumericOptions};
