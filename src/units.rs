// Unit normalization: raw wire text -> display units (GiB for memory sizes).

use crate::metric_kind::UnitClass;

pub const BYTES_PER_GIB: f64 = 1_073_741_824.0;

/// Parse a raw value; unparsable input becomes 0.0 so one bad value never fails a run.
pub fn parse_or_zero(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(0.0)
}

/// Scale an already parsed value for its unit class.
pub fn scale(value: f64, unit: UnitClass) -> f64 {
    match unit {
        UnitClass::Bytes => value / BYTES_PER_GIB,
        UnitClass::Percent | UnitClass::Plain => value,
    }
}

pub fn normalize_with(raw: &str, unit: UnitClass) -> f64 {
    scale(parse_or_zero(raw), unit)
}

/// Normalize a raw value of the item identified by `item_key`.
pub fn normalize(raw: &str, item_key: &str) -> f64 {
    normalize_with(raw, UnitClass::classify(item_key))
}

pub fn display_unit(item_key: &str) -> &'static str {
    UnitClass::classify(item_key).label()
}

/// Two decimals for every unit so columns line up.
pub fn format_value(value: f64) -> String {
    format!("{:.2}", value)
}
