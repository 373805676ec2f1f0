// Zabbix encodes most numbers as JSON strings ("num": "60"); accept either form.

use serde::de::Error;
use serde::{Deserialize, Deserializer};

use super::ValueKind;

#[derive(Deserialize)]
#[serde(untagged)]
enum StrOrNum {
    Str(String),
    Num(serde_json::Number),
}

/// Raw textual value, kept unparsed for the unit normalizer.
pub(crate) fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match StrOrNum::deserialize(d)? {
        StrOrNum::Str(s) => s,
        StrOrNum::Num(n) => n.to_string(),
    })
}

pub(crate) fn unsigned<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    match StrOrNum::deserialize(d)? {
        StrOrNum::Str(s) => s.trim().parse().map_err(D::Error::custom),
        StrOrNum::Num(n) => n
            .as_u64()
            .ok_or_else(|| D::Error::custom(format!("expected unsigned integer, got {}", n))),
    }
}

pub(crate) fn signed<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    match StrOrNum::deserialize(d)? {
        StrOrNum::Str(s) => s.trim().parse().map_err(D::Error::custom),
        StrOrNum::Num(n) => n
            .as_i64()
            .ok_or_else(|| D::Error::custom(format!("expected integer, got {}", n))),
    }
}

pub(crate) fn value_kind<'de, D: Deserializer<'de>>(d: D) -> Result<ValueKind, D::Error> {
    unsigned(d).map(ValueKind::from_value_type)
}
