// Trend (rollup) and history (raw) records.
// min/max/avg/value stay as wire text; the unit normalizer parses them.

use serde::Deserialize;

use super::serde_num;

/// One trend bucket (usually one hour) for an item.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RollupBucket {
    #[serde(default, deserialize_with = "serde_num::signed")]
    pub clock: i64,
    #[serde(alias = "value_min", deserialize_with = "serde_num::text")]
    pub min: String,
    #[serde(alias = "value_max", deserialize_with = "serde_num::text")]
    pub max: String,
    #[serde(alias = "value_avg", deserialize_with = "serde_num::text")]
    pub avg: String,
    /// Number of raw values folded into this bucket.
    #[serde(deserialize_with = "serde_num::unsigned")]
    pub num: u64,
}

impl RollupBucket {
    pub fn new(min: &str, max: &str, avg: &str, num: u64) -> Self {
        Self {
            clock: 0,
            min: min.to_string(),
            max: max.to_string(),
            avg: avg.to_string(),
            num,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawSample {
    #[serde(deserialize_with = "serde_num::signed")]
    pub clock: i64,
    #[serde(deserialize_with = "serde_num::text")]
    pub value: String,
}

impl RawSample {
    pub fn new(clock: i64, value: &str) -> Self {
        Self {
            clock,
            value: value.to_string(),
        }
    }
}
