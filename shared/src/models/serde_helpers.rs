//! Common serde helpers for backend rows
//!
//! 后端列类型不固定：id 可能是 bigint 也可能是 uuid/text，金额列可能为 null。

use serde::{Deserialize, Deserializer};

/// Deserialize i64 that treats null as 0
pub fn null_as_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or(0))
}

/// Deserialize an id column that may be a number or a string
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Int(n) => n.to_string(),
    })
}
