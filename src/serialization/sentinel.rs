/// Conversion between optional fields and the reserved "unset" values
///
/// Consumers of the published formats treat these exact values as "not yet
/// received". They appear only at the serialization boundary; in memory an
/// unset field is `None`.
use std::fmt::Display;

use time::OffsetDateTime;

use crate::utils::{format_decimal, format_utc_timestamp};

pub const FLOAT_UNSET: f64 = f64::MAX;
pub const INT_UNSET: i32 = i32::MAX;
pub const TEXT_UNSET: &str = "N/A";

/// How [`FLOAT_UNSET`] has always been rendered in the text formats.
pub const FLOAT_UNSET_TEXT: &str = "1.7976931348623157E308";

pub fn float_text(value: Option<f64>) -> String {
    value.map_or_else(|| FLOAT_UNSET_TEXT.to_string(), format_decimal)
}

pub fn int_text(value: Option<i32>) -> String {
    value.unwrap_or(INT_UNSET).to_string()
}

pub fn label_text<T: Display>(value: Option<&T>) -> String {
    value.map_or_else(|| TEXT_UNSET.to_string(), ToString::to_string)
}

pub fn timestamp_text(value: Option<&OffsetDateTime>) -> String {
    value.map_or_else(|| TEXT_UNSET.to_string(), format_utc_timestamp)
}

/// `Option<f64>` as a number, unset as `f64::MAX`.
pub mod float {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::FLOAT_UNSET;

    pub fn serialize<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.unwrap_or(FLOAT_UNSET))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        let raw = f64::deserialize(deserializer)?;
        Ok((raw != FLOAT_UNSET).then_some(raw))
    }
}

/// `Option<i32>` as a number, unset as `i32::MAX`.
pub mod int {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::INT_UNSET;

    pub fn serialize<S: Serializer>(value: &Option<i32>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(value.unwrap_or(INT_UNSET))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i32>, D::Error> {
        let raw = i32::deserialize(deserializer)?;
        Ok((raw != INT_UNSET).then_some(raw))
    }
}

/// Any `Option<T>` with a textual form, unset as `"N/A"`.
pub mod label {
    use std::fmt::Display;
    use std::str::FromStr;

    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::TEXT_UNSET;

    pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer,
    {
        match value {
            Some(value) => serializer.collect_str(value),
            None => serializer.serialize_str(TEXT_UNSET),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if raw == TEXT_UNSET {
            return Ok(None);
        }
        raw.parse().map(Some).map_err(de::Error::custom)
    }
}

/// `Option<OffsetDateTime>` as `YYYY-MM-DDTHH:MM:SS[.fff]Z`, unset as `"N/A"`.
pub mod timestamp {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use time::OffsetDateTime;

    use super::TEXT_UNSET;
    use crate::utils::{format_utc_timestamp, parse_utc_timestamp};

    pub fn serialize<S: Serializer>(
        value: &Option<OffsetDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => serializer.serialize_str(&format_utc_timestamp(value)),
            None => serializer.serialize_str(TEXT_UNSET),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<OffsetDateTime>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw == TEXT_UNSET {
            return Ok(None);
        }
        parse_utc_timestamp(&raw)
            .map(Some)
            .map_err(|e| de::Error::custom(format!("invalid timestamp {raw:?}: {e}")))
    }
}
