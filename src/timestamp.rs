//! Wire format for transaction and window timestamps.
//!
//! Timestamps are second-precision `NaiveDateTime` values written as
//! `yyyy-MM-dd HH:mm:ss`. No timezone is attached; every timestamp in a
//! request is assumed to share the same reference.
//!
//! Parsing is strict: padding, short fields and stray whitespace are
//! rejected, so a timestamp is accepted only in its canonical form.
//!
//! Use with `#[serde(with = "crate::timestamp")]`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serializer};
use thiserror::Error;

/// The `strftime` pattern used on the wire.
pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Why a timestamp was rejected.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TimestampError {
    #[error("invalid timestamp: {0}")]
    Malformed(#[from] chrono::ParseError),

    /// Readable by chrono but not written in the wire format.
    #[error("timestamp {0:?} is not in yyyy-MM-dd HH:mm:ss form")]
    NotCanonical(String),
}

/// Parses a wire-format timestamp.
pub fn parse(value: &str) -> Result<NaiveDateTime, TimestampError> {
    // chrono skips whitespace before numeric fields and accepts short fields.
    let ts = NaiveDateTime::parse_from_str(value, FORMAT)?;
    if ts.format(FORMAT).to_string() != value {
        return Err(TimestampError::NotCanonical(value.to_string()));
    }
    Ok(ts)
}

pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&value.format(FORMAT))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse(&s).map_err(serde::de::Error::custom)
}
