//! Formatters that flatten raw subgraph records into friendly output shapes.

pub(crate) mod aave;
pub(crate) mod pool;
pub(crate) mod swap;

use serde::Serializer;
use time::format_description::well_known::Rfc3339;

/// Parses a subgraph decimal string, defaulting to zero on absence or garbage.
pub(crate) fn big_decimal(value: Option<&str>) -> f64 {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(0.0)
}

/// Parses a subgraph BigInt string. Wei amounts routinely exceed `u64`, so
/// these go through `i128`.
pub(crate) fn big_int(value: Option<&str>) -> i128 {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(0)
}

pub(crate) fn unix_timestamp(value: Option<&str>) -> i64 {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(0)
}

/// RFC 3339 rendering of a Unix timestamp; zero means "missing" upstream.
pub(crate) fn rfc3339(timestamp: i64) -> Option<String> {
    if timestamp == 0 {
        return None;
    }
    time::OffsetDateTime::from_unix_timestamp(timestamp)
        .ok()?
        .format(&Rfc3339)
        .ok()
}

pub(crate) fn pair_label(symbol0: Option<&str>, symbol1: Option<&str>) -> String {
    format!("{}/{}", symbol0.unwrap_or("?"), symbol1.unwrap_or("?"))
}

/// BigInt amounts are emitted as decimal strings: JSON numbers cannot carry
/// full wei precision.
pub(crate) fn ser_big_int<S: Serializer>(value: &i128, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}
