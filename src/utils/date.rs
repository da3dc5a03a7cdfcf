use time::macros::format_description;
use time::{Date, PrimitiveDateTime, Time};

use crate::error::GraphDexError;

/// Parses a user-supplied time filter into a Unix timestamp.
///
/// Accepts an integer timestamp, `YYYY-MM-DD` (midnight UTC), or
/// `YYYY-MM-DD[T| ]HH:MM:SS` (UTC).
pub(crate) fn parse_timestamp(value: &str) -> Result<i64, GraphDexError> {
    let v = value.trim();

    if let Ok(ts) = v.parse::<i64>() {
        return Ok(ts);
    }

    let date_only = format_description!("[year]-[month]-[day]");
    if let Ok(date) = Date::parse(v, &date_only) {
        return Ok(date.with_time(Time::MIDNIGHT).assume_utc().unix_timestamp());
    }

    let datetime_t = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
    if let Ok(dt) = PrimitiveDateTime::parse(v, &datetime_t) {
        return Ok(dt.assume_utc().unix_timestamp());
    }

    let datetime_space = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    if let Ok(dt) = PrimitiveDateTime::parse(v, &datetime_space) {
        return Ok(dt.assume_utc().unix_timestamp());
    }

    Err(GraphDexError::InvalidArgument(format!(
        "Cannot parse time '{v}'. Use a Unix timestamp, YYYY-MM-DD, or YYYY-MM-DDTHH:MM:SS"
    )))
}
