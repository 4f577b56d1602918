use crate::{Client, base_type};
use tank_serverless_core::{Error, Result, Value};
use time::{
    OffsetDateTime, PrimitiveDateTime, UtcOffset, format_description::BorrowedFormatItem,
    macros::format_description,
};

const DATE_TIME: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second][optional [.[subsecond]]]");
const DATE_TIME_OFFSET: &[BorrowedFormatItem<'_>] = format_description!(
    "[year]-[month]-[day] [hour]:[minute]:[second][optional [.[subsecond]]][offset_hour sign:mandatory]:[offset_minute]"
);
const DATE_TIME_MILLIS: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3]");
const DATE_TIME_MICROS: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:6]");

/// Decode one field received from the service.
///
/// Non empty `DATETIME` and `TIMESTAMP` fields are parsed here, everything else goes
/// through the client library rule [`Client::cast`]. A timestamp that does not parse
/// (like the zero date `0000-00-00 00:00:00`) is left to the client rule as well.
pub fn decode<C: Client>(type_tag: &str, value: Option<&str>) -> Result<Value> {
    match (base_type(type_tag).as_str(), value) {
        ("DATETIME" | "TIMESTAMP", Some(raw)) if !raw.trim().is_empty() => {
            parse_date_time(raw).or_else(|e| {
                log::debug!("Keeping `{}` as returned by the client: {:#}", raw, e);
                C::cast(type_tag, value)
            })
        }
        _ => C::cast(type_tag, value),
    }
}

/// Parse an ISO 8601 flavored timestamp, either `T` or a space separating date and time.
///
/// Values without a zone marker become `Value::Timestamp`, those carrying `Z` or an
/// offset become `Value::TimestampWithTimezone`.
pub fn parse_date_time(value: &str) -> Result<Value> {
    let mut value = value.trim().to_owned();
    if value.get(10..11).is_some_and(|v| v.eq_ignore_ascii_case("T")) {
        value.replace_range(10..11, " ");
    }
    if let Some(naive) = value.strip_suffix(|c: char| c.eq_ignore_ascii_case(&'Z')) {
        return Ok(Value::TimestampWithTimezone(Some(
            PrimitiveDateTime::parse(naive, DATE_TIME)
                .map_err(|e| Error::msg(e.to_string()))?
                .assume_utc(),
        )));
    }
    match PrimitiveDateTime::parse(&value, DATE_TIME) {
        Ok(v) => Ok(Value::Timestamp(Some(v))),
        Err(e) => OffsetDateTime::parse(&value, DATE_TIME_OFFSET)
            .map(|v| Value::TimestampWithTimezone(Some(v)))
            .map_err(|_| Error::msg(e.to_string())),
    }
}

/// Render a timestamp the way the service expects it inside SQL: `YYYY-MM-DD HH:MM:SS.fff`,
/// with six fractional digits when the value has sub millisecond precision.
pub fn format_date_time(value: PrimitiveDateTime) -> Result<String> {
    let format = if value.microsecond() % 1_000 == 0 {
        DATE_TIME_MILLIS
    } else {
        DATE_TIME_MICROS
    };
    Ok(value.format(format)?)
}

/// Encode one outgoing parameter.
///
/// Timestamps are converted to UTC and rendered with [`format_date_time`], this is the ISO 8601
/// representation with `T` replaced by a space and without the trailing `Z`. Every other value
/// is returned unchanged.
pub fn encode(value: Value) -> Result<Value> {
    Ok(match value {
        Value::Timestamp(Some(v)) => Value::Varchar(Some(format_date_time(v)?)),
        Value::TimestampWithTimezone(Some(v)) => {
            let v = v.to_offset(UtcOffset::UTC);
            Value::Varchar(Some(format_date_time(PrimitiveDateTime::new(
                v.date(),
                v.time(),
            ))?))
        }
        v => v,
    })
}
