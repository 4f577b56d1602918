use rust_decimal::Decimal;
use std::{fmt::Display, str::FromStr};
use tank_serverless_core::{DriverError, Error, Result, Value, truncate_long};
use time::{Date, Time, format_description::BorrowedFormatItem, macros::format_description};

const DATE: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");
const TIME: &[BorrowedFormatItem<'_>] =
    format_description!("[hour]:[minute]:[second][optional [.[subsecond]]]");

/// Upper case base name of a column type, `"decimal(10,2) unsigned"` becomes `"DECIMAL"`.
pub fn base_type(type_tag: &str) -> String {
    type_tag
        .split(|c: char| c == '(' || c.is_whitespace())
        .find(|v| !v.is_empty() && !v.eq_ignore_ascii_case("UNSIGNED"))
        .unwrap_or_default()
        .to_ascii_uppercase()
}

fn is_unsigned(type_tag: &str) -> bool {
    type_tag
        .split(|c: char| c == '(' || c == ')' || c.is_whitespace())
        .any(|v| v.eq_ignore_ascii_case("UNSIGNED"))
}

fn decode_error(type_tag: &str, value: &str, error: impl Display) -> Error {
    Error::msg(error.to_string()).context(DriverError::Decode {
        type_tag: type_tag.into(),
        value: truncate_long!(value).to_string(),
    })
}

/// Decoding rule of the execution client library, used for every column the driver
/// does not handle itself.
///
/// Integer types become `Int64` (`UInt64` when unsigned), binary types `Blob`, `JSON`
/// is parsed, unknown types are kept as `Varchar`. A null raw value is always `Value::Null`.
pub fn cast_default(type_tag: &str, value: Option<&str>) -> Result<Value> {
    let Some(value) = value else {
        return Ok(Value::Null);
    };
    let fail = |e: &dyn Display| decode_error(type_tag, value, e);
    Ok(match base_type(type_tag).as_str() {
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "INTEGER" | "BIGINT" | "YEAR" => {
            let value = value.trim();
            if is_unsigned(type_tag) {
                Value::UInt64(Some(value.parse::<u64>().map_err(|e| fail(&e))?))
            } else {
                Value::Int64(Some(value.parse::<i64>().map_err(|e| fail(&e))?))
            }
        }
        "FLOAT" | "DOUBLE" | "REAL" => {
            Value::Float64(Some(value.trim().parse::<f64>().map_err(|e| fail(&e))?))
        }
        "DECIMAL" | "NUMERIC" => Value::Decimal(Some(
            Decimal::from_str(value.trim())
                .or_else(|_| Decimal::from_scientific(value.trim()))
                .map_err(|e| fail(&e))?,
        )),
        "BOOL" | "BOOLEAN" => Value::Boolean(Some(match value.trim() {
            "1" => true,
            "0" => false,
            v if v.eq_ignore_ascii_case("true") => true,
            v if v.eq_ignore_ascii_case("false") => false,
            _ => return Err(fail(&"Expected a boolean")),
        })),
        "BIT" | "BINARY" | "VARBINARY" | "BLOB" | "TINYBLOB" | "MEDIUMBLOB" | "LONGBLOB" => {
            Value::Blob(Some(value.as_bytes().into()))
        }
        "JSON" => Value::Json(Some(serde_json::from_str(value).map_err(|e| fail(&e))?)),
        "DATE" => Value::Date(Some(Date::parse(value.trim(), DATE).map_err(|e| fail(&e))?)),
        // Durations outside of a day cannot be a `Time`, those stay textual
        "TIME" => match Time::parse(value.trim(), TIME) {
            Ok(v) => Value::Time(Some(v)),
            Err(..) => Value::Varchar(Some(value.into())),
        },
        _ => Value::Varchar(Some(value.into())),
    })
}
