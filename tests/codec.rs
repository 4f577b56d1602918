#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use std::{str::FromStr, sync::Arc};
    use tank_serverless::{
        Cast, Client, ClientResponse, Config, DriverError, Result, Value, base_type,
        cast_default, decode, encode, format_date_time, parse_date_time,
    };
    use tank_serverless_tests::MockClient;
    use time::{
        Date, Month, PrimitiveDateTime, Time,
        macros::{date, datetime, time},
    };

    /// Client whose library rule keeps every field as upper case text.
    struct ShoutingClient;

    impl Client for ShoutingClient {
        fn connect(_config: Arc<Config>) -> Self {
            ShoutingClient
        }
        async fn execute(
            &mut self,
            _sql: &str,
            _parameters: Vec<Value>,
            _cast: Cast<'_>,
        ) -> Result<ClientResponse> {
            Ok(ClientResponse::default())
        }
        fn cast(_type_tag: &str, value: Option<&str>) -> Result<Value> {
            Ok(Value::Varchar(value.map(str::to_uppercase)))
        }
    }

    #[test]
    fn type_names() {
        assert_eq!(base_type("DATETIME"), "DATETIME");
        assert_eq!(base_type("timestamp(3)"), "TIMESTAMP");
        assert_eq!(base_type("decimal(10,2) unsigned"), "DECIMAL");
        assert_eq!(base_type("UNSIGNED BIGINT"), "BIGINT");
        assert_eq!(base_type(""), "");
    }

    #[test]
    fn cast_integers() {
        assert_eq!(cast_default("INT", Some("-42")).unwrap(), Value::Int64(Some(-42)));
        assert_eq!(
            cast_default("BIGINT", Some("9223372036854775807")).unwrap(),
            Value::Int64(Some(i64::MAX))
        );
        assert_eq!(
            cast_default("BIGINT UNSIGNED", Some("18446744073709551615")).unwrap(),
            Value::UInt64(Some(u64::MAX))
        );
        assert_eq!(cast_default("YEAR", Some("2024")).unwrap(), Value::Int64(Some(2024)));
        let error = cast_default("INT", Some("forty-two")).expect_err("Not an integer");
        assert_eq!(
            error.downcast_ref::<DriverError>(),
            Some(&DriverError::Decode {
                type_tag: "INT".into(),
                value: "forty-two".into()
            })
        );
    }

    #[test]
    fn cast_numbers() {
        assert_eq!(cast_default("DOUBLE", Some("0.5")).unwrap(), Value::Float64(Some(0.5)));
        assert_eq!(
            cast_default("DECIMAL(10,2)", Some("1234.56")).unwrap(),
            Value::Decimal(Some(Decimal::from_str("1234.56").unwrap()))
        );
        assert_eq!(
            cast_default("NUMERIC", Some("1e3")).unwrap(),
            Value::Decimal(Some(Decimal::from(1000)))
        );
        assert!(cast_default("DECIMAL", Some("1,5")).is_err());
    }

    #[test]
    fn cast_others() {
        assert_eq!(cast_default("BOOLEAN", Some("1")).unwrap(), Value::Boolean(Some(true)));
        assert_eq!(cast_default("BOOL", Some("false")).unwrap(), Value::Boolean(Some(false)));
        assert!(cast_default("BOOL", Some("maybe")).is_err());
        assert_eq!(
            cast_default("VARBINARY", Some("\u{1}\u{2}")).unwrap(),
            Value::Blob(Some([1, 2].into()))
        );
        assert_eq!(
            cast_default("JSON", Some(r#"{"a":[1,2]}"#)).unwrap(),
            Value::Json(Some(serde_json::json!({"a": [1, 2]})))
        );
        assert!(cast_default("JSON", Some("{")).is_err());
        assert_eq!(
            cast_default("DATE", Some("2024-02-29")).unwrap(),
            Value::Date(Some(date!(2024 - 02 - 29)))
        );
        assert_eq!(
            cast_default("TIME", Some("12:00:10.5")).unwrap(),
            Value::Time(Some(time!(12:00:10.5)))
        );
        assert_eq!(
            cast_default("TIME", Some("-838:59:59")).unwrap(),
            Value::Varchar(Some("-838:59:59".into()))
        );
        assert_eq!(
            cast_default("VARCHAR(255)", Some(" padded ")).unwrap(),
            Value::Varchar(Some(" padded ".into()))
        );
        assert_eq!(cast_default("ENUM", Some("a")).unwrap(), Value::Varchar(Some("a".into())));
    }

    #[test]
    fn cast_nulls() {
        for type_tag in ["INT", "DECIMAL", "JSON", "DATE", "DATETIME", "BLOB", "WHATEVER"] {
            assert_eq!(cast_default(type_tag, None).unwrap(), Value::Null);
            assert_eq!(decode::<MockClient>(type_tag, None).unwrap(), Value::Null);
        }
    }

    #[test]
    fn parse_date_times() {
        assert_eq!(
            parse_date_time("2024-01-15 10:30:00").unwrap(),
            Value::Timestamp(Some(datetime!(2024-01-15 10:30:00)))
        );
        assert_eq!(
            parse_date_time("2024-01-15T10:30:00.123").unwrap(),
            Value::Timestamp(Some(datetime!(2024-01-15 10:30:00.123)))
        );
        assert_eq!(
            parse_date_time("2024-01-15T10:30:00.000Z").unwrap(),
            Value::TimestampWithTimezone(Some(datetime!(2024-01-15 10:30:00 UTC)))
        );
        assert_eq!(
            parse_date_time("2024-01-15 10:30:00-05:30").unwrap(),
            Value::TimestampWithTimezone(Some(datetime!(2024-01-15 16:00:00 UTC)))
        );
        assert!(parse_date_time("2024-01-15").is_err());
        assert!(parse_date_time("15/01/2024 10:30").is_err());
        assert!(parse_date_time("2024-13-01 00:00:00").is_err());
        let message = format!("{:#}", parse_date_time("0000-00-00 00:00:00").unwrap_err());
        assert_eq!(message.matches("could not be parsed").count(), 1, "{}", message);
    }

    #[test]
    fn decode_delegates_to_the_client() {
        assert_eq!(
            decode::<ShoutingClient>("VARCHAR", Some("hello")).unwrap(),
            Value::Varchar(Some("HELLO".into()))
        );
        assert_eq!(
            decode::<ShoutingClient>("DATETIME", Some("2024-01-15 10:30:00")).unwrap(),
            Value::Timestamp(Some(datetime!(2024-01-15 10:30:00)))
        );
        assert_eq!(
            decode::<ShoutingClient>("DATETIME", None).unwrap(),
            Value::Varchar(None)
        );
        assert_eq!(
            decode::<MockClient>("INT", Some("7")).unwrap(),
            Value::Int64(Some(7))
        );
        assert_eq!(
            decode::<MockClient>("TIMESTAMP", Some("soon")).unwrap(),
            Value::Varchar(Some("soon".into()))
        );
        assert_eq!(
            decode::<MockClient>("DATETIME", Some("0000-00-00 00:00:00")).unwrap(),
            Value::Varchar(Some("0000-00-00 00:00:00".into()))
        );
        assert_eq!(
            decode::<ShoutingClient>("DATETIME", Some("")).unwrap(),
            Value::Varchar(Some("".into()))
        );
    }

    #[test]
    fn format_date_times() {
        assert_eq!(
            format_date_time(datetime!(2024-01-15 10:30:00)).unwrap(),
            "2024-01-15 10:30:00.000"
        );
        assert_eq!(
            format_date_time(datetime!(2024-01-15 10:30:00.1)).unwrap(),
            "2024-01-15 10:30:00.100"
        );
        assert_eq!(
            format_date_time(datetime!(2024-01-15 10:30:00.123456789)).unwrap(),
            "2024-01-15 10:30:00.123456"
        );
        assert_eq!(
            format_date_time(PrimitiveDateTime::new(
                Date::from_calendar_date(999, Month::January, 1).unwrap(),
                Time::MIDNIGHT
            ))
            .unwrap(),
            "0999-01-01 00:00:00.000"
        );
    }

    #[test]
    fn encode_values() {
        assert_eq!(
            encode(datetime!(2024-01-15 10:30:00).into()).unwrap(),
            Value::Varchar(Some("2024-01-15 10:30:00.000".into()))
        );
        assert_eq!(
            encode(datetime!(2024-01-15 00:30:00 +01:00).into()).unwrap(),
            Value::Varchar(Some("2024-01-14 23:30:00.000".into()))
        );
        assert_eq!(encode(Value::Timestamp(None)).unwrap(), Value::Timestamp(None));
        assert_eq!(encode(Value::Null).unwrap(), Value::Null);
        assert_eq!(encode(42_i64.into()).unwrap(), Value::Int64(Some(42)));
        assert_eq!(
            encode(date!(2024 - 01 - 15).into()).unwrap(),
            Value::Date(Some(date!(2024 - 01 - 15)))
        );
        assert_eq!(
            encode("2024-01-15T10:30:00Z".into()).unwrap(),
            Value::Varchar(Some("2024-01-15T10:30:00Z".into()))
        );
    }
}
