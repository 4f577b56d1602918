#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use tank_serverless_core::{
        CompiledQuery, DriverError, QueryResult, RowLabeled, RowNames, Value, floor_char_boundary,
    };

    #[test]
    fn compiled_query() {
        let query = CompiledQuery::new("SELECT * FROM a WHERE b = ?", vec![5_i64.into()]);
        assert_eq!(query.sql, "SELECT * FROM a WHERE b = ?");
        assert_eq!(query.parameters, [Value::Int64(Some(5))]);
        assert_eq!(CompiledQuery::from("COMMIT"), CompiledQuery::raw("COMMIT"));
        assert!(CompiledQuery::raw("BEGIN").parameters.is_empty());
        assert_eq!(query.to_string(), "SELECT * FROM a WHERE b = ?");
    }

    #[test]
    fn compiled_query_display_truncates() {
        let sql = format!("SELECT '{}'", "x".repeat(1000));
        let printed = CompiledQuery::raw(sql).to_string();
        assert!(printed.ends_with("..."));
        assert_eq!(printed.len(), 497 + 3);
        let sql = format!("SELECT '{}'", "é".repeat(400));
        let printed = CompiledQuery::raw(sql).to_string();
        assert!(printed.ends_with("..."));
        assert!(printed.len() <= 497 + 3);
    }

    #[test]
    fn char_boundary() {
        assert_eq!(floor_char_boundary("abc", 10), 3);
        assert_eq!(floor_char_boundary("abc", 1), 1);
        assert_eq!(floor_char_boundary("é", 1), 0);
        assert_eq!(floor_char_boundary("", 0), 0);
    }

    #[test]
    fn row_labeled() {
        let labels: RowNames = Arc::from(["id".to_string(), "name".to_string()]);
        let row = RowLabeled::new(
            labels.clone(),
            [Value::from(1_i64), Value::Varchar(None)].into(),
        );
        assert_eq!(row.names(), ["id", "name"]);
        assert_eq!(row.get_column("id"), Some(&Value::Int64(Some(1))));
        assert_eq!(row.get_column("name"), Some(&Value::Varchar(None)));
        assert_eq!(row.get_column("missing"), None);
        let result = QueryResult {
            rows: vec![row.clone()],
            rows_affected: None,
        };
        assert_eq!(result.rows[0], row);
        assert_eq!(QueryResult::default().rows_affected, None);
    }

    #[test]
    fn driver_errors() {
        assert_eq!(
            DriverError::NoTransaction.to_string(),
            "No transaction is open on this connection"
        );
        assert_eq!(
            DriverError::Unsupported {
                operation: "Streaming",
                driver: "serverless"
            }
            .to_string(),
            "Streaming is not supported by serverless"
        );
        assert_eq!(
            DriverError::InvalidRowsAffected(-2).to_string(),
            "The service reported an invalid affected rows count: -2"
        );
    }
}
