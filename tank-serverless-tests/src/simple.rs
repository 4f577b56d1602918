use crate::{MockResponse, MockServer};
use rust_decimal::Decimal;
use std::str::FromStr;
use tank_serverless::{CompiledQuery, Connection, Driver, Value};
use time::macros::datetime;

pub async fn simple<D: Driver>(driver: &D, server: &MockServer) {
    let mut connection = driver
        .create_connection()
        .await
        .expect("Could not create a connection");
    server.clear_journal();

    // Select
    server.respond(MockResponse::rows(
        [
            ("id", "BIGINT"),
            ("name", "VARCHAR"),
            ("price", "DECIMAL(10,2)"),
            ("created", "DATETIME"),
            ("deleted", "TIMESTAMP"),
        ],
        [
            vec![
                Some("1"),
                Some("first"),
                Some("10.50"),
                Some("2024-01-15 10:30:00.000"),
                None,
            ],
            vec![
                Some("2"),
                None,
                Some("0.01"),
                Some("2024-02-29T23:59:59.123456"),
                Some("2024-03-01 00:00:00"),
            ],
        ],
    ));
    let result = connection
        .execute(CompiledQuery::new(
            "SELECT id, name, price, created, deleted FROM item WHERE created > ?",
            vec![datetime!(2024-01-01 00:00:00).into()],
        ))
        .await
        .expect("Failed to select the items");
    assert_eq!(result.rows.len(), 2);
    assert_eq!(result.rows_affected, None);
    let first = &result.rows[0];
    assert_eq!(first.names(), ["id", "name", "price", "created", "deleted"]);
    assert_eq!(first.get_column("id"), Some(&Value::Int64(Some(1))));
    assert_eq!(first.get_column("name"), Some(&Value::Varchar(Some("first".into()))));
    assert_eq!(
        first.get_column("price"),
        Some(&Value::Decimal(Some(Decimal::from_str("10.50").unwrap())))
    );
    assert_eq!(
        first.get_column("created"),
        Some(&Value::Timestamp(Some(datetime!(2024-01-15 10:30:00))))
    );
    assert_eq!(first.get_column("deleted"), Some(&Value::Null));
    let second = &result.rows[1];
    assert_eq!(second.get_column("name"), Some(&Value::Null));
    assert_eq!(
        second.get_column("created"),
        Some(&Value::Timestamp(Some(datetime!(2024-02-29 23:59:59.123456))))
    );
    assert_eq!(
        second.get_column("deleted"),
        Some(&Value::Timestamp(Some(datetime!(2024-03-01 00:00:00))))
    );
    let journal = server.journal();
    assert_eq!(journal.len(), 1);
    assert_eq!(
        journal[0].parameters,
        [Value::Varchar(Some("2024-01-01 00:00:00.000".into()))]
    );

    // Insert
    server.respond(MockResponse::affected(3));
    let result = connection
        .execute(CompiledQuery::new(
            "INSERT INTO item (name, price) VALUES (?, ?), (?, ?), (?, ?)",
            vec![
                "a".into(),
                1_i64.into(),
                "b".into(),
                2_i64.into(),
                "c".into(),
                Value::Int64(None),
            ],
        ))
        .await
        .expect("Failed to insert the items");
    assert!(result.rows.is_empty());
    assert_eq!(result.rows_affected, Some(3));
    assert_eq!(
        server.journal()[1].parameters,
        [
            Value::Varchar(Some("a".into())),
            Value::Int64(Some(1)),
            Value::Varchar(Some("b".into())),
            Value::Int64(Some(2)),
            Value::Varchar(Some("c".into())),
            Value::Int64(None),
        ]
    );

    driver
        .release_connection(connection)
        .await
        .expect("Failed to release the connection");
}
