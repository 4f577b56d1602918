use crate::{MockResponse, MockServer};
use tank_serverless::{CompiledQuery, Connection, Driver, DriverError};

pub async fn transaction1<D: Driver>(driver: &D, server: &MockServer) {
    let mut connection = driver
        .create_connection()
        .await
        .expect("Could not create a connection");
    server.clear_journal();

    // Nothing to close yet
    let error = driver
        .commit_transaction(&mut connection)
        .await
        .expect_err("Commit without a transaction must fail");
    assert_eq!(
        error.downcast_ref::<DriverError>(),
        Some(&DriverError::NoTransaction)
    );
    let error = driver
        .rollback_transaction(&mut connection)
        .await
        .expect_err("Rollback without a transaction must fail");
    assert_eq!(
        error.downcast_ref::<DriverError>(),
        Some(&DriverError::NoTransaction)
    );
    assert!(server.journal().is_empty());

    connection
        .execute("SELECT 1".into())
        .await
        .expect("Failed to run the query outside of the transaction");
    let own = server.journal()[0].handle;

    // Commit
    driver
        .begin_transaction(&mut connection)
        .await
        .expect("Could not begin a transaction");
    driver
        .begin_transaction(&mut connection)
        .await
        .expect("Could not begin the transaction a second time");
    server.respond(MockResponse::affected(1));
    let result = connection
        .execute(CompiledQuery::new(
            "UPDATE account SET balance = balance - ? WHERE id = ?",
            vec![100_i64.into(), 7_i64.into()],
        ))
        .await
        .expect("Failed to update inside the transaction");
    assert_eq!(result.rows_affected, Some(1));
    driver
        .commit_transaction(&mut connection)
        .await
        .expect("Failed to commit the transaction");
    connection
        .execute("SELECT 2".into())
        .await
        .expect("Failed to run the query after the commit");
    let journal = server.journal();
    assert_eq!(
        journal.iter().map(|v| v.sql.as_str()).collect::<Vec<_>>(),
        [
            "SELECT 1",
            "BEGIN",
            "UPDATE account SET balance = balance - ? WHERE id = ?",
            "COMMIT",
            "SELECT 2"
        ]
    );
    let transaction = journal[1].handle;
    assert_ne!(transaction, own);
    assert_eq!(journal[2].handle, transaction);
    assert_eq!(journal[3].handle, transaction);
    assert_eq!(journal[4].handle, own);

    // Rollback
    server.clear_journal();
    driver
        .begin_transaction(&mut connection)
        .await
        .expect("Could not begin a transaction");
    connection
        .execute("DELETE FROM account".into())
        .await
        .expect("Failed to delete inside the transaction");
    driver
        .rollback_transaction(&mut connection)
        .await
        .expect("Failed to roll back the transaction");
    driver
        .rollback_transaction(&mut connection)
        .await
        .expect_err("The transaction was already rolled back");
    let journal = server.journal();
    assert_eq!(
        journal.iter().map(|v| v.sql.as_str()).collect::<Vec<_>>(),
        ["BEGIN", "DELETE FROM account", "ROLLBACK"]
    );
    assert_ne!(journal[0].handle, own);
    assert_ne!(journal[0].handle, transaction);
    assert!(journal.iter().all(|v| v.handle == journal[0].handle));

    driver
        .release_connection(connection)
        .await
        .expect("Failed to release the connection");
}
