use tank_serverless::{
    CompiledQuery, Connection, Driver, DriverError, StreamOptions,
    stream::{StreamExt, TryStreamExt},
};

pub async fn streaming<D: Driver>(driver: &D) {
    let mut connection = driver
        .create_connection()
        .await
        .expect("Could not create a connection");
    for high_water_mark in [0, 1, 1000] {
        let error = connection
            .stream_query(
                CompiledQuery::raw("SELECT * FROM item"),
                StreamOptions { high_water_mark },
            )
            .try_collect::<Vec<_>>()
            .await
            .expect_err("Streaming must not be supported");
        assert!(matches!(
            error.downcast_ref::<DriverError>(),
            Some(DriverError::Unsupported { .. })
        ));
    }
    let items = connection
        .stream_query("SELECT 1".into(), StreamOptions::default())
        .collect::<Vec<_>>()
        .await;
    assert_eq!(items.len(), 1);
    assert!(items[0].is_err());
}
