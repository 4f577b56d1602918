mod mock;
mod simple;
mod streaming;
mod transaction1;

pub use mock::*;

use crate::{simple::simple, streaming::streaming, transaction1::transaction1};
use log::LevelFilter;
use std::env;
use tank_serverless::Driver;

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

/// Run the shared driver checks against `driver`, whose connections must reach `server`.
pub async fn execute_tests<D: Driver>(driver: &D, server: &MockServer) {
    driver.init().await.expect("Could not initialize the driver");
    simple(driver, server).await;
    transaction1(driver, server).await;
    streaming(driver).await;
    driver.destroy().await.expect("Could not destroy the driver");
}

#[macro_export]
macro_rules! silent_logs {
    ($($code:tt)+) => {{
        let level = log::max_level();
        log::set_max_level(log::LevelFilter::Off);
        $($code)+
        log::set_max_level(level);
    }};
}
