mod cast;
mod client;
mod codec;
mod config;
mod connection;
mod driver;

pub use cast::*;
pub use client::*;
pub use codec::*;
pub use config::*;
pub use connection::*;
pub use driver::*;
pub use tank_serverless_core::*;
