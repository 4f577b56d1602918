mod connection;
mod driver;
mod error;
mod query;
mod util;
mod value;

pub use ::anyhow::Context as ErrorContext;
pub use connection::*;
pub use driver::*;
pub use error::*;
pub use query::*;
pub use util::*;
pub use value::*;
pub mod stream {
    pub use ::futures::stream::*;
}
pub use ::futures::future;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
