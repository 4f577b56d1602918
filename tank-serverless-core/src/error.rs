use thiserror::Error;

/// Failures raised by a driver itself rather than by the database service.
///
/// These travel inside [`crate::Error`] and can be recovered with `downcast_ref`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DriverError {
    #[error("No transaction is open on this connection")]
    NoTransaction,

    #[error("{operation} is not supported by {driver}")]
    Unsupported {
        operation: &'static str,
        driver: &'static str,
    },

    #[error("Could not decode `{value}` as a value of type {type_tag}")]
    Decode { type_tag: String, value: String },

    #[error("The service reported an invalid affected rows count: {0}")]
    InvalidRowsAffected(i64),
}
