use crate::{Config, cast_default};
use std::{future::Future, sync::Arc};
use tank_serverless_core::{Result, RowLabeled, Value};
use thiserror::Error;

/// Field decoding hook handed to the client for every query: `(type_tag, raw_value) -> value`.
pub type Cast<'a> = &'a (dyn Fn(&str, Option<&str>) -> Result<Value> + Send + Sync);

/// SQL level failure reported by the execution service.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ServiceError {
    pub message: String,
    /// Service specific error code, when provided.
    pub code: Option<String>,
    /// HTTP status of the failed request, when provided.
    pub status: Option<u16>,
}

impl ServiceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            status: None,
        }
    }
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }
}

/// Raw answer of the execution service to one statement.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct ClientResponse {
    /// Rows already decoded field by field through the cast hook.
    pub rows: Vec<RowLabeled>,
    pub rows_affected: Option<i64>,
    /// Older client versions report failures here instead of returning `Err`.
    pub error: Option<ServiceError>,
}

/// One handle of the remote SQL execution client.
///
/// Handles connect lazily: building one never performs network I/O.
pub trait Client: Send + Sized {
    fn connect(config: Arc<Config>) -> Self;

    fn execute(
        &mut self,
        sql: &str,
        parameters: Vec<Value>,
        cast: Cast<'_>,
    ) -> impl Future<Output = Result<ClientResponse>> + Send;

    /// The decoding rule the client library applies when no override is given.
    fn cast(type_tag: &str, value: Option<&str>) -> Result<Value> {
        cast_default(type_tag, value)
    }
}
