use crate::{Connection, Result};
use std::future::Future;

/// Entry point the query building layer uses to obtain and manage connections.
pub trait Driver: Send + Sync {
    type Connection: Connection;

    /// Name of the backend, also the scheme of its connection URLs.
    const NAME: &'static str;

    fn init(&self) -> impl Future<Output = Result<()>> + Send;
    fn destroy(&self) -> impl Future<Output = Result<()>> + Send;

    fn create_connection(&self) -> impl Future<Output = Result<Self::Connection>> + Send;
    fn release_connection(
        &self,
        connection: Self::Connection,
    ) -> impl Future<Output = Result<()>> + Send;

    fn begin_transaction(
        &self,
        connection: &mut Self::Connection,
    ) -> impl Future<Output = Result<()>> + Send;
    fn commit_transaction(
        &self,
        connection: &mut Self::Connection,
    ) -> impl Future<Output = Result<()>> + Send;
    fn rollback_transaction(
        &self,
        connection: &mut Self::Connection,
    ) -> impl Future<Output = Result<()>> + Send;
}
