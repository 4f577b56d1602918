use crate::{CompiledQuery, QueryResult, Result, RowLabeled, StreamOptions, stream::Stream};
use std::future::Future;

/// A logical connection as seen by the query building layer.
///
/// Operations on one connection are expected to be awaited one after the other,
/// the `&mut self` receivers make overlapping calls impossible.
pub trait Connection: Send + Sized {
    /// Run a compiled query and collect its whole result.
    fn execute(&mut self, query: CompiledQuery) -> impl Future<Output = Result<QueryResult>> + Send;

    /// Open a transaction, every following `execute` runs inside it until commit or rollback.
    fn begin_transaction(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Commit the open transaction, fails when there is none.
    fn commit_transaction(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Roll back the open transaction, fails when there is none.
    fn rollback_transaction(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Fetch the rows incrementally, drivers without a cursor primitive must yield an error.
    fn stream_query(
        &mut self,
        query: CompiledQuery,
        options: StreamOptions,
    ) -> impl Stream<Item = Result<RowLabeled>> + Send;
}
