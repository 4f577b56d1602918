use crate::{Cast, Client, Config, SCHEME, decode, encode};
use std::sync::Arc;
use tank_serverless_core::{
    CompiledQuery, Connection, DriverError, Error, QueryResult, Result, RowLabeled,
    StreamOptions, future,
    stream::{self, Stream},
};

/// Logical connection wrapping one handle of the execution client.
///
/// The service has no transaction protocol: a transaction is a second connection,
/// owned by this one, whose handle receives `BEGIN`, the statements and finally
/// `COMMIT` or `ROLLBACK`. While it exists every query is routed to it.
pub struct ServerlessConnection<C: Client> {
    pub(crate) config: Arc<Config>,
    pub(crate) client: C,
    pub(crate) transaction: Option<Box<ServerlessConnection<C>>>,
}

impl<C: Client> ServerlessConnection<C> {
    /// Wrap a fresh client handle, no network activity happens here.
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            client: C::connect(config.clone()),
            config,
            transaction: None,
        }
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    pub fn in_transaction(&self) -> bool {
        self.transaction.is_some()
    }

    /// The connection whose handle must run the next statement.
    fn target(&mut self) -> &mut Self {
        match self.transaction {
            Some(ref mut transaction) => transaction.target(),
            None => self,
        }
    }

    /// Run the query on this connection's own handle, ignoring any open transaction.
    async fn run(&mut self, query: CompiledQuery) -> Result<QueryResult> {
        let context = format!("While running the query:\n{}", query);
        self.submit(query).await.map_err(|e| {
            let e = e.context(context);
            log::error!("{:#}", e);
            e
        })
    }

    async fn submit(&mut self, query: CompiledQuery) -> Result<QueryResult> {
        let CompiledQuery { sql, parameters } = query;
        let parameters = if self.config.format.is_some() {
            parameters
        } else {
            parameters
                .into_iter()
                .map(encode)
                .collect::<Result<Vec<_>>>()?
        };
        let default_cast = decode::<C>;
        let cast: Cast<'_> = match &self.config.cast {
            Some(cast) => cast.as_ref(),
            None => &default_cast,
        };
        let response = self.client.execute(&sql, parameters, cast).await?;
        // Some client versions return the failure as data instead of an `Err`
        if let Some(error) = response.error {
            return Err(Error::new(error));
        }
        let rows_affected = response
            .rows_affected
            .map(|v| u64::try_from(v).map_err(|_| DriverError::InvalidRowsAffected(v)))
            .transpose()?;
        Ok(QueryResult {
            rows: response.rows,
            rows_affected,
        })
    }

    async fn end_transaction(&mut self, statement: &'static str) -> Result<()> {
        let Some(transaction) = self.transaction.as_deref_mut() else {
            let error = Error::new(DriverError::NoTransaction)
                .context(format!("While trying to {}", statement));
            log::error!("{:#}", error);
            return Err(error);
        };
        transaction.run(statement.into()).await?;
        self.transaction = None;
        log::debug!("Transaction closed with {}", statement);
        Ok(())
    }
}

impl<C: Client> Connection for ServerlessConnection<C> {
    async fn execute(&mut self, query: CompiledQuery) -> Result<QueryResult> {
        self.target().run(query).await
    }

    async fn begin_transaction(&mut self) -> Result<()> {
        if self.transaction.is_some() {
            log::warn!("A transaction is already open on this connection, it will be reused");
            return Ok(());
        }
        let mut transaction = Box::new(Self::new(self.config.clone()));
        transaction.run("BEGIN".into()).await?;
        self.transaction = Some(transaction);
        log::debug!("Transaction opened");
        Ok(())
    }

    async fn commit_transaction(&mut self) -> Result<()> {
        self.end_transaction("COMMIT").await
    }

    async fn rollback_transaction(&mut self) -> Result<()> {
        self.end_transaction("ROLLBACK").await
    }

    fn stream_query(
        &mut self,
        query: CompiledQuery,
        _options: StreamOptions,
    ) -> impl Stream<Item = Result<RowLabeled>> + Send {
        let error = Error::new(DriverError::Unsupported {
            operation: "Streaming",
            driver: SCHEME,
        })
        .context(format!("While streaming the query:\n{}", query));
        log::error!("{:#}", error);
        stream::once(future::ready(Err::<RowLabeled, _>(error)))
    }
}
