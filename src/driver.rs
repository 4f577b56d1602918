use crate::{Client, Config, SCHEME, ServerlessConnection};
use std::{marker::PhantomData, sync::Arc};
use tank_serverless_core::{Connection, Driver, Result};

/// Driver for a SQL service reached through stateless HTTP requests.
///
/// There is nothing to pool, warm up or tear down: `init`, `destroy` and
/// `release_connection` do nothing, connections are created on demand and
/// transactions are handled by the connection that owns them.
pub struct ServerlessDriver<C: Client> {
    config: Arc<Config>,
    _client: PhantomData<fn() -> C>,
}

impl<C: Client> ServerlessDriver<C> {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            _client: PhantomData,
        }
    }

    /// Create the driver from a `serverless://` connection url.
    pub fn connect(url: &str) -> Result<Self> {
        Ok(Self::new(Config::from_url(url)?))
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// A new logical connection sharing the driver configuration.
    pub fn connection(&self) -> ServerlessConnection<C> {
        ServerlessConnection::new(self.config.clone())
    }
}

impl<C: Client> Clone for ServerlessDriver<C> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            _client: PhantomData,
        }
    }
}

impl<C: Client> Driver for ServerlessDriver<C> {
    type Connection = ServerlessConnection<C>;

    const NAME: &'static str = SCHEME;

    async fn init(&self) -> Result<()> {
        Ok(())
    }

    async fn destroy(&self) -> Result<()> {
        Ok(())
    }

    async fn create_connection(&self) -> Result<Self::Connection> {
        Ok(self.connection())
    }

    async fn release_connection(&self, _connection: Self::Connection) -> Result<()> {
        Ok(())
    }

    async fn begin_transaction(&self, connection: &mut Self::Connection) -> Result<()> {
        connection.begin_transaction().await
    }

    async fn commit_transaction(&self, connection: &mut Self::Connection) -> Result<()> {
        connection.commit_transaction().await
    }

    async fn rollback_transaction(&self, connection: &mut Self::Connection) -> Result<()> {
        connection.rollback_transaction().await
    }
}
