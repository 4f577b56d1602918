use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, LazyLock, Mutex, MutexGuard},
};
use tank_serverless::{
    Cast, Client, ClientResponse, Config, Error, Result, RowLabeled, RowNames, ServiceError,
    Value,
};

static SERVERS: LazyLock<Mutex<HashMap<String, Arc<MockServer>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// A statement received by a [`MockServer`].
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// Identifier of the client handle that sent it, starting from 1.
    pub handle: usize,
    pub sql: String,
    pub parameters: Vec<Value>,
    /// The sql produced by the configured format function, if any.
    pub formatted: Option<String>,
}

/// Scripted answer of a [`MockServer`].
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Raw wire rows, every field is decoded with the cast hook of the request.
    Rows {
        /// Column name and type tag.
        columns: Vec<(String, String)>,
        rows: Vec<Vec<Option<String>>>,
        rows_affected: Option<i64>,
    },
    /// Failure returned as `Err`, the way current client versions report it.
    Thrown(ServiceError),
    /// Failure stored in the response object, the way older client versions report it.
    Embedded(ServiceError),
}

impl MockResponse {
    pub fn rows<'a>(
        columns: impl IntoIterator<Item = (&'a str, &'a str)>,
        rows: impl IntoIterator<Item = Vec<Option<&'a str>>>,
    ) -> Self {
        MockResponse::Rows {
            columns: columns
                .into_iter()
                .map(|(n, t)| (n.to_owned(), t.to_owned()))
                .collect(),
            rows: rows
                .into_iter()
                .map(|r| r.into_iter().map(|v| v.map(ToOwned::to_owned)).collect())
                .collect(),
            rows_affected: None,
        }
    }
    pub fn affected(rows_affected: i64) -> Self {
        MockResponse::Rows {
            columns: Vec::new(),
            rows: Vec::new(),
            rows_affected: Some(rows_affected),
        }
    }
}

#[derive(Default)]
struct ServerState {
    handles: usize,
    journal: Vec<Statement>,
    /// Pending answers, matched either against a specific sql or against any data statement.
    responses: VecDeque<(Option<String>, MockResponse)>,
}

/// In-process stand-in for the remote execution service.
///
/// Servers are registered by name, a client reaches the one named like the host of its endpoint.
pub struct MockServer {
    name: String,
    state: Mutex<ServerState>,
}

fn is_transaction_control(sql: &str) -> bool {
    ["BEGIN", "COMMIT", "ROLLBACK"]
        .iter()
        .any(|v| sql.trim().eq_ignore_ascii_case(v))
}

impl MockServer {
    /// Register a new server, replacing any other one with the same name.
    pub fn register(name: &str) -> Arc<Self> {
        let server = Arc::new(Self {
            name: name.to_owned(),
            state: Default::default(),
        });
        SERVERS
            .lock()
            .unwrap()
            .insert(name.to_owned(), server.clone());
        server
    }

    pub fn find(name: &str) -> Option<Arc<Self>> {
        SERVERS.lock().unwrap().get(name).cloned()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Connection url pointing to this server.
    pub fn url(&self) -> String {
        format!("serverless://mock_user:mock%20secret@{}/mock_db", self.name)
    }

    pub fn config(&self) -> Config {
        Config::from_url(&self.url()).expect("The mock server url must be valid")
    }

    fn state(&self) -> MutexGuard<'_, ServerState> {
        self.state.lock().unwrap()
    }

    /// Answer the next data statement (anything but transaction control) with `response`.
    pub fn respond(&self, response: MockResponse) {
        self.state().responses.push_back((None, response));
    }

    /// Answer the next statement equal to `sql` with `response`.
    pub fn respond_to(&self, sql: &str, response: MockResponse) {
        self.state()
            .responses
            .push_back((Some(sql.trim().to_owned()), response));
    }

    pub fn journal(&self) -> Vec<Statement> {
        self.state().journal.clone()
    }

    /// Sql of every statement received, in order.
    pub fn statements(&self) -> Vec<String> {
        self.state().journal.iter().map(|v| v.sql.clone()).collect()
    }

    /// Number of client handles created so far.
    pub fn handles(&self) -> usize {
        self.state().handles
    }

    pub fn clear_journal(&self) {
        self.state().journal.clear();
    }

    fn connect(&self) -> usize {
        let mut state = self.state();
        state.handles += 1;
        state.handles
    }

    fn receive(&self, statement: Statement) -> Option<MockResponse> {
        let mut state = self.state();
        let sql = statement.sql.trim();
        let position = state.responses.iter().position(|(matcher, _)| match matcher {
            Some(matcher) => matcher.eq_ignore_ascii_case(sql),
            None => !is_transaction_control(sql),
        });
        let response = position
            .and_then(|i| state.responses.remove(i))
            .map(|(_, response)| response);
        state.journal.push(statement);
        response
    }
}

/// Client handle talking to a [`MockServer`].
pub struct MockClient {
    handle: usize,
    config: Arc<Config>,
    server: Option<Arc<MockServer>>,
}

impl MockClient {
    pub fn handle(&self) -> usize {
        self.handle
    }
}

impl Client for MockClient {
    fn connect(config: Arc<Config>) -> Self {
        let server = config.endpoint().host_str().and_then(MockServer::find);
        Self {
            handle: server.as_ref().map(|v| v.connect()).unwrap_or_default(),
            config,
            server,
        }
    }

    async fn execute(
        &mut self,
        sql: &str,
        parameters: Vec<Value>,
        cast: Cast<'_>,
    ) -> Result<ClientResponse> {
        let Some(server) = &self.server else {
            return Err(Error::new(
                ServiceError::new(format!(
                    "No server is listening on {}",
                    self.config.endpoint()
                ))
                .with_status(503),
            ));
        };
        let formatted = match self.config.format() {
            Some(format) => Some(format(sql, &parameters)?),
            None => None,
        };
        let response = server.receive(Statement {
            handle: self.handle,
            sql: sql.to_owned(),
            parameters,
            formatted,
        });
        match response {
            None => Ok(ClientResponse::default()),
            Some(MockResponse::Rows {
                columns,
                rows,
                rows_affected,
            }) => {
                let labels: RowNames = columns.iter().map(|(name, _)| name.clone()).collect();
                let rows = rows
                    .into_iter()
                    .map(|row| -> Result<RowLabeled> {
                        let values = row
                            .iter()
                            .zip(&columns)
                            .map(|(value, (_, type_tag))| cast(type_tag.as_str(), value.as_deref()))
                            .collect::<Result<_>>()?;
                        Ok(RowLabeled::new(labels.clone(), values))
                    })
                    .collect::<Result<_>>()?;
                Ok(ClientResponse {
                    rows,
                    rows_affected,
                    error: None,
                })
            }
            Some(MockResponse::Thrown(error)) => Err(Error::new(error)),
            Some(MockResponse::Embedded(error)) => Ok(ClientResponse {
                error: Some(error),
                ..Default::default()
            }),
        }
    }
}
