use crate::{Value, truncate_long};
use std::{
    fmt::{self, Display},
    sync::Arc,
};

/// SQL text paired with its positional parameters, as produced by the query compiler.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    pub sql: String,
    pub parameters: Vec<Value>,
}

impl CompiledQuery {
    pub fn new(sql: impl Into<String>, parameters: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            parameters,
        }
    }
    /// A statement without parameters.
    pub fn raw(sql: impl Into<String>) -> Self {
        Self::new(sql, Vec::new())
    }
}

impl From<&str> for CompiledQuery {
    fn from(value: &str) -> Self {
        CompiledQuery::raw(value)
    }
}

impl From<String> for CompiledQuery {
    fn from(value: String) -> Self {
        CompiledQuery::raw(value)
    }
}

impl Display for CompiledQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", truncate_long!(self.sql))
    }
}

/// Shared reference-counted column name list.
pub type RowNames = Arc<[String]>;
/// Owned row value slice matching `RowNames` length.
pub type Row = Box<[Value]>;

/// A result row with its corresponding column labels.
#[derive(Debug, Clone, PartialEq)]
pub struct RowLabeled {
    /// Column names.
    pub labels: RowNames,
    /// Data values (aligned by index with `labels`).
    pub values: Row,
}

impl RowLabeled {
    pub fn new(labels: RowNames, values: Row) -> Self {
        Self { labels, values }
    }
    pub fn names(&self) -> &[String] {
        &self.labels
    }
    pub fn values(&self) -> &[Value] {
        &self.values
    }
    pub fn get_column(&self, name: &str) -> Option<&Value> {
        self.labels
            .iter()
            .position(|v| v == name)
            .map(|i| &self.values()[i])
    }
}

impl From<RowLabeled> for Row {
    fn from(value: RowLabeled) -> Self {
        value.values
    }
}

/// Outcome of one executed statement.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub rows: Vec<RowLabeled>,
    /// Rows impacted by a modify statement, `None` when the service did not report any.
    pub rows_affected: Option<u64>,
}

/// Options accepted by `Connection::stream_query`.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamOptions {
    /// Rows per chunk requested by the caller.
    pub high_water_mark: usize,
}
