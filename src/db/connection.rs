//! Driver seam: connectors and scoped connections.
//!
//! The execution layer only needs "open a connection, run SQL, read back
//! column metadata and rows, close". Everything else is the driver's job.

use async_trait::async_trait;

use super::error::DbResult;
use super::value::{Column, Value};

/// Raw rows of one statement, as produced by the driver.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultSet {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<Value>>,
}

impl ResultSet {
    pub fn new(columns: Vec<Column>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }
}

/// Outcome of one statement inside a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum StatementResult {
    /// Statement completed without a result set.
    Ack { rows_affected: u64 },
    /// Statement produced a result set (possibly with zero rows).
    Rows(ResultSet),
}

impl StatementResult {
    pub fn ack() -> Self {
        Self::Ack { rows_affected: 0 }
    }

    pub fn rows(columns: Vec<Column>, rows: Vec<Vec<Value>>) -> Self {
        Self::Rows(ResultSet::new(columns, rows))
    }

    /// Whether the statement carried rows.
    pub fn has_rows(&self) -> bool {
        matches!(self, Self::Rows(_))
    }
}

/// Opens fresh connections. One call, one connection.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Acquire a new connection. Failures surface as
    /// [`DbError::ConnectionFailed`](super::DbError::ConnectionFailed).
    async fn connect(&self) -> DbResult<Box<dyn Connection>>;
}

/// A live database connection owned by exactly one operation.
#[async_trait]
pub trait Connection: Send {
    /// Run a statement that returns no rows. Returns the affected row count.
    async fn execute(&mut self, sql: &str) -> DbResult<u64>;

    /// Run statements in order on this connection, one result per statement.
    /// Stops at the first failing statement.
    async fn run_batch(&mut self, statements: &[String]) -> DbResult<Vec<StatementResult>>;

    /// Release the connection.
    async fn close(self: Box<Self>) -> DbResult<()>;
}
