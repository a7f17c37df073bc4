//! Scoped, read-only query execution.

use std::sync::Arc;

use tracing::{debug, warn};

use super::batch::{read_only_batch, split_statements};
use super::connection::{Connection, Connector, StatementResult};
use super::dataset::DataSet;
use super::error::{DbError, DbResult};
use super::mapper::map_rows;
use super::value::Value;

/// Runs statements on freshly acquired connections.
///
/// Every operation opens its own connection and closes it before returning,
/// whether the operation succeeded or not. Nothing is shared between calls.
#[derive(Clone)]
pub struct QueryExecutor {
    connector: Arc<dyn Connector>,
}

impl QueryExecutor {
    pub fn new(connector: Arc<dyn Connector>) -> Self {
        Self { connector }
    }

    /// Run a statement that returns nothing.
    pub async fn execute(&self, statement: &str) -> DbResult<()> {
        let mut conn = self.connector.connect().await?;
        let outcome = conn.execute(statement).await.map(|affected| {
            debug!(rows_affected = affected, "statement executed");
        });
        release(conn, outcome).await
    }

    /// Run a statement inside a read-only transaction and return the rows of
    /// the first statement that produced a result set.
    ///
    /// The statement may contain several semicolon-separated statements.
    /// Fails with [`DbError::NoResultSet`] if none of them returns rows.
    pub async fn query(&self, statement: &str) -> DbResult<DataSet> {
        let batch = read_only_batch(statement);
        let mut conn = self.connector.connect().await?;
        let outcome = match conn.run_batch(&batch).await {
            Ok(results) => first_result_set(results),
            Err(e) => Err(e),
        };
        release(conn, outcome).await
    }

    /// Run a statement and return the first column of its first row.
    pub async fn get(&self, statement: &str) -> DbResult<Value> {
        let batch = split_statements(statement);
        let mut conn = self.connector.connect().await?;
        let outcome = match conn.run_batch(&batch).await {
            Ok(results) => first_value(results),
            Err(e) => Err(e),
        };
        release(conn, outcome).await
    }
}

fn first_result_set(results: Vec<StatementResult>) -> DbResult<DataSet> {
    let statements = results.len();
    let set = results
        .into_iter()
        .find_map(|result| match result {
            StatementResult::Rows(set) => Some(set),
            StatementResult::Ack { .. } => None,
        })
        .ok_or(DbError::NoResultSet)?;

    debug!(statements, rows = set.rows.len(), "query batch completed");
    map_rows(&set.columns, set.rows)
}

fn first_value(results: Vec<StatementResult>) -> DbResult<Value> {
    let set = results
        .into_iter()
        .find_map(|result| match result {
            StatementResult::Rows(set) => Some(set),
            StatementResult::Ack { .. } => None,
        })
        .ok_or(DbError::NoResultSet)?;

    set.rows
        .into_iter()
        .next()
        .and_then(|row| row.into_iter().next())
        .ok_or(DbError::EmptyResult)
}

/// Close the connection, keeping the operation's error if both fail.
async fn release<T>(conn: Box<dyn Connection>, outcome: DbResult<T>) -> DbResult<T> {
    let closed = conn.close().await;
    match (outcome, closed) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(close_err)) => Err(close_err),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(close_err)) => {
            warn!(error = %close_err, "failed to close connection after error");
            Err(e)
        }
    }
}
