//! Database-layer error types.

use thiserror::Error;

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

/// Errors raised by the query execution layer.
#[derive(Error, Debug)]
pub enum DbError {
    /// The connection could not be established (credentials, host, database).
    #[error("database connection failed: {0}")]
    ConnectionFailed(String),

    /// The database rejected or failed a statement.
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// No statement of a batch produced a result set.
    #[error("no statement in the batch returned a result set")]
    NoResultSet,

    /// A single-value query returned no rows (or a row without columns).
    #[error("query returned no value")]
    EmptyResult,

    /// A column value could not be converted.
    #[error("failed to decode column `{column}`: {message}")]
    Decode {
        /// Column name.
        column: String,
        /// Driver message.
        message: String,
    },

    /// A row's arity does not match the result set's column list.
    #[error("row {row} has {found} values but the result set has {expected} columns")]
    ShapeMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl DbError {
    /// Create a decode error for a column.
    pub fn decode(column: impl Into<String>, message: impl ToString) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.to_string(),
        }
    }

    /// Check if this error happened while acquiring the connection.
    pub fn is_connection_failure(&self) -> bool {
        matches!(self, Self::ConnectionFailed(_))
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        Self::QueryFailed(err.to_string())
    }
}
