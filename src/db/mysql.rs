//! MySQL driver built on sqlx.
//!
//! One [`MySqlConnection`] per operation, no pooling. Statements of a batch
//! are prepared first so their column metadata is known even when they
//! return zero rows; statements the server refuses to prepare run over the
//! text protocol and are reported as acknowledgements.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sqlx::error::UnexpectedNullError;
use sqlx::mysql::types::MySqlTime;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlDatabaseError, MySqlRow};
use sqlx::{Column as _, Connection as _, Executor as _, Row as _, Statement as _, TypeInfo as _};
use tracing::debug;

use super::connection::{Connection, Connector, ResultSet, StatementResult};
use super::error::{DbError, DbResult};
use super::value::{Column, Value};
use crate::config::ConnectionSettings;

/// MySQL error number for "This command is not supported in the prepared
/// statement protocol yet".
const ER_UNSUPPORTED_PS: u16 = 1295;

/// Opens MySQL connections from fixed settings.
#[derive(Debug, Clone)]
pub struct MySqlConnector {
    settings: ConnectionSettings,
}

impl MySqlConnector {
    pub fn new(settings: ConnectionSettings) -> Self {
        Self { settings }
    }

    fn options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(self.settings.host())
            .port(self.settings.port())
            .username(self.settings.user())
            .password(self.settings.password())
            .database(self.settings.database())
    }
}

#[async_trait]
impl Connector for MySqlConnector {
    async fn connect(&self) -> DbResult<Box<dyn Connection>> {
        let endpoint = self.settings.endpoint();
        let conn = MySqlConnection::connect_with(&self.options())
            .await
            .map_err(|e| DbError::ConnectionFailed(format!("{}: {}", endpoint, e)))?;
        debug!(endpoint = %endpoint, "connection opened");
        Ok(Box::new(MySqlSession { conn }))
    }
}

struct MySqlSession {
    conn: MySqlConnection,
}

impl MySqlSession {
    async fn run_statement(&mut self, sql: &str) -> DbResult<StatementResult> {
        let prepared = match (&mut self.conn).prepare(sql).await {
            Ok(prepared) => prepared,
            Err(e) if is_unsupported_prepare(&e) => {
                let done = (&mut self.conn).execute(sqlx::raw_sql(sql)).await?;
                return Ok(StatementResult::Ack {
                    rows_affected: done.rows_affected(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        let columns: Vec<Column> = prepared
            .columns()
            .iter()
            .map(|c| Column::new(c.name(), c.type_info().name()))
            .collect();

        if columns.is_empty() {
            let done = (&mut self.conn).execute(prepared.query()).await?;
            return Ok(StatementResult::Ack {
                rows_affected: done.rows_affected(),
            });
        }

        let rows = (&mut self.conn).fetch_all(prepared.query()).await?;
        let rows = rows
            .iter()
            .map(decode_row)
            .collect::<DbResult<Vec<_>>>()?;
        Ok(StatementResult::Rows(ResultSet::new(columns, rows)))
    }
}

#[async_trait]
impl Connection for MySqlSession {
    async fn execute(&mut self, sql: &str) -> DbResult<u64> {
        let done = (&mut self.conn).execute(sqlx::raw_sql(sql)).await?;
        Ok(done.rows_affected())
    }

    async fn run_batch(&mut self, statements: &[String]) -> DbResult<Vec<StatementResult>> {
        let mut results = Vec::with_capacity(statements.len());
        for statement in statements {
            results.push(self.run_statement(statement).await?);
        }
        Ok(results)
    }

    async fn close(self: Box<Self>) -> DbResult<()> {
        self.conn.close().await?;
        debug!("connection closed");
        Ok(())
    }
}

fn is_unsupported_prepare(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db
            .try_downcast_ref::<MySqlDatabaseError>()
            .is_some_and(|e| e.number() == ER_UNSUPPORTED_PS),
        _ => false,
    }
}

/// Zero dates (`0000-00-00`) decode as a missing value rather than failing.
fn zero_date_as_null<T>(
    decoded: Result<Option<T>, sqlx::Error>,
) -> Result<Option<T>, sqlx::Error> {
    match decoded {
        Err(sqlx::Error::ColumnDecode { source, .. }) if source.is::<UnexpectedNullError>() => {
            Ok(None)
        }
        other => other,
    }
}

fn decode_row(row: &MySqlRow) -> DbResult<Vec<Value>> {
    (0..row.columns().len())
        .map(|idx| decode_value(row, idx))
        .collect()
}

/// Convert one column of a row according to its MySQL type name.
fn decode_value(row: &MySqlRow, idx: usize) -> DbResult<Value> {
    let column = &row.columns()[idx];
    let type_name = column.type_info().name();
    let err = |e: sqlx::Error| DbError::decode(column.name(), e);

    let value = match type_name {
        "NULL" => Value::Null,
        "BOOLEAN" => row.try_get::<Option<bool>, _>(idx).map_err(err)?.into(),
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => {
            row.try_get::<Option<i64>, _>(idx).map_err(err)?.into()
        }
        "YEAR" => row
            .try_get_unchecked::<Option<u16>, _>(idx)
            .map_err(err)?
            .map_or(Value::Null, |y| Value::Int(i64::from(y))),
        "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED"
        | "BIGINT UNSIGNED" => match row.try_get::<Option<u64>, _>(idx).map_err(err)? {
            None => Value::Null,
            Some(v) => i64::try_from(v).map_or_else(|_| Value::Text(v.to_string()), Value::Int),
        },
        "FLOAT" => row
            .try_get::<Option<f32>, _>(idx)
            .map_err(err)?
            .map_or(Value::Null, |v| Value::Float(f64::from(v))),
        "DOUBLE" => row.try_get::<Option<f64>, _>(idx).map_err(err)?.into(),
        "DECIMAL" => row
            .try_get_unchecked::<Option<String>, _>(idx)
            .map_err(err)?
            .map_or(Value::Null, |s| Value::from_decimal_str(&s)),
        "DATE" => zero_date_as_null(row.try_get::<Option<NaiveDate>, _>(idx))
            .map_err(err)?
            .map_or(Value::Null, Value::Date),
        "DATETIME" | "TIMESTAMP" => {
            zero_date_as_null(row.try_get::<Option<NaiveDateTime>, _>(idx))
                .map_err(err)?
                .map_or(Value::Null, Value::DateTime)
        }
        "TIME" => match row.try_get::<Option<NaiveTime>, _>(idx) {
            Ok(time) => time.map_or(Value::Null, Value::Time),
            // Negative or beyond 24h: keep the server's duration text
            Err(sqlx::Error::ColumnDecode { .. }) => row
                .try_get::<Option<MySqlTime>, _>(idx)
                .map_err(err)?
                .map_or(Value::Null, |t| Value::Text(t.to_string())),
            Err(e) => return Err(err(e)),
        },
        "BINARY" | "VARBINARY" | "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" => {
            match row.try_get::<Option<Vec<u8>>, _>(idx).map_err(err)? {
                None => Value::Null,
                Some(bytes) => match String::from_utf8(bytes) {
                    Ok(text) => Value::Text(text),
                    Err(e) => Value::Text(BASE64.encode(e.into_bytes())),
                },
            }
        }
        _ => row
            .try_get_unchecked::<Option<String>, _>(idx)
            .map_err(err)?
            .into(),
    };

    Ok(value)
}
