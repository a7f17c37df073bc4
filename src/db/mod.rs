//! Read-only query execution layer.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        QueryExecutor                            │
//! │  execute(sql)  -> ()          one connection per call           │
//! │  query(sql)    -> DataSet     START TRANSACTION READ ONLY + sql │
//! │  get(sql)      -> Value       first column of first row         │
//! └─────────────────────────────────────────────────────────────────┘
//!                           │ Connector::connect()
//!                           ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │        Connection (MySqlConnector / ScriptedConnector)          │
//! │   execute · run_batch -> [StatementResult] · close              │
//! └─────────────────────────────────────────────────────────────────┘
//!                           │ first StatementResult::Rows
//!                           ▼
//!                    map_rows -> DataSet
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use nau_reports::db::{MySqlConnector, QueryExecutor};
//!
//! let executor = QueryExecutor::new(Arc::new(MySqlConnector::new(settings)));
//! let users = executor.get("SELECT count(1) FROM `edxapp`.auth_user").await?;
//! let orgs = executor.query("SELECT id, name FROM `edxapp`.organizations_organization").await?;
//! ```

mod batch;
mod connection;
mod dataset;
mod error;
mod executor;
mod mapper;
mod mysql;
pub mod scripted;
mod value;

pub use batch::{read_only_batch, split_statements, READ_ONLY_TRANSACTION};
pub use connection::{Connection, Connector, ResultSet, StatementResult};
pub use dataset::{DataSet, Record};
pub use error::{DbError, DbResult};
pub use executor::QueryExecutor;
pub use mapper::map_rows;
pub use mysql::MySqlConnector;
pub use scripted::ScriptedConnector;
pub use value::{Column, Value};
