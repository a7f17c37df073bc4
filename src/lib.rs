//! # nau-reports
//!
//! Read-only statistics exports for an Open edX platform database.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │              Settings (nau-reports.toml)                 │
//! │        connection · enabled sheets · progress            │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [engine]
//! ┌─────────────────────────────────────────────────────────┐
//! │        ReportRegistry (ordered key → title, producer)    │
//! └─────────────────────────────────────────────────────────┘
//!                          │ select(keys)
//!                          ▼ [runner]
//! ┌─────────────────────────────────────────────────────────┐
//! │   ReportProducer::produce(ctx)  →  QueryExecutor         │
//! │   (one read-only transaction per query)                  │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │          [TitledDataSet { title, records }]              │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod db;
pub mod engine;
pub mod logging;
pub mod report;
pub mod sql;

pub use config::{ConnectionSettings, Settings, SettingsError};
pub use db::{DataSet, DbError, QueryExecutor, Record, Value};
pub use engine::{EngineError, ReportEngine};
pub use report::{ReportRegistry, ReportRunner, TitledDataSet};
