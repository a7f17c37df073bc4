//! The producer contract and the context producers run against.

use async_trait::async_trait;
use serde::Serialize;

use crate::config::ConnectionSettings;
use crate::db::{DataSet, DbResult, QueryExecutor};
use crate::sql;

/// Produces one report's dataset.
///
/// Implementations hold only their own definition; everything they need from
/// the engine arrives through the [`ReportContext`].
#[async_trait]
pub trait ReportProducer: Send + Sync {
    async fn produce(&self, ctx: &ReportContext) -> DbResult<DataSet>;
}

/// Shared, immutable inputs for report producers.
#[derive(Clone)]
pub struct ReportContext {
    executor: QueryExecutor,
    database: String,
    endpoint: String,
}

impl ReportContext {
    pub fn new(executor: QueryExecutor, settings: &ConnectionSettings) -> Self {
        Self {
            executor,
            database: settings.database().to_string(),
            endpoint: settings.endpoint(),
        }
    }

    pub fn executor(&self) -> &QueryExecutor {
        &self.executor
    }

    /// Name of the platform schema.
    pub fn database(&self) -> &str {
        &self.database
    }

    /// `host:port` of the server being reported on.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Render a `{db}` template against the configured schema.
    pub fn sql(&self, template: &str) -> String {
        sql::render(template, &self.database)
    }
}

/// One report's output: its display title and its rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitledDataSet {
    pub title: String,
    #[serde(rename = "records")]
    pub data: DataSet,
}
