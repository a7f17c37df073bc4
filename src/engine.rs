//! The report engine: settings, registry, executor and runner in one place.

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::{ConnectionSettings, Settings, SettingsError};
use crate::db::{Connector, DbError, MySqlConnector, QueryExecutor};
use crate::report::{
    standard_registry, LogProgress, RegistryError, ReportContext, ReportRegistry, ReportRunner,
    Selection, TitledDataSet,
};

/// Error type for engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Produces platform reports from one database.
pub struct ReportEngine {
    settings: Settings,
    registry: ReportRegistry,
    context: ReportContext,
}

impl ReportEngine {
    /// Build an engine over any connector.
    pub fn new(settings: Settings, connector: Arc<dyn Connector>) -> EngineResult<Self> {
        let connection = settings.connection.resolve()?;
        Self::assemble(settings, connection, connector)
    }

    /// Build an engine that talks to the configured MySQL server.
    pub fn from_settings(settings: Settings) -> EngineResult<Self> {
        let connection = settings.connection.resolve()?;
        let connector = Arc::new(MySqlConnector::new(connection.clone()));
        Self::assemble(settings, connection, connector)
    }

    fn assemble(
        settings: Settings,
        connection: ConnectionSettings,
        connector: Arc<dyn Connector>,
    ) -> EngineResult<Self> {
        if settings.connection.debug {
            info!(settings = ?connection, "connection settings");
        }

        let registry = standard_registry()?;
        let context = ReportContext::new(QueryExecutor::new(connector), &connection);
        debug!(reports = registry.len(), endpoint = context.endpoint(), "engine ready");

        Ok(Self {
            settings,
            registry,
            context,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn registry(&self) -> &ReportRegistry {
        &self.registry
    }

    /// Every report key, in run order.
    pub fn available_keys(&self) -> Vec<&str> {
        self.registry.keys().collect()
    }

    /// Produce the reports named in `keys`, in registry order.
    ///
    /// Keys that name no report are ignored.
    pub async fn run<S: AsRef<str>>(&self, keys: &[S]) -> EngineResult<Vec<TitledDataSet>> {
        self.run_selection(self.registry.select(keys)).await
    }

    /// Produce the reports enabled in the settings, or all of them.
    pub async fn run_enabled(&self) -> EngineResult<Vec<TitledDataSet>> {
        let enabled = self.settings.sheets.enabled_keys();
        self.run_selection(self.registry.select_default(enabled.as_deref()))
            .await
    }

    async fn run_selection(&self, selection: Selection<'_>) -> EngineResult<Vec<TitledDataSet>> {
        let mut runner = ReportRunner::new(&self.context);
        if self.settings.sheets.progress {
            runner = runner.with_progress(LogProgress);
        }
        Ok(runner.run(&selection).await?)
    }

    /// Check that the server accepts connections and statements.
    pub async fn ping(&self) -> EngineResult<()> {
        self.context.executor().execute("DO 1").await?;
        Ok(())
    }
}
