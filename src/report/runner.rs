//! Sequential report execution.

use tracing::{debug, info};

use super::producer::{ReportContext, TitledDataSet};
use super::registry::ReportDescriptor;
use crate::db::DbResult;

/// Receives a notification right before each report is produced.
pub trait ProgressObserver {
    fn producing(&mut self, title: &str);
}

/// Logs `Producing... <title>` at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl ProgressObserver for LogProgress {
    fn producing(&mut self, title: &str) {
        info!("Producing... {}", title);
    }
}

/// Runs a selection of reports one after the other.
///
/// Each producer is invoked exactly once, in selection order. The first
/// failure aborts the run; reports after it are not invoked.
pub struct ReportRunner<'a> {
    context: &'a ReportContext,
    progress: Option<Box<dyn ProgressObserver + 'a>>,
}

impl<'a> ReportRunner<'a> {
    pub fn new(context: &'a ReportContext) -> Self {
        Self {
            context,
            progress: None,
        }
    }

    /// Notify `observer` before each report.
    pub fn with_progress(mut self, observer: impl ProgressObserver + 'a) -> Self {
        self.progress = Some(Box::new(observer));
        self
    }

    pub async fn run(&mut self, selection: &[&ReportDescriptor]) -> DbResult<Vec<TitledDataSet>> {
        let mut output = Vec::with_capacity(selection.len());

        for descriptor in selection {
            if let Some(progress) = self.progress.as_mut() {
                progress.producing(descriptor.title());
            }

            let data = descriptor.producer().produce(self.context).await?;
            debug!(report = descriptor.key(), rows = data.len(), "report produced");

            output.push(TitledDataSet {
                title: descriptor.title().to_string(),
                data,
            });
        }

        Ok(output)
    }
}
