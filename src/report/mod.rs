//! Report definitions, selection and execution.
//!
//! ```text
//!   ReportRegistry ──select(keys)──▶ Selection ──▶ ReportRunner ──▶ [TitledDataSet]
//!        ▲                                              │
//!   catalog::standard_registry()          ReportProducer::produce(&ReportContext)
//! ```

pub mod catalog;
mod producer;
mod registry;
mod runner;

pub use catalog::{standard_registry, SqlReport};
pub use producer::{ReportContext, ReportProducer, TitledDataSet};
pub use registry::{
    RegistryError, ReportDescriptor, ReportRegistry, ReportRegistryBuilder, Selection,
};
pub use runner::{LogProgress, ProgressObserver, ReportRunner};
