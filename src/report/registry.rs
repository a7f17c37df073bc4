//! Report registry.
//!
//! A fixed, ordered mapping from report key to title and producer, built once
//! and never mutated. Selection intersects requested keys with the registry
//! in registration order; requested keys that are not registered are dropped
//! without error.

use std::collections::HashSet;
use std::fmt;

use super::producer::ReportProducer;

/// Error type for registry construction.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Report key registered twice: {0}")]
    DuplicateKey(String),
}

/// A registered report.
pub struct ReportDescriptor {
    key: String,
    title: String,
    producer: Box<dyn ReportProducer>,
}

impl ReportDescriptor {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn producer(&self) -> &dyn ReportProducer {
        self.producer.as_ref()
    }
}

impl fmt::Debug for ReportDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportDescriptor")
            .field("key", &self.key)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

/// Descriptors chosen for a run, in registration order.
pub type Selection<'a> = Vec<&'a ReportDescriptor>;

/// Builder for [`ReportRegistry`].
#[derive(Default)]
pub struct ReportRegistryBuilder {
    descriptors: Vec<ReportDescriptor>,
}

impl ReportRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a report. Registration order is the order reports run in.
    pub fn register(
        mut self,
        key: impl Into<String>,
        title: impl Into<String>,
        producer: impl ReportProducer + 'static,
    ) -> Self {
        self.descriptors.push(ReportDescriptor {
            key: key.into(),
            title: title.into(),
            producer: Box::new(producer),
        });
        self
    }

    pub fn build(self) -> Result<ReportRegistry, RegistryError> {
        let mut seen = HashSet::new();
        for descriptor in &self.descriptors {
            if !seen.insert(descriptor.key.as_str()) {
                return Err(RegistryError::DuplicateKey(descriptor.key.clone()));
            }
        }
        Ok(ReportRegistry {
            descriptors: self.descriptors,
        })
    }
}

/// Immutable registry of reports.
#[derive(Debug)]
pub struct ReportRegistry {
    descriptors: Vec<ReportDescriptor>,
}

impl ReportRegistry {
    pub fn builder() -> ReportRegistryBuilder {
        ReportRegistryBuilder::new()
    }

    /// All keys, in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.descriptors.iter().map(|d| d.key.as_str())
    }

    pub fn descriptors(&self) -> &[ReportDescriptor] {
        &self.descriptors
    }

    pub fn get(&self, key: &str) -> Option<&ReportDescriptor> {
        self.descriptors.iter().find(|d| d.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Reports whose key is in `keys`, in registration order.
    pub fn select<S: AsRef<str>>(&self, keys: &[S]) -> Selection<'_> {
        let wanted: HashSet<&str> = keys.iter().map(|k| k.as_ref()).collect();
        self.descriptors
            .iter()
            .filter(|d| wanted.contains(d.key.as_str()))
            .collect()
    }

    /// Like [`select`](Self::select), but `None` selects every report.
    pub fn select_default<S: AsRef<str>>(&self, configured: Option<&[S]>) -> Selection<'_> {
        match configured {
            Some(keys) => self.select(keys),
            None => self.descriptors.iter().collect(),
        }
    }

    /// Requested keys that are not registered, in request order.
    pub fn unknown_keys<'k, S: AsRef<str>>(&self, keys: &'k [S]) -> Vec<&'k str> {
        keys.iter()
            .map(|k| k.as_ref())
            .filter(|k| !self.contains(k))
            .collect()
    }
}
