pub mod catalog;
pub mod endpoint;
pub mod exposition;
pub mod registry;

use std::collections::BTreeMap;

pub use registry::{Registry, RegistrySnapshot};

/// Name and HELP text of one gauge. Every gauge the exporter writes is a
/// constant in [`catalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricDesc {
    pub name: &'static str,
    pub help: &'static str,
}

/// Label set of a single series. Keys come from a fixed vocabulary, so they
/// are `&'static str`; ordering is by key, which keeps the rendered output
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Labels(BTreeMap<&'static str, String>);

impl Labels {
    /// Empty label set, used by global gauges such as `up`.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn subreddit(name: impl Into<String>) -> Self {
        Self::none().with(catalog::SUBREDDIT_LABEL, name)
    }

    pub fn with(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.0.insert(key, value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sorted label keys.
    pub fn keys(&self) -> Vec<&'static str> {
        self.0.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// One value produced by the aggregator, ready to be written to the
/// registry.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    pub metric: MetricDesc,
    pub labels: Labels,
    pub value: f64,
}

impl MetricSample {
    pub fn new(metric: MetricDesc, labels: Labels, value: f64) -> Self {
        Self {
            metric,
            labels,
            value,
        }
    }
}
