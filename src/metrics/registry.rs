use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use super::{Labels, MetricDesc, MetricSample};
use crate::error::RegistryError;

// ─── Public types ────────────────────────────────────────────────

/// Thread-safe gauge store.
/// The scrape loop calls `set()`, the `/metrics` handler calls `snapshot()`.
///
/// Both sides contend on one mutex. `set` holds it only to install an
/// already-built value and `snapshot` only to clone `Arc`s; sorting and
/// rendering happen after the guard is dropped.
#[derive(Default)]
pub struct Registry {
    inner: Mutex<Inner>,
}

/// One labelled value. Immutable once installed: an update replaces the
/// `Arc`, so a reader holding the old one never sees a torn value.
#[derive(Debug, PartialEq)]
pub struct Series {
    pub labels: Labels,
    pub value: f64,
}

/// All series of one metric name, as captured by a snapshot.
#[derive(Debug, Clone)]
pub struct FamilySnapshot {
    pub name: &'static str,
    pub help: &'static str,
    /// Sorted by label tuple.
    pub series: Vec<Arc<Series>>,
}

/// Immutable, ordered view of the registry at one instant.
#[derive(Debug, Clone, Default)]
pub struct RegistrySnapshot {
    families: Vec<FamilySnapshot>,
}

// ─── Internal state ──────────────────────────────────────────────

#[derive(Default)]
struct Inner {
    families: HashMap<&'static str, Family>,
}

struct Family {
    help: &'static str,
    /// Fixed on first write; every later write must match.
    label_keys: Vec<&'static str>,
    series: HashMap<Labels, Arc<Series>>,
}

// ─── Registry impl ───────────────────────────────────────────────

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert one gauge value.
    pub fn set(
        &self,
        metric: MetricDesc,
        labels: &Labels,
        value: f64,
    ) -> Result<(), RegistryError> {
        let keys = labels.keys();
        let series = Arc::new(Series {
            labels: labels.clone(),
            value,
        });

        let mut inner = self.inner.lock();
        let family = inner
            .families
            .entry(metric.name)
            .or_insert_with(|| Family {
                help: metric.help,
                label_keys: keys.clone(),
                series: HashMap::new(),
            });

        if family.label_keys != keys {
            return Err(RegistryError::LabelMismatch {
                name: metric.name,
                expected: family.label_keys.clone(),
                found: keys,
            });
        }

        family.series.insert(series.labels.clone(), series);
        Ok(())
    }

    /// Apply aggregator output in order. Stops at the first mismatch.
    pub fn apply(&self, samples: &[MetricSample]) -> Result<(), RegistryError> {
        for s in samples {
            self.set(s.metric, &s.labels, s.value)?;
        }
        Ok(())
    }

    /// Current value of one series, if it has ever been written.
    #[cfg(test)]
    pub fn get(&self, name: &str, labels: &Labels) -> Option<f64> {
        let inner = self.inner.lock();
        inner
            .families
            .get(name)
            .and_then(|f| f.series.get(labels))
            .map(|s| s.value)
    }

    /// Produce a read-only, ordered view for rendering.
    pub fn snapshot(&self) -> RegistrySnapshot {
        let mut families: Vec<FamilySnapshot> = {
            let inner = self.inner.lock();
            inner
                .families
                .iter()
                .map(|(&name, f)| FamilySnapshot {
                    name,
                    help: f.help,
                    series: f.series.values().cloned().collect(),
                })
                .collect()
        };

        // Ordering work happens outside the lock
        families.sort_unstable_by(|a, b| a.name.cmp(b.name));
        for f in &mut families {
            f.series.sort_unstable_by(|a, b| a.labels.cmp(&b.labels));
        }

        RegistrySnapshot { families }
    }
}

// ─── RegistrySnapshot impl ───────────────────────────────────────

impl RegistrySnapshot {
    /// Families in lexicographic name order.
    pub fn families(&self) -> &[FamilySnapshot] {
        &self.families
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    #[cfg(test)]
    pub fn contains(&self, name: &str) -> bool {
        self.families.iter().any(|f| f.name == name)
    }

    #[cfg(test)]
    pub fn value(&self, name: &str, labels: &Labels) -> Option<f64> {
        self.families
            .iter()
            .find(|f| f.name == name)?
            .series
            .iter()
            .find(|s| &s.labels == labels)
            .map(|s| s.value)
    }
}
