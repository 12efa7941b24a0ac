//! Key registry, per-kind result tables and watch series.
//!
//! Everything here lives behind one lock in the engine (the registry/result
//! lock): registration, the reducer's per-tick writes and structured reads all
//! go through `Registry`.

use std::collections::{BTreeMap, HashMap};

use crate::error::{Result, StatError};
use crate::key::{MetricKey, ReductionKind};
use crate::watch::WatchSeries;

/// One reduced value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sample {
    /// Rate-family result (events per second).
    Float(f64),
    /// Sum/Value result.
    Int(i64),
}

impl Sample {
    pub fn as_f64(self) -> f64 {
        match self {
            Sample::Float(v) => v,
            Sample::Int(v) => v as f64,
        }
    }

    /// Integer view; rate values are truncated toward zero.
    pub fn as_i64(self) -> i64 {
        match self {
            Sample::Float(v) => v as i64,
            Sample::Int(v) => v,
        }
    }
}

/// Results of one kind for one group, typed by kind family.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultTable {
    Float(BTreeMap<String, f64>),
    Int(BTreeMap<String, i64>),
}

impl ResultTable {
    pub fn for_kind(kind: ReductionKind) -> Self {
        if kind.is_rate_family() {
            ResultTable::Float(BTreeMap::new())
        } else {
            ResultTable::Int(BTreeMap::new())
        }
    }

    pub fn get(&self, name: &str) -> Option<Sample> {
        match self {
            ResultTable::Float(m) => m.get(name).copied().map(Sample::Float),
            ResultTable::Int(m) => m.get(name).copied().map(Sample::Int),
        }
    }

    pub fn insert(&mut self, name: &str, sample: Sample) {
        match self {
            ResultTable::Float(m) => {
                m.insert(name.to_string(), sample.as_f64());
            }
            ResultTable::Int(m) => {
                m.insert(name.to_string(), sample.as_i64());
            }
        }
    }

    pub fn iter(&self) -> Box<dyn Iterator<Item = (&str, Sample)> + '_> {
        match self {
            ResultTable::Float(m) => Box::new(m.iter().map(|(k, v)| (k.as_str(), Sample::Float(*v)))),
            ResultTable::Int(m) => Box::new(m.iter().map(|(k, v)| (k.as_str(), Sample::Int(*v)))),
        }
    }
}

/// A key name registered under one kind, with its resolved display name.
#[derive(Debug, Clone)]
pub(crate) struct KindEntry {
    pub(crate) name: String,
    pub(crate) display: String,
}

#[derive(Debug, Default)]
pub(crate) struct GroupState {
    pub(crate) keys: HashMap<String, MetricKey>,
    /// Sorted by `name`, deduplicated.
    pub(crate) names: BTreeMap<ReductionKind, Vec<KindEntry>>,
    pub(crate) results: BTreeMap<ReductionKind, ResultTable>,
    /// Keyed by display name.
    pub(crate) watch: HashMap<String, WatchSeries>,
}

impl GroupState {
    pub(crate) fn result(&self, kind: ReductionKind, name: &str) -> Option<Sample> {
        self.results.get(&kind).and_then(|t| t.get(name))
    }
}

/// Nested `group -> kind name -> display name -> value` view.
pub type Structured = BTreeMap<String, BTreeMap<String, BTreeMap<String, i64>>>;

#[derive(Debug)]
pub struct Registry {
    pub(crate) groups: BTreeMap<String, GroupState>,
    pub(crate) watch_enabled: bool,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self {
            groups: BTreeMap::new(),
            watch_enabled: true,
        }
    }

    /// Whether the reducer appends to watch series.
    pub fn with_watch(mut self, enabled: bool) -> Self {
        self.watch_enabled = enabled;
        self
    }

    /// Register a key.
    ///
    /// Returns the stored (normalized) key when it is new, `None` when the name
    /// already exists in the group. The first registration fixes the mask.
    pub fn register(&mut self, mut key: MetricKey) -> Result<Option<&MetricKey>> {
        if key.group.is_empty() {
            return Err(StatError::InvalidKey("group must not be empty".into()));
        }
        if key.name.is_empty() {
            return Err(StatError::InvalidKey("name must not be empty".into()));
        }

        key.mask = key.mask.normalized();

        let state = self.groups.entry(key.group.clone()).or_default();
        if state.keys.contains_key(&key.name) {
            return Ok(None);
        }

        for kind in key.mask.kinds() {
            let display = key.display_name(kind);
            let names = state.names.entry(kind).or_default();
            if let Err(idx) = names.binary_search_by(|e| e.name.as_str().cmp(&key.name)) {
                names.insert(
                    idx,
                    KindEntry {
                        name: key.name.clone(),
                        display: display.clone(),
                    },
                );
            }
            state
                .results
                .entry(kind)
                .or_insert_with(|| ResultTable::for_kind(kind));
            state.watch.entry(display).or_default();
        }

        tracing::debug!(group = %key.group, name = %key.name, mask = key.mask.bits(), "metric key registered");

        let name = key.name.clone();
        let stored = state.keys.entry(name).or_insert(key);
        Ok(Some(stored))
    }

    pub fn key(&self, group: &str, name: &str) -> Option<&MetricKey> {
        self.groups.get(group).and_then(|g| g.keys.get(name))
    }

    /// Known groups in sorted order.
    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Names registered for `kind` in `group`, sorted.
    pub fn names(&self, group: &str, kind: ReductionKind) -> Vec<&str> {
        self.groups
            .get(group)
            .and_then(|g| g.names.get(&kind))
            .map(|v| v.iter().map(|e| e.name.as_str()).collect())
            .unwrap_or_default()
    }

    /// Last published result for a key/kind.
    pub fn result(&self, group: &str, kind: ReductionKind, name: &str) -> Option<Sample> {
        self.groups.get(group).and_then(|g| g.result(kind, name))
    }

    pub fn results(&self, group: &str, kind: ReductionKind) -> Option<&ResultTable> {
        self.groups.get(group).and_then(|g| g.results.get(&kind))
    }

    pub fn series(&self, group: &str, display: &str) -> Option<&WatchSeries> {
        self.groups.get(group).and_then(|g| g.watch.get(display))
    }

    /// Structured view keyed by display name. Rate-family values are truncated
    /// to integers here only; the result tables keep full precision.
    pub fn structured(&self) -> Structured {
        let mut out = Structured::new();
        for (group, state) in &self.groups {
            let kinds = out.entry(group.clone()).or_default();
            for (kind, table) in &state.results {
                let values: BTreeMap<String, i64> = table
                    .iter()
                    .map(|(name, sample)| {
                        let display = state
                            .keys
                            .get(name)
                            .map(|k| k.display_name(*kind))
                            .unwrap_or_else(|| name.to_string());
                        (display, sample.as_i64())
                    })
                    .collect();
                kinds.insert(kind.as_str().to_string(), values);
            }
        }
        out
    }
}
