//! YAML schema of the engine config and its validation.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;
use statline_core::error::{Result, StatError};
use statline_core::{MetricKey, ReductionKind};

/// Smallest ingestion queue the engine will run with.
pub const QUEUE_CAPACITY_FLOOR: usize = 20_000;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatConfig {
    pub version: u32,

    #[serde(default)]
    pub engine: EngineSection,

    #[serde(default)]
    pub keys: Vec<KeyConfig>,
}

impl StatConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(StatError::UnsupportedVersion);
        }

        self.engine.validate()?;

        for k in &self.keys {
            if k.group.is_empty() || k.name.is_empty() {
                return Err(StatError::InvalidKey(format!(
                    "keys entry needs group and name (group={:?}, name={:?})",
                    k.group, k.name
                )));
            }
        }
        Ok(())
    }

    /// Key descriptors in declaration order.
    pub fn metric_keys(&self) -> Vec<MetricKey> {
        self.keys.iter().map(KeyConfig::to_metric_key).collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineSection {
    /// Reduction tick period.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Requested ingestion queue capacity; raised to `QUEUE_CAPACITY_FLOOR`.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    #[serde(default = "default_signal_capacity")]
    pub signal_capacity: usize,

    /// How long the reducer waits to hand off a completion signal.
    #[serde(default)]
    pub signal_timeout_ms: u64,

    /// Record watch series for charting.
    #[serde(default = "default_watch")]
    pub watch: bool,
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            queue_capacity: default_queue_capacity(),
            signal_capacity: default_signal_capacity(),
            signal_timeout_ms: 0,
            watch: default_watch(),
        }
    }
}

impl EngineSection {
    pub fn validate(&self) -> Result<()> {
        if !(10..=3_600_000).contains(&self.interval_ms) {
            return Err(StatError::BadConfig(
                "engine.interval_ms must be between 10 and 3600000".into(),
            ));
        }
        if self.signal_capacity == 0 {
            return Err(StatError::BadConfig(
                "engine.signal_capacity must be at least 1".into(),
            ));
        }
        if Duration::from_millis(self.signal_timeout_ms) >= self.interval() {
            return Err(StatError::BadConfig(
                "engine.signal_timeout_ms must be less than interval_ms".into(),
            ));
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn signal_timeout(&self) -> Duration {
        Duration::from_millis(self.signal_timeout_ms)
    }

    pub fn effective_queue_capacity(&self) -> usize {
        self.queue_capacity.max(QUEUE_CAPACITY_FLOOR)
    }
}

fn default_interval_ms() -> u64 {
    1000
}
fn default_queue_capacity() -> usize {
    QUEUE_CAPACITY_FLOOR
}
fn default_signal_capacity() -> usize {
    10
}
fn default_watch() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyConfig {
    pub group: String,
    pub name: String,
    #[serde(default)]
    pub kinds: Vec<ReductionKind>,
    #[serde(default)]
    pub display: BTreeMap<ReductionKind, String>,
}

impl KeyConfig {
    pub fn to_metric_key(&self) -> MetricKey {
        let mut key = MetricKey::new(self.group.clone(), self.name.clone());
        key.mask = self.kinds.iter().copied().collect();
        key.display = self.display.clone();
        key
    }
}
