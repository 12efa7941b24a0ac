//! Cumulative per-key counters.
//!
//! The engine keeps three generations of this table: `current` (written by the
//! drain worker under the counters lock), and the reducer-owned `tick_start` and
//! `previous` copies the window math runs against.

use std::collections::HashMap;

use crate::error::{Result, StatError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Slot {
    value: i64,
    gauge: bool,
}

#[derive(Debug, Clone, Default)]
pub struct CounterTable {
    groups: HashMap<String, HashMap<String, Slot>>,
}

impl CounterTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the slot for a key. Idempotent: an existing slot keeps its value
    /// and mode.
    pub fn declare(&mut self, group: &str, key: &str, gauge: bool) {
        self.groups
            .entry(group.to_string())
            .or_default()
            .entry(key.to_string())
            .or_insert(Slot { value: 0, gauge });
    }

    /// Fold one event: gauges are overwritten, everything else accumulates.
    pub fn apply(&mut self, group: &str, key: &str, value: i64) -> Result<()> {
        let slot = self
            .groups
            .get_mut(group)
            .and_then(|g| g.get_mut(key))
            .ok_or_else(|| StatError::UnregisteredKey {
                group: group.to_string(),
                key: key.to_string(),
            })?;

        if slot.gauge {
            slot.value = value;
        } else {
            slot.value = slot.value.wrapping_add(value);
        }
        Ok(())
    }

    /// Current value, zero for keys this generation has not seen yet.
    pub fn get(&self, group: &str, key: &str) -> i64 {
        self.groups
            .get(group)
            .and_then(|g| g.get(key))
            .map(|s| s.value)
            .unwrap_or(0)
    }

    /// Overwrite this generation with `other`, reusing allocations.
    pub fn copy_from(&mut self, other: &CounterTable) {
        self.groups.clone_from(&other.groups);
    }
}
