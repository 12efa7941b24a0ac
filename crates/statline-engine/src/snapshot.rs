//! Published per-group text lines.
//!
//! Guarded by its own lock so text readers never contend with the registry
//! lock the reducer holds while computing.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use statline_core::GroupLine;

#[derive(Default)]
pub struct SnapshotStore {
    lines: RwLock<BTreeMap<String, String>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a group visible with an empty line until its first tick.
    pub fn ensure_group(&self, group: &str) {
        let mut lines = self.lines.write().unwrap_or_else(PoisonError::into_inner);
        if !lines.contains_key(group) {
            lines.insert(group.to_string(), String::new());
        }
    }

    pub fn publish(&self, group_lines: Vec<GroupLine>) {
        let mut lines = self.lines.write().unwrap_or_else(PoisonError::into_inner);
        for gl in group_lines {
            lines.insert(gl.group, gl.line);
        }
    }

    /// One line per known group, sorted by group name.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }
}
