//! Metric key descriptors.

pub mod kind;

use std::collections::BTreeMap;

pub use kind::{ReductionKind, ReductionMask};

/// Descriptor for one logical metric inside a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricKey {
    pub group: String,
    pub name: String,
    pub mask: ReductionMask,
    /// Per-kind display name override (defaults to `name + suffix`).
    pub display: BTreeMap<ReductionKind, String>,
}

impl MetricKey {
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            mask: ReductionMask::empty(),
            display: BTreeMap::new(),
        }
    }

    /// Request one more reduction kind.
    #[must_use]
    pub fn with(mut self, kind: ReductionKind) -> Self {
        self.mask = self.mask.with(kind);
        self
    }

    /// Override the display name used for `kind`.
    #[must_use]
    pub fn display_as(mut self, kind: ReductionKind, display: impl Into<String>) -> Self {
        self.display.insert(kind, display.into());
        self
    }

    pub fn display_name(&self, kind: ReductionKind) -> String {
        match self.display.get(&kind) {
            Some(d) => d.clone(),
            None => format!("{}{}", self.name, kind.suffix()),
        }
    }

    /// Gauge keys overwrite their counter instead of accumulating.
    pub fn is_gauge(&self) -> bool {
        self.mask.contains(ReductionKind::Value)
    }
}
