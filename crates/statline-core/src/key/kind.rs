//! Reduction kinds and the normalized bitmask selecting them.

use serde::{Deserialize, Serialize};

/// How raw events for a key become a reported number.
///
/// Discriminants are bit positions; `Ord` follows bit order, which is also the
/// order the reducer evaluates kinds in (`PeakRate` reads this tick's `Rate`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ReductionKind {
    /// Events per second over the last window.
    Rate = 0x01,
    /// Running maximum of `Rate` since start. Never reset.
    PeakRate = 0x02,
    /// Cumulative total since start (not a per-window sum).
    Sum = 0x04,
    /// Last written instantaneous value (gauge).
    Value = 0x08,
}

impl ReductionKind {
    /// All kinds in evaluation order.
    pub const ALL: [ReductionKind; 4] = [
        ReductionKind::Rate,
        ReductionKind::PeakRate,
        ReductionKind::Sum,
        ReductionKind::Value,
    ];

    pub fn bit(self) -> u8 {
        self as u8
    }

    /// Name used as the kind level of the structured snapshot.
    pub fn as_str(self) -> &'static str {
        match self {
            ReductionKind::Rate => "qps",
            ReductionKind::PeakRate => "qps_peak",
            ReductionKind::Sum => "sum",
            ReductionKind::Value => "val",
        }
    }

    /// Suffix appended to a key name when no display override exists.
    pub fn suffix(self) -> &'static str {
        match self {
            ReductionKind::Rate => "_qps",
            ReductionKind::PeakRate => "_qpk",
            ReductionKind::Sum => "_sum",
            ReductionKind::Value => "_val",
        }
    }

    /// Rate-family kinds produce floating point results.
    pub fn is_rate_family(self) -> bool {
        matches!(self, ReductionKind::Rate | ReductionKind::PeakRate)
    }
}

/// Set of requested reduction kinds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ReductionMask(u8);

impl ReductionMask {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn with(self, kind: ReductionKind) -> Self {
        Self(self.0 | kind.bit())
    }

    pub fn contains(self, kind: ReductionKind) -> bool {
        self.0 & kind.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Apply the implication rules: `PeakRate` turns `Rate` on, and `Value`
    /// excludes every other kind.
    ///
    /// Registration is the only caller; nothing downstream re-derives these rules.
    #[must_use]
    pub fn normalized(self) -> Self {
        if self.contains(ReductionKind::Value) {
            return Self(ReductionKind::Value.bit());
        }
        if self.contains(ReductionKind::PeakRate) {
            return self.with(ReductionKind::Rate);
        }
        self
    }

    /// Enabled kinds in bit order.
    pub fn kinds(self) -> impl Iterator<Item = ReductionKind> {
        ReductionKind::ALL
            .into_iter()
            .filter(move |k| self.contains(*k))
    }
}

impl FromIterator<ReductionKind> for ReductionMask {
    fn from_iter<I: IntoIterator<Item = ReductionKind>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

impl From<ReductionKind> for ReductionMask {
    fn from(kind: ReductionKind) -> Self {
        Self::empty().with(kind)
    }
}
