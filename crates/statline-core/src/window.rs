//! Windowed reduction: turns two counter generations into per-tick results.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::counters::CounterTable;
use crate::key::ReductionKind;
use crate::registry::{GroupState, Registry, ResultTable, Sample};

/// Inputs of one tick.
#[derive(Debug, Clone, Copy)]
pub struct Window<'a> {
    /// Counters frozen at the start of this tick.
    pub tick_start: &'a CounterTable,
    /// Counters frozen at the start of the previous computed tick.
    pub previous: &'a CounterTable,
    /// Seconds between the two.
    pub elapsed_secs: f64,
}

impl Window<'_> {
    /// A window with no positive elapsed time cannot produce a rate.
    pub fn is_degenerate(&self) -> bool {
        self.elapsed_secs.is_nan() || self.elapsed_secs <= 0.0
    }
}

/// Rendered text line of one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupLine {
    pub group: String,
    pub line: String,
}

impl Registry {
    /// Compute one tick for every group.
    ///
    /// Kinds are evaluated in bit order and names in sorted order, so `PeakRate`
    /// always sees this tick's `Rate` and the text output is deterministic.
    /// Returns `None` (and changes nothing) for a degenerate window. Groups
    /// without any enabled kind produce no line.
    pub fn reduce(&mut self, w: &Window<'_>) -> Option<Vec<GroupLine>> {
        if w.is_degenerate() {
            return None;
        }

        let watch_enabled = self.watch_enabled;
        let mut lines = Vec::with_capacity(self.groups.len());

        for (group, state) in self.groups.iter_mut() {
            let GroupState {
                names,
                results,
                watch,
                ..
            } = state;
            let mut line = String::new();

            // BTreeMap order over kinds is bit order.
            for (&kind, entries) in names.iter() {
                for entry in entries {
                    let sample = match kind {
                        ReductionKind::Rate => {
                            let delta = w
                                .tick_start
                                .get(group, &entry.name)
                                .wrapping_sub(w.previous.get(group, &entry.name));
                            Sample::Float(delta as f64 / w.elapsed_secs)
                        }
                        ReductionKind::PeakRate => {
                            let rate = last_f64(results, ReductionKind::Rate, &entry.name);
                            let peak = last_f64(results, ReductionKind::PeakRate, &entry.name);
                            Sample::Float(peak.max(rate))
                        }
                        ReductionKind::Sum | ReductionKind::Value => {
                            Sample::Int(w.tick_start.get(group, &entry.name))
                        }
                    };

                    results
                        .entry(kind)
                        .or_insert_with(|| ResultTable::for_kind(kind))
                        .insert(&entry.name, sample);

                    if watch_enabled {
                        if let Some(series) = watch.get_mut(&entry.display) {
                            series.push(sample.as_f64());
                        }
                    }

                    let _ = match sample {
                        Sample::Float(v) => write!(line, "{}={:.0}/s, ", entry.display, v),
                        Sample::Int(v) => write!(line, "{}={}, ", entry.display, v),
                    };
                }
            }

            if line.is_empty() {
                continue;
            }
            line.truncate(line.len() - 2);
            lines.push(GroupLine {
                group: group.clone(),
                line: format!("{group}: {line}"),
            });
        }

        Some(lines)
    }
}

fn last_f64(results: &BTreeMap<ReductionKind, ResultTable>, kind: ReductionKind, name: &str) -> f64 {
    results
        .get(&kind)
        .and_then(|t| t.get(name))
        .map(Sample::as_f64)
        .unwrap_or(0.0)
}
