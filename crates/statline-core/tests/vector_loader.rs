//! JSON reduction-scenario loader shared by core tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs;

use serde::Deserialize;

use statline_core::{MetricKey, ReductionKind};

#[derive(Debug, Deserialize)]
pub struct ScenarioVector {
    pub description: String,
    pub keys: Vec<KeyDef>,
    pub ticks: Vec<TickDef>,
}

#[derive(Debug, Deserialize)]
pub struct KeyDef {
    pub group: String,
    pub name: String,
    pub kinds: Vec<ReductionKind>,
    #[serde(default)]
    pub display: BTreeMap<ReductionKind, String>,
}

impl KeyDef {
    pub fn to_metric_key(&self) -> MetricKey {
        let mut key = MetricKey::new(self.group.clone(), self.name.clone());
        for k in &self.kinds {
            key = key.with(*k);
        }
        for (k, d) in &self.display {
            key = key.display_as(*k, d.clone());
        }
        key
    }
}

#[derive(Debug, Deserialize)]
pub struct TickDef {
    pub elapsed_secs: f64,
    pub events: Vec<(String, String, i64)>,
    pub expect: BTreeMap<String, BTreeMap<String, BTreeMap<String, i64>>>,
    #[serde(default)]
    pub absent_kinds: BTreeMap<String, Vec<String>>,
    /// (group, name, expected Rate result)
    #[serde(default)]
    pub rates: Vec<(String, String, f64)>,
    #[serde(default)]
    pub lines: BTreeMap<String, String>,
}

pub fn load(name: &str) -> ScenarioVector {
    let s = fs::read_to_string(format!("tests/vectors/{name}")).unwrap();
    serde_json::from_str(&s).unwrap()
}
