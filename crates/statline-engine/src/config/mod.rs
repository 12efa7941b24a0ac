//! Engine config loader (strict parsing).

pub mod schema;

use std::fs;

use statline_core::error::{Result, StatError};

pub use schema::{EngineSection, KeyConfig, StatConfig, QUEUE_CAPACITY_FLOOR};

pub fn load_from_file(path: &str) -> Result<StatConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| StatError::BadConfig(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<StatConfig> {
    let cfg: StatConfig = serde_yaml::from_str(s)
        .map_err(|e| StatError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
