//! Policy config loader (strict parsing).
//!
//! The built-in discovery-relay table is the default; a YAML file can replace
//! it at startup. Either way the result is fixed for the life of the process.

pub mod schema;

use std::fs;

use kindgate_core::error::{KindgateError, Result};

pub use schema::{
    AllowEntry, KindSpec, PolicyConfig, DISCOVERY_RELAY_KINDS, DISCOVERY_RELAY_PURPOSE,
};

pub fn load_from_file(path: &str) -> Result<PolicyConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| KindgateError::Config(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<PolicyConfig> {
    let cfg: PolicyConfig = serde_yaml::from_str(s)
        .map_err(|e| KindgateError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
