use kindgate_core::error::{KindgateError, Result};
use serde::Deserialize;

/// Kinds a discovery relay syncs: contact lists and relay lists.
pub const DISCOVERY_RELAY_KINDS: &[(u64, &str)] = &[(3, "contact list"), (10002, "relay list")];

pub const DISCOVERY_RELAY_PURPOSE: &str = "discovery relay sync";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyConfig {
    pub version: u32,

    #[serde(default = "default_purpose")]
    pub purpose: String,

    pub allowed_kinds: Vec<AllowEntry>,
}

impl PolicyConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(KindgateError::UnsupportedVersion);
        }
        if self.purpose.trim().is_empty() {
            return Err(KindgateError::Config("purpose must not be empty".into()));
        }
        if self.allowed_kinds.is_empty() {
            return Err(KindgateError::Config(
                "allowed_kinds must not be empty (every event would be rejected)".into(),
            ));
        }
        Ok(())
    }
}

fn default_purpose() -> String {
    DISCOVERY_RELAY_PURPOSE.into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AllowEntry {
    pub kind: KindSpec,
    /// Shown in accept log lines only.
    #[serde(default)]
    pub label: Option<String>,
}

/// `3` or `"3"` for one kind, `"10000-19999"` for an inclusive range.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum KindSpec {
    Code(u64),
    Text(String),
}
