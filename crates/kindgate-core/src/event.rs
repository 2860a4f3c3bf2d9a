//! Typed view over a candidate Nostr event.
//!
//! Events arrive as loosely shaped JSON. Instead of deserializing straight into
//! a strict struct (which would turn a wrong-typed field into a decode error),
//! each inspected field is read from the object explicitly and anything that
//! does not have the expected JSON type is treated as absent. Fields this crate
//! does not inspect (`tags`, `content`, ...) are kept opaque in `extra`.

use std::fmt;

use serde_json::{Map, Value};

/// Classification code of an event, as found on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    /// Non-negative whole number (`3` and `3.0` both qualify).
    Code(u64),
    /// Present but not a non-negative whole number; holds the raw JSON text.
    Invalid(String),
    Missing,
}

impl Kind {
    fn from_value(v: Option<&Value>) -> Self {
        match v {
            None | Some(Value::Null) => Kind::Missing,
            Some(Value::Number(n)) => match n.as_u64().or_else(|| integral_f64(n)) {
                Some(code) => Kind::Code(code),
                None => Kind::Invalid(n.to_string()),
            },
            Some(other) => Kind::Invalid(other.to_string()),
        }
    }

    pub fn code(&self) -> Option<u64> {
        match self {
            Kind::Code(c) => Some(*c),
            _ => None,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Code(c) => write!(f, "{c}"),
            Kind::Invalid(raw) => f.write_str(raw),
            Kind::Missing => f.write_str("missing"),
        }
    }
}

/// Candidate event.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Event id (hex sha256 on a real relay; not verified here).
    pub id: Option<String>,
    /// Author public key.
    pub pubkey: Option<String>,
    /// Creation time (unix seconds). Zero is treated as absent.
    pub created_at: Option<i64>,
    /// Schnorr signature (not verified here).
    pub sig: Option<String>,
    pub kind: Kind,
    /// Uninspected fields.
    pub extra: Map<String, Value>,
}

impl Event {
    /// Build the view from a decoded JSON object. Never fails: shape problems
    /// are reflected as absent fields and judged by the policy.
    pub fn from_map(mut obj: Map<String, Value>) -> Self {
        let id = take_str(&mut obj, "id");
        let pubkey = take_str(&mut obj, "pubkey");
        let sig = take_str(&mut obj, "sig");
        let created_at = obj
            .remove("created_at")
            .and_then(|v| v.as_i64().or_else(|| v.as_f64().and_then(integral_i64)))
            .filter(|ts| *ts != 0);
        let kind = Kind::from_value(obj.remove("kind").as_ref());

        Self {
            id,
            pubkey,
            created_at,
            sig,
            kind,
            extra: obj,
        }
    }

    /// Names of required fields that are absent or empty, in wire order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.id.is_none() {
            out.push("id");
        }
        if self.pubkey.is_none() {
            out.push("pubkey");
        }
        if self.created_at.is_none() {
            out.push("created_at");
        }
        if self.sig.is_none() {
            out.push("sig");
        }
        out
    }

    /// Pubkey prefix for log lines (`abcdef01...`).
    pub fn short_pubkey(&self) -> String {
        match self.pubkey.as_deref() {
            Some(pk) => match pk.get(..8) {
                Some(prefix) if pk.len() > 8 => format!("{prefix}..."),
                _ => pk.to_string(),
            },
            None => "<none>".to_string(),
        }
    }
}

// `3.0` and `1.7e9` are the same numbers as `3` and `1700000000` to most JSON
// producers; only whole, in-range values qualify.
fn integral_f64(n: &serde_json::Number) -> Option<u64> {
    let f = n.as_f64()?;
    if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f < u64::MAX as f64 {
        Some(f as u64)
    } else {
        None
    }
}

fn integral_i64(f: f64) -> Option<i64> {
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

// Empty strings count as absent.
fn take_str(obj: &mut Map<String, Value>, key: &str) -> Option<String> {
    match obj.remove(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    }
}
