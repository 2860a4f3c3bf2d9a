//! Allowlist compilation and matching utilities.
//!
//! Entries are exact kinds (`3`) or inclusive ranges (`10000-19999`, handy for
//! the replaceable-event block).

use std::fmt;

use kindgate_core::error::{KindgateError, Result};

use crate::config::{AllowEntry, KindSpec};

/// Compiled allowlist rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindRule {
    Exact(u64),
    Range { lo: u64, hi: u64 },
}

impl KindRule {
    pub fn matches(self, kind: u64) -> bool {
        match self {
            KindRule::Exact(k) => k == kind,
            KindRule::Range { lo, hi } => (lo..=hi).contains(&kind),
        }
    }
}

impl fmt::Display for KindRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KindRule::Exact(k) => write!(f, "{k}"),
            KindRule::Range { lo, hi } => write!(f, "{lo}-{hi}"),
        }
    }
}

#[derive(Debug, Clone)]
struct LabeledRule {
    rule: KindRule,
    label: Option<String>,
}

pub fn compile_kind_rule(spec: &KindSpec) -> Result<KindRule> {
    let s = match spec {
        KindSpec::Code(k) => return Ok(KindRule::Exact(*k)),
        KindSpec::Text(s) => s.trim(),
    };

    let parse = |part: &str| -> Result<u64> {
        part.trim().parse().map_err(|_| {
            KindgateError::Config(format!(
                "invalid allowed_kinds entry: {s} (expected kind or lo-hi)"
            ))
        })
    };

    match s.split_once('-') {
        None => Ok(KindRule::Exact(parse(s)?)),
        Some((lo_s, hi_s)) => {
            let (lo, hi) = (parse(lo_s)?, parse(hi_s)?);
            if lo > hi {
                return Err(KindgateError::Config(format!(
                    "invalid allowed_kinds range: {s} (low end above high end)"
                )));
            }
            Ok(KindRule::Range { lo, hi })
        }
    }
}

/// Compiled kind allowlist with optional per-entry labels.
#[derive(Debug, Clone)]
pub struct KindAllowlist {
    rules: Vec<LabeledRule>,
}

impl KindAllowlist {
    pub fn compile(entries: &[AllowEntry]) -> Result<Self> {
        let mut rules = Vec::with_capacity(entries.len());
        for e in entries {
            let rule = compile_kind_rule(&e.kind)?;
            let label = e.label.as_ref().filter(|l| !l.trim().is_empty()).cloned();
            rules.push(LabeledRule { rule, label });
        }
        Ok(Self { rules })
    }

    /// Build from a static `(kind, label)` table.
    pub fn from_table(table: &[(u64, &str)]) -> Self {
        let rules = table
            .iter()
            .map(|(kind, label)| LabeledRule {
                rule: KindRule::Exact(*kind),
                label: Some((*label).to_string()),
            })
            .collect();
        Self { rules }
    }

    pub fn contains(&self, kind: u64) -> bool {
        self.rules.iter().any(|r| r.rule.matches(kind))
    }

    /// Label of the first matching entry that has one.
    pub fn label(&self, kind: u64) -> Option<&str> {
        self.rules
            .iter()
            .filter(|r| r.rule.matches(kind))
            .find_map(|r| r.label.as_deref())
    }

    /// `3, 10002` style listing for log lines.
    pub fn summary(&self) -> String {
        self.rules
            .iter()
            .map(|r| r.rule.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
