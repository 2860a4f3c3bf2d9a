use std::collections::BTreeSet;

use kindgate_core::{Event, Kind, Verdict};
use kindgate_core::error::Result;

use crate::config::{PolicyConfig, DISCOVERY_RELAY_KINDS, DISCOVERY_RELAY_PURPOSE};

use super::allowlist::KindAllowlist;

pub const MISSING_FIELDS_MSG: &str = "Event missing required fields";

/// Decision seam used by the protocol loop.
///
/// `evaluate` must be pure: same event in, same verdict out, no I/O. The two
/// other methods only feed diagnostics.
pub trait AdmissionPolicy {
    fn evaluate(&self, event: &Event) -> Verdict;

    fn kind_label(&self, _kind: u64) -> Option<&str> {
        None
    }

    fn allowed_summary(&self) -> String {
        String::new()
    }
}

/// Structural predicate deciding whether an event is complete enough to admit.
pub trait WellFormedness {
    fn is_well_formed(&self, event: &Event) -> bool;
}

/// Set of admissible kinds.
pub trait KindSet {
    fn contains(&self, kind: u64) -> bool;

    fn label(&self, _kind: u64) -> Option<&str> {
        None
    }

    fn summary(&self) -> String;
}

/// Requires non-empty `id`, `pubkey`, `created_at` and `sig`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequiredFields;

impl WellFormedness for RequiredFields {
    fn is_well_formed(&self, event: &Event) -> bool {
        event.missing_fields().is_empty()
    }
}

impl<F> WellFormedness for F
where
    F: Fn(&Event) -> bool,
{
    fn is_well_formed(&self, event: &Event) -> bool {
        self(event)
    }
}

impl KindSet for KindAllowlist {
    fn contains(&self, kind: u64) -> bool {
        KindAllowlist::contains(self, kind)
    }
    fn label(&self, kind: u64) -> Option<&str> {
        KindAllowlist::label(self, kind)
    }
    fn summary(&self) -> String {
        KindAllowlist::summary(self)
    }
}

impl KindSet for BTreeSet<u64> {
    fn contains(&self, kind: u64) -> bool {
        BTreeSet::contains(self, &kind)
    }
    fn summary(&self) -> String {
        self.iter().map(u64::to_string).collect::<Vec<_>>().join(", ")
    }
}

/// Allowlist-over-kind policy. Construct once at startup; immutable afterwards.
#[derive(Debug, Clone)]
pub struct KindPolicy<K = KindAllowlist, W = RequiredFields> {
    kinds: K,
    shape: W,
    purpose: String,
}

impl KindPolicy {
    /// Contact lists and relay lists only.
    pub fn discovery_relay() -> Self {
        Self::new(
            KindAllowlist::from_table(DISCOVERY_RELAY_KINDS),
            RequiredFields,
            DISCOVERY_RELAY_PURPOSE,
        )
    }

    pub fn from_config(cfg: &PolicyConfig) -> Result<Self> {
        cfg.validate()?;
        let kinds = KindAllowlist::compile(&cfg.allowed_kinds)?;
        Ok(Self::new(kinds, RequiredFields, cfg.purpose.trim()))
    }
}

impl<K, W> KindPolicy<K, W> {
    pub fn new(kinds: K, shape: W, purpose: impl Into<String>) -> Self {
        Self {
            kinds,
            shape,
            purpose: purpose.into(),
        }
    }

    pub fn purpose(&self) -> &str {
        &self.purpose
    }

    /// Swap the allowed set, keeping the structural check.
    pub fn with_kinds<K2>(self, kinds: K2) -> KindPolicy<K2, W> {
        KindPolicy {
            kinds,
            shape: self.shape,
            purpose: self.purpose,
        }
    }

    /// Swap the structural check, keeping the allowed set.
    pub fn with_shape<W2>(self, shape: W2) -> KindPolicy<K, W2> {
        KindPolicy {
            kinds: self.kinds,
            shape,
            purpose: self.purpose,
        }
    }
}

impl<K: KindSet, W: WellFormedness> AdmissionPolicy for KindPolicy<K, W> {
    fn evaluate(&self, event: &Event) -> Verdict {
        if !self.shape.is_well_formed(event) {
            return Verdict::reject(MISSING_FIELDS_MSG);
        }

        let allowed = match &event.kind {
            Kind::Code(k) => self.kinds.contains(*k),
            Kind::Invalid(_) | Kind::Missing => false,
        };
        if !allowed {
            return Verdict::reject(format!(
                "Event kind {} not allowed for {}",
                event.kind, self.purpose
            ));
        }

        Verdict::Accept
    }

    fn kind_label(&self, kind: u64) -> Option<&str> {
        self.kinds.label(kind)
    }

    fn allowed_summary(&self) -> String {
        self.kinds.summary()
    }
}
