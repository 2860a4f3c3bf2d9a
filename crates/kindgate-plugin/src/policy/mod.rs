//! Admission policy layer (kind allowlist, well-formedness).
//!
//! Compiles the policy configuration into lookup structures and exposes the
//! `AdmissionPolicy` seam the protocol loop evaluates events through. Nothing
//! in here performs I/O or keeps per-event state.

pub mod allowlist;
pub mod engine;

pub use allowlist::{KindAllowlist, KindRule};
pub use engine::{AdmissionPolicy, KindPolicy, KindSet, RequiredFields, WellFormedness};
