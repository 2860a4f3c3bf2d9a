//! kindgate plugin library entry.
//!
//! Wires the admission policy, its configuration, and the stdio protocol loop
//! into the write-policy plugin a relay spawns. It is consumed by the binary
//! (`main.rs`) and by integration tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod config;
pub mod policy;
pub mod shutdown;
pub mod transport;
