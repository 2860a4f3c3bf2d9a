//! kindgate core: wire contracts, the event view, and the shared error type.
//!
//! This crate defines the line protocol spoken with the host relay (requests in,
//! verdicts out) and the event shape the admission policy reasons about. It
//! carries no runtime or I/O dependencies so the decision path stays pure and
//! can be exercised without a process around it.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed input surfaces as `KindgateError` or as a `reject` verdict, never
//! as a crash of the relay's write pipeline.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod event;
pub mod protocol;

/// Shared result type.
pub use error::{KindgateError, Result};
pub use event::{Event, Kind};
pub use protocol::{Request, Verdict};
