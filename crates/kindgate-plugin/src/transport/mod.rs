//! Transport layer (line protocol over stdio).
//!
//! Exposes the codec that turns one input unit into a request or a ready-made
//! decode-error verdict, and the loop that drives it over a pair of streams.

pub mod codec;
pub mod stdio;

pub use stdio::{run, LoopReport, LoopStats, StopReason};
