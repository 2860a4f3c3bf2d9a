//! Line protocol spoken with the host relay.
//!
//! - Inbound: one JSON request object per line, carrying the candidate event
//!   either as a nested object or as a JSON-encoded string.
//! - Outbound: one `{"action":...,"msg":...}` object per line.
//!
//! Decoding is panic-free: any malformed line becomes `KindgateError::Decode`,
//! which the loop answers with a reject instead of stopping.

pub mod request;
pub mod verdict;

pub use request::{Request, RequestMeta};
pub use verdict::Verdict;
