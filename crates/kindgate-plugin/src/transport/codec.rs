//! Decode-once codec for the line protocol.
//!
//! - Input unit (bytes up to `\n`) => `Request`, or a decode error
//! - Verdict => one output line including its terminator

use kindgate_core::{error::Result, KindgateError, Request, Verdict};

pub const DECODE_ERROR_PREFIX: &str = "Plugin parsing error";

/// Decode one unit. A trailing `\r` is tolerated for CRLF producers.
pub fn decode(unit: &[u8]) -> Result<Request> {
    let unit = unit.strip_suffix(b"\r").unwrap_or(unit);
    Request::decode(unit)
}

/// Reject sent back for a unit that could not be decoded.
pub fn decode_error_verdict(err: &KindgateError) -> Verdict {
    Verdict::reject(format!("{DECODE_ERROR_PREFIX}: {err}"))
}

pub fn encode(verdict: &Verdict) -> String {
    let mut line = verdict.to_line();
    line.push('\n');
    line
}
