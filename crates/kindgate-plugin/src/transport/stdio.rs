//! Protocol loop (stdio transport).
//!
//! Responsibilities:
//! - Read one unit at a time, decode it, evaluate it, write exactly one verdict
//! - Flush after every verdict so the relay is never left waiting
//! - Stop on end of input or when the shutdown future resolves
//!
//! Shutdown is only observed while waiting for the next unit. Once a unit has
//! been read, decode/evaluate/write always run to completion.

use std::future::Future;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use kindgate_core::error::{KindgateError, Result};
use kindgate_core::{Kind, Request, Verdict};

use crate::policy::AdmissionPolicy;

use super::codec;

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    EndOfInput,
    Signal,
}

impl StopReason {
    pub fn as_str(self) -> &'static str {
        match self {
            StopReason::EndOfInput => "end of input",
            StopReason::Signal => "signal",
        }
    }
}

/// Per-run totals (diagnostics only).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoopStats {
    pub requests: u64,
    pub accepted: u64,
    pub rejected: u64,
    /// Subset of `rejected`.
    pub decode_errors: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopReport {
    pub stop: StopReason,
    pub stats: LoopStats,
}

/// Drive the request/response cycle until end of input or shutdown.
///
/// Per-event problems never end the loop; only read/write failures do.
pub async fn run<R, W, P, S>(
    reader: R,
    mut writer: W,
    policy: &P,
    shutdown: S,
) -> Result<LoopReport>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    P: AdmissionPolicy + ?Sized,
    S: Future<Output = ()>,
{
    // `next_segment` is cancel safe, so losing the race to shutdown drops nothing
    // that was already buffered for a later call.
    let mut units = reader.split(b'\n');
    tokio::pin!(shutdown);

    let mut stats = LoopStats::default();
    let stop = loop {
        let next = tokio::select! {
            biased;
            _ = &mut shutdown => None,
            next = units.next_segment() => Some(next),
        };
        let Some(next) = next else {
            break StopReason::Signal;
        };

        let unit = match next.map_err(|e| KindgateError::Stream(format!("read failed: {e}")))? {
            Some(unit) => unit,
            None => break StopReason::EndOfInput,
        };

        stats.requests += 1;
        let span = tracing::debug_span!("event", seq = stats.requests);
        let verdict = span.in_scope(|| admit(&unit, policy, &mut stats));

        writer
            .write_all(codec::encode(&verdict).as_bytes())
            .await
            .map_err(|e| KindgateError::Stream(format!("write failed: {e}")))?;
        writer
            .flush()
            .await
            .map_err(|e| KindgateError::Stream(format!("flush failed: {e}")))?;
    };

    writer
        .flush()
        .await
        .map_err(|e| KindgateError::Stream(format!("flush failed: {e}")))?;

    Ok(LoopReport { stop, stats })
}

fn admit<P>(unit: &[u8], policy: &P, stats: &mut LoopStats) -> Verdict
where
    P: AdmissionPolicy + ?Sized,
{
    let verdict = match codec::decode(unit) {
        Ok(req) => {
            let verdict = policy.evaluate(&req.event);
            log_verdict(policy, &req, &verdict);
            verdict
        }
        Err(e) => {
            stats.decode_errors += 1;
            tracing::warn!(error = %e, bytes = unit.len(), "plugin parsing error");
            codec::decode_error_verdict(&e)
        }
    };

    if verdict.is_accept() {
        stats.accepted += 1;
    } else {
        stats.rejected += 1;
    }
    verdict
}

fn log_verdict<P>(policy: &P, req: &Request, verdict: &Verdict)
where
    P: AdmissionPolicy + ?Sized,
{
    let meta = &req.meta;
    let source = meta.source_type.as_deref().unwrap_or("-");
    let source_info = meta.source_info.as_deref();
    let req_type = meta.req_type.as_deref();
    let received_at = meta.received_at;

    if verdict.is_accept() {
        let desc = match &req.event.kind {
            Kind::Code(k) => policy
                .kind_label(*k)
                .map(str::to_string)
                .unwrap_or_else(|| format!("kind {k}")),
            other => format!("kind {other}"),
        };
        tracing::info!(
            source,
            source_info,
            req_type,
            received_at,
            "accepting {desc} event from {}",
            req.event.short_pubkey()
        );
    } else {
        let missing = req.event.missing_fields();
        tracing::info!(
            source,
            source_info,
            req_type,
            received_at,
            kind = %req.event.kind,
            ?missing,
            allowed = %policy.allowed_summary(),
            "rejecting event: {}",
            verdict.msg()
        );
    }
}
