//! Error taxonomy (spec.md §7): wire-format failures are silently dropped,
//! resource exhaustion and programmer-invariant violations are surfaced to
//! the caller; everything else becomes an ICMP reply.

use thiserror::Error;

/// A malformed frame/header at the codec boundary. Always results in the
/// frame being silently dropped — never surfaced past the classifier.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WireError {
    #[error("runt frame: need at least {need} bytes, got {got}")]
    Runt { need: usize, got: usize },
    #[error("giant frame: {len} bytes exceeds the maximum of {max}")]
    Giant { len: usize, max: usize },
    #[error("unsupported ethertype {0:#06x}")]
    UnsupportedEtherType(u16),
    #[error("unsupported ARP hardware/protocol combination")]
    UnsupportedArpFamily,
    #[error("unrecognized ICMP type {0}")]
    UnrecognizedIcmpType(u8),
}

/// Failures `process_frame` surfaces to its caller (spec.md §7). Routing
/// misses, ARP timeouts, and unsupported protocols are *not* represented
/// here — they produce ICMP responses and a plain `Ok`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProcessError {
    #[error("withheld-frame capacity exceeded for pending entry")]
    PendingCapacityExceeded,
    #[error("ARP cache is at capacity and cannot accept a new entry")]
    ArpCacheExhausted,
    #[error("pending ARP entry invariant violated: {0}")]
    PendingInvariantViolated(&'static str),
    #[error("frame too short to rewrite for forwarding: {0} bytes")]
    UnrewritableFrame(usize),
}

/// The three-way outcome `process_frame` (and, by extension, `arp_tick`)
/// reports to the I/O layer.
#[derive(Debug, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// Frame handled (possibly by silently dropping it, or by emitting an
    /// ICMP response, or by forwarding it).
    Ok,
    /// Drop this frame and continue; the router as a whole is fine.
    NonCriticalError(ProcessError),
    /// A programmer invariant was violated; the caller should exit.
    FatalError(ProcessError),
}

impl ProcessOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, ProcessOutcome::Ok)
    }
}
