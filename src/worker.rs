//! ARP worker (spec.md §4.7): runs once per second, expiring stale cache
//! entries and advancing pending ARP requests — retransmitting, or
//! abandoning them and answering withheld frames with ICMP host
//! unreachable.

use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::classifier::send_arp_request;
use crate::context::RouterContext;
use crate::icmp::DestUnreachableCode;
use crate::icmp_responder::{send_icmp, IcmpReply};
use std::sync::Arc;

/// One iteration of the ARP worker: expire the cache, then advance every
/// pending entry (retransmit, or abandon and answer withheld frames).
/// Safe to call directly for tests that want deterministic, synchronous
/// ticks instead of the background thread in [`ArpWorker`].
pub fn arp_tick(ctx: &RouterContext) {
    let now = Instant::now();
    let retry_cap = ctx.worker.retry_cap;

    let (abandoned, retry_targets) = {
        let mut shared = ctx.shared.lock().unwrap();
        shared.cache.expire(now);

        let abandoned = shared.pending.drain_where(|e| e.times_sent >= retry_cap);

        let mut retry_targets = Vec::new();
        for entry in shared.pending.iter_mut() {
            entry.times_sent += 1;
            entry.last_sent = Some(now);
            retry_targets.push((entry.ip, entry.iface));
        }

        (abandoned, retry_targets)
    };

    for entry in &abandoned {
        log::warn!(
            "{}: abandoning arp resolution for {:?} after {} attempts, {} frame(s) undeliverable",
            ctx.name,
            entry.ip,
            entry.times_sent,
            entry.withheld.len()
        );
        for withheld in &entry.withheld {
            let _ = send_icmp(
                ctx,
                IcmpReply::DestUnreachable(DestUnreachableCode::Host),
                withheld.as_inbound(),
            );
        }
    }

    for (ip, iface) in retry_targets {
        send_arp_request(ctx, iface, ip);
    }
}

/// Runs [`arp_tick`] on a background thread at roughly 1 Hz until told to
/// stop. Shutdown is cooperative: the signal is observed between ticks, an
/// in-flight tick always runs to completion, and no ICMP is emitted at
/// teardown (spec.md §5).
pub struct ArpWorker {
    shutdown: mpsc::Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl ArpWorker {
    pub fn spawn(ctx: Arc<RouterContext>, interval: Duration) -> Self {
        let (shutdown, rx) = mpsc::channel::<()>();

        let handle = thread::Builder::new()
            .name(format!("arp-worker-{}", ctx.name))
            .spawn(move || loop {
                match rx.recv_timeout(interval) {
                    Ok(()) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
                    Err(mpsc::RecvTimeoutError::Timeout) => arp_tick(&ctx),
                }
            })
            .expect("failed to spawn arp worker thread");

        Self {
            shutdown,
            handle: Some(handle),
        }
    }

    /// Signals the worker to stop and waits for its current tick, if any,
    /// to finish.
    pub fn shutdown(&mut self) {
        let _ = self.shutdown.send(());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for ArpWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}
