//! Per-router state (spec.md §3): an ordered interface list, an immutable
//! routing table, and the ARP cache + pending table bundled behind one
//! mutex — the Design Note against splitting them into two locks.

use std::sync::{Arc, Mutex};

use crate::cache::ArpCache;
use crate::config::RouterConfig;
use crate::interface::Interface;
use crate::pending::PendingTable;
use crate::route::{RouteEntry, RoutingTable};

/// Implemented by the I/O layer; `process_frame` calls into this to
/// transmit a prepared frame. Blocking or non-blocking is the I/O layer's
/// choice (spec.md §6).
pub trait FrameSink: Send + Sync {
    fn send_frame(&self, iface: &Interface, bytes: Vec<u8>);
}

/// The ARP cache and pending-request table, always mutated together under
/// `RouterContext::shared`.
#[derive(Debug)]
pub struct ArpShared {
    pub cache: ArpCache,
    pub pending: PendingTable,
}

/// All state for one independent router instance.
pub struct RouterContext {
    pub name: String,
    pub interfaces: Vec<Interface>,
    pub table: RoutingTable,
    pub shared: Mutex<ArpShared>,
    pub sink: Arc<dyn FrameSink>,
    pub worker: crate::config::WorkerConfig,
}

impl RouterContext {
    pub fn new(name: impl Into<String>, config: RouterConfig, sink: Arc<dyn FrameSink>) -> Self {
        let interfaces: Vec<Interface> = config
            .interfaces
            .iter()
            .map(|i| Interface::new(i.name.clone(), i.mac, i.ip))
            .collect();

        let interface_names: Vec<String> = interfaces.iter().map(|i| i.name.clone()).collect();
        let table = RoutingTable::from_config(&config.routes, &interface_names);

        let shared = ArpShared {
            cache: ArpCache::new(config.worker.arp_cache_capacity, config.worker.arp_cache_ttl),
            pending: PendingTable::new(),
        };

        Self {
            name: name.into(),
            interfaces,
            table,
            shared: Mutex::new(shared),
            sink,
            worker: config.worker,
        }
    }

    pub fn interface(&self, index: usize) -> &Interface {
        &self.interfaces[index]
    }

    /// Returns the index of the interface whose IP equals `ip`, if this
    /// router owns that address.
    pub fn interface_index_for_ip(&self, ip: crate::ipv4::Ipv4Address) -> Option<usize> {
        self.interfaces.iter().position(|i| i.ip == ip)
    }

    pub fn lookup_route(&self, destination: crate::ipv4::Ipv4Address) -> Option<&RouteEntry> {
        self.table.lookup(destination)
    }

    pub fn send_frame(&self, iface_index: usize, bytes: Vec<u8>) {
        self.sink.send_frame(&self.interfaces[iface_index], bytes);
    }
}
