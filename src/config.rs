//! Configuration shapes the core consumes. Parsing these from a file or CLI
//! is an external collaborator's job (spec.md §1); the core only needs the
//! resolved structs.

use std::time::Duration;

use crate::ipv4::Ipv4Address;
use crate::mac::MacAddress;

/// One router interface, resolved and ready to use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceConfig {
    pub name: String,
    pub mac: MacAddress,
    pub ip: Ipv4Address,
}

/// One routing table entry. `gateway: None` means directly connected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteConfig {
    pub destination: Ipv4Address,
    pub mask: Ipv4Address,
    pub gateway: Option<Ipv4Address>,
    pub interface_name: String,
}

/// Tunables for the ARP subsystem (spec.md §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerConfig {
    pub arp_cache_ttl: Duration,
    pub retry_interval: Duration,
    pub retry_cap: u8,
    pub arp_cache_capacity: usize,
    /// Whether to drop ingress IPv4 frames whose header checksum does not
    /// sum to zero (spec.md §9, open question — default `false`).
    pub validate_ip_checksum: bool,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            arp_cache_ttl: Duration::from_secs(15),
            retry_interval: Duration::from_secs(1),
            retry_cap: 5,
            arp_cache_capacity: 256,
            validate_ip_checksum: false,
        }
    }
}

/// Everything needed to construct one [`crate::context::RouterContext`].
#[derive(Debug, Clone)]
pub struct RouterConfig {
    pub interfaces: Vec<InterfaceConfig>,
    pub routes: Vec<RouteConfig>,
    pub worker: WorkerConfig,
}
