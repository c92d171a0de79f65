//! Routing table (spec.md §4.2): immutable after load, longest-prefix-match
//! lookup over a small linear table — "tens of entries does not merit a
//! trie" (spec.md §9).

use crate::config::RouteConfig;
use crate::ipv4::Ipv4Address;

/// One routing table entry. `gateway: None` means directly connected —
/// the next hop is the datagram's own destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub network: Ipv4Address,
    pub mask: Ipv4Address,
    pub gateway: Option<Ipv4Address>,
    /// Index into `RouterContext::interfaces`.
    pub iface: usize,
}

impl RouteEntry {
    fn matches(&self, dst: Ipv4Address) -> bool {
        network_address(dst, self.mask) == self.network
    }

    fn mask_len(&self) -> u32 {
        u32::from_be_bytes(self.mask).count_ones()
    }

    /// Next-hop IP to resolve via ARP: the gateway if one is configured,
    /// else the datagram's own destination (directly connected).
    pub fn next_hop(&self, destination: Ipv4Address) -> Ipv4Address {
        self.gateway.unwrap_or(destination)
    }
}

/// `subnet & mask`.
pub fn network_address(subnet: Ipv4Address, mask: Ipv4Address) -> Ipv4Address {
    let mut result = [0u8; 4];
    for i in 0..4 {
        result[i] = subnet[i] & mask[i];
    }
    result
}

/// Immutable routing table, built once from configuration.
#[derive(Debug, Clone)]
pub struct RoutingTable {
    entries: Vec<RouteEntry>,
}

impl RoutingTable {
    pub fn new(entries: Vec<RouteEntry>) -> Self {
        Self { entries }
    }

    /// Resolves `interface_name` fields in `routes` against `interfaces` by
    /// position, building a `RoutingTable` ready for lookups. Panics if a
    /// route names an interface that isn't present — a configuration
    /// loader bug, not a runtime condition this crate recovers from.
    pub fn from_config(routes: &[RouteConfig], interface_names: &[String]) -> Self {
        let entries = routes
            .iter()
            .map(|r| {
                let iface = interface_names
                    .iter()
                    .position(|name| name == &r.interface_name)
                    .unwrap_or_else(|| panic!("route names unknown interface {}", r.interface_name));
                RouteEntry {
                    network: network_address(r.destination, r.mask),
                    mask: r.mask,
                    gateway: r.gateway,
                    iface,
                }
            })
            .collect();

        Self::new(entries)
    }

    /// Returns the entry with the longest matching prefix, ties broken by
    /// insertion order (first match wins among equal mask lengths).
    pub fn lookup(&self, destination: Ipv4Address) -> Option<&RouteEntry> {
        let mut best: Option<&RouteEntry> = None;
        for entry in self.entries.iter().filter(|e| e.matches(destination)) {
            match best {
                Some(b) if b.mask_len() >= entry.mask_len() => {}
                _ => best = Some(entry),
            }
        }
        best
    }
}
