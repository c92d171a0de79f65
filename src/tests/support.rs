#![allow(non_snake_case)]

//! Shared test scaffolding: a [`FrameSink`] that records every frame sent
//! instead of transmitting it anywhere, plus a couple of router-building
//! helpers so individual test modules don't repeat the same setup.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::config::{InterfaceConfig, RouteConfig, RouterConfig, WorkerConfig};
use crate::context::{FrameSink, RouterContext};
use crate::interface::Interface;
use crate::ipv4::Ipv4Address;
use crate::mac::MacAddress;
use crate::mac_addr;

/// Records every frame handed to it, keyed by the egress interface name.
#[derive(Default)]
pub struct TestSink {
    pub sent: Mutex<Vec<(String, Vec<u8>)>>,
}

impl TestSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn drain(&self) -> Vec<(String, Vec<u8>)> {
        std::mem::take(&mut self.sent.lock().unwrap())
    }
}

impl FrameSink for TestSink {
    fn send_frame(&self, iface: &Interface, bytes: Vec<u8>) {
        self.sent.lock().unwrap().push((iface.name.clone(), bytes));
    }
}

/// `192.0.2.<n>`, the TEST-NET-1 block (RFC 5737) — never routable, so it's
/// safe to hardcode as addressing in tests.
pub fn test_net(n: u8) -> Ipv4Address {
    [192, 0, 2, n]
}

pub fn other_net(n: u8) -> Ipv4Address {
    [198, 51, 100, n]
}

/// A router with two interfaces (`eth0` = 192.0.2.1, `eth1` = 198.51.100.1)
/// and a route to `198.51.100.0/24` via `eth1` with no gateway (directly
/// connected). `validate_ip_checksum` is left at its default (off).
pub fn two_interface_router(sink: Arc<dyn FrameSink>) -> RouterContext {
    two_interface_router_with(sink, WorkerConfig::default())
}

pub fn two_interface_router_with(sink: Arc<dyn FrameSink>, worker: WorkerConfig) -> RouterContext {
    let config = RouterConfig {
        interfaces: vec![
            InterfaceConfig {
                name: "eth0".into(),
                mac: mac_addr!(1),
                ip: test_net(1),
            },
            InterfaceConfig {
                name: "eth1".into(),
                mac: mac_addr!(2),
                ip: other_net(1),
            },
        ],
        routes: vec![RouteConfig {
            destination: other_net(0),
            mask: [255, 255, 255, 0],
            gateway: None,
            interface_name: "eth1".into(),
        }],
        worker,
    };

    RouterContext::new("test-router", config, sink)
}

/// A `WorkerConfig` tuned for fast, deterministic ARP tests: a tiny TTL and
/// retry cap so abandonment and expiry happen in a handful of ticks.
pub fn fast_worker_config() -> WorkerConfig {
    WorkerConfig {
        arp_cache_ttl: Duration::from_millis(10),
        retry_interval: Duration::from_millis(10),
        retry_cap: 2,
        arp_cache_capacity: 4,
        validate_ip_checksum: false,
    }
}

pub fn host_mac(n: u8) -> MacAddress {
    mac_addr!(100 + n as u64)
}
