//! Core of a minimal learning-grade IPv4 router operating on raw Ethernet
//! frames. This crate owns frame classification, IP forwarding, ARP
//! resolution and the small set of ICMP responses a router produces; it
//! does not own raw frame I/O, configuration loading, or logging output —
//! those belong to the embedding binary.

pub mod checksum;
pub mod mac;
pub mod eth;
pub mod ipv4;
pub mod arp;
pub mod icmp;
pub mod error;
pub mod config;
pub mod frame;
pub mod interface;
pub mod route;
pub mod cache;
pub mod pending;
pub mod context;
pub mod icmp_responder;
pub mod classifier;
pub mod worker;
pub mod manager;

pub use classifier::process_frame;
pub use config::{InterfaceConfig, RouteConfig, RouterConfig, WorkerConfig};
pub use context::{FrameSink, RouterContext};
pub use error::{ProcessError, ProcessOutcome};
pub use frame::InboundFrame;
pub use manager::{RouterHandle, RouterManager};
pub use worker::arp_tick;

#[cfg(test)]
mod tests {
    pub mod checksum_tests;
    pub mod eth_tests;
    pub mod ipv4_tests;
    pub mod arp_tests;
    pub mod icmp_tests;
    pub mod route_tests;
    pub mod cache_tests;
    pub mod pending_tests;
    pub mod classifier_tests;
    pub mod worker_tests;
    pub mod support;
}
