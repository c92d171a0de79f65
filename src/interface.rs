//! A router's network interface (spec.md §3). Built once at startup from
//! [`crate::config::InterfaceConfig`] and never mutated afterward.

use crate::ipv4::Ipv4Address;
use crate::mac::MacAddress;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interface {
    pub name: String,
    pub mac: MacAddress,
    pub ip: Ipv4Address,
}

impl Interface {
    pub fn new(name: impl Into<String>, mac: MacAddress, ip: Ipv4Address) -> Self {
        Self {
            name: name.into(),
            mac,
            ip,
        }
    }
}
