//! Link-layer (MAC) addressing.

/// A data-link physical address.
pub type MacAddress = [u8; 6];

/// Broadcast MAC address (`ff:ff:ff:ff:ff:ff`).
pub const BROADCAST: MacAddress = [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF];

/// The zero MAC address, used as a placeholder target hardware address in
/// outgoing ARP requests (the field we're asking the network to fill in).
pub const UNSPECIFIED: MacAddress = [0; 6];

/// Builds a MAC address from the low 48 bits of a `u64`, clearing the
/// multicast bit so callers constructing test/seed addresses never
/// accidentally produce a multicast or broadcast address.
#[macro_export]
macro_rules! mac_addr {
    ($num:expr) => {{
        let num = $num as u64;
        [
            (((num >> 40) & 0xff) as u8 & 0xFE),
            ((num >> 32) & 0xff) as u8,
            ((num >> 24) & 0xff) as u8,
            ((num >> 16) & 0xff) as u8,
            ((num >> 8) & 0xff) as u8,
            (num & 0xff) as u8,
        ]
    }};
}

/// True if `address` is a multicast or broadcast MAC address.
pub fn is_multicast_or_broadcast(address: MacAddress) -> bool {
    address[0] & 0x01 == 0x01 || address == BROADCAST
}
