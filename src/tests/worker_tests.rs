#![allow(non_snake_case)]

use std::time::Instant;

use crate::classifier::process_frame;
use crate::eth::{ByteSerializable, EtherType, EthernetHeader};
use crate::frame::InboundFrame;
use crate::icmp::{DestUnreachableCode, IcmpMessage};
use crate::ipv4::{Ipv4Header, Ipv4Protocol};
use crate::mac_addr;
use crate::worker::arp_tick;

use super::support::{fast_worker_config, host_mac, other_net, test_net, two_interface_router_with, TestSink};

fn udp_frame(dst_mac: [u8; 6], src_mac: [u8; 6], src_ip: [u8; 4], dst_ip: [u8; 4]) -> Vec<u8> {
    let ip = Ipv4Header::new(src_ip, dst_ip, 64, Ipv4Protocol::Udp, 4);
    let eth = EthernetHeader::new(dst_mac, src_mac, EtherType::Ipv4);
    let mut out = eth.to_bytes();
    out.extend_from_slice(&ip.to_bytes_with_checksum());
    out.extend_from_slice(&[0u8; 4]);
    out
}

#[test]
fn ArpTick_RetriesPendingEntryAndIncrementsAttemptCount() {
    // Arrange: retry_cap of 2 from fast_worker_config leaves room for one retry.
    let sink = TestSink::new();
    let ctx = two_interface_router_with(sink.clone(), fast_worker_config());
    let frame = udp_frame(mac_addr!(1), host_mac(9), test_net(50), other_net(50));
    process_frame(&ctx, InboundFrame::new(&frame, 0));
    sink.drain(); // discard the initial ARP request

    // Act
    arp_tick(&ctx);

    // Assert: one more ARP request went out, and the entry is still pending.
    let sent = sink.drain();
    assert_eq!(sent.len(), 1);
    let eth = EthernetHeader::from_bytes(&sent[0].1).unwrap();
    assert_eq!(eth.ether_type, EtherType::Arp);

    let shared = ctx.shared.lock().unwrap();
    let entry = shared.pending.lookup(other_net(50)).unwrap();
    assert_eq!(entry.times_sent, 2);
}

#[test]
fn ArpTick_AbandonsEntryAfterRetryCapAndAnswersWithheldFramesWithHostUnreachable() {
    // Arrange: retry_cap is 2, so two ticks exhaust it.
    let sink = TestSink::new();
    let ctx = two_interface_router_with(sink.clone(), fast_worker_config());
    let frame = udp_frame(mac_addr!(1), host_mac(9), test_net(50), other_net(50));
    process_frame(&ctx, InboundFrame::new(&frame, 0));
    sink.drain();

    // Act
    arp_tick(&ctx); // times_sent -> 2, still under/at cap depending on semantics
    sink.drain();
    arp_tick(&ctx); // times_sent was already at cap, entry now abandoned

    // Assert
    let sent = sink.drain();
    assert_eq!(sent.len(), 1);
    let ip_bytes = &sent[0].1[14..];
    let ip = Ipv4Header::from_bytes(ip_bytes).unwrap();
    assert_eq!(ip.destination, test_net(50));
    let icmp = IcmpMessage::from_bytes(&ip_bytes[ip.payload_offset()..]).unwrap();
    assert!(matches!(
        icmp,
        IcmpMessage::DestinationUnreachable {
            code: DestUnreachableCode::Host,
            ..
        }
    ));

    let shared = ctx.shared.lock().unwrap();
    assert!(shared.pending.is_empty());
}

#[test]
fn ArpTick_ExpiresStaleCacheEntries() {
    // Arrange
    let sink = TestSink::new();
    let ctx = two_interface_router_with(sink, fast_worker_config());
    {
        let mut shared = ctx.shared.lock().unwrap();
        shared.cache.add(other_net(50), host_mac(5), Instant::now());
    }

    // Act
    std::thread::sleep(ctx.worker.arp_cache_ttl * 3);
    arp_tick(&ctx);

    // Assert
    let shared = ctx.shared.lock().unwrap();
    assert_eq!(shared.cache.lookup(other_net(50)), None);
}
