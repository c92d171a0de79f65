//! Frame classifier / forwarder (spec.md §4.6) — the top-level state
//! machine invoked once per inbound frame.

use std::time::Instant;

use crate::context::RouterContext;
use crate::error::{ProcessError, ProcessOutcome};
use crate::eth::{ByteSerializable, EtherType, EthernetHeader, HEADER_LEN as ETH_HEADER_LEN};
use crate::frame::InboundFrame;
use crate::icmp::{DestUnreachableCode, IcmpMessage};
use crate::icmp_responder::{send_icmp, IcmpReply};
use crate::ipv4::{Ipv4Header, Ipv4Protocol};
use crate::mac::{self, MacAddress};
use crate::arp::{ArpOperation, ArpPacket};
use crate::checksum::internet_checksum;

/// Classifies and responds to one inbound frame.
pub fn process_frame(ctx: &RouterContext, frame: InboundFrame<'_>) -> ProcessOutcome {
    let eth = match EthernetHeader::from_bytes(frame.bytes) {
        Ok(eth) => eth,
        Err(_) => return ProcessOutcome::Ok, // malformed frame, silently dropped
    };

    match eth.ether_type {
        EtherType::Ipv4 => handle_ipv4(ctx, frame, &eth),
        EtherType::Arp => handle_arp(ctx, frame, &eth),
        EtherType::Other(_) => ProcessOutcome::Ok,
    }
}

fn handle_ipv4(ctx: &RouterContext, frame: InboundFrame<'_>, eth: &EthernetHeader) -> ProcessOutcome {
    let ip_bytes = &frame.bytes[ETH_HEADER_LEN..];
    let ip = match Ipv4Header::from_bytes(ip_bytes) {
        Ok(ip) => ip,
        Err(_) => return ProcessOutcome::Ok,
    };

    if ip.payload_offset() > ip_bytes.len() {
        return ProcessOutcome::Ok; // declared header length exceeds the frame
    }

    if ctx.worker.validate_ip_checksum {
        let header_len = ip.payload_offset();
        if internet_checksum(&ip_bytes[..header_len]) != 0 {
            return ProcessOutcome::Ok;
        }
    }

    let ingress = ctx.interface(frame.ingress);

    if ip.destination == ingress.ip {
        return handle_addressed_to_ingress(ctx, frame, ip_bytes, &ip);
    }

    if ctx.interface_index_for_ip(ip.destination).is_some() {
        let _ = send_icmp(ctx, IcmpReply::DestUnreachable(DestUnreachableCode::Host), frame);
        return ProcessOutcome::Ok;
    }

    forward(ctx, frame, &ip)
}

fn handle_addressed_to_ingress(
    ctx: &RouterContext,
    frame: InboundFrame<'_>,
    ip_bytes: &[u8],
    ip: &Ipv4Header,
) -> ProcessOutcome {
    if matches!(ip.protocol, Ipv4Protocol::Tcp | Ipv4Protocol::Udp) {
        let _ = send_icmp(ctx, IcmpReply::DestUnreachable(DestUnreachableCode::Port), frame);
        return ProcessOutcome::Ok;
    }

    if ip.ttl == 1 {
        let _ = send_icmp(ctx, IcmpReply::TimeExceeded, frame);
        return ProcessOutcome::Ok;
    }

    if ip.protocol == Ipv4Protocol::Icmp {
        let payload = &ip_bytes[ip.payload_offset()..];
        if let Ok(IcmpMessage::EchoRequest { .. }) = IcmpMessage::from_bytes(payload) {
            let _ = send_icmp(ctx, IcmpReply::EchoReply, frame);
            return ProcessOutcome::Ok;
        }
    }

    let _ = send_icmp(ctx, IcmpReply::DestUnreachable(DestUnreachableCode::Protocol), frame);
    ProcessOutcome::Ok
}

enum ForwardAction {
    Hit { egress: usize, next_hop_mac: MacAddress },
    TimeExceeded,
    Buffered,
    NewlyPending,
    Exhausted(ProcessError),
}

fn forward(ctx: &RouterContext, frame: InboundFrame<'_>, ip: &Ipv4Header) -> ProcessOutcome {
    let route = match ctx.lookup_route(ip.destination) {
        Some(route) => route,
        None => {
            let _ = send_icmp(ctx, IcmpReply::DestUnreachable(DestUnreachableCode::Network), frame);
            return ProcessOutcome::Ok;
        }
    };
    let egress = route.iface;
    let next_hop = route.next_hop(ip.destination);

    let action = {
        let mut shared = ctx.shared.lock().unwrap();
        match shared.cache.lookup(next_hop) {
            Some(mac) => {
                if ip.ttl == 1 {
                    ForwardAction::TimeExceeded
                } else {
                    ForwardAction::Hit {
                        egress,
                        next_hop_mac: mac,
                    }
                }
            }
            None => match shared.pending.lookup_mut(next_hop) {
                Some(entry) => match crate::pending::PendingTable::attach_frame(entry, frame) {
                    Ok(()) => ForwardAction::Buffered,
                    Err(e) => ForwardAction::Exhausted(e),
                },
                None => {
                    let entry = shared.pending.create(next_hop, egress);
                    let attached = crate::pending::PendingTable::attach_frame(entry, frame);
                    entry.times_sent = 1;
                    entry.last_sent = Some(Instant::now());
                    match attached {
                        Ok(()) => ForwardAction::NewlyPending,
                        Err(e) => ForwardAction::Exhausted(e),
                    }
                }
            },
        }
    };

    match action {
        ForwardAction::Hit { egress, next_hop_mac } => {
            let out = rewrite_forward(frame.bytes, ctx.interface(egress).mac, next_hop_mac);
            ctx.send_frame(egress, out);
            ProcessOutcome::Ok
        }
        ForwardAction::TimeExceeded => {
            let _ = send_icmp(ctx, IcmpReply::TimeExceeded, frame);
            ProcessOutcome::Ok
        }
        ForwardAction::Buffered => ProcessOutcome::Ok,
        ForwardAction::NewlyPending => {
            // A brand new pending entry was just created and the triggering
            // frame attached to it; kick off ARP resolution.
            send_arp_request(ctx, egress, next_hop);
            ProcessOutcome::Ok
        }
        ForwardAction::Exhausted(e) => ProcessOutcome::NonCriticalError(e),
    }
}

pub(crate) fn send_arp_request(ctx: &RouterContext, egress: usize, target_ip: crate::ipv4::Ipv4Address) {
    let iface = ctx.interface(egress);
    let arp = ArpPacket::new(
        ArpOperation::Request,
        iface.mac,
        iface.ip,
        mac::UNSPECIFIED,
        target_ip,
    );
    let eth = EthernetHeader::new(mac::BROADCAST, iface.mac, EtherType::Arp);
    let mut out = eth.to_bytes();
    out.extend_from_slice(&arp.to_bytes());
    log::debug!("{}: arp request for {:?} on {}", ctx.name, target_ip, iface.name);
    ctx.send_frame(egress, out);
}

fn send_arp_reply(
    ctx: &RouterContext,
    egress: usize,
    sender_ip: crate::ipv4::Ipv4Address,
    dest_mac: MacAddress,
    dest_ip: crate::ipv4::Ipv4Address,
) {
    let iface = ctx.interface(egress);
    let arp = ArpPacket::new(ArpOperation::Reply, iface.mac, sender_ip, dest_mac, dest_ip);
    let eth = EthernetHeader::new(dest_mac, iface.mac, EtherType::Arp);
    let mut out = eth.to_bytes();
    out.extend_from_slice(&arp.to_bytes());
    ctx.send_frame(egress, out);
}

/// Rewrites a forwarded frame: same length as the source, new Ethernet
/// addresses, IPv4 TTL decremented by one, header checksum recomputed.
/// Payload and any IP options are copied verbatim.
fn rewrite_forward(original: &[u8], egress_mac: MacAddress, next_hop_mac: MacAddress) -> Vec<u8> {
    let mut out = original.to_vec();
    out[0..6].copy_from_slice(&next_hop_mac);
    out[6..12].copy_from_slice(&egress_mac);

    let ihl = (out[ETH_HEADER_LEN] & 0x0F) as usize;
    let header_len = ihl * 4;
    let ttl_offset = ETH_HEADER_LEN + 8;
    out[ttl_offset] = out[ttl_offset].saturating_sub(1);

    let checksum_offset = ETH_HEADER_LEN + 10;
    out[checksum_offset..checksum_offset + 2].copy_from_slice(&[0, 0]);
    let sum = internet_checksum(&out[ETH_HEADER_LEN..ETH_HEADER_LEN + header_len]);
    out[checksum_offset..checksum_offset + 2].copy_from_slice(&sum.to_be_bytes());

    out
}

fn handle_arp(ctx: &RouterContext, frame: InboundFrame<'_>, _eth: &EthernetHeader) -> ProcessOutcome {
    let ingress = ctx.interface(frame.ingress);
    let arp_bytes = &frame.bytes[ETH_HEADER_LEN..];
    let arp = match ArpPacket::from_bytes(arp_bytes) {
        Ok(arp) => arp,
        Err(_) => return ProcessOutcome::Ok,
    };

    if arp.target_ip != ingress.ip {
        return ProcessOutcome::Ok;
    }

    match arp.operation {
        ArpOperation::Request => {
            send_arp_reply(ctx, frame.ingress, ingress.ip, arp.sender_mac, arp.sender_ip);
            ProcessOutcome::Ok
        }
        ArpOperation::Reply => handle_arp_reply(ctx, arp),
    }
}

fn handle_arp_reply(ctx: &RouterContext, arp: ArpPacket) -> ProcessOutcome {
    let drained = {
        let mut shared = ctx.shared.lock().unwrap();
        shared.cache.add(arp.sender_ip, arp.sender_mac, Instant::now());
        shared.pending.remove(arp.sender_ip)
    };

    let Some(entry) = drained else {
        return ProcessOutcome::Ok;
    };

    for withheld in &entry.withheld {
        let inbound = withheld.as_inbound();
        let ip_bytes = &inbound.bytes[ETH_HEADER_LEN..];
        let ip = match Ipv4Header::from_bytes(ip_bytes) {
            Ok(ip) => ip,
            Err(_) => continue, // shouldn't happen; it was validated when buffered
        };

        if ip.ttl == 1 {
            let _ = send_icmp(ctx, IcmpReply::TimeExceeded, inbound);
        } else {
            let out = rewrite_forward(inbound.bytes, ctx.interface(entry.iface).mac, arp.sender_mac);
            ctx.send_frame(entry.iface, out);
        }
    }

    ProcessOutcome::Ok
}
