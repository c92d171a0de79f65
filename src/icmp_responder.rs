//! ICMP response generator (spec.md §4.5): echo replies and the two error
//! messages a router produces, always returned on the interface the
//! triggering frame arrived on.

use crate::checksum::internet_checksum;
use crate::context::RouterContext;
use crate::error::ProcessError;
use crate::eth::{ByteSerializable, EtherType, EthernetHeader};
use crate::frame::InboundFrame;
use crate::icmp::{DestUnreachableCode, IcmpMessage};
use crate::ipv4::{Ipv4Header, Ipv4Protocol};

/// Which ICMP message to build in reply to `trigger`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IcmpReply {
    EchoReply,
    DestUnreachable(DestUnreachableCode),
    TimeExceeded,
}

/// Builds and transmits the ICMP reply for `kind` in response to
/// `trigger`, on the interface `trigger` arrived on.
///
/// Returns `Err` only for the programmer-invariant case of a trigger frame
/// too short to have carried a valid IPv4 header — the classifier should
/// never construct such a call, since it only reaches here after already
/// parsing the trigger's IPv4 header once.
pub fn send_icmp(
    ctx: &RouterContext,
    kind: IcmpReply,
    trigger: InboundFrame<'_>,
) -> Result<(), ProcessError> {
    let eth_bytes = trigger.bytes;
    let eth = EthernetHeader::from_bytes(eth_bytes)
        .map_err(|_| ProcessError::UnrewritableFrame(eth_bytes.len()))?;
    let ip_bytes = &eth_bytes[crate::eth::HEADER_LEN..];
    let trigger_ip = Ipv4Header::from_bytes(ip_bytes)
        .map_err(|_| ProcessError::UnrewritableFrame(eth_bytes.len()))?;
    let ingress = ctx.interface(trigger.ingress);

    let icmp_body = match kind {
        IcmpReply::EchoReply => {
            let payload_offset = trigger_ip.payload_offset();
            if payload_offset > ip_bytes.len() {
                return Err(ProcessError::UnrewritableFrame(eth_bytes.len()));
            }
            let icmp_bytes = &ip_bytes[payload_offset..];
            match IcmpMessage::from_bytes(icmp_bytes) {
                Ok(IcmpMessage::EchoRequest {
                    identifier,
                    sequence,
                    payload,
                }) => IcmpMessage::EchoReply {
                    identifier,
                    sequence,
                    payload,
                },
                _ => {
                    return Err(ProcessError::UnrewritableFrame(eth_bytes.len()));
                }
            }
        }
        IcmpReply::DestUnreachable(code) => IcmpMessage::DestinationUnreachable {
            code,
            original: IcmpMessage::truncated_offender(ip_bytes, trigger_ip.payload_offset()),
        },
        IcmpReply::TimeExceeded => IcmpMessage::TimeExceeded {
            original: IcmpMessage::truncated_offender(ip_bytes, trigger_ip.payload_offset()),
        },
    };

    let mut icmp_bytes = icmp_body.to_bytes();
    let icmp_checksum = internet_checksum(&icmp_bytes);
    icmp_bytes[2..4].copy_from_slice(&icmp_checksum.to_be_bytes());

    let ip_header = Ipv4Header::new(
        ingress.ip,
        trigger_ip.source,
        64,
        Ipv4Protocol::Icmp,
        icmp_bytes.len(),
    );

    let reply_eth = EthernetHeader::new(eth.source, ingress.mac, EtherType::Ipv4);

    let mut out = reply_eth.to_bytes();
    out.extend_from_slice(&ip_header.to_bytes_with_checksum());
    out.extend_from_slice(&icmp_bytes);

    log::debug!(
        "{}: icmp {:?} -> {:?} on {}",
        ctx.name,
        kind,
        trigger_ip.source,
        ingress.name
    );
    ctx.send_frame(trigger.ingress, out);

    Ok(())
}
