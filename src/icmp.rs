//! ICMP codec (spec.md §4.1, RFC 792) — echo request/reply and the two
//! error messages a router produces (destination unreachable, time
//! exceeded). Checksums are computed by the caller over the full ICMP
//! body via [`crate::checksum::internet_checksum`]; this module only
//! handles framing.

use crate::error::WireError;

pub const HEADER_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestUnreachableCode {
    Network = 0,
    Host = 1,
    Protocol = 2,
    Port = 3,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IcmpMessage {
    EchoRequest {
        identifier: u16,
        sequence: u16,
        payload: Vec<u8>,
    },
    EchoReply {
        identifier: u16,
        sequence: u16,
        payload: Vec<u8>,
    },
    /// `original` is the offending IPv4 header plus the first 8 bytes of
    /// its payload, per RFC 792.
    DestinationUnreachable {
        code: DestUnreachableCode,
        original: Vec<u8>,
    },
    /// `original` is the offending IPv4 header plus the first 8 bytes of
    /// its payload.
    TimeExceeded {
        original: Vec<u8>,
    },
}

impl IcmpMessage {
    const TYPE_ECHO_REPLY: u8 = 0;
    const TYPE_DEST_UNREACHABLE: u8 = 3;
    const TYPE_ECHO_REQUEST: u8 = 8;
    const TYPE_TIME_EXCEEDED: u8 = 11;

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, WireError> {
        if bytes.len() < HEADER_LEN {
            return Err(WireError::Runt {
                need: HEADER_LEN,
                got: bytes.len(),
            });
        }

        let icmp_type = bytes[0];
        let code = bytes[1];
        // bytes[2..4] is the checksum, validated (optionally) by the caller.
        let rest = &bytes[4..8];
        let body = &bytes[8..];

        match icmp_type {
            Self::TYPE_ECHO_REQUEST => Ok(IcmpMessage::EchoRequest {
                identifier: u16::from_be_bytes([rest[0], rest[1]]),
                sequence: u16::from_be_bytes([rest[2], rest[3]]),
                payload: body.to_vec(),
            }),
            Self::TYPE_ECHO_REPLY => Ok(IcmpMessage::EchoReply {
                identifier: u16::from_be_bytes([rest[0], rest[1]]),
                sequence: u16::from_be_bytes([rest[2], rest[3]]),
                payload: body.to_vec(),
            }),
            Self::TYPE_DEST_UNREACHABLE => {
                let code = match code {
                    0 => DestUnreachableCode::Network,
                    1 => DestUnreachableCode::Host,
                    2 => DestUnreachableCode::Protocol,
                    3 => DestUnreachableCode::Port,
                    _ => return Err(WireError::UnrecognizedIcmpType(icmp_type)),
                };
                Ok(IcmpMessage::DestinationUnreachable {
                    code,
                    original: body.to_vec(),
                })
            }
            Self::TYPE_TIME_EXCEEDED => Ok(IcmpMessage::TimeExceeded {
                original: body.to_vec(),
            }),
            other => Err(WireError::UnrecognizedIcmpType(other)),
        }
    }

    /// Serializes with the checksum field left at zero — callers compute
    /// and splice in the real checksum over the finished buffer.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(HEADER_LEN);

        match self {
            IcmpMessage::EchoRequest {
                identifier,
                sequence,
                payload,
            } => {
                bytes.push(Self::TYPE_ECHO_REQUEST);
                bytes.push(0);
                bytes.extend_from_slice(&[0, 0]); // checksum placeholder
                bytes.extend_from_slice(&identifier.to_be_bytes());
                bytes.extend_from_slice(&sequence.to_be_bytes());
                bytes.extend_from_slice(payload);
            }
            IcmpMessage::EchoReply {
                identifier,
                sequence,
                payload,
            } => {
                bytes.push(Self::TYPE_ECHO_REPLY);
                bytes.push(0);
                bytes.extend_from_slice(&[0, 0]);
                bytes.extend_from_slice(&identifier.to_be_bytes());
                bytes.extend_from_slice(&sequence.to_be_bytes());
                bytes.extend_from_slice(payload);
            }
            IcmpMessage::DestinationUnreachable { code, original } => {
                bytes.push(Self::TYPE_DEST_UNREACHABLE);
                bytes.push(*code as u8);
                bytes.extend_from_slice(&[0, 0]);
                bytes.extend_from_slice(&[0, 0, 0, 0]); // unused rest-of-header
                bytes.extend_from_slice(original);
            }
            IcmpMessage::TimeExceeded { original } => {
                bytes.push(Self::TYPE_TIME_EXCEEDED);
                bytes.push(0);
                bytes.extend_from_slice(&[0, 0]);
                bytes.extend_from_slice(&[0, 0, 0, 0]);
                bytes.extend_from_slice(original);
            }
        }

        bytes
    }

    /// Builds the `original` payload for an ICMP error: the offending IPv4
    /// header (as received, with whatever `ihl` it carried) plus the first
    /// 8 bytes of its payload, per RFC 792.
    pub fn truncated_offender(ip_header_and_payload: &[u8], header_len: usize) -> Vec<u8> {
        let take = (header_len + 8).min(ip_header_and_payload.len());
        ip_header_and_payload[..take].to_vec()
    }
}
