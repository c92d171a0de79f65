//! IPv4 header codec (spec.md §4.1). Generated headers always use `ihl = 5`
//! (no options); ingress headers tolerate any `ihl`, with the payload read
//! starting at offset `ihl * 4`.

use crate::checksum::internet_checksum;
use crate::eth::ByteSerializable;
use crate::error::WireError;

pub type Ipv4Address = [u8; 4];

pub const MIN_HEADER_LEN: usize = 20;

/// IPv4 protocol numbers this router cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ipv4Protocol {
    Icmp,
    Tcp,
    Udp,
    Other(u8),
}

impl Ipv4Protocol {
    pub const ICMP: u8 = 1;
    pub const TCP: u8 = 6;
    pub const UDP: u8 = 17;

    pub fn as_u8(self) -> u8 {
        match self {
            Ipv4Protocol::Icmp => Self::ICMP,
            Ipv4Protocol::Tcp => Self::TCP,
            Ipv4Protocol::Udp => Self::UDP,
            Ipv4Protocol::Other(v) => v,
        }
    }
}

impl From<u8> for Ipv4Protocol {
    fn from(value: u8) -> Self {
        match value {
            Self::ICMP => Ipv4Protocol::Icmp,
            Self::TCP => Ipv4Protocol::Tcp,
            Self::UDP => Ipv4Protocol::Udp,
            other => Ipv4Protocol::Other(other),
        }
    }
}

/// A parsed IPv4 header. `ihl` is preserved from the wire so the caller can
/// locate the payload (`ihl * 4` bytes in); `to_bytes` always emits `ihl =
/// 5` regardless of the value this header was parsed with, since this
/// crate never generates or forwards IP options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv4Header {
    pub version: u8,
    pub ihl: u8,
    pub tos: u8,
    pub total_length: u16,
    pub id: u16,
    pub flags_fragment_offset: u16,
    pub ttl: u8,
    pub protocol: Ipv4Protocol,
    pub checksum: u16,
    pub source: Ipv4Address,
    pub destination: Ipv4Address,
}

impl Ipv4Header {
    /// Constructs a header for egress: `version = 4`, `ihl = 5`, `id = 0`,
    /// `tos = 0`, `off = 0`, checksum left at `0` until
    /// [`Ipv4Header::to_bytes_with_checksum`] fills it in.
    pub fn new(
        source: Ipv4Address,
        destination: Ipv4Address,
        ttl: u8,
        protocol: Ipv4Protocol,
        payload_len: usize,
    ) -> Self {
        Self {
            version: 4,
            ihl: 5,
            tos: 0,
            total_length: (MIN_HEADER_LEN + payload_len) as u16,
            id: 0,
            flags_fragment_offset: 0,
            ttl,
            protocol,
            checksum: 0,
            source,
            destination,
        }
    }

    /// Byte offset of the payload within a buffer carrying this header,
    /// honoring whatever `ihl` was parsed from the wire.
    pub fn payload_offset(&self) -> usize {
        self.ihl as usize * 4
    }

    /// Serializes with `ihl = 5` and a freshly computed header checksum.
    pub fn to_bytes_with_checksum(&self) -> Vec<u8> {
        let mut bytes = self.to_bytes();
        let sum = internet_checksum(&bytes);
        bytes[10..12].copy_from_slice(&sum.to_be_bytes());
        bytes
    }
}

impl ByteSerializable for Ipv4Header {
    fn from_bytes(bytes: &[u8]) -> Result<Self, WireError> {
        if bytes.len() < MIN_HEADER_LEN {
            return Err(WireError::Runt {
                need: MIN_HEADER_LEN,
                got: bytes.len(),
            });
        }

        let version = bytes[0] >> 4;
        let ihl = bytes[0] & 0x0F;
        let tos = bytes[1];
        let total_length = u16::from_be_bytes([bytes[2], bytes[3]]);
        let id = u16::from_be_bytes([bytes[4], bytes[5]]);
        let flags_fragment_offset = u16::from_be_bytes([bytes[6], bytes[7]]);
        let ttl = bytes[8];
        let protocol = bytes[9].into();
        let checksum = u16::from_be_bytes([bytes[10], bytes[11]]);
        let source = bytes[12..16].try_into().unwrap();
        let destination = bytes[16..20].try_into().unwrap();

        Ok(Self {
            version,
            ihl,
            tos,
            total_length,
            id,
            flags_fragment_offset,
            ttl,
            protocol,
            checksum,
            source,
            destination,
        })
    }

    fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(MIN_HEADER_LEN);
        bytes.push((self.version << 4) | 5); // always emit ihl = 5, no options
        bytes.push(self.tos);
        bytes.extend_from_slice(&self.total_length.to_be_bytes());
        bytes.extend_from_slice(&self.id.to_be_bytes());
        bytes.extend_from_slice(&self.flags_fragment_offset.to_be_bytes());
        bytes.push(self.ttl);
        bytes.push(self.protocol.as_u8());
        bytes.extend_from_slice(&self.checksum.to_be_bytes());
        bytes.extend_from_slice(&self.source);
        bytes.extend_from_slice(&self.destination);
        bytes
    }
}
