//! ARP packet codec — Ethernet/IPv4 binding only (spec.md §4.1, RFC 826).

use crate::eth::ByteSerializable;
use crate::error::WireError;
use crate::ipv4::Ipv4Address;
use crate::mac::MacAddress;

pub const PACKET_LEN: usize = 28;

const HARDWARE_ETHERNET: u16 = 1;
const PROTOCOL_IPV4: u16 = 0x0800;
const HLEN_ETHERNET: u8 = 6;
const PLEN_IPV4: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArpOperation {
    Request,
    Reply,
}

impl ArpOperation {
    fn as_u16(self) -> u16 {
        match self {
            ArpOperation::Request => 1,
            ArpOperation::Reply => 2,
        }
    }
}

impl TryFrom<u16> for ArpOperation {
    type Error = WireError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ArpOperation::Request),
            2 => Ok(ArpOperation::Reply),
            _ => Err(WireError::UnsupportedArpFamily),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArpPacket {
    pub operation: ArpOperation,
    pub sender_mac: MacAddress,
    pub sender_ip: Ipv4Address,
    pub target_mac: MacAddress,
    pub target_ip: Ipv4Address,
}

impl ArpPacket {
    pub fn new(
        operation: ArpOperation,
        sender_mac: MacAddress,
        sender_ip: Ipv4Address,
        target_mac: MacAddress,
        target_ip: Ipv4Address,
    ) -> Self {
        Self {
            operation,
            sender_mac,
            sender_ip,
            target_mac,
            target_ip,
        }
    }
}

impl ByteSerializable for ArpPacket {
    fn from_bytes(bytes: &[u8]) -> Result<Self, WireError> {
        if bytes.len() < PACKET_LEN {
            return Err(WireError::Runt {
                need: PACKET_LEN,
                got: bytes.len(),
            });
        }

        let hardware_type = u16::from_be_bytes([bytes[0], bytes[1]]);
        let protocol_type = u16::from_be_bytes([bytes[2], bytes[3]]);
        let hlen = bytes[4];
        let plen = bytes[5];

        if hardware_type != HARDWARE_ETHERNET
            || protocol_type != PROTOCOL_IPV4
            || hlen != HLEN_ETHERNET
            || plen != PLEN_IPV4
        {
            return Err(WireError::UnsupportedArpFamily);
        }

        let operation = u16::from_be_bytes([bytes[6], bytes[7]]).try_into()?;
        let sender_mac = bytes[8..14].try_into().unwrap();
        let sender_ip = bytes[14..18].try_into().unwrap();
        let target_mac = bytes[18..24].try_into().unwrap();
        let target_ip = bytes[24..28].try_into().unwrap();

        Ok(Self {
            operation,
            sender_mac,
            sender_ip,
            target_mac,
            target_ip,
        })
    }

    fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(PACKET_LEN);
        bytes.extend_from_slice(&HARDWARE_ETHERNET.to_be_bytes());
        bytes.extend_from_slice(&PROTOCOL_IPV4.to_be_bytes());
        bytes.push(HLEN_ETHERNET);
        bytes.push(PLEN_IPV4);
        bytes.extend_from_slice(&self.operation.as_u16().to_be_bytes());
        bytes.extend_from_slice(&self.sender_mac);
        bytes.extend_from_slice(&self.sender_ip);
        bytes.extend_from_slice(&self.target_mac);
        bytes.extend_from_slice(&self.target_ip);
        bytes
    }
}
