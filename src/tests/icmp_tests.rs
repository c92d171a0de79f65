#![allow(non_snake_case)]

use crate::icmp::{DestUnreachableCode, IcmpMessage};

#[test]
fn IcmpMessage_EchoRequest_ToBytes_ThenFromBytes_RoundTrips() {
    // Arrange
    let message = IcmpMessage::EchoRequest {
        identifier: 0x1234,
        sequence: 7,
        payload: vec![1, 2, 3, 4],
    };

    // Act
    let bytes = message.to_bytes();
    let parsed = IcmpMessage::from_bytes(&bytes).unwrap();

    // Assert
    assert_eq!(parsed, message);
}

#[test]
fn IcmpMessage_ToBytes_LeavesChecksumFieldZero() {
    // Arrange
    let message = IcmpMessage::EchoReply {
        identifier: 1,
        sequence: 1,
        payload: vec![],
    };

    // Act
    let bytes = message.to_bytes();

    // Assert
    assert_eq!(&bytes[2..4], &[0, 0]);
}

#[test]
fn IcmpMessage_DestinationUnreachable_RoundTrips() {
    // Arrange
    let message = IcmpMessage::DestinationUnreachable {
        code: DestUnreachableCode::Host,
        original: vec![0x45, 0x00, 0x00, 0x14, 0, 0, 0, 0],
    };

    // Act
    let bytes = message.to_bytes();
    let parsed = IcmpMessage::from_bytes(&bytes).unwrap();

    // Assert
    assert_eq!(parsed, message);
    assert_eq!(bytes[1], DestUnreachableCode::Host as u8);
}

#[test]
fn IcmpMessage_TruncatedOffender_KeepsHeaderAndFirstEightPayloadBytes() {
    // Arrange: a 20-byte header followed by 16 bytes of payload.
    let mut original = vec![0u8; 20];
    original.extend((0..16u8).collect::<Vec<u8>>());

    // Act
    let offender = IcmpMessage::truncated_offender(&original, 20);

    // Assert
    assert_eq!(offender.len(), 28);
    assert_eq!(&offender[20..28], &[0, 1, 2, 3, 4, 5, 6, 7]);
}

#[test]
fn IcmpMessage_TruncatedOffender_ShorterThanEightBytesOfPayload_DoesNotPanic() {
    // Arrange: only 3 bytes of payload follow the header.
    let mut original = vec![0u8; 20];
    original.extend_from_slice(&[9, 9, 9]);

    // Act
    let offender = IcmpMessage::truncated_offender(&original, 20);

    // Assert
    assert_eq!(offender.len(), 23);
}
