#![allow(non_snake_case)]

use crate::checksum::internet_checksum;

#[test]
fn InternetChecksum_RFC1071WorkedExample_MatchesKnownValue() {
    // Arrange: the worked example from RFC 1071 §3.
    let data = [0x00, 0x01, 0xf2, 0x03, 0xf4, 0xf5, 0xf6, 0xf7];

    // Act
    let sum = internet_checksum(&data);

    // Assert
    assert_eq!(sum, 0x220d);
}

#[test]
fn InternetChecksum_OddLength_PadsTrailingByteWithZero() {
    // Arrange
    let even = [0x45, 0x00, 0x00, 0x14];
    let odd = [0x45, 0x00, 0x00, 0x14, 0x00];

    // Act
    let sum_even = internet_checksum(&even);
    let sum_odd = internet_checksum(&odd);

    // Assert: appending an explicit zero byte must not change the sum.
    assert_eq!(sum_even, sum_odd);
}

#[test]
fn InternetChecksum_AppliedOverItsOwnChecksumField_SumsToZero() {
    // Arrange
    let mut header = vec![
        0x45, 0x00, 0x00, 0x3c, 0x1c, 0x46, 0x40, 0x00, 0x40, 0x06, 0x00, 0x00, 0xac, 0x10, 0x0a,
        0x63, 0xac, 0x10, 0x0a, 0x0c,
    ];
    let checksum = internet_checksum(&header);
    header[10..12].copy_from_slice(&checksum.to_be_bytes());

    // Act
    let verify = internet_checksum(&header);

    // Assert
    assert_eq!(verify, 0);
}

#[test]
fn InternetChecksum_EmptyInput_IsAllOnes() {
    // Arrange
    let data: [u8; 0] = [];

    // Act
    let sum = internet_checksum(&data);

    // Assert
    assert_eq!(sum, 0xFFFF);
}
