use pn532tag::protocol::Frame;
use pn532tag::{Direction, Error, ParseError};
use proptest::prelude::*;

#[test]
fn get_firmware_version_frame_matches_capture() {
    let raw = Frame::encode_command(&[0x02], &[]).unwrap();
    assert_eq!(raw, hex::decode("0000ff02fed4022a00").unwrap());
}

#[test]
fn sam_configuration_frame_matches_capture() {
    let raw = Frame::encode_command(&[0x14, 0x01, 0x14, 0x01], &[]).unwrap();
    assert_eq!(raw, hex::decode("0000ff05fbd4140114010200").unwrap());
}

#[test]
fn response_with_wrong_echo_is_rejected() {
    let raw = Frame::response(0x4A, &[0x00]).to_bytes().unwrap();
    assert!(matches!(
        Frame::decode_response(&raw, 0x86, 40),
        Err(Error::Frame(ParseError::BadDirectionOrCommandEcho {
            tfi: 0xD5,
            command: 0x4B
        }))
    ));
}

#[test]
fn oversized_command_is_rejected() {
    let body = vec![0u8; 254];
    assert!(matches!(
        Frame::encode_command(&[0x8E], &body),
        Err(Error::InvalidLength { .. })
    ));
}

proptest! {
    #[test]
    fn command_roundtrip(
        header in proptest::collection::vec(any::<u8>(), 1..8),
        body in proptest::collection::vec(any::<u8>(), 0..200),
    ) {
        let raw = Frame::encode_command(&header, &body).unwrap();
        let frame = Frame::parse(&raw, 253).unwrap();
        prop_assert_eq!(frame.direction, Direction::HostToChip);
        prop_assert_eq!(frame.command, header[0]);
        let mut expected = header[1..].to_vec();
        expected.extend_from_slice(&body);
        prop_assert_eq!(frame.payload, expected);
    }

    #[test]
    fn checksums_sum_to_zero(
        command in any::<u8>(),
        payload in proptest::collection::vec(any::<u8>(), 0..253),
    ) {
        let raw = Frame::response(command, &payload).to_bytes().unwrap();
        // LEN + LCS
        prop_assert_eq!(raw[3].wrapping_add(raw[4]), 0);
        // TFI..payload + DCS
        let data_end = raw.len() - 1;
        let total = raw[5..data_end].iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
        prop_assert_eq!(total, 0);
    }
}
