use pn532tag::protocol::bitorder::{reverse, reversed};

#[test]
fn reversal_is_involutive_for_every_byte() {
    for b in 0..=255u8 {
        assert_eq!(reverse(reverse(b)), b);
    }
}

#[test]
fn control_bytes_on_the_wire() {
    // DATAWRITE, STATREAD, DATAREAD as clocked out MSB first
    assert_eq!(reversed(&[0x01, 0x02, 0x03]), vec![0x80, 0x40, 0xC0]);
}
