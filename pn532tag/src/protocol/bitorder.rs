// pn532tag/src/protocol/bitorder.rs

//! The PN532 clocks SPI bytes LSB first while the host controller sends MSB
//! first. Every byte crossing the bus is mirrored (bit 0 <-> bit 7, ...) on
//! both the write and the read path.

/// Mirror the bit order of a single byte.
#[inline]
pub fn reverse(b: u8) -> u8 {
    b.reverse_bits()
}

/// Mirror every byte of `buf` in place.
pub fn reverse_in_place(buf: &mut [u8]) {
    for b in buf.iter_mut() {
        *b = reverse(*b);
    }
}

/// Return a mirrored copy of `data`.
pub fn reversed(data: &[u8]) -> Vec<u8> {
    data.iter().map(|&b| reverse(b)).collect()
}
