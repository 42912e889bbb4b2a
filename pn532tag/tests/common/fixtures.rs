// fixtures.rs: commonly used APDUs, payloads and tokens

use pn532tag::Token;

pub const BASE_URL: &str = "ecotrip.meblabs.dev/";

pub fn firmware_payload() -> Vec<u8> {
    vec![0x32, 0x01, 0x06, 0x07]
}

pub fn sample_token() -> Token {
    Token::from("abc123")
}

pub fn sample_uri() -> &'static str {
    "https://ecotrip.meblabs.dev/abc123"
}

/// SELECT FILE by name with the NDEF application AID (Le = 0).
pub fn select_ndef_application() -> Vec<u8> {
    vec![0x00, 0xA4, 0x04, 0x00, 0x07, 0xD2, 0x76, 0x00, 0x00, 0x85, 0x01, 0x01, 0x00]
}

/// SELECT FILE by id, first or only occurrence, no FCI.
pub fn select_file(id: [u8; 2]) -> Vec<u8> {
    vec![0x00, 0xA4, 0x00, 0x0C, 0x02, id[0], id[1]]
}

pub fn select_cc() -> Vec<u8> {
    select_file([0xE1, 0x03])
}

pub fn select_ndef() -> Vec<u8> {
    select_file([0xE1, 0x04])
}

pub fn read_binary(offset: u16, le: u8) -> Vec<u8> {
    let [p1, p2] = offset.to_be_bytes();
    vec![0x00, 0xB0, p1, p2, le]
}

pub fn update_binary(offset: u16, data: &[u8]) -> Vec<u8> {
    let [p1, p2] = offset.to_be_bytes();
    let mut apdu = vec![0x00, 0xD6, p1, p2, data.len() as u8];
    apdu.extend_from_slice(data);
    apdu
}
