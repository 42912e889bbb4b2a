// pn532tag/src/ndef/container.rs
//! Type 4 Tag file contents: Capability Container and NDEF file

use crate::constants::{NDEF_FILE_ID, NDEF_MAX_LENGTH, URI_PREFIX_HTTPS};
use crate::ndef::{NdefMessage, NdefRecord};
use crate::{Error, Result};

/// Mapping version 2.0
const CC_MAPPING_VERSION: u8 = 0x20;
/// MLe: largest R-APDU data the reader may request
const CC_MAX_READ: [u8; 2] = [0x00, 0x54];
/// MLc: largest C-APDU data the reader may send
const CC_MAX_WRITE: [u8; 2] = [0x00, 0xFF];
/// NDEF File Control TLV tag and length
const NDEF_FILE_CONTROL_TLV: [u8; 2] = [0x04, 0x06];
const READ_ACCESS_GRANTED: u8 = 0x00;
const WRITE_ACCESS_DENIED: u8 = 0xFF;

/// Capability Container length (CCLEN)
pub const CC_LEN: usize = 15;

/// Capability Container advertising a read-only NDEF file `E1 04` of at
/// most `max_ndef_size` bytes (capped at [`NDEF_MAX_LENGTH`]).
pub fn capability_container(max_ndef_size: usize) -> [u8; CC_LEN] {
    let max = max_ndef_size.min(NDEF_MAX_LENGTH) as u16;
    let [max_hi, max_lo] = max.to_be_bytes();
    [
        0x00,
        CC_LEN as u8,
        CC_MAPPING_VERSION,
        CC_MAX_READ[0],
        CC_MAX_READ[1],
        CC_MAX_WRITE[0],
        CC_MAX_WRITE[1],
        NDEF_FILE_CONTROL_TLV[0],
        NDEF_FILE_CONTROL_TLV[1],
        NDEF_FILE_ID[0],
        NDEF_FILE_ID[1],
        max_hi,
        max_lo,
        READ_ACCESS_GRANTED,
        WRITE_ACCESS_DENIED,
    ]
}

/// Single-record URI message: identifier code 0x04 ("https://") followed
/// by `uri` verbatim.
pub fn build_uri_record(uri: &str) -> Result<Vec<u8>> {
    NdefMessage::single(NdefRecord::uri_record_with_code(URI_PREFIX_HTTPS, uri)).to_bytes()
}

/// NDEF file content: 2-byte big-endian NLEN, then the message.
pub fn wrap_as_ndef_file(message: &[u8]) -> Result<Vec<u8>> {
    let len = u16::try_from(message.len()).map_err(|_| Error::InvalidLength {
        expected: u16::MAX as usize,
        actual: message.len(),
    })?;
    let mut out = Vec::with_capacity(2 + message.len());
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(message);
    Ok(out)
}

/// NDEF file holding a single https URI record for `uri`.
pub fn ndef_file_for_uri(uri: &str) -> Result<Vec<u8>> {
    wrap_as_ndef_file(&build_uri_record(uri)?)
}
