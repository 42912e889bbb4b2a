// pn532tag/src/ndef/mod.rs

//! NDEF records and messages
//!
//! Encodes and decodes the NFC Data Exchange Format: a message is a chain
//! of records, each with a header byte (MB, ME, CF, SR, IL flags and a
//! 3-bit TNF), a type length, a 1- or 4-byte payload length, an optional ID
//! length, then type, ID and payload.

pub mod container;
pub mod uri;

pub use container::{build_uri_record, capability_container, ndef_file_for_uri, wrap_as_ndef_file};

use crate::{Error, Result};

const FLAG_MB: u8 = 0x80;
const FLAG_ME: u8 = 0x40;
const FLAG_CF: u8 = 0x20;
const FLAG_SR: u8 = 0x10;
const FLAG_IL: u8 = 0x08;
const TNF_MASK: u8 = 0x07;

/// Record type of well-known URI records
pub const RTD_URI: &[u8] = b"U";

/// Type Name Format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tnf {
    /// 0x00
    Empty,
    /// NFC Forum well-known type
    WellKnown,
    /// RFC 2046 media type
    Media,
    /// RFC 3986 absolute URI
    AbsoluteUri,
    /// NFC Forum external type
    External,
    /// 0x05
    Unknown,
    /// Middle or last chunk
    Unchanged,
    /// 0x07
    Reserved,
}

impl Tnf {
    /// Value of the TNF field
    pub fn bits(self) -> u8 {
        match self {
            Tnf::Empty => 0x00,
            Tnf::WellKnown => 0x01,
            Tnf::Media => 0x02,
            Tnf::AbsoluteUri => 0x03,
            Tnf::External => 0x04,
            Tnf::Unknown => 0x05,
            Tnf::Unchanged => 0x06,
            Tnf::Reserved => 0x07,
        }
    }

    /// Decode the low three bits of a record header.
    pub fn from_bits(bits: u8) -> Self {
        match bits & TNF_MASK {
            0x00 => Tnf::Empty,
            0x01 => Tnf::WellKnown,
            0x02 => Tnf::Media,
            0x03 => Tnf::AbsoluteUri,
            0x04 => Tnf::External,
            0x05 => Tnf::Unknown,
            0x06 => Tnf::Unchanged,
            _ => Tnf::Reserved,
        }
    }
}

/// One NDEF record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NdefRecord {
    /// Type name format
    pub tnf: Tnf,
    /// Type field
    pub record_type: Vec<u8>,
    /// ID field, empty when absent
    pub id: Vec<u8>,
    /// Record payload
    pub payload: Vec<u8>,
}

impl NdefRecord {
    /// Record from its raw fields.
    pub fn new(tnf: Tnf, record_type: &[u8], id: &[u8], payload: &[u8]) -> Self {
        Self {
            tnf,
            record_type: record_type.to_vec(),
            id: id.to_vec(),
            payload: payload.to_vec(),
        }
    }

    /// Well-known URI record using the longest matching identifier code.
    pub fn uri_record(uri: &str) -> Self {
        let (code, rest) = uri::split_prefix(uri);
        Self::uri_record_with_code(code, rest)
    }

    /// Well-known URI record with an explicit identifier code; `rest` is
    /// stored as-is after the code byte.
    pub fn uri_record_with_code(code: u8, rest: &str) -> Self {
        let mut payload = Vec::with_capacity(1 + rest.len());
        payload.push(code);
        payload.extend_from_slice(rest.as_bytes());
        Self {
            tnf: Tnf::WellKnown,
            record_type: RTD_URI.to_vec(),
            id: Vec::new(),
            payload,
        }
    }

    /// Expanded URI of a well-known URI record, `None` for any other record.
    pub fn uri(&self) -> Option<String> {
        if self.tnf != Tnf::WellKnown || self.record_type != RTD_URI {
            return None;
        }
        let (&code, rest) = self.payload.split_first()?;
        let rest = std::str::from_utf8(rest).ok()?;
        Some(format!("{}{}", uri::prefix_for(code), rest))
    }

    /// Whether the payload fits the short record format
    pub fn is_short(&self) -> bool {
        self.payload.len() < 256
    }

    fn encode_into(&self, out: &mut Vec<u8>, first: bool, last: bool) -> Result<()> {
        let type_len = u8::try_from(self.record_type.len())
            .map_err(|_| Error::MalformedNdef("record type longer than 255 bytes"))?;
        let id_len = u8::try_from(self.id.len())
            .map_err(|_| Error::MalformedNdef("record id longer than 255 bytes"))?;
        let payload_len = u32::try_from(self.payload.len())
            .map_err(|_| Error::MalformedNdef("payload does not fit a record"))?;

        let mut header = self.tnf.bits();
        if first {
            header |= FLAG_MB;
        }
        if last {
            header |= FLAG_ME;
        }
        if self.is_short() {
            header |= FLAG_SR;
        }
        if !self.id.is_empty() {
            header |= FLAG_IL;
        }

        out.push(header);
        out.push(type_len);
        if self.is_short() {
            out.push(payload_len as u8);
        } else {
            out.extend_from_slice(&payload_len.to_be_bytes());
        }
        if !self.id.is_empty() {
            out.push(id_len);
        }
        out.extend_from_slice(&self.record_type);
        out.extend_from_slice(&self.id);
        out.extend_from_slice(&self.payload);
        Ok(())
    }
}

/// Ordered list of NDEF records
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NdefMessage {
    records: Vec<NdefRecord>,
}

impl NdefMessage {
    /// Message from `records`, in order.
    pub fn new(records: Vec<NdefRecord>) -> Self {
        Self { records }
    }

    /// Message made of one record
    pub fn single(record: NdefRecord) -> Self {
        Self {
            records: vec![record],
        }
    }

    /// Records in message order
    pub fn records(&self) -> &[NdefRecord] {
        &self.records
    }

    /// Whether the message has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Encode with MB on the first record and ME on the last. An empty message is an error.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        if self.records.is_empty() {
            return Err(Error::MalformedNdef("message has no records"));
        }
        let mut out = Vec::new();
        let last = self.records.len() - 1;
        for (i, record) in self.records.iter().enumerate() {
            record.encode_into(&mut out, i == 0, i == last)?;
        }
        Ok(out)
    }

    /// Parse a complete message. Chunked records are rejected; bytes after
    /// the record carrying ME are ignored.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut records = Vec::new();
        let mut pos = 0usize;
        loop {
            let header = *data
                .get(pos)
                .ok_or(Error::MalformedNdef("message end flag missing"))?;
            if records.is_empty() && header & FLAG_MB == 0 {
                return Err(Error::MalformedNdef("first record lacks message begin flag"));
            }
            if header & FLAG_CF != 0 {
                return Err(Error::MalformedNdef("chunked records are not supported"));
            }
            pos += 1;

            let type_len = take(data, &mut pos, 1)?[0] as usize;
            let payload_len = if header & FLAG_SR != 0 {
                take(data, &mut pos, 1)?[0] as usize
            } else {
                let b = take(data, &mut pos, 4)?;
                u32::from_be_bytes([b[0], b[1], b[2], b[3]]) as usize
            };
            let id_len = if header & FLAG_IL != 0 {
                take(data, &mut pos, 1)?[0] as usize
            } else {
                0
            };

            let record_type = take(data, &mut pos, type_len)?.to_vec();
            let id = take(data, &mut pos, id_len)?.to_vec();
            let payload = take(data, &mut pos, payload_len)?.to_vec();
            records.push(NdefRecord {
                tnf: Tnf::from_bits(header),
                record_type,
                id,
                payload,
            });

            if header & FLAG_ME != 0 {
                return Ok(Self { records });
            }
        }
    }
}

fn take<'a>(data: &'a [u8], pos: &mut usize, len: usize) -> Result<&'a [u8]> {
    let end = pos
        .checked_add(len)
        .filter(|end| *end <= data.len())
        .ok_or(Error::MalformedNdef("record truncated"))?;
    let out = &data[*pos..end];
    *pos = end;
    Ok(out)
}
