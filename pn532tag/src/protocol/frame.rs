// pn532tag/src/protocol/frame.rs

//! Normal information frames: encoding, decoding and header quirks

use crate::constants::{
    PN532_MAX_FRAME_LEN, PN532_POSTAMBLE, PN532_PREAMBLE, PN532_STARTCODE1, PN532_STARTCODE2,
};
use crate::error::ParseError;
use crate::protocol::checksum::{dcs, lcs, sum};
use crate::types::Direction;
use crate::{Error, Result};

/// PN532 normal information frame.
/// Format: [Preamble] [Start(2)] [Len] [LCS] [TFI] [Cmd] [Payload(n)] [DCS] [Postamble]
/// Start code: 0x00 0xFF
/// LEN counts TFI + Cmd + Payload; DCS covers the same bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Carried as the TFI byte
    pub direction: Direction,
    /// Command code, or its echo (+1) in a response
    pub command: u8,
    /// Bytes after the command code
    pub payload: Vec<u8>,
}

impl Frame {
    /// Build a host -> chip frame. `header[0]` is the command code; the rest
    /// of the header and the body form the payload.
    pub fn command(header: &[u8], body: &[u8]) -> Result<Self> {
        let (&command, rest) = header.split_first().ok_or(Error::InvalidLength {
            expected: 1,
            actual: 0,
        })?;
        let mut payload = Vec::with_capacity(rest.len() + body.len());
        payload.extend_from_slice(rest);
        payload.extend_from_slice(body);
        Ok(Self {
            direction: Direction::HostToChip,
            command,
            payload,
        })
    }

    /// Build the chip -> host frame answering `command`.
    pub fn response(command: u8, payload: &[u8]) -> Self {
        Self {
            direction: Direction::ChipToHost,
            command: command.wrapping_add(1),
            payload: payload.to_vec(),
        }
    }

    /// Encode the frame into wire order (before bit reversal).
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let len = 2 + self.payload.len();
        if len > PN532_MAX_FRAME_LEN {
            return Err(Error::InvalidLength {
                expected: PN532_MAX_FRAME_LEN,
                actual: len,
            });
        }

        let len = len as u8;
        let tfi = self.direction.tfi();
        let data_sum = tfi
            .wrapping_add(self.command)
            .wrapping_add(sum(&self.payload));

        let mut out = Vec::with_capacity(self.payload.len() + 9);
        out.push(PN532_PREAMBLE);
        out.push(PN532_STARTCODE1);
        out.push(PN532_STARTCODE2);
        out.push(len);
        out.push(lcs(len));
        out.push(tfi);
        out.push(self.command);
        out.extend_from_slice(&self.payload);
        out.push(0u8.wrapping_sub(data_sum));
        out.push(PN532_POSTAMBLE);
        Ok(out)
    }

    /// Convenience: encode a host -> chip command frame.
    pub fn encode_command(header: &[u8], body: &[u8]) -> Result<Vec<u8>> {
        Self::command(header, body)?.to_bytes()
    }

    /// Read one frame from a byte source. `expected_command` restricts the
    /// frame to the chip's answer to that command; `max_payload` bounds the
    /// payload so oversized responses are rejected before they are read.
    ///
    /// The chip sometimes drops the leading preamble byte, so headers
    /// starting `FF LEN LCS` or `00 FF LEN` are accepted as well.
    pub fn read_from<F>(mut next: F, expected_command: Option<u8>, max_payload: usize) -> Result<Self>
    where
        F: FnMut() -> Result<u8>,
    {
        let first = [next()?, next()?, next()?];
        let (len, len_checksum) = if first == [PN532_PREAMBLE, PN532_STARTCODE1, PN532_STARTCODE2]
        {
            (next()?, next()?)
        } else if first[0] == PN532_STARTCODE2 {
            log::trace!("frame header already advanced by two bytes");
            (first[1], first[2])
        } else if first[0] == PN532_STARTCODE1 && first[1] == PN532_STARTCODE2 {
            log::trace!("frame header already advanced by one byte");
            (first[2], next()?)
        } else {
            return Err(ParseError::BadHeader.into());
        };

        if len.wrapping_add(len_checksum) != 0 {
            return Err(ParseError::BadLengthChecksum {
                len,
                lcs: len_checksum,
            }
            .into());
        }
        if len < 2 {
            return Err(ParseError::BadHeader.into());
        }

        let tfi = next()?;
        let command = next()?;
        let direction = match (expected_command, Direction::from_tfi(tfi)) {
            (Some(cmd), Some(Direction::ChipToHost)) if command == cmd.wrapping_add(1) => {
                Direction::ChipToHost
            }
            (None, Some(direction)) => direction,
            _ => return Err(ParseError::BadDirectionOrCommandEcho { tfi, command }.into()),
        };

        let payload_len = len as usize - 2;
        if payload_len > max_payload {
            return Err(ParseError::PayloadTooLarge {
                len: payload_len,
                max: max_payload,
            }
            .into());
        }

        let mut payload = Vec::with_capacity(payload_len);
        for _ in 0..payload_len {
            payload.push(next()?);
        }

        let expected = 0u8.wrapping_sub(tfi.wrapping_add(command).wrapping_add(sum(&payload)));
        let actual = next()?;
        if actual != expected {
            return Err(ParseError::BadPayloadChecksum { expected, actual }.into());
        }

        // Postamble; its value is not checked.
        let _ = next()?;

        Ok(Self {
            direction,
            command,
            payload,
        })
    }

    /// Parse a frame captured in a slice.
    pub fn parse(raw: &[u8], max_payload: usize) -> Result<Self> {
        Self::read_from(slice_source(raw), None, max_payload)
    }

    /// Decode the chip's response to `command` and return its payload.
    pub fn decode_response(raw: &[u8], command: u8, max_payload: usize) -> Result<Vec<u8>> {
        Self::read_from(slice_source(raw), Some(command), max_payload).map(|f| f.payload)
    }

    /// Checksum of the data section (TFI + command + payload).
    pub fn data_checksum(&self) -> u8 {
        let mut data = vec![self.direction.tfi(), self.command];
        data.extend_from_slice(&self.payload);
        dcs(&data)
    }
}

fn slice_source(raw: &[u8]) -> impl FnMut() -> Result<u8> + '_ {
    let mut pos = 0usize;
    move || {
        let b = raw.get(pos).copied().ok_or(Error::InvalidLength {
            expected: pos + 1,
            actual: raw.len(),
        })?;
        pos += 1;
        Ok(b)
    }
}
