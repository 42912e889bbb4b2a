// pn532tag/src/types.rs

//! Small shared types

use crate::Error;
use derive_more::{Display, From};
use std::convert::TryFrom;

/// Outcome of a write + ack cycle on the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelStatus {
    /// Command acknowledged
    Ok,
    /// Chip never reported ready
    Timeout,
    /// ACK frame mismatch
    InvalidAck,
}

impl ChannelStatus {
    /// Turn the control-flow signal into a `Result` so command wrappers can
    /// use `?`.
    pub fn into_result(self) -> crate::Result<()> {
        match self {
            ChannelStatus::Ok => Ok(()),
            ChannelStatus::Timeout => Err(Error::LinkTimeout),
            ChannelStatus::InvalidAck => Err(Error::InvalidAck),
        }
    }
}

/// Frame direction, carried on the wire as the TFI byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// 0xD4
    HostToChip,
    /// 0xD5
    ChipToHost,
}

impl Direction {
    /// TFI byte for this direction
    pub fn tfi(self) -> u8 {
        match self {
            Direction::HostToChip => crate::constants::PN532_HOST_TO_PN532,
            Direction::ChipToHost => crate::constants::PN532_PN532_TO_HOST,
        }
    }

    /// Direction for a TFI byte
    pub fn from_tfi(tfi: u8) -> Option<Self> {
        match tfi {
            crate::constants::PN532_HOST_TO_PN532 => Some(Direction::HostToChip),
            crate::constants::PN532_PN532_TO_HOST => Some(Direction::ChipToHost),
            _ => None,
        }
    }
}

/// Logical file currently selected on the emulated Type 4 tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectedFile {
    /// Nothing selected yet
    #[default]
    None,
    /// `E1 03`
    CapabilityContainer,
    /// `E1 04`
    NdefFile,
}

/// Authorization token embedded in the served URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, From)]
pub struct Token(String);

impl Token {
    /// Wrap a token string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Token text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Firmware version word returned by GetFirmwareVersion (IC, Ver, Rev, Support).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, From)]
#[display(fmt = "{:#010x}", _0)]
pub struct FirmwareVersion(u32);

impl FirmwareVersion {
    /// Version from its raw big-endian word
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw version word
    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// IC identifier, 0x32 for a PN532
    pub fn ic(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Firmware version
    pub fn version(&self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Firmware revision
    pub fn revision(&self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Supported card families bitmask
    pub fn support(&self) -> u8 {
        self.0 as u8
    }
}

impl TryFrom<&[u8]> for FirmwareVersion {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() < 4 {
            return Err(Error::InvalidLength {
                expected: 4,
                actual: bytes.len(),
            });
        }
        Ok(Self(u32::from_be_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3],
        ])))
    }
}

/// UID of a passive target found by InListPassiveTarget
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Uid(Vec<u8>);

impl Uid {
    /// Wrap raw UID bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Raw UID bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// UID length in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the UID has no bytes
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lowercase hex, no separators
    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(&self.0)
    }
}
