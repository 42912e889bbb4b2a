// pn532tag/src/prelude.rs

//! Commonly used types

pub use crate::apdu::{ApduCommand, ResponseOutcome, Type4Tag};
pub use crate::channel::{Channel, MockChannel, SpiChannel};
pub use crate::config::EmulatorConfig;
pub use crate::device::{Pn532, TargetProfile};
pub use crate::ndef::{NdefMessage, NdefRecord, Tnf};
pub use crate::protocol::Frame;
#[cfg(feature = "async")]
pub use crate::service::{SessionEnd, TagEmulator};
pub use crate::token::{TokenHolder, TokenSource};
pub use crate::transport::{BusTransport, MockTransport, SpiTransport};
pub use crate::{
    ChannelStatus, Direction, Error, FirmwareVersion, ParseError, Result, SelectedFile, Token, Uid,
};

// Re-export small utilities for convenience
pub use crate::utils::{HexSlice, bytes_to_hex, ms};
