// pn532tag/src/constants.rs
//! Common protocol constants used across the crate

/// Link-layer preamble
pub const PN532_PREAMBLE: u8 = 0x00;
/// First start code byte
pub const PN532_STARTCODE1: u8 = 0x00;
/// Second start code byte
pub const PN532_STARTCODE2: u8 = 0xFF;
/// Link-layer postamble
pub const PN532_POSTAMBLE: u8 = 0x00;

/// Frame identifier for host -> chip frames (TFI)
pub const PN532_HOST_TO_PN532: u8 = 0xD4;
/// Frame identifier for chip -> host frames (TFI)
pub const PN532_PN532_TO_HOST: u8 = 0xD5;

/// ACK frame emitted by the chip after accepting a command frame
pub const PN532_ACK: [u8; 6] = [0x00, 0x00, 0xFF, 0x00, 0xFF, 0x00];

/// Largest LEN value a normal information frame can carry
pub const PN532_MAX_FRAME_LEN: usize = 255;

/// SPI operation byte: host writes a frame
pub const PN532_SPI_DATAWRITE: u8 = 0x01;
/// SPI operation byte: host reads the status byte
pub const PN532_SPI_STATREAD: u8 = 0x02;
/// SPI operation byte: host reads a frame
pub const PN532_SPI_DATAREAD: u8 = 0x03;
/// Status byte value signalling that the chip has data ready
pub const PN532_SPI_READY: u8 = 0x01;

/// PN532 command code: GetFirmwareVersion
pub const PN532_COMMAND_GETFIRMWAREVERSION: u8 = 0x02;
/// SAMConfiguration
pub const PN532_COMMAND_SAMCONFIGURATION: u8 = 0x14;
/// InListPassiveTarget
pub const PN532_COMMAND_INLISTPASSIVETARGET: u8 = 0x4A;
/// InRelease
pub const PN532_COMMAND_INRELEASE: u8 = 0x52;
/// TgInitAsTarget
pub const PN532_COMMAND_TGINITASTARGET: u8 = 0x8C;
/// TgGetData
pub const PN532_COMMAND_TGGETDATA: u8 = 0x86;
/// TgSetData
pub const PN532_COMMAND_TGSETDATA: u8 = 0x8E;

/// Target status reported when the initiator released the target
pub const PN532_STATUS_RELEASED: u8 = 0x29;

/// Baud rate / modulation byte for 106 kbps ISO14443A targets
pub const PN532_MIFARE_ISO14443A: u8 = 0x00;

/// Scratch buffer length for chip responses. Kept at 40 instead of the
/// link's practical 64 bytes: some iPhone readers break on larger reads.
pub const PN532_PACKET_BUFFER_LEN: usize = 40;

/// ISO7816-4 instruction: SELECT FILE
pub const ISO7816_SELECT_FILE: u8 = 0xA4;
/// READ BINARY
pub const ISO7816_READ_BINARY: u8 = 0xB0;
/// UPDATE BINARY
pub const ISO7816_UPDATE_BINARY: u8 = 0xD6;

/// SELECT FILE P1: select by file identifier
pub const C_APDU_P1_SELECT_BY_ID: u8 = 0x00;
/// Select by application name
pub const C_APDU_P1_SELECT_BY_NAME: u8 = 0x04;

/// P2 required by SELECT FILE by id ("first or only occurrence, no FCI")
pub const C_APDU_P2_SELECT_NO_FCI: u8 = 0x0C;

/// NFC Forum Type 4 Tag NDEF application name (AID), version 2
pub const NDEF_TAG_APPLICATION_NAME_V2: [u8; 7] = [0xD2, 0x76, 0x00, 0x00, 0x85, 0x01, 0x01];

/// Capability Container file identifier
pub const CC_FILE_ID: [u8; 2] = [0xE1, 0x03];
/// NDEF file identifier
pub const NDEF_FILE_ID: [u8; 2] = [0xE1, 0x04];

/// Largest offset / NDEF size served by the emulated tag
pub const NDEF_MAX_LENGTH: usize = 255;

/// URI identifier code for "https://"
pub const URI_PREFIX_HTTPS: u8 = 0x04;

/// Base URL the authorization token is appended to
pub const DEFAULT_BASE_URL: &str = "ecotrip.meblabs.dev/";
