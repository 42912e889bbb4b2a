// pn532tag/src/apdu/mod.rs

//! ISO7816-4 command/response APDUs as seen by the emulated tag

pub mod emulator;

pub use emulator::Type4Tag;

/// Offset of CLA in a command APDU
pub const C_APDU_CLA: usize = 0;
/// Offset of INS
pub const C_APDU_INS: usize = 1;
/// Offset of P1
pub const C_APDU_P1: usize = 2;
/// Offset of P2
pub const C_APDU_P2: usize = 3;
/// Offset of Lc / Le
pub const C_APDU_LC: usize = 4;
/// Offset of the command data
pub const C_APDU_DATA: usize = 5;

/// Status word: command complete
pub const SW_COMMAND_COMPLETE: [u8; 2] = [0x90, 0x00];
/// Status word: file or application not found
pub const SW_TAG_NOT_FOUND: [u8; 2] = [0x6A, 0x82];
/// Status word: function not supported
pub const SW_FUNCTION_NOT_SUPPORTED: [u8; 2] = [0x6A, 0x81];
/// Status word: memory failure
pub const SW_MEMORY_FAILURE: [u8; 2] = [0x65, 0x81];
/// Status word: end of file reached before Le bytes
pub const SW_END_OF_FILE_BEFORE_LE: [u8; 2] = [0x62, 0x82];

/// Parsed command APDU.
///
/// The fifth byte is Lc for commands carrying data and Le for READ BINARY;
/// it is kept as `lc` either way. `data` holds at most `lc` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApduCommand {
    /// Class byte
    pub cla: u8,
    /// Instruction byte
    pub ins: u8,
    /// Parameter 1
    pub p1: u8,
    /// Parameter 2
    pub p2: u8,
    /// Lc (or Le for READ BINARY)
    pub lc: u8,
    /// Command data
    pub data: Vec<u8>,
}

impl ApduCommand {
    /// `None` when fewer than the five header bytes are present.
    pub fn parse(raw: &[u8]) -> Option<Self> {
        if raw.len() < C_APDU_DATA {
            return None;
        }
        let lc = raw[C_APDU_LC];
        let end = raw.len().min(C_APDU_DATA + lc as usize);
        Some(Self {
            cla: raw[C_APDU_CLA],
            ins: raw[C_APDU_INS],
            p1: raw[C_APDU_P1],
            p2: raw[C_APDU_P2],
            lc,
            data: raw[C_APDU_DATA..end].to_vec(),
        })
    }

    /// File offset carried in P1/P2 by READ and UPDATE BINARY.
    pub fn offset(&self) -> usize {
        ((self.p1 as usize) << 8) | self.p2 as usize
    }
}

/// Result of dispatching one command APDU.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseOutcome {
    /// 90 00 with response data
    CommandComplete(Vec<u8>),
    /// 6A 82
    TagNotFound,
    /// 6A 81
    FunctionNotSupported,
    /// 65 81
    MemoryFailure,
    /// 62 82
    EndOfFileBeforeLe,
}

impl ResponseOutcome {
    /// 90 00 without data
    pub fn complete() -> Self {
        ResponseOutcome::CommandComplete(Vec::new())
    }

    /// SW1 SW2 for this outcome
    pub fn status_word(&self) -> [u8; 2] {
        match self {
            ResponseOutcome::CommandComplete(_) => SW_COMMAND_COMPLETE,
            ResponseOutcome::TagNotFound => SW_TAG_NOT_FOUND,
            ResponseOutcome::FunctionNotSupported => SW_FUNCTION_NOT_SUPPORTED,
            ResponseOutcome::MemoryFailure => SW_MEMORY_FAILURE,
            ResponseOutcome::EndOfFileBeforeLe => SW_END_OF_FILE_BEFORE_LE,
        }
    }

    /// Response data, empty unless the command completed
    pub fn data(&self) -> &[u8] {
        match self {
            ResponseOutcome::CommandComplete(data) => data,
            _ => &[],
        }
    }

    /// Response APDU: data (if any) followed by SW1 SW2.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data().len() + 2);
        out.extend_from_slice(self.data());
        out.extend_from_slice(&self.status_word());
        out
    }
}
