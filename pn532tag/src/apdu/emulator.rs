// pn532tag/src/apdu/emulator.rs

//! Type 4 tag command dispatcher

use log::debug;

use crate::apdu::{ApduCommand, ResponseOutcome};
use crate::constants::{
    CC_FILE_ID, C_APDU_P1_SELECT_BY_ID, C_APDU_P1_SELECT_BY_NAME, C_APDU_P2_SELECT_NO_FCI,
    ISO7816_READ_BINARY, ISO7816_SELECT_FILE, ISO7816_UPDATE_BINARY, NDEF_FILE_ID,
    NDEF_MAX_LENGTH, NDEF_TAG_APPLICATION_NAME_V2,
};
use crate::ndef::container::{CC_LEN, capability_container};
use crate::types::SelectedFile;
use crate::utils::HexSlice;

/// NFC Forum Type 4 Tag state machine serving a read-only NDEF file.
///
/// State is the selected file, which only a successful SELECT FILE by id
/// changes. Call [`reset`](Self::reset) at the start of every session.
#[derive(Debug, Clone)]
pub struct Type4Tag {
    selected: SelectedFile,
    writable: bool,
    cc: [u8; CC_LEN],
    max_len: usize,
    ndef_unavailable: bool,
}

impl Default for Type4Tag {
    fn default() -> Self {
        Self::new(NDEF_MAX_LENGTH)
    }
}

impl Type4Tag {
    /// Tag advertising `max_ndef_size` bytes, capped at 255.
    pub fn new(max_ndef_size: usize) -> Self {
        let max_len = max_ndef_size.min(NDEF_MAX_LENGTH);
        Self {
            selected: SelectedFile::None,
            writable: false,
            cc: capability_container(max_len),
            max_len,
            ndef_unavailable: false,
        }
    }

    /// Forget the selection and the unavailable flag.
    pub fn reset(&mut self) {
        self.selected = SelectedFile::None;
        self.ndef_unavailable = false;
    }

    /// Currently selected file
    pub fn selected(&self) -> SelectedFile {
        self.selected
    }

    /// Always false: UPDATE BINARY is refused.
    pub fn is_writable(&self) -> bool {
        self.writable
    }

    /// Capability container served for `E1 03`
    pub fn capability_container(&self) -> &[u8] {
        &self.cc
    }

    /// Set once a READ BINARY on the NDEF file found no content to serve.
    pub fn ndef_unavailable(&self) -> bool {
        self.ndef_unavailable
    }

    /// Answer one command APDU. `ndef_file` is called only for READ BINARY
    /// on the NDEF file and yields the current file content, or `None` when
    /// there is nothing to serve.
    pub fn dispatch<F>(&mut self, raw: &[u8], ndef_file: F) -> ResponseOutcome
    where
        F: FnOnce() -> Option<Vec<u8>>,
    {
        let Some(apdu) = ApduCommand::parse(raw) else {
            debug!("short APDU: {}", HexSlice(raw));
            return ResponseOutcome::FunctionNotSupported;
        };
        debug!(
            "APDU ins={:#04x} p1={:#04x} p2={:#04x} lc={}",
            apdu.ins, apdu.p1, apdu.p2, apdu.lc
        );

        match apdu.ins {
            ISO7816_SELECT_FILE => self.select_file(&apdu),
            ISO7816_READ_BINARY => self.read_binary(&apdu, ndef_file),
            ISO7816_UPDATE_BINARY => self.update_binary(&apdu),
            ins => {
                debug!("instruction {:#04x} not supported", ins);
                ResponseOutcome::FunctionNotSupported
            }
        }
    }

    fn select_file(&mut self, apdu: &ApduCommand) -> ResponseOutcome {
        match apdu.p1 {
            C_APDU_P1_SELECT_BY_ID => {
                if apdu.p2 != C_APDU_P2_SELECT_NO_FCI {
                    // Accepted without selecting anything; readers in the
                    // field depend on this answer.
                    debug!("select by id with p2={:#04x}", apdu.p2);
                    return ResponseOutcome::complete();
                }
                if apdu.lc != 2 {
                    return ResponseOutcome::TagNotFound;
                }
                if apdu.data == CC_FILE_ID {
                    self.selected = SelectedFile::CapabilityContainer;
                } else if apdu.data == NDEF_FILE_ID {
                    self.selected = SelectedFile::NdefFile;
                } else {
                    debug!("select by id: no file {}", HexSlice(&apdu.data));
                    return ResponseOutcome::TagNotFound;
                }
                debug!("selected {:?}", self.selected);
                ResponseOutcome::complete()
            }
            C_APDU_P1_SELECT_BY_NAME => {
                let matches = apdu.p2 == 0x00
                    && apdu.lc as usize == NDEF_TAG_APPLICATION_NAME_V2.len()
                    && apdu.data == NDEF_TAG_APPLICATION_NAME_V2;
                if matches {
                    ResponseOutcome::complete()
                } else {
                    debug!("select by name: unknown application {}", HexSlice(&apdu.data));
                    ResponseOutcome::FunctionNotSupported
                }
            }
            p1 => {
                debug!("select with p1={:#04x} not supported", p1);
                ResponseOutcome::FunctionNotSupported
            }
        }
    }

    fn read_binary<F>(&mut self, apdu: &ApduCommand, ndef_file: F) -> ResponseOutcome
    where
        F: FnOnce() -> Option<Vec<u8>>,
    {
        let offset = apdu.offset();
        let le = apdu.lc as usize;
        match self.selected {
            SelectedFile::None => ResponseOutcome::TagNotFound,
            _ if offset > self.max_len => ResponseOutcome::EndOfFileBeforeLe,
            SelectedFile::CapabilityContainer => {
                ResponseOutcome::CommandComplete(window(&self.cc, offset, le))
            }
            SelectedFile::NdefFile => match ndef_file() {
                Some(file) => {
                    debug!("read NDEF {}+{} of {}", offset, le, file.len());
                    ResponseOutcome::CommandComplete(window(&file, offset, le))
                }
                None => {
                    self.ndef_unavailable = true;
                    ResponseOutcome::TagNotFound
                }
            },
        }
    }

    fn update_binary(&mut self, apdu: &ApduCommand) -> ResponseOutcome {
        if apdu.offset() > self.max_len {
            return ResponseOutcome::MemoryFailure;
        }
        if !self.writable {
            debug!("update binary refused: tag is read-only");
            return ResponseOutcome::FunctionNotSupported;
        }
        // Nothing stores writes: the NDEF file is rebuilt from the token on
        // every read.
        ResponseOutcome::FunctionNotSupported
    }
}

/// Up to `len` bytes of `src` starting at `offset`, cut at the end of `src`.
fn window(src: &[u8], offset: usize, len: usize) -> Vec<u8> {
    let start = offset.min(src.len());
    let end = offset.saturating_add(len).min(src.len());
    src[start..end].to_vec()
}
