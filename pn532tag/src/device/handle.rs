// pn532tag/src/device/handle.rs

//! Chip commands over a channel

use log::{debug, info, trace};

use crate::channel::Channel;
use crate::constants::{
    PN532_COMMAND_GETFIRMWAREVERSION, PN532_COMMAND_INLISTPASSIVETARGET, PN532_COMMAND_INRELEASE,
    PN532_COMMAND_SAMCONFIGURATION, PN532_COMMAND_TGGETDATA, PN532_COMMAND_TGINITASTARGET,
    PN532_COMMAND_TGSETDATA, PN532_PACKET_BUFFER_LEN,
};
use crate::device::profiles::TargetProfile;
use crate::protocol::parser::{byte_at, expect_status_ok, slice_at};
use crate::types::{FirmwareVersion, Uid};
use crate::utils::{DEFAULT_READ_TIMEOUT_MS, HexSlice, INITIATOR_TIMEOUT_MS};
use crate::{Error, Result};

/// Response budget for GetFirmwareVersion
const FIRMWARE_RESPONSE_LEN: usize = 12;
/// Response budget for SAMConfiguration
const SAM_RESPONSE_LEN: usize = 8;
/// Response budget for InListPassiveTarget when only the UID is wanted
const PASSIVE_TARGET_RESPONSE_LEN: usize = 20;

/// Offset of the NFCID length byte in an InListPassiveTarget response
/// (`NbTg, Tg, SENS_RES(2), SEL_RES, NFCIDLength, NFCID...`).
const UID_LEN_OFFSET: usize = 5;
const UID_OFFSET: usize = 6;

/// PN532 command catalogue over a [`Channel`].
///
/// Every command is one `write_command` + `read_response` round trip into a
/// freshly allocated response buffer. The buffer length defaults to
/// [`PN532_PACKET_BUFFER_LEN`] and bounds what the chip may send back.
pub struct Pn532<C> {
    channel: C,
    buffer_len: usize,
    response_timeout_ms: u64,
    initiator_timeout_ms: u64,
}

impl<C: Channel> Pn532<C> {
    /// Driver over `channel` with the 40-byte buffer and default timeouts.
    pub fn new(channel: C) -> Self {
        Self {
            channel,
            buffer_len: PN532_PACKET_BUFFER_LEN,
            response_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
            initiator_timeout_ms: INITIATOR_TIMEOUT_MS,
        }
    }

    /// Override the response buffer length.
    pub fn with_buffer_len(mut self, len: usize) -> Self {
        self.buffer_len = len;
        self
    }

    /// Read timeout for ordinary commands.
    pub fn with_response_timeout(mut self, timeout_ms: u64) -> Self {
        self.response_timeout_ms = timeout_ms;
        self
    }

    /// Read timeout for TgGetData / TgSetData, which wait on the initiator.
    pub fn with_initiator_timeout(mut self, timeout_ms: u64) -> Self {
        self.initiator_timeout_ms = timeout_ms;
        self
    }

    /// Response buffer length
    pub fn buffer_len(&self) -> usize {
        self.buffer_len
    }

    /// Underlying channel
    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Underlying channel, mutably
    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    /// Give back the channel.
    pub fn into_inner(self) -> C {
        self.channel
    }

    /// Bring the bus to idle and wake the chip.
    pub fn begin(&mut self) -> Result<()> {
        self.channel.begin()?;
        self.channel.wakeup()
    }

    /// Send `header` + `body` and read the response into a buffer of
    /// `capacity` bytes.
    fn exchange(
        &mut self,
        header: &[u8],
        body: &[u8],
        capacity: usize,
        timeout_ms: u64,
    ) -> Result<Vec<u8>> {
        self.channel.write_command(header, body)?.into_result()?;
        let mut buf = vec![0u8; capacity];
        let n = self.channel.read_response(&mut buf, timeout_ms)?;
        buf.truncate(n);
        trace!("command {:#04x} -> {}", header[0], HexSlice(&buf));
        Ok(buf)
    }

    /// Read the IC, version, revision and support bytes.
    pub fn get_firmware_version(&mut self) -> Result<FirmwareVersion> {
        let capacity = FIRMWARE_RESPONSE_LEN.min(self.buffer_len);
        let resp = self.exchange(
            &[PN532_COMMAND_GETFIRMWAREVERSION],
            &[],
            capacity,
            self.response_timeout_ms,
        )?;
        FirmwareVersion::try_from(resp.as_slice())
    }

    /// Normal mode, 1 s virtual card timeout (50 ms * 20), IRQ pin in use.
    pub fn sam_configuration(&mut self) -> Result<()> {
        let capacity = SAM_RESPONSE_LEN.min(self.buffer_len);
        let resp = self.exchange(
            &[PN532_COMMAND_SAMCONFIGURATION, 0x01, 0x14, 0x01],
            &[],
            capacity,
            self.response_timeout_ms,
        )?;
        debug!("SAMConfiguration response: {}", HexSlice(&resp));
        Ok(())
    }

    /// Look for one passive target and return its UID.
    pub fn list_passive_target(&mut self, baud_rate: u8) -> Result<Uid> {
        let capacity = PASSIVE_TARGET_RESPONSE_LEN.min(self.buffer_len);
        self.passive_target(baud_rate, capacity)
    }

    /// Same as [`list_passive_target`](Self::list_passive_target) but allows
    /// the full packet buffer for the response.
    pub fn read_data_packet(&mut self, baud_rate: u8) -> Result<Uid> {
        self.passive_target(baud_rate, self.buffer_len)
    }

    fn passive_target(&mut self, baud_rate: u8, capacity: usize) -> Result<Uid> {
        let resp = self.exchange(
            &[PN532_COMMAND_INLISTPASSIVETARGET, 0x01, baud_rate],
            &[],
            capacity,
            self.response_timeout_ms,
        )?;
        let found = byte_at(&resp, 0)?;
        if found != 1 {
            return Err(Error::UnexpectedResponse {
                expected: 1,
                actual: found,
            });
        }
        let uid_len = byte_at(&resp, UID_LEN_OFFSET)? as usize;
        let uid = slice_at(&resp, UID_OFFSET, uid_len)?;
        Ok(Uid::from_bytes(uid.to_vec()))
    }

    /// InRelease. Returns the length of the chip's answer.
    pub fn release(&mut self, target: u8) -> Result<usize> {
        info!("releasing target {}", target);
        let resp = self.exchange(
            &[PN532_COMMAND_INRELEASE, target],
            &[],
            self.buffer_len,
            self.response_timeout_ms,
        )?;
        Ok(resp.len())
    }

    /// TgInitAsTarget. The chip answers only once an initiator activated it,
    /// so `timeout_ms` is usually 0 (wait forever).
    pub fn init_as_target(&mut self, profile: TargetProfile, timeout_ms: u64) -> Result<()> {
        let resp = self.exchange(
            &[PN532_COMMAND_TGINITASTARGET],
            profile.params(),
            self.buffer_len,
            timeout_ms,
        )?;
        debug!("TgInitAsTarget response: {}", HexSlice(&resp));
        Ok(())
    }

    /// TgGetData: blocks until the initiator sends its next command and
    /// returns the command bytes without the status byte.
    pub fn get_initiator_data(&mut self) -> Result<Vec<u8>> {
        let resp = self.exchange(
            &[PN532_COMMAND_TGGETDATA],
            &[],
            self.buffer_len,
            self.initiator_timeout_ms,
        )?;
        if let Err(e) = expect_status_ok(&resp) {
            debug!("TgGetData failed: {}", HexSlice(&resp));
            return Err(e);
        }
        Ok(resp[1..].to_vec())
    }

    /// TgSetData: hand `header` + `body` to the initiator.
    pub fn set_responder_data(&mut self, header: &[u8], body: &[u8]) -> Result<()> {
        let mut command = Vec::with_capacity(1 + header.len());
        command.push(PN532_COMMAND_TGSETDATA);
        command.extend_from_slice(header);
        trace!("TgSetData: {} | {}", HexSlice(&command), HexSlice(body));

        let resp = self.exchange(&command, body, self.buffer_len, self.initiator_timeout_ms)?;
        expect_status_ok(&resp)
    }
}
