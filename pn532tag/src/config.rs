// pn532tag/src/config.rs

//! Emulator configuration

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::channel::{Channel, SpiChannel};
use crate::constants::{DEFAULT_BASE_URL, NDEF_MAX_LENGTH, PN532_PACKET_BUFFER_LEN, URI_PREFIX_HTTPS};
use crate::device::Pn532;
use crate::ndef::{NdefMessage, NdefRecord, wrap_as_ndef_file};
use crate::transport::BusTransport;
use crate::types::Token;
use crate::utils::{DEFAULT_ACK_TIMEOUT_MS, DEFAULT_READ_TIMEOUT_MS, INITIATOR_TIMEOUT_MS};
use crate::{Error, Result};

/// Delay between chip wake-up and the firmware check
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 1000;
/// Pause between two iterations of the emulation loop
pub const DEFAULT_RETRY_INTERVAL_MS: u64 = 100;

/// Settings for the tag emulation service and the chip driver under it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EmulatorConfig {
    /// URI (without scheme) the token is appended to
    pub base_url: String,
    /// URI identifier code written before the URI
    pub uri_code: u8,
    /// Response buffer length for chip commands
    pub packet_buffer_len: usize,
    /// Timeout for the chip to acknowledge a command frame
    pub ack_timeout_ms: u64,
    /// Read timeout for ordinary command responses
    pub response_timeout_ms: u64,
    /// Read timeout while waiting on the initiator (TgGetData/TgSetData)
    pub initiator_timeout_ms: u64,
    /// Read timeout for TgInitAsTarget, 0 waits until a reader shows up
    pub target_init_timeout_ms: u64,
    /// Wait between chip wake-up and the firmware check
    pub settle_delay_ms: u64,
    /// Pause between target-init retries and between loop rounds
    pub retry_interval_ms: u64,
    /// Size advertised for the NDEF file and largest accepted offset
    pub max_ndef_len: usize,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            uri_code: URI_PREFIX_HTTPS,
            packet_buffer_len: PN532_PACKET_BUFFER_LEN,
            ack_timeout_ms: DEFAULT_ACK_TIMEOUT_MS,
            response_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
            initiator_timeout_ms: INITIATOR_TIMEOUT_MS,
            target_init_timeout_ms: 0,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            retry_interval_ms: DEFAULT_RETRY_INTERVAL_MS,
            max_ndef_len: NDEF_MAX_LENGTH,
        }
    }
}

impl EmulatorConfig {
    /// Same as `Default::default()`
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the URI prefix (without scheme) the token is appended to.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the URI identifier code.
    pub fn with_uri_code(mut self, code: u8) -> Self {
        self.uri_code = code;
        self
    }

    /// Set the response buffer length.
    pub fn with_packet_buffer_len(mut self, len: usize) -> Self {
        self.packet_buffer_len = len;
        self
    }

    /// Set the ack timeout.
    pub fn with_ack_timeout(mut self, timeout_ms: u64) -> Self {
        self.ack_timeout_ms = timeout_ms;
        self
    }

    /// Set the command response timeout.
    pub fn with_response_timeout(mut self, timeout_ms: u64) -> Self {
        self.response_timeout_ms = timeout_ms;
        self
    }

    /// Set the TgGetData/TgSetData timeout.
    pub fn with_initiator_timeout(mut self, timeout_ms: u64) -> Self {
        self.initiator_timeout_ms = timeout_ms;
        self
    }

    /// Set the TgInitAsTarget timeout, 0 to wait without bound.
    pub fn with_target_init_timeout(mut self, timeout_ms: u64) -> Self {
        self.target_init_timeout_ms = timeout_ms;
        self
    }

    /// Set the wake-up settle delay.
    pub fn with_settle_delay(mut self, delay_ms: u64) -> Self {
        self.settle_delay_ms = delay_ms;
        self
    }

    /// Set the retry interval.
    pub fn with_retry_interval(mut self, interval_ms: u64) -> Self {
        self.retry_interval_ms = interval_ms;
        self
    }

    /// Set the advertised NDEF file size.
    pub fn with_max_ndef_len(mut self, len: usize) -> Self {
        self.max_ndef_len = len;
        self
    }

    /// SPI channel over `bus` using the configured ack timeout.
    pub fn spi_channel<T: BusTransport>(&self, bus: T) -> SpiChannel<T> {
        SpiChannel::new(bus).with_ack_timeout(self.ack_timeout_ms)
    }

    /// Chip driver over `channel` using the configured buffer and timeouts.
    pub fn controller<C: Channel>(&self, channel: C) -> Pn532<C> {
        Pn532::new(channel)
            .with_buffer_len(self.packet_buffer_len)
            .with_response_timeout(self.response_timeout_ms)
            .with_initiator_timeout(self.initiator_timeout_ms)
    }

    /// URI served for `token`, without the scheme the identifier code
    /// stands for.
    pub fn uri_for(&self, token: &Token) -> String {
        format!("{}{}", self.base_url, token)
    }

    /// Largest NDEF file the capability container can advertise.
    pub fn ndef_file_limit(&self) -> usize {
        self.max_ndef_len.min(NDEF_MAX_LENGTH)
    }

    /// NDEF file content served for `token`. Fails with `BufferTooSmall`
    /// when the file would not fit in the size the tag advertises.
    pub fn ndef_file(&self, token: &Token) -> Result<Vec<u8>> {
        let record = NdefRecord::uri_record_with_code(self.uri_code, &self.uri_for(token));
        let file = wrap_as_ndef_file(&NdefMessage::single(record).to_bytes()?)?;
        let limit = self.ndef_file_limit();
        if file.len() > limit {
            return Err(Error::BufferTooSmall {
                capacity: limit,
                actual: file.len(),
            });
        }
        Ok(file)
    }
}
