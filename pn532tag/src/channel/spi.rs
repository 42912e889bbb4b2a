// pn532tag/src/channel/spi.rs

//! SPI command channel: wire bit order, status polling and the ACK handshake

use log::{debug, trace};

use crate::channel::traits::Channel;
use crate::constants::{
    PN532_ACK, PN532_SPI_DATAREAD, PN532_SPI_DATAWRITE, PN532_SPI_READY, PN532_SPI_STATREAD,
};
use crate::error::ParseError;
use crate::protocol::Frame;
use crate::protocol::bitorder::{reverse, reverse_in_place, reversed};
use crate::transport::BusTransport;
use crate::types::ChannelStatus;
use crate::utils::{DEFAULT_ACK_TIMEOUT_MS, HexSlice, POLL_INTERVAL_MS, poll_budget};
use crate::{Error, Result};

/// Settle time after asserting chip-select before the first byte.
const CS_SETTLE_MS: u32 = 2;
/// Gap before clocking each response byte in.
const READ_SETTLE_US: u32 = 1000;

/// PN532 command channel over a half-duplex SPI bus.
///
/// One exchange runs `write frame -> poll ready -> read ACK -> poll ready ->
/// read response`. Each step is its own chip-select bracket and every byte
/// is bit-mirrored on the way in and out.
pub struct SpiChannel<T> {
    bus: T,
    command: u8,
    ack_timeout_ms: u64,
    poll_interval_ms: u64,
}

impl<T: BusTransport> SpiChannel<T> {
    /// Channel over `bus` with the default ack timeout and poll interval.
    pub fn new(bus: T) -> Self {
        Self {
            bus,
            command: 0,
            ack_timeout_ms: DEFAULT_ACK_TIMEOUT_MS,
            poll_interval_ms: POLL_INTERVAL_MS,
        }
    }

    /// Timeout for both ready polls of the ack handshake. 0 waits forever.
    pub fn with_ack_timeout(mut self, timeout_ms: u64) -> Self {
        self.ack_timeout_ms = timeout_ms;
        self
    }

    /// Delay between two status polls
    pub fn with_poll_interval(mut self, interval_ms: u64) -> Self {
        self.poll_interval_ms = interval_ms;
        self
    }

    /// Underlying bus
    pub fn bus(&self) -> &T {
        &self.bus
    }

    /// Underlying bus, mutably
    pub fn bus_mut(&mut self) -> &mut T {
        &mut self.bus
    }

    /// Give back the bus.
    pub fn into_inner(self) -> T {
        self.bus
    }

    /// Run `f` inside a chip-select bracket. Chip-select is released even
    /// when `f` fails.
    fn bracket<R>(&mut self, f: impl FnOnce(&mut Self) -> Result<R>) -> Result<R> {
        self.bus.select()?;
        self.bus.delay_ms(CS_SETTLE_MS);
        let result = f(self);
        let released = self.bus.deselect();
        let value = result?;
        released?;
        Ok(value)
    }

    fn write_byte(&mut self, b: u8) -> Result<()> {
        self.bus.write(&[reverse(b)])
    }

    fn read_byte(&mut self) -> Result<u8> {
        self.bus.delay_us(READ_SETTLE_US);
        Ok(reverse(self.bus.read_byte()?))
    }

    fn read_status(&mut self) -> Result<u8> {
        self.bracket(|ch| {
            ch.write_byte(PN532_SPI_STATREAD)?;
            ch.read_byte()
        })
    }

    /// Poll the status byte until the chip reports ready. Returns false once
    /// `timeout_ms` worth of polls went unanswered.
    fn wait_ready(&mut self, timeout_ms: u64) -> Result<bool> {
        let budget = poll_budget(timeout_ms, self.poll_interval_ms);
        let mut polls = 0u64;
        loop {
            if self.read_status()? == PN532_SPI_READY {
                return Ok(true);
            }
            if let Some(max) = budget {
                polls += 1;
                if polls > max {
                    return Ok(false);
                }
            }
            self.bus.delay_ms(self.poll_interval_ms as u32);
        }
    }

    fn check_ack(&mut self) -> Result<bool> {
        let ack = self.bracket(|ch| {
            ch.write_byte(PN532_SPI_DATAREAD)?;
            let mut buf = [0u8; 6];
            ch.bus.read(&mut buf)?;
            reverse_in_place(&mut buf);
            Ok(buf)
        })?;
        if ack != PN532_ACK {
            debug!("invalid ack: {}", HexSlice(&ack));
            return Ok(false);
        }
        Ok(true)
    }

    /// Ack handshake: the chip raises ready once for the ACK frame and once
    /// more when the response is available.
    pub fn wait_for_ack(&mut self, timeout_ms: u64) -> Result<ChannelStatus> {
        if !self.wait_ready(timeout_ms)? {
            return Ok(ChannelStatus::Timeout);
        }
        if !self.check_ack()? {
            return Ok(ChannelStatus::InvalidAck);
        }
        if !self.wait_ready(timeout_ms)? {
            return Ok(ChannelStatus::Timeout);
        }
        Ok(ChannelStatus::Ok)
    }
}

impl<T: BusTransport> Channel for SpiChannel<T> {
    fn begin(&mut self) -> Result<()> {
        debug!("spi channel idle");
        self.bus.deselect()
    }

    fn wakeup(&mut self) -> Result<()> {
        debug!("waking chip");
        self.bus.select()?;
        self.bus.set_reset(true)?;
        self.bus.delay_ms(2);
        self.bus.deselect()
    }

    fn write_command(&mut self, header: &[u8], body: &[u8]) -> Result<ChannelStatus> {
        let frame = Frame::encode_command(header, body)?;
        self.command = header[0];
        trace!("write command: {} | {}", HexSlice(header), HexSlice(body));

        let wire = reversed(&frame);
        self.bracket(|ch| {
            ch.write_byte(PN532_SPI_DATAWRITE)?;
            ch.bus.write(&wire)
        })?;

        let status = self.wait_for_ack(self.ack_timeout_ms)?;
        if status != ChannelStatus::Ok {
            debug!("command {:#04x} not acknowledged: {:?}", self.command, status);
        }
        Ok(status)
    }

    fn read_response(&mut self, buf: &mut [u8], timeout_ms: u64) -> Result<usize> {
        // Already ready right after the handshake; the poll only bounds
        // callers that read without one.
        if !self.wait_ready(timeout_ms)? {
            return Err(Error::LinkTimeout);
        }

        let command = self.command;
        let capacity = buf.len();
        let frame = self.bracket(|ch| {
            ch.write_byte(PN532_SPI_DATAREAD)?;
            Frame::read_from(|| ch.read_byte(), Some(command), capacity)
        });

        let frame = match frame {
            Ok(frame) => frame,
            Err(Error::Frame(ParseError::PayloadTooLarge { len, max })) => {
                debug!("response to {:#04x} does not fit: {} > {}", command, len, max);
                return Err(Error::BufferTooSmall {
                    capacity: max,
                    actual: len,
                });
            }
            Err(e) => {
                debug!("response to {:#04x} rejected: {}", command, e);
                return Err(e);
            }
        };

        trace!("response: {}", HexSlice(&frame.payload));
        buf[..frame.payload.len()].copy_from_slice(&frame.payload);
        Ok(frame.payload.len())
    }
}
