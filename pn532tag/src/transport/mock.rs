// pn532tag/src/transport/mock.rs

//! Simulated PN532 behind the bus trait

use std::collections::VecDeque;

use crate::constants::{
    PN532_ACK, PN532_SPI_DATAREAD, PN532_SPI_DATAWRITE, PN532_SPI_READY, PN532_SPI_STATREAD,
};
use crate::protocol::Frame;
use crate::protocol::bitorder::reverse;
use crate::transport::traits::BusTransport;
use crate::Result;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum Phase {
    #[default]
    Idle,
    AckReady,
    ResponseReady,
}

/// Mock transport for unit tests: a byte-level simulated PN532 on the SPI
/// side. It mirrors bits like the real wire, follows the operation byte that
/// opens each chip-select bracket, answers status polls, serves the ACK
/// frame after a command write and then the queued response frames.
#[derive(Debug, Default)]
pub struct MockTransport {
    /// Frames written by the host, one per DATAWRITE bracket, bit order
    /// already corrected.
    pub written: Vec<Vec<u8>>,
    /// Response frames served after each command, in order
    pub responses: VecDeque<Vec<u8>>,
    /// Testing hook: never report ready
    pub silent: bool,
    /// Testing hook: serve a corrupted ACK frame
    pub corrupt_ack: bool,
    /// STATREAD brackets seen
    pub status_polls: usize,
    /// Simulated time spent in delays
    pub elapsed_us: u64,
    /// Chip-select currently asserted
    pub selected: bool,
    /// Level of the reset line
    pub reset_high: bool,
    op: Option<u8>,
    current: Vec<u8>,
    phase: Phase,
    outgoing: VecDeque<u8>,
}

impl MockTransport {
    /// Chip with no queued responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the chip's answer to `command` carrying `payload`.
    pub fn push_response(&mut self, command: u8, payload: &[u8]) -> Result<()> {
        let frame = Frame::response(command, payload).to_bytes()?;
        self.responses.push_back(frame);
        Ok(())
    }

    /// Queue raw response bytes (bit order as the host expects them).
    pub fn push_raw_response(&mut self, raw: Vec<u8>) {
        self.responses.push_back(raw);
    }

    /// Parsed view of the written command frames.
    pub fn written_frames(&self) -> Result<Vec<Frame>> {
        self.written
            .iter()
            .map(|raw| Frame::parse(raw, crate::constants::PN532_MAX_FRAME_LEN))
            .collect()
    }

    fn start_operation(&mut self, op: u8) {
        self.op = Some(op);
        if op != PN532_SPI_DATAREAD {
            return;
        }
        match self.phase {
            Phase::AckReady => {
                let mut ack = PN532_ACK;
                if self.corrupt_ack {
                    ack[3] = 0x55;
                }
                self.outgoing = ack.iter().copied().collect();
                self.phase = if self.responses.is_empty() {
                    Phase::Idle
                } else {
                    Phase::ResponseReady
                };
            }
            Phase::ResponseReady => {
                self.outgoing = self.responses.pop_front().unwrap_or_default().into();
                self.phase = Phase::Idle;
            }
            Phase::Idle => self.outgoing.clear(),
        }
    }

    fn next_logical_byte(&mut self) -> u8 {
        match self.op {
            Some(PN532_SPI_STATREAD) => {
                self.status_polls += 1;
                if !self.silent && self.phase != Phase::Idle {
                    PN532_SPI_READY
                } else {
                    0x00
                }
            }
            Some(PN532_SPI_DATAREAD) => self.outgoing.pop_front().unwrap_or(0x00),
            _ => 0x00,
        }
    }
}

impl BusTransport for MockTransport {
    fn select(&mut self) -> Result<()> {
        self.selected = true;
        self.op = None;
        self.current.clear();
        Ok(())
    }

    fn deselect(&mut self) -> Result<()> {
        if self.op == Some(PN532_SPI_DATAWRITE) {
            self.written.push(std::mem::take(&mut self.current));
            self.phase = Phase::AckReady;
        }
        self.selected = false;
        self.op = None;
        Ok(())
    }

    fn set_reset(&mut self, high: bool) -> Result<()> {
        self.reset_high = high;
        Ok(())
    }

    fn write(&mut self, data: &[u8]) -> Result<()> {
        for &wire in data {
            let b = reverse(wire);
            if self.op.is_none() {
                self.start_operation(b);
            } else {
                self.current.push(b);
            }
        }
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<()> {
        for slot in buf.iter_mut() {
            *slot = reverse(self.next_logical_byte());
        }
        Ok(())
    }

    fn delay_ms(&mut self, ms: u32) {
        self.elapsed_us += u64::from(ms) * 1000;
    }

    fn delay_us(&mut self, us: u32) {
        self.elapsed_us += u64::from(us);
    }
}
