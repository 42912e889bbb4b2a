// pn532tag/src/channel/mock.rs

//! Scripted channel for driver and service tests

use std::collections::VecDeque;

use crate::channel::traits::Channel;
use crate::types::ChannelStatus;
use crate::{Error, Result};

/// Mock channel for unit tests. It records written commands and returns
/// queued statuses and response payloads.
#[derive(Debug, Default)]
pub struct MockChannel {
    /// Written commands as (header, body)
    pub written: Vec<(Vec<u8>, Vec<u8>)>,
    /// Statuses returned by write_command; `Ok` once exhausted
    pub statuses: VecDeque<ChannelStatus>,
    /// Payloads returned by read_response; `LinkTimeout` once exhausted
    pub responses: VecDeque<Vec<u8>>,
    /// Timeouts requested by read_response calls
    pub read_timeouts: Vec<u64>,
    /// Set by `begin`
    pub begun: bool,
    /// Set by `wakeup`
    pub woken: bool,
}

impl MockChannel {
    /// Empty script: every write acks, every read times out.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the payload returned by the next read.
    pub fn push_response(&mut self, payload: Vec<u8>) {
        self.responses.push_back(payload);
    }

    /// Queue the status returned by the next write.
    pub fn push_status(&mut self, status: ChannelStatus) {
        self.statuses.push_back(status);
    }

    /// Full command bytes (header followed by body) of every write.
    pub fn commands(&self) -> Vec<Vec<u8>> {
        self.written
            .iter()
            .map(|(h, b)| {
                let mut v = h.clone();
                v.extend_from_slice(b);
                v
            })
            .collect()
    }
}

impl Channel for MockChannel {
    fn begin(&mut self) -> Result<()> {
        self.begun = true;
        Ok(())
    }

    fn wakeup(&mut self) -> Result<()> {
        self.woken = true;
        Ok(())
    }

    fn write_command(&mut self, header: &[u8], body: &[u8]) -> Result<ChannelStatus> {
        self.written.push((header.to_vec(), body.to_vec()));
        Ok(self.statuses.pop_front().unwrap_or(ChannelStatus::Ok))
    }

    fn read_response(&mut self, buf: &mut [u8], timeout_ms: u64) -> Result<usize> {
        self.read_timeouts.push(timeout_ms);
        let payload = self.responses.pop_front().ok_or(Error::LinkTimeout)?;
        if payload.len() > buf.len() {
            return Err(Error::BufferTooSmall {
                capacity: buf.len(),
                actual: payload.len(),
            });
        }
        buf[..payload.len()].copy_from_slice(&payload);
        Ok(payload.len())
    }
}
