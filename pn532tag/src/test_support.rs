//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize the scripting of the mock bus and mock channel
//! so tests across the crate and the tests/ directory share one setup.
#![allow(dead_code)]

use crate::channel::{MockChannel, SpiChannel};
use crate::device::Pn532;
use crate::transport::MockTransport;
use crate::Result;

/// Build a chip driver over the simulated SPI bus, seeded with `(command,
/// payload)` responses.
#[doc(hidden)]
pub fn spi_chip_with_responses(responses: &[(u8, Vec<u8>)]) -> Result<Pn532<SpiChannel<MockTransport>>> {
    let mut bus = MockTransport::new();
    for (command, payload) in responses {
        bus.push_response(*command, payload)?;
    }
    Ok(Pn532::new(SpiChannel::new(bus)))
}

/// TgGetData payload carrying `apdu` with status OK.
#[doc(hidden)]
pub fn initiator_data(apdu: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(1 + apdu.len());
    out.push(0x00);
    out.extend_from_slice(apdu);
    out
}

/// MockChannel that plays the reader side of a session: every APDU is
/// delivered by TgGetData and its TgSetData answer is acknowledged with
/// status OK. Once the script runs out, reads time out.
#[doc(hidden)]
pub fn scripted_reader(apdus: &[Vec<u8>]) -> MockChannel {
    let mut ch = MockChannel::new();
    for apdu in apdus {
        ch.push_response(initiator_data(apdu));
        ch.push_response(vec![0x00]);
    }
    ch
}

/// Response APDUs a session sent back through TgSetData, in order.
#[doc(hidden)]
pub fn sent_responses(channel: &MockChannel) -> Vec<Vec<u8>> {
    channel
        .commands()
        .into_iter()
        .filter(|c| c.first() == Some(&crate::constants::PN532_COMMAND_TGSETDATA))
        .map(|c| c[1..].to_vec())
        .collect()
}
