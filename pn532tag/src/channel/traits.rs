// pn532tag/src/channel/traits.rs

//! Channel trait

use crate::types::ChannelStatus;
use crate::utils::DEFAULT_READ_TIMEOUT_MS;
use crate::Result;

/// Command channel to the chip: frames commands, runs the ack handshake and
/// reads validated responses. The SPI channel is the production
/// implementation; `MockChannel` scripts it for tests.
pub trait Channel {
    /// Put the bus lines into their idle state
    fn begin(&mut self) -> Result<()>;

    /// Wake the chip up from power-down
    fn wakeup(&mut self) -> Result<()>;

    /// Send `header` (command code first) followed by `body` and wait for the
    /// chip to acknowledge it. `Err` is reserved for bus I/O failures;
    /// handshake problems come back as a `ChannelStatus`.
    fn write_command(&mut self, header: &[u8], body: &[u8]) -> Result<ChannelStatus>;

    /// Read the response to the last command into `buf`, which also bounds
    /// the accepted payload length. Returns the payload length.
    fn read_response(&mut self, buf: &mut [u8], timeout_ms: u64) -> Result<usize>;

    /// `read_response` with the default timeout.
    fn read_response_default(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.read_response(buf, DEFAULT_READ_TIMEOUT_MS)
    }
}

impl<C: Channel + ?Sized> Channel for Box<C> {
    fn begin(&mut self) -> Result<()> {
        (**self).begin()
    }

    fn wakeup(&mut self) -> Result<()> {
        (**self).wakeup()
    }

    fn write_command(&mut self, header: &[u8], body: &[u8]) -> Result<ChannelStatus> {
        (**self).write_command(header, body)
    }

    fn read_response(&mut self, buf: &mut [u8], timeout_ms: u64) -> Result<usize> {
        (**self).read_response(buf, timeout_ms)
    }
}
