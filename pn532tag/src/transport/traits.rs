// pn532tag/src/transport/traits.rs

//! Bus trait

use crate::Result;

/// Raw byte-level access to the chip: a half-duplex SPI-like bus plus the
/// chip-select and reset lines. Bytes pass through unchanged; bit-order
/// correction happens in the channel above.
pub trait BusTransport {
    /// Assert chip-select (drive it low)
    fn select(&mut self) -> Result<()>;

    /// Release chip-select (drive it high)
    fn deselect(&mut self) -> Result<()>;

    /// Drive the reset line
    fn set_reset(&mut self, high: bool) -> Result<()>;

    /// Clock bytes out to the chip
    fn write(&mut self, data: &[u8]) -> Result<()>;

    /// Clock bytes in from the chip
    fn read(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Block for `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);

    /// Block for `us` microseconds
    fn delay_us(&mut self, us: u32);

    /// Read a single byte. Default implementation goes through `read`.
    fn read_byte(&mut self) -> Result<u8> {
        let mut b = [0u8; 1];
        self.read(&mut b)?;
        Ok(b[0])
    }
}

impl<T: BusTransport + ?Sized> BusTransport for Box<T> {
    fn select(&mut self) -> Result<()> {
        (**self).select()
    }

    fn deselect(&mut self) -> Result<()> {
        (**self).deselect()
    }

    fn set_reset(&mut self, high: bool) -> Result<()> {
        (**self).set_reset(high)
    }

    fn write(&mut self, data: &[u8]) -> Result<()> {
        (**self).write(data)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<()> {
        (**self).read(buf)
    }

    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms)
    }

    fn delay_us(&mut self, us: u32) {
        (**self).delay_us(us)
    }
}
