// pn532tag/src/transport/spi.rs

//! embedded-hal bus implementation

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use crate::transport::traits::BusTransport;
use crate::{Error, Result};

/// Production transport over embedded-hal 1.0: an SPI bus in mode 0 with a
/// manually driven chip-select pin (the channel needs several transfers per
/// chip-select bracket, which `SpiDevice` cannot express), the reset pin
/// and a delay provider.
pub struct SpiTransport<SPI, CS, RST, D> {
    spi: SPI,
    cs: CS,
    rst: RST,
    delay: D,
}

impl<SPI, CS, RST, D> SpiTransport<SPI, CS, RST, D>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
    RST: OutputPin,
    D: DelayNs,
{
    /// Bus over the SPI peripheral, chip-select and reset pins and a delay source.
    pub fn new(spi: SPI, cs: CS, rst: RST, delay: D) -> Self {
        Self {
            spi,
            cs,
            rst,
            delay,
        }
    }

    /// Give back the underlying peripherals.
    pub fn release(self) -> (SPI, CS, RST, D) {
        (self.spi, self.cs, self.rst, self.delay)
    }
}

fn spi_err<E: core::fmt::Debug>(e: E) -> Error {
    Error::Bus(format!("spi: {:?}", e))
}

fn pin_err<E: core::fmt::Debug>(e: E) -> Error {
    Error::Bus(format!("gpio: {:?}", e))
}

impl<SPI, CS, RST, D> BusTransport for SpiTransport<SPI, CS, RST, D>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
    RST: OutputPin,
    D: DelayNs,
{
    fn select(&mut self) -> Result<()> {
        self.cs.set_low().map_err(pin_err)
    }

    fn deselect(&mut self) -> Result<()> {
        // Finish clocking before the chip sees chip-select go high.
        self.spi.flush().map_err(spi_err)?;
        self.cs.set_high().map_err(pin_err)
    }

    fn set_reset(&mut self, high: bool) -> Result<()> {
        if high {
            self.rst.set_high().map_err(pin_err)
        } else {
            self.rst.set_low().map_err(pin_err)
        }
    }

    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.spi.write(data).map_err(spi_err)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<()> {
        self.spi.read(buf).map_err(spi_err)
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }
}
