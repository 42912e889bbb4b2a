// pn532tag/src/transport/mod.rs

//! Raw bus access: SPI bytes, chip-select and reset

pub mod mock;
pub mod spi;
pub mod traits;

pub use mock::MockTransport;
pub use spi::SpiTransport;
pub use traits::BusTransport;
