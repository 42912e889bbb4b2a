// pn532tag/src/channel/mod.rs

//! Command/ACK/response exchange with the chip

pub mod mock;
pub mod spi;
pub mod traits;

pub use mock::MockChannel;
pub use spi::SpiChannel;
pub use traits::Channel;
