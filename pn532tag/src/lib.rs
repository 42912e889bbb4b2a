// pn532tag/src/lib.rs

//! pn532tag
//!
//! Drives a PN532 over SPI in card-emulation mode so it answers a reader as
//! an NFC Forum Type 4 tag whose NDEF file holds a URI with an
//! authorization token.
#![warn(missing_docs)]

pub mod apdu;
pub mod channel;
pub mod config;
pub mod constants;
pub mod device;
pub mod error;
pub mod ndef;
pub mod prelude;
pub mod protocol;
#[cfg(feature = "async")]
pub mod service;
pub mod test_support;
pub mod token;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the newtypes in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
