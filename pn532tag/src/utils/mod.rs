//! Utilities for pn532tag: small helpers for hex logging and timeouts.

pub mod hex;
pub mod timeout;

pub use hex::*;
pub use timeout::*;
