// pn532tag/src/protocol/mod.rs

//! PN532 link-layer frames

pub mod bitorder;
pub mod checksum;
pub mod frame;
pub mod parser;

pub use checksum::{dcs, lcs};
pub use frame::Frame;
