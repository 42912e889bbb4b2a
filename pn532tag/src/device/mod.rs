// pn532tag/src/device/mod.rs

//! PN532 driver

pub mod handle;
pub mod profiles;

pub use handle::Pn532;
pub use profiles::TargetProfile;
