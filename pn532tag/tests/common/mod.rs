// Shared helpers for the integration tests. Each test crate only uses part
// of it.
#![allow(dead_code, unused_imports)]

pub mod fixtures;

pub use pn532tag::test_support as helpers;
