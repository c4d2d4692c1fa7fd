//! Network data for test-only use

mod genesis;

pub use genesis::*;
