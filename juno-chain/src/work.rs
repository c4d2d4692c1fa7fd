//! Proof-of-work types.
//!
//! The proof-of-work search is RandomX and lives outside this crate. Here we
//! only need the difficulty encodings and the fixed-size solution field, to
//! build and check the genesis blocks and to describe each network's limits.

pub mod difficulty;
pub mod solution;

mod u256;
