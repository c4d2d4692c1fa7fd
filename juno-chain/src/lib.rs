//! Network parameters and consensus upgrade registry for Juno Cash.
//!
//! The [`parameters`] module is the single source of truth for the consensus
//! rules of each network: the upgrade schedule, proof-of-work limits, block
//! subsidy and funding streams, address prefixes, checkpoints and the genesis
//! block. The other modules hold the primitive types those rules are written in.
// Standard lints
#![warn(missing_docs)]
#![allow(clippy::try_err)]
#![deny(clippy::await_holding_lock)]
#![forbid(unsafe_code)]

#[macro_use]
extern crate serde;

#[macro_use]
extern crate tracing;

pub mod amount;
pub mod block;
pub mod parameters;
pub mod serialization;
pub mod transaction;
pub mod transparent;
pub mod work;

pub use parameters::{
    registry, ConsensusParams, Network, NetworkKind, NetworkParams, NetworkUpgrade, ParamsError,
    RegtestParams,
};
