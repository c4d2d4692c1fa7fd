//! Consensus parameters for each Juno Cash network.
//!
//! This module is the single source of truth for the rules every node on a
//! network must agree on: the upgrade schedule, proof-of-work limits, block
//! subsidy, funding streams, address prefixes, checkpoints and the genesis
//! block.
//!
//! Most consensus parameters change at network upgrades, so they are
//! accessed via a function that takes a `block::Height`. Each network is built
//! and checked once, then shared read-only. Use [`registry`] to select the
//! process-wide network.

pub mod address_prefixes;
pub mod checkpoint;
pub mod config;
pub mod constants;
pub mod founders_reward;
pub mod genesis;
pub mod network_upgrade;
pub mod registry;
pub mod subsidy;

mod consensus;
mod error;
mod network;

pub use consensus::ConsensusParams;
pub use error::ParamsError;
pub use network::{
    regtest, DnsSeed, Magic, Network, NetworkKind, NetworkParams, PolicyFlags, RegtestParams,
};
pub use network_upgrade::{
    ActivationHeight, ConsensusBranchId, NetworkUpgrade, UpgradeDescriptor, UpgradeSchedule,
};
