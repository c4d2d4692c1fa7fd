//! Error types for network parameters.

use thiserror::Error;

use crate::{
    amount::{Amount, NegativeAllowed},
    block,
};

use super::{network_upgrade::ActivationHeight, NetworkUpgrade};

/// Errors from building, selecting, or checking network parameters.
///
/// Every variant except [`ParamsError::TurnstileViolation`] means the compiled-in
/// tables or the process configuration are wrong. Callers must stop the
/// process instead of running with them.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum ParamsError {
    /// The genesis block built from the network's inputs has the wrong hash.
    #[error("{network} genesis block hash {actual} does not match the expected hash {expected}")]
    GenesisHashMismatch {
        network: &'static str,
        expected: block::Hash,
        actual: block::Hash,
    },

    /// The genesis block built from the network's inputs has the wrong merkle root.
    #[error(
        "{network} genesis merkle root {actual} does not match the expected merkle root {expected}"
    )]
    GenesisMerkleRootMismatch {
        network: &'static str,
        expected: block::merkle::Root,
        actual: block::merkle::Root,
    },

    /// The genesis block hash is above its own difficulty threshold.
    #[error("{network} genesis block hash {hash} does not meet its difficulty threshold")]
    GenesisDifficultyNotMet {
        network: &'static str,
        hash: block::Hash,
    },

    /// The genesis block header has the wrong time, nonce, bits or another
    /// field, so its digest differs from the expected digest.
    ///
    /// Digests are in serialized order.
    #[error(
        "{network} genesis header digest {} does not match the expected digest {}",
        hex::encode(.actual),
        hex::encode(.expected)
    )]
    GenesisHeaderMismatch {
        network: &'static str,
        expected: [u8; 32],
        actual: [u8; 32],
    },

    /// A network name that is not `main`, `test` or `regtest`.
    #[error("unknown network {0:?}, expected one of \"main\", \"test\" or \"regtest\"")]
    UnknownNetwork(String),

    /// A network was selected twice in the same process.
    #[error("network {0} was already selected, the selection can only be made once")]
    AlreadySelected(&'static str),

    /// The current network was read before any network was selected.
    #[error("no network has been selected")]
    NotSelected,

    /// A founders' reward address is not a P2SH address on this network.
    #[error("founders' reward address {address:?} is not a valid {network} P2SH address")]
    InvalidFoundersRewardAddress {
        network: &'static str,
        address: String,
    },

    /// A network's proof-of-work limit leaves too little headroom for its
    /// difficulty averaging window.
    #[error("{network} proof-of-work limit is too large for an averaging window of {averaging_window} blocks")]
    PowLimitTooLarge {
        network: &'static str,
        averaging_window: usize,
    },

    /// A later upgrade activates before an earlier one.
    #[error(
        "{later} activation height {later_height:?} is below {earlier} activation height {earlier_height:?}"
    )]
    ActivationHeightsOutOfOrder {
        earlier: NetworkUpgrade,
        earlier_height: ActivationHeight,
        later: NetworkUpgrade,
        later_height: ActivationHeight,
    },

    /// The base epoch must always be active.
    #[error("the Sprout epoch must be active from genesis")]
    SproutNotAlwaysActive,

    /// A funding stream starts before Canopy activates.
    #[error("funding stream starts at {0:?}, before Canopy is active")]
    FundingStreamCanopyNotActive(block::Height),

    /// A funding stream ends before it starts.
    #[error("funding stream ends at {end_height:?}, before its start at {start_height:?}")]
    FundingStreamIllegalRange {
        start_height: block::Height,
        end_height: block::Height,
    },

    /// A funding stream has fewer recipients than funding periods.
    #[error("funding stream needs {expected} recipients, but has {actual}")]
    FundingStreamInsufficientRecipients { expected: usize, actual: usize },

    /// A lockbox disbursement is due before NU6.1 activates.
    #[error("lockbox disbursement at {0:?} is before NU6.1 is active")]
    LockboxDisbursementTooEarly(block::Height),

    /// A hard-coded checkpoint list is malformed.
    #[error("invalid checkpoint list: {0}")]
    InvalidCheckpointList(&'static str),

    /// The Sprout value pool balance does not match the value pool checkpoint.
    #[error(
        "turnstile violation at height {height:?}: Sprout pool balance {observed} does not match checkpoint balance {expected}"
    )]
    TurnstileViolation {
        height: block::Height,
        expected: Amount<NegativeAllowed>,
        observed: Amount<NegativeAllowed>,
    },
}
