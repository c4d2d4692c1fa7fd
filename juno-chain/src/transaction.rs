//! Transaction types.
//!
//! Only the transparent, Sapling-format (v4) coinbase shape used by the
//! genesis blocks is modelled. Shielded components are always empty, so they
//! are serialized as empty vectors and a zero value balance.

use crate::{block, transparent};

mod hash;
mod serialize;


pub use hash::Hash;

/// The Sapling version group ID.
pub const SAPLING_VERSION_GROUP_ID: u32 = 0x892F_2085;

/// The `fOverwintered` flag, in the high bit of the transaction header.
pub const OVERWINTER_FLAG: u32 = 1 << 31;

/// A Zcash transaction.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Transaction {
    /// A `version = 4` transaction, which supports Sapling.
    ///
    /// The Sapling spends, outputs, and JoinSplits are always empty.
    V4 {
        /// The transparent inputs to the transaction.
        inputs: Vec<transparent::Input>,
        /// The transparent outputs from the transaction.
        outputs: Vec<transparent::Output>,
        /// The raw `nLockTime` value. Zero means unlocked.
        lock_time: u32,
        /// The latest block height that this transaction can be added to the chain.
        /// Zero means the transaction never expires.
        expiry_height: block::Height,
    },
}

impl Transaction {
    /// Compute the hash (txid) of this transaction.
    ///
    /// For pre-v5 transactions, this is the SHA-256d of the serialization.
    pub fn hash(&self) -> Hash {
        Hash::from(self)
    }

    /// Returns the transaction version.
    pub fn version(&self) -> u32 {
        match self {
            Transaction::V4 { .. } => 4,
        }
    }

    /// Access the transparent inputs of this transaction.
    pub fn inputs(&self) -> &[transparent::Input] {
        match self {
            Transaction::V4 { ref inputs, .. } => inputs,
        }
    }

    /// Access the transparent outputs of this transaction.
    pub fn outputs(&self) -> &[transparent::Output] {
        match self {
            Transaction::V4 { ref outputs, .. } => outputs,
        }
    }

    /// Returns `true` if this transaction has exactly one input, and it is a
    /// coinbase input.
    pub fn is_coinbase(&self) -> bool {
        matches!(self.inputs(), [input] if input.is_coinbase())
    }

    /// Get this transaction's expiry height.
    pub fn expiry_height(&self) -> block::Height {
        match self {
            Transaction::V4 { expiry_height, .. } => *expiry_height,
        }
    }
}
