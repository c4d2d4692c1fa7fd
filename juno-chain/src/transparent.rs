//! Transparent-related (Bitcoin-inherited) functionality.

mod address;
mod opcodes;
mod script;
mod serialize;

pub use address::Address;
pub use opcodes::OpCode;
pub use script::Script;

use crate::{
    amount::{Amount, NonNegative},
    transaction,
};

/// OutPoint
///
/// A particular transaction output reference.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct OutPoint {
    /// References the transaction that contains the UTXO being spent.
    pub hash: transaction::Hash,

    /// Identifies which UTXO from that transaction is referenced; the
    /// first output is 0, etc.
    pub index: u32,
}

impl OutPoint {
    /// The null outpoint spent by coinbase inputs: an all-zero hash and
    /// index `u32::MAX`.
    pub const fn null() -> OutPoint {
        OutPoint {
            hash: transaction::Hash([0; 32]),
            index: u32::MAX,
        }
    }

    /// Is this the null outpoint?
    pub fn is_null(&self) -> bool {
        *self == OutPoint::null()
    }
}

/// A transparent input to a transaction.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Input {
    /// The previous output transaction reference.
    pub outpoint: OutPoint,
    /// The script that authorizes spending `outpoint`.
    ///
    /// For coinbase inputs, this is arbitrary data.
    pub unlock_script: Script,
    /// The sequence number for the output.
    pub sequence: u32,
}

impl Input {
    /// Returns a coinbase input carrying `data` as its script.
    ///
    /// Genesis coinbases predate BIP-34, so the data does not start with the
    /// block height.
    pub fn new_coinbase(data: Script, sequence: u32) -> Input {
        Input {
            outpoint: OutPoint::null(),
            unlock_script: data,
            sequence,
        }
    }

    /// Is this a coinbase input?
    pub fn is_coinbase(&self) -> bool {
        self.outpoint.is_null()
    }
}

/// A transparent output from a transaction.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Output {
    /// Transaction value.
    pub value: Amount<NonNegative>,

    /// The lock script defines the conditions under which this output can be spent.
    pub lock_script: Script,
}
