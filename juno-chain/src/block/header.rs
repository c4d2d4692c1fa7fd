//! The block header.

use chrono::{DateTime, Utc};

use crate::{
    serialization::{sha256d, ZcashSerialize},
    work::{difficulty::CompactDifficulty, solution::Solution},
};

use super::{merkle, Hash};

/// A block header, containing metadata about a block.
///
/// How are blocks chained together? They are chained together via the
/// backwards reference (previous header hash) present in the block
/// header. Each block points backwards to its parent, all the way
/// back to the genesis block (the first block in the blockchain).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Header {
    /// The block's version field. The current and only defined block version
    /// is `4`.
    pub version: u32,

    /// The hash of the previous block, used to create a chain of blocks back to
    /// the genesis block.
    ///
    /// The genesis block uses the all-zero hash.
    pub previous_block_hash: Hash,

    /// The root of the Bitcoin-inherited transaction Merkle tree, binding the
    /// block header to the transactions in the block.
    pub merkle_root: merkle::Root,

    /// The block commitments field.
    ///
    /// Its meaning depends on the network upgrade active at the block's
    /// height. The genesis blocks leave it zeroed.
    pub commitment_bytes: [u8; 32],

    /// The block timestamp is a Unix epoch time (UTC) when the miner
    /// started hashing the header (according to the miner).
    pub time: DateTime<Utc>,

    /// An encoded version of the target threshold this block's header
    /// hash must be less than or equal to, in the same nBits format
    /// used by Bitcoin.
    pub difficulty_threshold: CompactDifficulty,

    /// An arbitrary field that miners can change to modify the header
    /// hash in order to produce a hash less than or equal to the
    /// target threshold.
    pub nonce: [u8; 32],

    /// The RandomX proof-of-work hash.
    pub solution: Solution,
}

impl Header {
    /// The length of a serialized header, in bytes.
    pub const SERIALIZED_LEN: usize = 4 + 32 * 3 + 4 * 2 + 32 + 1 + 32;

    /// Returns the identity hash of this header.
    pub fn hash(&self) -> Hash {
        Hash::from(self)
    }

    /// Returns the SHA-256d digest of the serialized header.
    ///
    /// This commits to every header field, including the proof-of-work hash.
    pub fn digest(&self) -> [u8; 32] {
        let mut hash_writer = sha256d::Writer::default();
        self.zcash_serialize(&mut hash_writer)
            .expect("Sha256dWriter is infallible");
        hash_writer.finish()
    }
}
