//! Blocks and block-related structures (heights, headers, etc.)

use std::sync::Arc;

use crate::transaction::Transaction;

mod hash;
mod header;
mod height;
mod serialize;

pub mod merkle;


pub use hash::Hash;
pub use header::Header;
pub use height::{Height, HeightDiff};

/// A Zcash block, containing a header and a list of transactions.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// The block header, containing block metadata.
    pub header: Header,
    /// The block transactions.
    pub transactions: Vec<Arc<Transaction>>,
}

impl Block {
    /// Compute the hash of this block.
    pub fn hash(&self) -> Hash {
        Hash::from(&self.header)
    }

    /// Compute the merkle root of this block's transactions.
    ///
    /// Valid blocks have a header `merkle_root` equal to this value.
    pub fn compute_merkle_root(&self) -> merkle::Root {
        self.transactions.iter().collect()
    }

    /// Returns the coinbase transaction, if the block has one.
    pub fn coinbase(&self) -> Option<&Transaction> {
        self.transactions
            .first()
            .map(Arc::as_ref)
            .filter(|tx| tx.is_coinbase())
    }
}

impl<'a> From<&'a Block> for Hash {
    fn from(block: &'a Block) -> Hash {
        block.hash()
    }
}
