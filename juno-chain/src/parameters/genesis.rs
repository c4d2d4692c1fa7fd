//! Genesis blocks for each Juno Cash network.
//!
//! Genesis blocks are built from compiled-in literals, then checked against
//! their expected hash, merkle root and header digest. A mismatch means the
//! tables are corrupt, so the network must not start.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use hex::FromHex;

use crate::{
    amount::{Amount, NonNegative},
    block::{self, merkle, Block, Header},
    transaction::Transaction,
    transparent::{self, OpCode, Script},
    work::{difficulty::CompactDifficulty, solution::Solution},
};

use super::ParamsError;

/// The previous block hash for the genesis block.
///
/// All networks use the Bitcoin `null` value for the parent of the genesis
/// block.
pub const GENESIS_PREVIOUS_BLOCK_HASH: block::Hash = block::Hash([0; 32]);

/// The text committed to by every genesis coinbase input.
pub const GENESIS_TIMESTAMP: &str =
    "b7c923155000000000007ca8a49b1fc30e20bd9d5a3ca9a092af920f2f27b0c3";

/// The uncompressed public key locking the genesis coinbase output.
///
/// No one holds the matching secret key, so the output is unspendable.
pub const GENESIS_OUTPUT_PUB_KEY: &str = "04678afdb0fe5548271967f1a67130b7105cd6a828e03909a67962e0ea1f61deb649f6bc3f4cef38c4f35504e51ec112de5c384df7ba0b8d578a4c702b6bf11d5f";

/// The merkle root of every genesis block, in display order.
pub const GENESIS_MERKLE_ROOT: &str =
    "e53f8696814445c3b5668803e8f2475004dc9c00c05c68a67f92c731c1432c67";

/// The first number pushed by the genesis coinbase input.
const GENESIS_COINBASE_BITS_PUSH: i64 = 520_617_983;

/// The second number pushed by the genesis coinbase input.
const GENESIS_COINBASE_LENGTH_PUSH: i64 = 4;

/// The block and transaction version of the genesis block.
pub const GENESIS_VERSION: u32 = 4;

/// The inputs that determine a genesis block.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GenesisParams {
    /// The text committed to by the coinbase input.
    pub timestamp: &'static str,
    /// The lock script of the coinbase output.
    pub output_script: Script,
    /// The block time, in seconds since the Unix epoch.
    pub time: u32,
    /// The 256-bit header nonce, in serialized order.
    pub nonce: [u8; 32],
    /// The proof-of-work hash, in serialized order.
    pub solution: Solution,
    /// The difficulty threshold.
    pub bits: CompactDifficulty,
    /// The block version.
    pub version: u32,
    /// The value of the coinbase output.
    pub reward: Amount<NonNegative>,
}

impl GenesisParams {
    /// Returns the genesis inputs shared by every network, with the
    /// per-network `time`, `nonce`, `solution` and `bits`.
    ///
    /// # Panics
    ///
    /// If `solution` is not 64 hex digits.
    pub fn new(time: u32, nonce: u64, solution: &str, bits: u32) -> Self {
        let solution = <[u8; 32]>::from_hex(solution).expect("hard-coded solution parses");

        let mut nonce_bytes = [0; 32];
        nonce_bytes[..8].copy_from_slice(&nonce.to_le_bytes());

        Self {
            timestamp: GENESIS_TIMESTAMP,
            output_script: genesis_output_script(),
            time,
            nonce: nonce_bytes,
            solution: Solution(solution),
            bits: CompactDifficulty(bits),
            version: GENESIS_VERSION,
            reward: Amount::zero(),
        }
    }

    /// Returns the coinbase transaction of the genesis block.
    pub fn coinbase(&self) -> Transaction {
        let input_script = Script::default()
            .push_num(GENESIS_COINBASE_BITS_PUSH)
            .push_num(GENESIS_COINBASE_LENGTH_PUSH)
            .push_slice(self.timestamp.as_bytes());

        Transaction::V4 {
            inputs: vec![transparent::Input::new_coinbase(input_script, u32::MAX)],
            outputs: vec![transparent::Output {
                value: self.reward,
                lock_script: self.output_script.clone(),
            }],
            lock_time: 0,
            expiry_height: block::Height(0),
        }
    }

    /// Builds the genesis block.
    ///
    /// The same inputs always build the same block.
    pub fn build(&self) -> GenesisBlock {
        let transactions = vec![Arc::new(self.coinbase())];
        let merkle_root = transactions.iter().collect();

        let header = Header {
            version: self.version,
            previous_block_hash: GENESIS_PREVIOUS_BLOCK_HASH,
            merkle_root,
            commitment_bytes: [0; 32],
            time: Utc
                .timestamp_opt(i64::from(self.time), 0)
                .single()
                .expect("all u32 timestamps are valid"),
            difficulty_threshold: self.bits,
            nonce: self.nonce,
            solution: self.solution,
        };

        GenesisBlock(Block {
            header,
            transactions,
        })
    }
}

/// Returns `<GENESIS_OUTPUT_PUB_KEY> OP_CHECKSIG`.
fn genesis_output_script() -> Script {
    let pub_key = <[u8; 65]>::from_hex(GENESIS_OUTPUT_PUB_KEY).expect("hard-coded key parses");

    Script::default()
        .push_slice(&pub_key)
        .push_opcode(OpCode::CheckSig)
}

/// The values a network's genesis block must commit to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GenesisCommitments {
    /// The block hash, which is the proof-of-work hash in the solution field.
    pub hash: block::Hash,
    /// The merkle root of the coinbase transaction.
    pub merkle_root: merkle::Root,
    /// The SHA-256d digest of the serialized header, in serialized order.
    ///
    /// The RandomX hash isn't recomputed here, so this digest is what binds
    /// the header time, nonce and bits.
    pub header_digest: [u8; 32],
}

impl GenesisCommitments {
    /// Parses commitments from display-order hex literals.
    ///
    /// # Panics
    ///
    /// If any literal is not 64 hex digits.
    pub fn from_hex(hash: &str, merkle_root: &str, header_digest: &str) -> Self {
        let mut digest =
            <[u8; 32]>::from_hex(header_digest).expect("hard-coded header digest parses");
        digest.reverse();

        Self {
            hash: hash.parse().expect("hard-coded hash parses"),
            merkle_root: merkle::Root::from_hex(merkle_root)
                .expect("hard-coded merkle root parses"),
            header_digest: digest,
        }
    }
}

/// A network's height-0 block.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GenesisBlock(Block);

impl GenesisBlock {
    /// Returns the block.
    pub fn block(&self) -> &Block {
        &self.0
    }

    /// Returns the block hash.
    pub fn hash(&self) -> block::Hash {
        self.0.hash()
    }

    /// Returns the merkle root in the block header.
    pub fn merkle_root(&self) -> merkle::Root {
        self.0.header.merkle_root
    }

    /// Returns the SHA-256d digest of the block header.
    pub fn header_digest(&self) -> [u8; 32] {
        self.0.header.digest()
    }

    /// Returns the values this block commits to.
    pub fn commitments(&self) -> GenesisCommitments {
        GenesisCommitments {
            hash: self.hash(),
            merkle_root: self.merkle_root(),
            header_digest: self.header_digest(),
        }
    }

    /// Checks the block against its `expected` commitments, and that the
    /// hash meets the block's own difficulty threshold.
    #[instrument(skip(self, expected))]
    pub fn verify(
        &self,
        network: &'static str,
        expected: &GenesisCommitments,
    ) -> Result<(), ParamsError> {
        let hash = self.hash();
        if hash != expected.hash {
            error!(?hash, expected_hash = ?expected.hash, "genesis block hash mismatch");
            return Err(ParamsError::GenesisHashMismatch {
                network,
                expected: expected.hash,
                actual: hash,
            });
        }

        let merkle_root = self.merkle_root();
        if merkle_root != expected.merkle_root || self.0.compute_merkle_root() != merkle_root {
            error!(?merkle_root, expected_merkle_root = ?expected.merkle_root, "genesis merkle root mismatch");
            return Err(ParamsError::GenesisMerkleRootMismatch {
                network,
                expected: expected.merkle_root,
                actual: merkle_root,
            });
        }

        let meets_threshold = self
            .0
            .header
            .difficulty_threshold
            .to_expanded()
            .is_some_and(|threshold| hash <= threshold);

        if !meets_threshold {
            error!(?hash, bits = ?self.0.header.difficulty_threshold, "genesis block is above its difficulty threshold");
            return Err(ParamsError::GenesisDifficultyNotMet { network, hash });
        }

        let header_digest = self.header_digest();
        if header_digest != expected.header_digest {
            error!(
                header_digest = %hex::encode(header_digest),
                expected_header_digest = %hex::encode(expected.header_digest),
                "genesis header digest mismatch",
            );
            return Err(ParamsError::GenesisHeaderMismatch {
                network,
                expected: expected.header_digest,
                actual: header_digest,
            });
        }

        debug!(%hash, %merkle_root, "verified genesis block");

        Ok(())
    }
}

impl From<GenesisBlock> for Block {
    fn from(genesis: GenesisBlock) -> Block {
        genesis.0
    }
}
