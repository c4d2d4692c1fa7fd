//! Hard-coded checkpoints and the Sprout value pool checkpoint.
//!
//! Each checkpoint consists of a block height and block header hash.
//!
//! Checkpoints bound chain reorganizations and let validators skip script
//! checks for blocks that are ancestors of a checkpoint.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};

use crate::{
    amount::{Amount, NegativeAllowed},
    block,
};

use super::{constants::SIGCHECK_VERIFICATION_FACTOR, ParamsError};

/// The number of seconds in a day, used for transaction rate estimates.
const SECONDS_PER_DAY: f64 = 24.0 * 60.0 * 60.0;

/// Chain statistics at the last checkpoint, used to estimate verification
/// progress.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct CheckpointStats {
    /// The block time of the last checkpoint.
    pub time_last_checkpoint: i64,
    /// The total number of transactions up to and including the last
    /// checkpoint block.
    pub transactions_last_checkpoint: u64,
    /// The estimated number of transactions per day after the last checkpoint.
    pub transactions_per_day: f64,
}

/// A list of block height and hash checkpoints.
///
/// This is actually a bijective map, but since it is read-only, we use a
/// BTreeMap, and do the value uniqueness check on initialisation.
#[derive(Clone, Debug, PartialEq)]
pub struct CheckpointList {
    checkpoints: BTreeMap<block::Height, block::Hash>,
    stats: CheckpointStats,
}

impl CheckpointList {
    /// Creates a checkpoint list from `list`, with the chain statistics at the
    /// last checkpoint.
    ///
    /// Checkpoint heights and checkpoint hashes must be unique.
    /// There must be a checkpoint for `genesis_hash` at block::Height 0.
    /// (All other checkpoints are optional.)
    pub fn new(
        genesis_hash: block::Hash,
        list: impl IntoIterator<Item = (block::Height, block::Hash)>,
        stats: CheckpointStats,
    ) -> Result<Self, ParamsError> {
        // BTreeMap silently ignores duplicates, so we count the checkpoints
        // before adding them to the map
        let original_checkpoints: Vec<(block::Height, block::Hash)> = list.into_iter().collect();
        let original_len = original_checkpoints.len();

        let checkpoints: BTreeMap<block::Height, block::Hash> =
            original_checkpoints.into_iter().collect();

        match checkpoints.iter().next() {
            Some((block::Height(0), hash)) if *hash == genesis_hash => {}
            Some((block::Height(0), _)) => Err(ParamsError::InvalidCheckpointList(
                "the genesis checkpoint does not match the genesis hash",
            ))?,
            Some(_) => Err(ParamsError::InvalidCheckpointList(
                "checkpoints must start at the genesis block height 0",
            ))?,
            None => Err(ParamsError::InvalidCheckpointList(
                "there must be at least one checkpoint, for the genesis block",
            ))?,
        };

        // This check rejects duplicate heights, whether they have the same or
        // different hashes
        if checkpoints.len() != original_len {
            Err(ParamsError::InvalidCheckpointList(
                "checkpoint heights must be unique",
            ))?;
        }

        let block_hashes: HashSet<&block::Hash> = checkpoints.values().collect();
        if block_hashes.len() != original_len {
            Err(ParamsError::InvalidCheckpointList(
                "checkpoint hashes must be unique",
            ))?;
        }

        Ok(Self { checkpoints, stats })
    }

    /// Return true if there is a checkpoint at `height`.
    pub fn contains(&self, height: block::Height) -> bool {
        self.checkpoints.contains_key(&height)
    }

    /// Returns the hash corresponding to the checkpoint at `height`,
    /// or None if there is no checkpoint at that height.
    pub fn hash(&self, height: block::Height) -> Option<block::Hash> {
        self.checkpoints.get(&height).cloned()
    }

    /// Return the block height of the highest checkpoint in the checkpoint list.
    ///
    /// If there is only a single checkpoint, then the maximum height will be
    /// zero. (The genesis block.)
    pub fn max_height(&self) -> block::Height {
        self.checkpoints
            .keys()
            .next_back()
            .copied()
            .expect("checkpoint lists must have at least one checkpoint")
    }

    /// Returns the chain statistics at the last checkpoint.
    pub fn stats(&self) -> CheckpointStats {
        self.stats
    }

    /// Returns an iterator over the checkpoints, in height order.
    pub fn iter(&self) -> impl Iterator<Item = (block::Height, block::Hash)> + '_ {
        self.checkpoints
            .iter()
            .map(|(&height, &hash)| (height, hash))
    }

    /// Returns `false` if there is a checkpoint at `height` with a different
    /// hash.
    ///
    /// Heights without a checkpoint accept any hash.
    pub fn is_valid_hash(&self, height: block::Height, hash: &block::Hash) -> bool {
        self.hash(height)
            .map_or(true, |checkpoint_hash| checkpoint_hash == *hash)
    }

    /// Returns `true` if a chain can be reorganized back to `fork_height`
    /// without replacing a checkpointed block.
    pub fn permits_reorg_at(&self, fork_height: block::Height) -> bool {
        fork_height >= self.max_height()
    }

    /// Returns `true` if script checks can be skipped for a block at `height`
    /// that is an ancestor of the last checkpoint.
    pub fn can_skip_script_checks(&self, height: block::Height) -> bool {
        height <= self.max_height()
    }

    /// Estimates how much of the chain has been verified, as a fraction
    /// between 0 and 1.
    ///
    /// `chain_transactions` is the total number of transactions up to and
    /// including the tip at `tip_time`. Transactions after the last checkpoint
    /// are weighted as more expensive when `sigchecks` is `true`.
    pub fn guess_verification_progress(
        &self,
        chain_transactions: u64,
        tip_time: DateTime<Utc>,
        now: DateTime<Utc>,
        sigchecks: bool,
    ) -> f64 {
        let factor = if sigchecks {
            SIGCHECK_VERIFICATION_FACTOR
        } else {
            1.0
        };

        let stats = self.stats;
        let days_since = |time: i64| (now.timestamp() - time) as f64 / SECONDS_PER_DAY;

        let (work_before, work_after) = if chain_transactions <= stats.transactions_last_checkpoint
        {
            let cheap_before = chain_transactions as f64;
            let cheap_after = (stats.transactions_last_checkpoint - chain_transactions) as f64;
            let expensive_after =
                days_since(stats.time_last_checkpoint) * stats.transactions_per_day;

            (cheap_before, cheap_after + expensive_after * factor)
        } else {
            let cheap_before = stats.transactions_last_checkpoint as f64;
            let expensive_before = (chain_transactions - stats.transactions_last_checkpoint) as f64;
            let expensive_after = days_since(tip_time.timestamp()) * stats.transactions_per_day;

            (
                cheap_before + expensive_before * factor,
                expensive_after * factor,
            )
        };

        let total_work = work_before + work_after;
        if total_work <= 0.0 {
            return 0.0;
        }

        work_before / total_work
    }
}

/// A snapshot of the Sprout value pool, used to detect shielded value pool
/// over-issuance (the "turnstile").
///
/// <https://zips.z.cash/zip-0209>
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ValuePoolCheckpoint {
    /// The height of the checkpointed block.
    pub height: block::Height,
    /// The Sprout pool balance after the checkpointed block.
    pub balance: Amount<NegativeAllowed>,
    /// The hash of the checkpointed block.
    pub block_hash: block::Hash,
}

impl ValuePoolCheckpoint {
    /// Checks the `observed` Sprout pool balance after the block at `height`
    /// with `hash`.
    ///
    /// Blocks other than the checkpointed block are not checked. The check is
    /// skipped when the ZIP-209 guard is disabled.
    pub fn check(
        &self,
        zip209_enabled: bool,
        height: block::Height,
        hash: &block::Hash,
        observed: Amount<NegativeAllowed>,
    ) -> Result<(), ParamsError> {
        if !zip209_enabled || height != self.height || *hash != self.block_hash {
            return Ok(());
        }

        if observed != self.balance {
            error!(
                ?height,
                expected = %self.balance,
                %observed,
                "Sprout value pool turnstile violation"
            );

            return Err(ParamsError::TurnstileViolation {
                height,
                expected: self.balance,
                observed,
            });
        }

        Ok(())
    }
}
