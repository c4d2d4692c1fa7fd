//! Consensus parameters shared by every node on a network.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};

use crate::{
    block::{self, Height, HeightDiff},
    work::difficulty::{ExpandedDifficulty, U256},
};

use super::{
    network_upgrade::{ConsensusBranchId, UpgradeSchedule},
    subsidy::{FundingStream, FundingStreamIndex, LockboxDisbursement, LockboxDisbursementIndex},
    NetworkUpgrade, ParamsError,
};

/// The consensus rules of one network.
///
/// Every query is a pure function of a block height and these tables.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConsensusParams {
    pub(crate) genesis_hash: block::Hash,
    pub(crate) upgrades: UpgradeSchedule,

    pub(crate) subsidy_slow_start_interval: HeightDiff,
    pub(crate) pre_blossom_subsidy_halving_interval: HeightDiff,
    pub(crate) post_blossom_subsidy_halving_interval: HeightDiff,

    pub(crate) majority_enforce_block_upgrade: u32,
    pub(crate) majority_reject_block_outdated: u32,
    pub(crate) majority_window: u32,

    pub(crate) pow_limit: ExpandedDifficulty,
    pub(crate) pow_averaging_window: usize,
    pub(crate) pow_max_adjust_down: i64,
    pub(crate) pow_max_adjust_up: i64,
    pub(crate) pre_blossom_pow_target_spacing: i64,
    pub(crate) post_blossom_pow_target_spacing: i64,
    pub(crate) pow_allow_min_difficulty_blocks_after_height: Option<Height>,
    pub(crate) pow_no_retargeting: bool,

    pub(crate) coinbase_must_be_shielded: bool,
    pub(crate) future_timestamp_soft_fork_height: Option<Height>,

    pub(crate) funding_period_length: HeightDiff,
    pub(crate) funding_streams: BTreeMap<FundingStreamIndex, FundingStream>,
    pub(crate) lockbox_disbursements: BTreeMap<LockboxDisbursementIndex, LockboxDisbursement>,

    pub(crate) minimum_chain_work: U256,
}

impl ConsensusParams {
    /// Checks the upgrade schedule, and that the proof-of-work limit leaves
    /// room to sum a whole averaging window of targets.
    pub(crate) fn validate(&self, network: &'static str) -> Result<(), ParamsError> {
        self.upgrades.validate()?;

        let window = U256::from(self.pow_averaging_window);
        if self.pow_limit.headroom() < window {
            return Err(ParamsError::PowLimitTooLarge {
                network,
                averaging_window: self.pow_averaging_window,
            });
        }

        Ok(())
    }

    /// Returns the hash of the genesis block.
    pub fn genesis_hash(&self) -> block::Hash {
        self.genesis_hash
    }

    /// Returns the upgrade schedule.
    pub fn upgrades(&self) -> &UpgradeSchedule {
        &self.upgrades
    }

    /// Returns `true` if `upgrade` is active at `height`.
    pub fn is_active(&self, height: Height, upgrade: NetworkUpgrade) -> bool {
        self.upgrades.is_active(height, upgrade)
    }

    /// Returns the first height `upgrade` is active at, or `None` if it never
    /// activates.
    pub fn activation_height(&self, upgrade: NetworkUpgrade) -> Option<Height> {
        self.upgrades.activation_height(upgrade)
    }

    /// Returns the most recent upgrade active at `height`.
    pub fn current_epoch(&self, height: Height) -> NetworkUpgrade {
        self.upgrades.current_epoch(height)
    }

    /// Returns the consensus branch id at `height`.
    pub fn current_epoch_branch_id(&self, height: Height) -> ConsensusBranchId {
        self.upgrades.current_epoch_branch_id(height)
    }

    /// Returns the next upgrade to activate after `height`.
    pub fn next_epoch(&self, height: Height) -> Option<NetworkUpgrade> {
        self.upgrades.next_epoch(height)
    }

    /// Returns the next activation height after `height`.
    pub fn next_activation_height(&self, height: Height) -> Option<Height> {
        self.upgrades.next_activation_height(height)
    }

    /// Returns the slow start interval, during which the block subsidy ramps up.
    pub fn subsidy_slow_start_interval(&self) -> HeightDiff {
        self.subsidy_slow_start_interval
    }

    /// Returns the halving interval before Blossom.
    pub fn pre_blossom_subsidy_halving_interval(&self) -> HeightDiff {
        self.pre_blossom_subsidy_halving_interval
    }

    /// Returns the halving interval after Blossom.
    pub fn post_blossom_subsidy_halving_interval(&self) -> HeightDiff {
        self.post_blossom_subsidy_halving_interval
    }

    /// Returns the number of blocks in each funding period.
    pub fn funding_period_length(&self) -> HeightDiff {
        self.funding_period_length
    }

    /// Returns the number of upgraded blocks in the majority window that
    /// enforce a block version upgrade.
    pub fn majority_enforce_block_upgrade(&self) -> u32 {
        self.majority_enforce_block_upgrade
    }

    /// Returns the number of upgraded blocks in the majority window that
    /// reject outdated block versions.
    pub fn majority_reject_block_outdated(&self) -> u32 {
        self.majority_reject_block_outdated
    }

    /// Returns the length of the block version majority window.
    pub fn majority_window(&self) -> u32 {
        self.majority_window
    }

    /// Returns `PoWLimit`, the easiest target any block may use.
    pub fn pow_limit(&self) -> ExpandedDifficulty {
        self.pow_limit
    }

    /// Returns `PoWAveragingWindow`, the number of blocks used in difficulty
    /// adjustment.
    pub fn pow_averaging_window(&self) -> usize {
        self.pow_averaging_window
    }

    /// Returns the maximum downward difficulty adjustment, in percent.
    pub fn pow_max_adjust_down(&self) -> i64 {
        self.pow_max_adjust_down
    }

    /// Returns the maximum upward difficulty adjustment, in percent.
    pub fn pow_max_adjust_up(&self) -> i64 {
        self.pow_max_adjust_up
    }

    /// Returns the height after which minimum-difficulty blocks are allowed,
    /// if the network allows them.
    pub fn pow_allow_min_difficulty_blocks_after_height(&self) -> Option<Height> {
        self.pow_allow_min_difficulty_blocks_after_height
    }

    /// Returns `true` if the difficulty never changes.
    pub fn pow_no_retargeting(&self) -> bool {
        self.pow_no_retargeting
    }

    /// Returns `true` if coinbase outputs must be shielded.
    pub fn coinbase_must_be_shielded(&self) -> bool {
        self.coinbase_must_be_shielded
    }

    /// Returns the minimum total work of a valid best chain.
    pub fn minimum_chain_work(&self) -> U256 {
        self.minimum_chain_work
    }

    /// Returns the funding stream at `index`, if the network defines one.
    pub fn funding_stream(&self, index: FundingStreamIndex) -> Option<&FundingStream> {
        self.funding_streams.get(&index)
    }

    /// Returns `true` if the network defines a funding stream at `index`.
    pub fn has_funding_stream(&self, index: FundingStreamIndex) -> bool {
        self.funding_streams.contains_key(&index)
    }

    /// Returns the lockbox disbursement at `index`, if the network defines one.
    pub fn lockbox_disbursement(
        &self,
        index: LockboxDisbursementIndex,
    ) -> Option<&LockboxDisbursement> {
        self.lockbox_disbursements.get(&index)
    }

    /// Returns `true` if the network defines a lockbox disbursement at `index`.
    pub fn has_lockbox_disbursement(&self, index: LockboxDisbursementIndex) -> bool {
        self.lockbox_disbursements.contains_key(&index)
    }

    /// Returns `PoWTargetSpacing(height)`, the target time between blocks.
    ///
    /// Blossom halves the spacing.
    pub fn pow_target_spacing(&self, height: Height) -> Duration {
        let seconds = if self.is_active(height, NetworkUpgrade::Blossom) {
            self.post_blossom_pow_target_spacing
        } else {
            self.pre_blossom_pow_target_spacing
        };

        Duration::seconds(seconds)
    }

    /// Returns `AveragingWindowTimespan(height)`.
    pub fn averaging_window_timespan(&self, height: Height) -> Duration {
        self.pow_target_spacing(height)
            * i32::try_from(self.pow_averaging_window).expect("averaging windows are small")
    }

    /// Returns the shortest timespan difficulty adjustment uses, limited by
    /// the maximum upward adjustment.
    pub fn min_actual_timespan(&self, height: Height) -> Duration {
        let timespan = self.averaging_window_timespan(height).num_seconds();
        Duration::seconds(timespan * (100 - self.pow_max_adjust_up) / 100)
    }

    /// Returns the longest timespan difficulty adjustment uses, limited by
    /// the maximum downward adjustment.
    pub fn max_actual_timespan(&self, height: Height) -> Duration {
        let timespan = self.averaging_window_timespan(height).num_seconds();
        Duration::seconds(timespan * (100 + self.pow_max_adjust_down) / 100)
    }

    /// Returns `true` if the stricter future block time rule is active at
    /// `height`.
    pub fn future_timestamp_soft_fork_active(&self, height: Height) -> bool {
        self.future_timestamp_soft_fork_height
            .is_some_and(|soft_fork_height| height >= soft_fork_height)
    }

    /// Returns the expected time until the next upgrade activates, or `None`
    /// if no upgrade is pending.
    pub fn seconds_left_to_next_epoch(&self, height: Height) -> Option<Duration> {
        let next_height = self.next_activation_height(height)?;
        let last_height_before = (next_height - 1).unwrap_or(Height::MIN);

        let blocks = i32::try_from(next_height - height).ok()?;

        Some(self.pow_target_spacing(last_height_before) * blocks)
    }

    /// Estimates the height of the network tip at `now`, from the best known
    /// header height and time.
    ///
    /// Blocks are assumed to arrive at the target spacing, which changes at
    /// Blossom. Estimates are rounded to the nearest ten blocks.
    pub fn estimate_network_height(
        &self,
        header_height: Height,
        header_time: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Height {
        if header_time >= now {
            return header_height;
        }

        let spacing = |height: Height| self.pow_target_spacing(height).num_seconds();
        let round = |height: HeightDiff| {
            Height::try_from((height + 5) / 10 * 10).unwrap_or(Height::MAX)
        };

        let elapsed = (now - header_time).num_seconds();
        let estimated_height = header_height.as_i64() + elapsed / spacing(header_height);

        let Some(blossom_height) = self.activation_height(NetworkUpgrade::Blossom) else {
            return round(estimated_height);
        };

        if header_height >= blossom_height || estimated_height <= blossom_height.as_i64() {
            return round(estimated_height);
        }

        let last_pre_blossom_height = (blossom_height - 1).unwrap_or(Height::MIN);
        let pre_blossom_time =
            (blossom_height - header_height) * spacing(last_pre_blossom_height);
        let blossom_activation_time = header_time.timestamp() + pre_blossom_time;

        if blossom_activation_time >= now.timestamp() {
            return blossom_height;
        }

        round(
            blossom_height.as_i64()
                + (now.timestamp() - blossom_activation_time) / spacing(blossom_height),
        )
    }
}
