//! Local regression test network parameters, and the hooks tests use to
//! reparametrize them.

use std::{collections::BTreeMap, ops::Deref};

use crate::{
    amount::Amount,
    block::{self, Height},
    parameters::{
        address_prefixes,
        checkpoint::{CheckpointList, CheckpointStats, ValuePoolCheckpoint},
        config::RegtestConfig,
        constants::{
            magics, post_blossom_halving_interval, FUNDING_PERIODS_PER_HALVING,
            POST_BLOSSOM_POW_TARGET_SPACING, PRE_BLOSSOM_POW_TARGET_SPACING,
            PRE_BLOSSOM_REGTEST_HALVING_INTERVAL,
        },
        genesis::GenesisParams,
        network_upgrade::{ActivationHeight, ActivationHeight::*, UpgradeSchedule},
        subsidy::{
            FundingStream, FundingStreamIndex, LockboxDisbursement, LockboxDisbursementIndex,
        },
        ConsensusParams, NetworkUpgrade, ParamsError,
    },
    work::difficulty::{ExpandedDifficulty, U256},
};

use super::{verified_genesis, NetworkKind, NetworkParams, PolicyFlags};

/// The regtest genesis block hash, in display order.
pub const GENESIS_HASH: &str = "02a19528ff5e8241dc7601cf7f54a74d26e0f2acc393a7ac964d055e6d1925db";

/// The SHA-256d digest of the regtest genesis block header, in display order.
pub const GENESIS_HEADER_DIGEST: &str =
    "a55d3fa289255dcb52dc594512dbf5d1941c90419b99f1e4b84fcdbb7eb3c207";

const GENESIS_TIME: u32 = 1_763_197_807;
const GENESIS_NONCE: u64 = 0x36;
const GENESIS_SOLUTION: &str = "db25196d5e054d96aca793c3acf2e0264da7547fcf0176dc41825eff2895a102";
const GENESIS_BITS: u32 = 0x200f_0f0f;

/// The regtest proof-of-work limit.
///
/// Any larger and the sum of an averaging window of targets overflows.
const POW_LIMIT: &str = "0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f";

/// The local regression test network parameters.
///
/// This is the only type with mutators. Main and test parameters can't be
/// changed after they are built.
#[derive(Clone, Debug, PartialEq)]
pub struct RegtestParams(NetworkParams);

impl RegtestParams {
    /// Builds and checks the default regtest parameters.
    pub fn new() -> Result<Self, ParamsError> {
        let kind = NetworkKind::Regtest;

        let genesis = verified_genesis(
            kind,
            GenesisParams::new(GENESIS_TIME, GENESIS_NONCE, GENESIS_SOLUTION, GENESIS_BITS),
            GENESIS_HASH,
            GENESIS_HEADER_DIGEST,
        )?;
        let genesis_hash = genesis.hash();

        let upgrades = UpgradeSchedule::new([
            (170_002, AlwaysActive),
            (170_002, Never),
            (170_003, AlwaysActive),
            (170_006, AlwaysActive),
            (170_008, AlwaysActive),
            (170_010, AlwaysActive),
            (170_012, AlwaysActive),
            (170_050, AlwaysActive),
            (170_110, AlwaysActive),
            (170_130, AlwaysActive),
            (0x7FFF_FFFF, Never),
        ])?;

        let post_blossom_halving_interval =
            post_blossom_halving_interval(PRE_BLOSSOM_REGTEST_HALVING_INTERVAL);

        let consensus = ConsensusParams {
            genesis_hash,
            upgrades,
            subsidy_slow_start_interval: 0,
            pre_blossom_subsidy_halving_interval: PRE_BLOSSOM_REGTEST_HALVING_INTERVAL,
            post_blossom_subsidy_halving_interval: post_blossom_halving_interval,
            majority_enforce_block_upgrade: 750,
            majority_reject_block_outdated: 950,
            majority_window: 1_000,
            pow_limit: POW_LIMIT.parse().expect("hard-coded pow limit parses"),
            pow_averaging_window: 17,
            pow_max_adjust_down: 0,
            pow_max_adjust_up: 0,
            pre_blossom_pow_target_spacing: PRE_BLOSSOM_POW_TARGET_SPACING,
            post_blossom_pow_target_spacing: POST_BLOSSOM_POW_TARGET_SPACING,
            pow_allow_min_difficulty_blocks_after_height: Some(Height(0)),
            pow_no_retargeting: true,
            coinbase_must_be_shielded: true,
            future_timestamp_soft_fork_height: None,
            funding_period_length: post_blossom_halving_interval / FUNDING_PERIODS_PER_HALVING,
            // Funding streams and lockbox disbursements are added by tests.
            funding_streams: BTreeMap::new(),
            lockbox_disbursements: BTreeMap::new(),
            minimum_chain_work: U256::zero(),
        };

        let checkpoints = CheckpointList::new(
            genesis_hash,
            [(Height(0), genesis_hash)],
            CheckpointStats::default(),
        )?;

        let params = NetworkParams {
            kind,
            currency_units: "RJUNO",
            bip44_coin_type: 8135,
            magic: magics::REGTEST,
            default_port: 18345,
            prune_after_height: 1_000,
            address_prefixes: &address_prefixes::REGTEST,
            dns_seeds: Vec::new(),
            fixed_seeds: Vec::new(),
            checkpoints,
            founders_reward_addresses: Vec::new(),
            // Regtest donations must be configured explicitly.
            default_donation_address: None,
            alert_pub_key: None,
            policy: PolicyFlags {
                mining_requires_peers: false,
                default_consistency_checks: true,
                require_standard: false,
                mine_blocks_on_demand: true,
                testnet_to_be_deprecated_field_rpc: false,
                require_wallet_backup: false,
            },
            // The guard is off until a test enables it. The checkpoint block
            // is never set on regtest, so it keeps the null hash.
            value_pool_checkpoint: Some(ValuePoolCheckpoint {
                height: Height(0),
                balance: Amount::zero(),
                block_hash: block::Hash([0; 32]),
            }),
            zip209_enabled: false,
            consensus,
            genesis,
        };

        params.validate()?;

        Ok(Self(params))
    }

    /// Builds the default regtest parameters, then applies `config`.
    pub fn with_config(config: &RegtestConfig) -> Result<Self, ParamsError> {
        let mut params = Self::new()?;
        params.apply_config(config)?;

        Ok(params)
    }

    /// Applies the configured activation heights and options.
    ///
    /// The resulting upgrade schedule must still be in order.
    pub fn apply_config(&mut self, config: &RegtestConfig) -> Result<(), ParamsError> {
        for (upgrade, height) in config.activation_heights.iter() {
            self.update_network_upgrade_parameters(upgrade, height);
        }

        self.0.consensus.upgrades.validate()?;

        if config.shield_coinbase {
            self.set_coinbase_must_be_shielded(true);
        }

        if config.developer_set_pool_size_zero {
            self.set_zip209_enabled(true);
        }

        Ok(())
    }

    /// Returns the parameters.
    pub fn params(&self) -> &NetworkParams {
        &self.0
    }

    /// Changes the activation height of `upgrade`.
    ///
    /// The schedule is not checked, so tests can build out-of-order
    /// schedules.
    ///
    /// # Panics
    ///
    /// If `upgrade` is Sprout, which is always active.
    pub fn update_network_upgrade_parameters(
        &mut self,
        upgrade: NetworkUpgrade,
        activation_height: impl Into<ActivationHeight>,
    ) {
        assert!(
            upgrade != NetworkUpgrade::Sprout,
            "the Sprout activation height can't be changed"
        );

        let activation_height = activation_height.into();
        debug!(%upgrade, ?activation_height, "updating regtest activation height");

        self.0
            .consensus
            .upgrades
            .set_activation_height(upgrade, activation_height);
    }

    /// Replaces the funding stream at `index`.
    ///
    /// The stream is checked against the current regtest parameters.
    pub fn update_funding_stream_parameters(
        &mut self,
        index: FundingStreamIndex,
        stream: FundingStream,
    ) -> Result<(), ParamsError> {
        stream.validate(&self.0.consensus)?;

        debug!(
            %index,
            start_height = ?stream.start_height(),
            end_height = ?stream.end_height(),
            "updating regtest funding stream"
        );
        self.0.consensus.funding_streams.insert(index, stream);

        Ok(())
    }

    /// Replaces the one-time lockbox disbursement at `index`.
    ///
    /// The disbursement is checked against the current regtest parameters.
    pub fn update_onetime_lockbox_disbursement_parameters(
        &mut self,
        index: LockboxDisbursementIndex,
        disbursement: LockboxDisbursement,
    ) -> Result<(), ParamsError> {
        disbursement.validate(&self.0.consensus)?;

        debug!(
            index = index.get(),
            height = ?disbursement.height,
            amount = %disbursement.amount,
            "updating regtest lockbox disbursement"
        );
        self.0
            .consensus
            .lockbox_disbursements
            .insert(index, disbursement);

        Ok(())
    }

    /// Replaces the difficulty adjustment limits and the proof-of-work limit.
    pub fn update_regtest_pow(
        &mut self,
        pow_max_adjust_down: i64,
        pow_max_adjust_up: i64,
        pow_limit: ExpandedDifficulty,
        pow_no_retargeting: bool,
    ) {
        debug!(
            pow_max_adjust_down,
            pow_max_adjust_up,
            %pow_limit,
            pow_no_retargeting,
            "updating regtest proof of work"
        );

        let consensus = &mut self.0.consensus;
        consensus.pow_max_adjust_down = pow_max_adjust_down;
        consensus.pow_max_adjust_up = pow_max_adjust_up;
        consensus.pow_limit = pow_limit;
        consensus.pow_no_retargeting = pow_no_retargeting;
    }

    /// Turns the ZIP-209 Sprout value pool guard on or off.
    pub fn set_zip209_enabled(&mut self, enabled: bool) {
        debug!(enabled, "updating regtest ZIP-209 guard");

        self.0.zip209_enabled = enabled;
    }

    /// Turns the rule that coinbase outputs must be shielded on or off.
    pub fn set_coinbase_must_be_shielded(&mut self, must_be_shielded: bool) {
        debug!(must_be_shielded, "updating regtest coinbase shielding rule");

        self.0.consensus.coinbase_must_be_shielded = must_be_shielded;
    }
}

impl Deref for RegtestParams {
    type Target = NetworkParams;

    fn deref(&self) -> &NetworkParams {
        &self.0
    }
}
