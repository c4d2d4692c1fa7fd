//! Public test network parameters.

use std::collections::BTreeMap;

use hex::FromHex;

use crate::{
    amount::Amount,
    block::Height,
    parameters::{
        address_prefixes,
        checkpoint::{CheckpointList, CheckpointStats, ValuePoolCheckpoint},
        constants::{
            magics, FUNDING_PERIODS_PER_HALVING, POST_BLOSSOM_HALVING_INTERVAL,
            POST_BLOSSOM_POW_TARGET_SPACING, PRE_BLOSSOM_HALVING_INTERVAL,
            PRE_BLOSSOM_POW_TARGET_SPACING,
        },
        genesis::GenesisParams,
        network_upgrade::{ActivationHeight::*, UpgradeSchedule},
        ConsensusParams, NetworkUpgrade, ParamsError,
    },
    work::difficulty::U256,
};

use super::{verified_genesis, DnsSeed, NetworkKind, NetworkParams, PolicyFlags};

/// The test genesis block hash, in display order.
pub const GENESIS_HASH: &str = "009a83c6bd95d1f0548fe4c5f6555c785e9c456ca33f58c2d7755c2bdd1e842f";

/// The SHA-256d digest of the test genesis block header, in display order.
pub const GENESIS_HEADER_DIGEST: &str =
    "20bff21982a2162fc61cbd8aa9bedceec468d93d4524b78ae8b0750e892ef989";

const GENESIS_TIME: u32 = 1_763_197_808;
const GENESIS_NONCE: u64 = 0xc0;
const GENESIS_SOLUTION: &str = "2f841edd2b5c75d7c2583fa36c459c5e785c55f6c5e48f54f0d195bdc6839a00";
const GENESIS_BITS: u32 = 0x2000_ffff;

const POW_LIMIT: &str = "07ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff";

/// Minimum-difficulty blocks are allowed after this height.
const MIN_DIFFICULTY_BLOCKS_AFTER_HEIGHT: Height = Height(299_187);

/// The stricter future block time rule applies this many blocks after Blossom.
const FUTURE_TIMESTAMP_SOFT_FORK_DELAY: u32 = 6;

const ALERT_PUB_KEY: &str = "048abb146dca9b466d2b5cf82c7582590d4dc376693613804a85dc252ab64e649b3df9b8386bce20f73a6a1de706ce26c815558d1fe8fae1c851bfc7f5453e4d22";

const DEFAULT_DONATION_ADDRESS: &str = "tmJV5QYQZa5wuCQUBd5pTKuWnKvQYhriiHw";

const DNS_SEEDS: &[DnsSeed] = &[
    DnsSeed {
        name: "junomoneta.io",
        host: "dnsseed.testnet.junomoneta.io",
    },
    DnsSeed {
        name: "juno.cash",
        host: "dnsseed.testnet.juno.cash",
    },
];

/// Builds and checks the public test network parameters.
pub(super) fn params() -> Result<NetworkParams, ParamsError> {
    let kind = NetworkKind::Testnet;

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
        (170_007, AlwaysActive),
        (170_008, AlwaysActive),
        (170_010, AlwaysActive),
        (170_012, AlwaysActive),
        (170_050, AlwaysActive),
        (170_110, AlwaysActive),
        (170_130, AlwaysActive),
        (0x7FFF_FFFF, Never),
    ])?;

    let future_timestamp_soft_fork_height = upgrades
        .activation_height(NetworkUpgrade::Blossom)
        .and_then(|blossom| blossom + i64::from(FUTURE_TIMESTAMP_SOFT_FORK_DELAY));

    let consensus = ConsensusParams {
        genesis_hash,
        upgrades,
        subsidy_slow_start_interval: 20_000,
        pre_blossom_subsidy_halving_interval: PRE_BLOSSOM_HALVING_INTERVAL,
        post_blossom_subsidy_halving_interval: POST_BLOSSOM_HALVING_INTERVAL,
        majority_enforce_block_upgrade: 51,
        majority_reject_block_outdated: 75,
        majority_window: 400,
        pow_limit: POW_LIMIT.parse().expect("hard-coded pow limit parses"),
        pow_averaging_window: 17,
        pow_max_adjust_down: 32,
        pow_max_adjust_up: 16,
        pre_blossom_pow_target_spacing: PRE_BLOSSOM_POW_TARGET_SPACING,
        post_blossom_pow_target_spacing: POST_BLOSSOM_POW_TARGET_SPACING,
        pow_allow_min_difficulty_blocks_after_height: Some(MIN_DIFFICULTY_BLOCKS_AFTER_HEIGHT),
        pow_no_retargeting: false,
        coinbase_must_be_shielded: true,
        future_timestamp_soft_fork_height,
        funding_period_length: POST_BLOSSOM_HALVING_INTERVAL / FUNDING_PERIODS_PER_HALVING,
        funding_streams: BTreeMap::new(),
        lockbox_disbursements: BTreeMap::new(),
        minimum_chain_work: U256::from(0x24cad43_u64),
    };

    let checkpoints = CheckpointList::new(
        genesis_hash,
        [(Height(0), genesis_hash)],
        CheckpointStats::default(),
    )?;

    let params = NetworkParams {
        kind,
        currency_units: "TJUNO",
        bip44_coin_type: 8134,
        magic: magics::TESTNET,
        default_port: 18234,
        prune_after_height: 1_000,
        address_prefixes: &address_prefixes::TESTNET,
        dns_seeds: DNS_SEEDS.to_vec(),
        fixed_seeds: Vec::new(),
        checkpoints,
        founders_reward_addresses: Vec::new(),
        default_donation_address: Some(DEFAULT_DONATION_ADDRESS),
        alert_pub_key: Some(<Vec<u8>>::from_hex(ALERT_PUB_KEY).expect("hard-coded key parses")),
        policy: PolicyFlags {
            mining_requires_peers: true,
            default_consistency_checks: false,
            require_standard: true,
            mine_blocks_on_demand: false,
            testnet_to_be_deprecated_field_rpc: true,
            require_wallet_backup: true,
        },
        value_pool_checkpoint: Some(ValuePoolCheckpoint {
            height: Height(0),
            balance: Amount::zero(),
            block_hash: genesis_hash,
        }),
        zip209_enabled: true,
        consensus,
        genesis,
    };

    params.validate()?;

    Ok(params)
}
