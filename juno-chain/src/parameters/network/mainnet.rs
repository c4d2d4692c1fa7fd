//! Production network parameters.

use std::collections::BTreeMap;

use hex::FromHex;

use crate::{
    amount::Amount,
    block::{self, Height},
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
        ConsensusParams, ParamsError,
    },
    work::difficulty::U256,
};

use super::{verified_genesis, DnsSeed, NetworkKind, NetworkParams, PolicyFlags};

/// The main genesis block hash, in display order.
pub const GENESIS_HASH: &str = "0091ff2592b34a24eb014637f76c5ee416ce7a6928e8940f96e78954351d70bc";

/// The SHA-256d digest of the main genesis block header, in display order.
pub const GENESIS_HEADER_DIGEST: &str =
    "5d8cd9db4ed358dc6078667d932628c466d29fb910aa7892cca5165c58971ad2";

/// The main genesis block time.
const GENESIS_TIME: u32 = 1_763_197_809;

/// The main genesis block nonce.
const GENESIS_NONCE: u64 = 0x1398;

/// The main genesis proof-of-work hash, in serialized order.
const GENESIS_SOLUTION: &str = "bc701d355489e7960f94e828697ace16e45e6cf7374601eb244ab39225ff9100";

/// The main genesis difficulty threshold.
const GENESIS_BITS: u32 = 0x2000_ffff;

/// The main proof-of-work limit.
const POW_LIMIT: &str = "0007ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff";

/// The main network alert key.
const ALERT_PUB_KEY: &str = "042c66363e6bd947c72c64878822b3bb114f7b98da8d6e825ec5a575ebfd2a9bbe36e99af2fcbf340f65410da22d2e0e08ae685776b58bd1508b417ac9b61c3da9";

/// The main network donation address.
const DEFAULT_DONATION_ADDRESS: &str = "t1HuKnfjJdtkMA2dMYpPeFgkMeX3pnLFppA";

/// The main DNS seeds.
const DNS_SEEDS: &[DnsSeed] = &[
    DnsSeed {
        name: "junomoneta.io",
        host: "dnsseed.junomoneta.io",
    },
    DnsSeed {
        name: "juno.cash",
        host: "dnsseed.juno.cash",
    },
];

/// Checkpoints after genesis, as `(height, hash)`.
const CHECKPOINTS: &[(u32, &str)] = &[(
    29_453,
    "000000460b68ba29bc26af81f40d9ff798afbcac35ae3db80bc12cfaf78b9beb",
)];

/// Chain statistics at the last checkpoint.
const CHECKPOINT_STATS: CheckpointStats = CheckpointStats {
    time_last_checkpoint: 1_764_902_523,
    transactions_last_checkpoint: 29_484,
    transactions_per_day: 720.0,
};

/// Builds and checks the production network parameters.
pub(super) fn params() -> Result<NetworkParams, ParamsError> {
    let kind = NetworkKind::Mainnet;

    let genesis = verified_genesis(
        kind,
        GenesisParams::new(GENESIS_TIME, GENESIS_NONCE, GENESIS_SOLUTION, GENESIS_BITS),
        GENESIS_HASH,
        GENESIS_HEADER_DIGEST,
    )?;
    let genesis_hash = genesis.hash();

    // Every upgrade before NU5 is active from genesis. NU5 activates at
    // block 1, so the genesis block has no Orchard anchor.
    let upgrades = UpgradeSchedule::new([
        (170_002, AlwaysActive),
        (170_002, Never),
        (170_005, AlwaysActive),
        (170_007, AlwaysActive),
        (170_009, AlwaysActive),
        (170_011, AlwaysActive),
        (170_013, AlwaysActive),
        (170_100, At(Height(1))),
        (170_120, At(Height(2))),
        (170_140, At(Height(3))),
        (0x7FFF_FFFF, Never),
    ])?;

    let consensus = ConsensusParams {
        genesis_hash,
        upgrades,
        subsidy_slow_start_interval: 20_000,
        pre_blossom_subsidy_halving_interval: PRE_BLOSSOM_HALVING_INTERVAL,
        post_blossom_subsidy_halving_interval: POST_BLOSSOM_HALVING_INTERVAL,
        majority_enforce_block_upgrade: 750,
        majority_reject_block_outdated: 950,
        majority_window: 4_000,
        pow_limit: POW_LIMIT.parse().expect("hard-coded pow limit parses"),
        pow_averaging_window: 100,
        pow_max_adjust_down: 32,
        pow_max_adjust_up: 16,
        pre_blossom_pow_target_spacing: PRE_BLOSSOM_POW_TARGET_SPACING,
        post_blossom_pow_target_spacing: POST_BLOSSOM_POW_TARGET_SPACING,
        pow_allow_min_difficulty_blocks_after_height: None,
        pow_no_retargeting: false,
        coinbase_must_be_shielded: true,
        future_timestamp_soft_fork_height: None,
        funding_period_length: POST_BLOSSOM_HALVING_INTERVAL / FUNDING_PERIODS_PER_HALVING,
        funding_streams: BTreeMap::new(),
        lockbox_disbursements: BTreeMap::new(),
        minimum_chain_work: U256::from(0xecc453bf9_u64),
    };

    let checkpoints = CheckpointList::new(
        genesis_hash,
        std::iter::once((Height(0), genesis_hash)).chain(CHECKPOINTS.iter().map(
            |&(height, hash)| {
                let hash: block::Hash = hash.parse().expect("hard-coded hash parses");
                (Height(height), hash)
            },
        )),
        CHECKPOINT_STATS,
    )?;

    let params = NetworkParams {
        kind,
        currency_units: "JUNO",
        bip44_coin_type: 8133,
        magic: magics::MAINNET,
        default_port: 8234,
        prune_after_height: 100_000,
        address_prefixes: &address_prefixes::MAINNET,
        dns_seeds: DNS_SEEDS.to_vec(),
        fixed_seeds: Vec::new(),
        checkpoints,
        // No founders' reward on Juno Cash.
        founders_reward_addresses: Vec::new(),
        default_donation_address: Some(DEFAULT_DONATION_ADDRESS),
        alert_pub_key: Some(<Vec<u8>>::from_hex(ALERT_PUB_KEY).expect("hard-coded key parses")),
        policy: PolicyFlags {
            mining_requires_peers: true,
            default_consistency_checks: false,
            require_standard: true,
            mine_blocks_on_demand: false,
            testnet_to_be_deprecated_field_rpc: false,
            require_wallet_backup: true,
        },
        // No Sprout activity on a new chain.
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
