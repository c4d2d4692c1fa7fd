//! Definitions of consensus constants shared by every network, including:
//! - halving intervals,
//! - block spacing,
//! - the maximum block subsidy,
//! - network magic values.

use crate::block::HeightDiff;

/// The halving interval before Blossom, on the production and test networks.
pub const PRE_BLOSSOM_HALVING_INTERVAL: HeightDiff = 840_000;

/// The halving interval before Blossom, on regtest.
pub const PRE_BLOSSOM_REGTEST_HALVING_INTERVAL: HeightDiff = 144;

/// The ratio of the pre-Blossom to the post-Blossom target spacing.
pub const BLOSSOM_POW_TARGET_SPACING_RATIO: u32 = 2;

/// The target block spacing before Blossom, in seconds.
pub const PRE_BLOSSOM_POW_TARGET_SPACING: i64 = 150;

/// The target block spacing after Blossom, in seconds.
pub const POST_BLOSSOM_POW_TARGET_SPACING: i64 =
    PRE_BLOSSOM_POW_TARGET_SPACING / BLOSSOM_POW_TARGET_SPACING_RATIO as i64;

/// Returns the post-Blossom halving interval for a pre-Blossom interval.
///
/// Blocks come twice as fast after Blossom, so halvings take twice as many
/// blocks.
pub const fn post_blossom_halving_interval(pre_blossom: HeightDiff) -> HeightDiff {
    pre_blossom * BLOSSOM_POW_TARGET_SPACING_RATIO as HeightDiff
}

/// The halving interval after Blossom, on the production and test networks.
pub const POST_BLOSSOM_HALVING_INTERVAL: HeightDiff =
    post_blossom_halving_interval(PRE_BLOSSOM_HALVING_INTERVAL);

/// The number of funding periods in a post-Blossom halving interval.
pub const FUNDING_PERIODS_PER_HALVING: HeightDiff = 48;

/// The maximum block subsidy, 12.5 coins, in zatoshis.
pub const MAX_BLOCK_SUBSIDY: u64 = 1_250_000_000;

/// The denominator of funding stream numerators.
///
/// Stream values are a whole percentage of the block subsidy.
pub const FUNDING_STREAM_RECEIVER_DENOMINATOR: u64 = 100;

/// The maximum time a block header may be ahead of the median time past of
/// the previous blocks, in seconds.
pub const MAX_FUTURE_BLOCK_TIME_MTP: i64 = 90 * 60;

/// How much slower signature checks are than the rest of block validation,
/// used when estimating verification progress.
pub const SIGCHECK_VERIFICATION_FACTOR: f64 = 5.0;

/// Magic numbers used to identify different Juno Cash networks.
pub mod magics {
    use crate::parameters::Magic;

    /// The production network.
    pub const MAINNET: Magic = Magic([0xb5, 0x0c, 0x07, 0x02]);
    /// The public test network.
    pub const TESTNET: Magic = Magic([0xa7, 0x23, 0xe1, 0x6c]);
    /// Local regression test networks.
    pub const REGTEST: Magic = Magic([0x81, 0x1d, 0x21, 0xf6]);
}
