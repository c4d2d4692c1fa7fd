//! Randomised property tests for the network parameters.

use once_cell::sync::Lazy;
use proptest::prelude::*;

use crate::{
    block::Height,
    parameters::{NetworkKind, NetworkParams, NetworkUpgrade, RegtestParams},
};

static MAINNET: Lazy<NetworkParams> =
    Lazy::new(|| NetworkParams::mainnet().expect("hard-coded main parameters are valid"));

static TESTNET: Lazy<NetworkParams> =
    Lazy::new(|| NetworkParams::testnet().expect("hard-coded test parameters are valid"));

static REGTEST: Lazy<RegtestParams> =
    Lazy::new(|| RegtestParams::new().expect("hard-coded regtest parameters are valid"));

fn params(kind: NetworkKind) -> &'static NetworkParams {
    match kind {
        NetworkKind::Mainnet => &MAINNET,
        NetworkKind::Testnet => &TESTNET,
        NetworkKind::Regtest => REGTEST.params(),
    }
}

/// Main P2SH addresses, used to exercise the founders' reward rotation.
const FOUNDERS_REWARD_ADDRESSES: [&str; 4] = [
    "t3JZe8uVCra9T1mot8DC99s7GVsDKFy2Xa2",
    "t3L7rrxCCSEoSGuHoTpZsXSwyJt6bcF2i5q",
    "t3Mg6o2UpMFVtrzqGs7f2VTS6DaiPnFT5rL",
    "t3PELj6mSGGCMT6NkGQkBTTvD8HLBsnvXZ4",
];

proptest! {
    /// Once an upgrade is active, it stays active.
    #[test]
    fn activation_is_monotonic(
        kind in any::<NetworkKind>(),
        upgrade in any::<NetworkUpgrade>(),
        height in any::<Height>(),
    ) {
        let _init_guard = juno_test::init();

        let consensus = params(kind).consensus();
        let active = consensus.is_active(height, upgrade);

        prop_assert_eq!(
            active,
            consensus.activation_height(upgrade).is_some_and(|activation| activation <= height)
        );

        if let Some(next) = height + 1 {
            prop_assert!(!active || consensus.is_active(next, upgrade));
        }
    }

    /// The current epoch is active, and the next epoch isn't active yet.
    #[test]
    fn epochs_are_consistent(kind in any::<NetworkKind>(), height in any::<Height>()) {
        let _init_guard = juno_test::init();

        let consensus = params(kind).consensus();
        let current = consensus.current_epoch(height);

        prop_assert!(consensus.is_active(height, current));
        prop_assert!(consensus.is_active(height, NetworkUpgrade::Sprout));

        match consensus.next_epoch(height) {
            Some(next) => {
                let next_height = consensus
                    .next_activation_height(height)
                    .expect("pending upgrades have a height");

                prop_assert!(next_height > height);
                prop_assert!(!consensus.is_active(height, next));
                prop_assert_eq!(consensus.activation_height(next), Some(next_height));
            }
            None => prop_assert_eq!(consensus.next_activation_height(height), None),
        }
    }

    /// The target spacing is the pre-Blossom spacing before Blossom, and half
    /// of it afterwards.
    #[test]
    fn pow_target_spacing_has_two_values(
        blossom in 1..1_000_000_u32,
        height in 0..2_000_000_u32,
    ) {
        let _init_guard = juno_test::init();

        let mut regtest = REGTEST.clone();
        regtest.update_network_upgrade_parameters(NetworkUpgrade::Blossom, Height(blossom));

        let spacing = regtest.consensus().pow_target_spacing(Height(height)).num_seconds();
        let expected = if height < blossom { 150 } else { 75 };

        prop_assert_eq!(spacing, expected);
    }

    /// After the slow start, the block subsidy never increases.
    #[test]
    fn block_subsidy_never_increases(kind in any::<NetworkKind>(), height in 20_000..Height::MAX.0) {
        let _init_guard = juno_test::init();

        let consensus = params(kind).consensus();
        let height = Height(height);

        prop_assert!(consensus.block_subsidy(height.next()) <= consensus.block_subsidy(height));
    }

    /// The founders' reward address index never decreases, and stays in range.
    #[test]
    fn founders_reward_index_is_monotonic(a in 1..1_700_000_u32, b in 1..1_700_000_u32) {
        let _init_guard = juno_test::init();

        let main = MAINNET.clone().with_founders_reward_addresses(&FOUNDERS_REWARD_ADDRESSES);
        let founders_reward = main.founders_reward();

        let (low, high) = (Height(a.min(b)), Height(a.max(b)));
        let low_index = founders_reward.index_at_height(low);
        let high_index = founders_reward.index_at_height(high);

        prop_assert!(low_index <= high_index);
        prop_assert!(high_index < FOUNDERS_REWARD_ADDRESSES.len());
    }

    /// Activation heights in upgrade order are always accepted.
    #[test]
    fn ordered_regtest_schedules_are_valid(mut heights in prop::array::uniform4(0..10_000_u32)) {
        let _init_guard = juno_test::init();

        use NetworkUpgrade::*;

        heights.sort_unstable();

        let mut regtest = REGTEST.clone();
        for (upgrade, height) in [Canopy, Nu5, Nu6, Nu6_1].into_iter().zip(heights) {
            regtest.update_network_upgrade_parameters(upgrade, Height(height));
        }

        prop_assert!(regtest.consensus().upgrades().validate().is_ok());
        prop_assert_eq!(regtest.consensus().current_epoch(Height(heights[3])), Nu6_1);
    }
}
