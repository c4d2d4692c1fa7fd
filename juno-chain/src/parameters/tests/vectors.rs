//! Fixed test vectors for the network parameters.

use chrono::{DateTime, TimeZone, Utc};
use hex::FromHex;

use juno_test::vectors::{
    GENESIS_COINBASE_TXID, GENESIS_MERKLE_ROOT, MAINNET_GENESIS_BYTES, MAINNET_GENESIS_HASH,
    MAINNET_GENESIS_HEADER_DIGEST, REGTEST_GENESIS_BYTES, REGTEST_GENESIS_HASH,
    REGTEST_GENESIS_HEADER_DIGEST, TESTNET_GENESIS_BYTES, TESTNET_GENESIS_HASH,
    TESTNET_GENESIS_HEADER_DIGEST,
};

use crate::{
    amount::{Amount, NegativeAllowed, NonNegative},
    block::{self, merkle, Height},
    parameters::{
        checkpoint::{CheckpointList, CheckpointStats},
        config::{Config, ConfiguredActivationHeights, RegtestConfig},
        genesis::{GenesisCommitments, GenesisParams},
        registry::Registry,
        subsidy::{
            FundingStream, FundingStreamIndex, FundingStreamRecipient, LockboxDisbursement,
            LockboxDisbursementIndex,
        },
        ActivationHeight, NetworkKind, NetworkParams, NetworkUpgrade, ParamsError, RegtestParams,
    },
    serialization::ZcashSerialize,
    transparent::Script,
    work::difficulty::{CompactDifficulty, ExpandedDifficulty},
};

use NetworkUpgrade::*;

/// Main P2SH addresses with the script hashes `00..13`, `11..11`, `22..22`
/// and `33..33`.
const MAINNET_P2SH_ADDRESSES: [&str; 4] = [
    "t3JZe8uVCra9T1mot8DC99s7GVsDKFy2Xa2",
    "t3L7rrxCCSEoSGuHoTpZsXSwyJt6bcF2i5q",
    "t3Mg6o2UpMFVtrzqGs7f2VTS6DaiPnFT5rL",
    "t3PELj6mSGGCMT6NkGQkBTTvD8HLBsnvXZ4",
];

/// Test P2SH addresses with the same script hashes as
/// [`MAINNET_P2SH_ADDRESSES`].
const TESTNET_P2SH_ADDRESSES: [&str; 4] = [
    "t26YqBabLj2kpZUPd3xCBhVHucMSV83GWSw",
    "t2873udJLJhQopbsYPZZv558cRNKmTQoqTa",
    "t29fHqhaxDi7GQhR1nrf535cjL4wZfHdWu7",
    "t2BDXmmsa8ioiznxVC9kE166rEmZMnhPPBs",
];

/// A main P2PKH address.
const MAINNET_P2PKH_ADDRESS: &str = "t1HuKnfjJdtkMA2dMYpPeFgkMeX3pnLFppA";

fn mainnet() -> NetworkParams {
    NetworkParams::mainnet().expect("hard-coded main parameters are valid")
}

fn testnet() -> NetworkParams {
    NetworkParams::testnet().expect("hard-coded test parameters are valid")
}

fn regtest() -> RegtestParams {
    RegtestParams::new().expect("hard-coded regtest parameters are valid")
}

fn registry() -> Registry {
    Registry::new().expect("hard-coded parameters are valid")
}

fn time(timestamp: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(timestamp, 0)
        .single()
        .expect("in-range timestamp")
}

/// Returns the header digest in display order.
fn display_digest(params: &NetworkParams) -> String {
    let mut digest = params.genesis().block().header.digest();
    digest.reverse();

    hex::encode(digest)
}

#[test]
fn branch_ids_and_names() {
    let _init_guard = juno_test::init();

    let expected = [
        (Sprout, 0, "Sprout"),
        (TestDummy, 0x7473_6554, "Test dummy"),
        (Overwinter, 0x5ba8_1b19, "Overwinter"),
        (Sapling, 0x76b8_09bb, "Sapling"),
        (Blossom, 0x2bb4_0e60, "Blossom"),
        (Heartwood, 0xf5b9_230b, "Heartwood"),
        (Canopy, 0xe9ff_75a6, "Canopy"),
        (Nu5, 0xc2d6_d0b4, "NU5"),
        (Nu6, 0xc8e7_1055, "NU6"),
        (Nu6_1, 0x4dec_4df0, "NU6.1"),
        (ZFuture, 0xffff_ffff, "ZFuture"),
    ];

    assert!(NetworkUpgrade::iter().eq(expected.iter().map(|&(upgrade, _, _)| upgrade)));

    for (upgrade, branch_id, name) in expected {
        assert_eq!(u32::from(upgrade.branch_id()), branch_id, "{upgrade:?}");
        assert_eq!(upgrade.name(), name);
        assert_eq!(upgrade.to_string(), name);
    }

    assert_eq!(NetworkUpgrade::from_branch_id(0xc2d6_d0b4), Some(Nu5));
    assert_eq!(NetworkUpgrade::from_branch_id(0x4dec_4df0), Some(Nu6_1));
    assert_eq!(NetworkUpgrade::from_branch_id(0x1234_5678), None);

    assert_eq!(Sprout.next_upgrade(), Some(TestDummy));
    assert_eq!(ZFuture.next_upgrade(), None);
    assert_eq!(Sprout.previous_upgrade(), None);
}

#[test]
fn mainnet_activation_heights() {
    let _init_guard = juno_test::init();

    let network = mainnet();
    let consensus = network.consensus();

    for upgrade in [Sprout, Overwinter, Sapling, Blossom, Heartwood, Canopy] {
        assert_eq!(consensus.activation_height(upgrade), Some(Height(0)));
        assert!(consensus.is_active(Height(0), upgrade));
    }

    for (upgrade, height) in [(Nu5, 1), (Nu6, 2), (Nu6_1, 3)] {
        let height = Height(height);
        assert_eq!(consensus.activation_height(upgrade), Some(height));
        assert!(!consensus.is_active((height - 1).expect("above genesis"), upgrade));
        assert!(consensus.is_active(height, upgrade));
        assert!(consensus.upgrades().is_activation_height(height, upgrade));
    }

    assert_eq!(consensus.current_epoch(Height(0)), Canopy);
    assert_eq!(consensus.current_epoch(Height(1)), Nu5);
    assert_eq!(consensus.current_epoch(Height(2)), Nu6);
    assert_eq!(consensus.current_epoch(Height(3)), Nu6_1);
    assert_eq!(consensus.current_epoch(Height::MAX), Nu6_1);
    assert_eq!(
        consensus.current_epoch_branch_id(Height(3)),
        Nu6_1.branch_id()
    );

    assert_eq!(consensus.next_epoch(Height(0)), Some(Nu5));
    assert_eq!(consensus.next_activation_height(Height(0)), Some(Height(1)));
    assert_eq!(consensus.next_epoch(Height(2)), Some(Nu6_1));
    assert_eq!(consensus.next_epoch(Height(3)), None);
    assert_eq!(consensus.next_activation_height(Height::MAX), None);

    assert!(consensus
        .upgrades()
        .is_activation_height_for_any_upgrade(Height(2)));
    assert!(!consensus
        .upgrades()
        .is_activation_height_for_any_upgrade(Height(4)));
}

#[test]
fn test_networks_activate_everything_from_genesis() {
    let _init_guard = juno_test::init();

    let regtest = regtest();

    for network in [&testnet(), regtest.params()] {
        let consensus = network.consensus();

        for upgrade in NetworkUpgrade::iter().filter(|&u| u != TestDummy && u != ZFuture) {
            assert_eq!(
                consensus.upgrades().descriptor(upgrade).activation_height,
                ActivationHeight::AlwaysActive,
                "{network} {upgrade:?}"
            );
        }

        assert_eq!(consensus.current_epoch(Height(0)), Nu6_1);
        assert_eq!(consensus.next_epoch(Height(0)), None);
        assert_eq!(consensus.seconds_left_to_next_epoch(Height(0)), None);
    }
}

#[test]
fn never_upgrades_are_never_active() {
    let _init_guard = juno_test::init();

    let regtest = regtest();

    for network in [&mainnet(), &testnet(), regtest.params()] {
        for upgrade in [TestDummy, ZFuture] {
            assert_eq!(network.consensus().activation_height(upgrade), None);
            assert!(!network.consensus().is_active(Height::MAX, upgrade));
        }
    }
}

#[test]
fn protocol_versions_never_decrease() {
    let _init_guard = juno_test::init();

    let regtest = regtest();

    for network in [&mainnet(), &testnet(), regtest.params()] {
        let versions: Vec<u32> = network
            .consensus()
            .upgrades()
            .iter()
            .filter(|descriptor| descriptor.upgrade != TestDummy)
            .map(|descriptor| descriptor.protocol_version)
            .collect();

        assert!(
            versions.windows(2).all(|pair| pair[0] <= pair[1]),
            "{network}: {versions:?}"
        );
    }
}

#[test]
fn genesis_blocks_match_vectors() {
    let _init_guard = juno_test::init();

    let merkle_root = merkle::Root::from_hex(GENESIS_MERKLE_ROOT).expect("valid merkle root");
    let regtest = regtest();

    for (network, hash, digest, bytes) in [
        (
            &mainnet(),
            MAINNET_GENESIS_HASH,
            MAINNET_GENESIS_HEADER_DIGEST,
            &*MAINNET_GENESIS_BYTES,
        ),
        (
            &testnet(),
            TESTNET_GENESIS_HASH,
            TESTNET_GENESIS_HEADER_DIGEST,
            &*TESTNET_GENESIS_BYTES,
        ),
        (
            regtest.params(),
            REGTEST_GENESIS_HASH,
            REGTEST_GENESIS_HEADER_DIGEST,
            &*REGTEST_GENESIS_BYTES,
        ),
    ] {
        let genesis = network.genesis();

        assert_eq!(genesis.hash().to_string(), hash, "{network}");
        assert_eq!(network.genesis_hash(), genesis.hash());
        assert_eq!(network.consensus().genesis_hash(), genesis.hash());
        assert_eq!(genesis.merkle_root(), merkle_root);
        assert_eq!(genesis.block().compute_merkle_root(), merkle_root);
        assert_eq!(display_digest(network), digest, "{network}");

        let serialized = genesis
            .block()
            .zcash_serialize_to_vec()
            .expect("genesis blocks serialize");
        assert_eq!(&serialized, bytes, "{network}");

        let coinbase = &genesis.block().transactions[0];
        assert!(coinbase.is_coinbase());
        assert_eq!(coinbase.hash().to_string(), GENESIS_COINBASE_TXID);
        assert_eq!(genesis.block().header.previous_block_hash, block::Hash([0; 32]));
    }
}

#[test]
fn genesis_inputs_change_the_header() {
    let _init_guard = juno_test::init();

    let original = GenesisParams::new(
        1_763_197_807,
        0x36,
        "db25196d5e054d96aca793c3acf2e0264da7547fcf0176dc41825eff2895a102",
        0x200f_0f0f,
    );
    let original_block = original.build();
    assert_eq!(original_block, regtest().genesis().clone());

    for (field, changed) in single_input_changes(&original) {
        let changed_block = changed.build();

        assert_ne!(
            changed_block.header_digest(),
            original_block.header_digest(),
            "changing the {field} must change the header digest"
        );
    }

    // The block hash is the proof-of-work hash, so only the header digest
    // commits to the time, nonce and bits.
    let mut time = original.clone();
    time.time += 1;
    assert_eq!(time.build().hash(), original_block.hash());
    assert_eq!(time.build().merkle_root(), original_block.merkle_root());
}

/// Returns a copy of `original` for each genesis input, with only that input
/// changed.
fn single_input_changes(original: &GenesisParams) -> Vec<(&'static str, GenesisParams)> {
    let mut time = original.clone();
    time.time += 12_345;

    let mut nonce = original.clone();
    nonce.nonce[0] ^= 0xff;

    let mut bits = original.clone();
    bits.bits = CompactDifficulty(0x207f_ffff);

    let mut solution = original.clone();
    solution.solution.0[0] ^= 1;

    let mut timestamp = original.clone();
    timestamp.timestamp = "Juno Cash genesis";

    let mut output_script = original.clone();
    output_script.output_script = Script::new(&[0x51]);

    vec![
        ("time", time),
        ("nonce", nonce),
        ("bits", bits),
        ("solution", solution),
        ("timestamp", timestamp),
        ("output script", output_script),
    ]
}

#[test]
fn genesis_verification_rejects_changed_inputs() {
    let _init_guard = juno_test::init();

    let regtest = regtest();
    let original = GenesisParams::new(
        1_763_197_807,
        0x36,
        "db25196d5e054d96aca793c3acf2e0264da7547fcf0176dc41825eff2895a102",
        0x200f_0f0f,
    );
    let expected = GenesisCommitments::from_hex(
        REGTEST_GENESIS_HASH,
        GENESIS_MERKLE_ROOT,
        REGTEST_GENESIS_HEADER_DIGEST,
    );
    assert_eq!(regtest.genesis().commitments(), expected);
    assert_eq!(original.build().verify("regtest", &expected), Ok(()));

    for (field, changed) in single_input_changes(&original) {
        let changed = changed.build();
        let result = changed.verify("regtest", &expected);

        match field {
            "time" | "nonce" | "bits" => assert_eq!(
                result,
                Err(ParamsError::GenesisHeaderMismatch {
                    network: "regtest",
                    expected: expected.header_digest,
                    actual: changed.header_digest(),
                }),
                "changing the {field} must fail verification"
            ),
            "solution" => assert_eq!(
                result,
                Err(ParamsError::GenesisHashMismatch {
                    network: "regtest",
                    expected: expected.hash,
                    actual: changed.hash(),
                }),
                "changing the {field} must fail verification"
            ),
            "timestamp" | "output script" => assert_eq!(
                result,
                Err(ParamsError::GenesisMerkleRootMismatch {
                    network: "regtest",
                    expected: expected.merkle_root,
                    actual: changed.merkle_root(),
                }),
                "changing the {field} must fail verification"
            ),
            _ => unreachable!("every changed input is checked"),
        }
    }

    // Mainnet's hard-coded commitments reject a block with a changed nonce
    // and time, even though its hash and merkle root are unchanged.
    let main = mainnet();
    let mut params = GenesisParams::new(
        1_763_197_809,
        0x1398,
        "bc701d355489e7960f94e828697ace16e45e6cf7374601eb244ab39225ff9100",
        0x2000_ffff,
    );
    assert_eq!(&params.build(), main.genesis());

    params.nonce[0] ^= 0xff;
    params.time += 12_345;
    assert!(matches!(
        params.build().verify("main", &main.genesis().commitments()),
        Err(ParamsError::GenesisHeaderMismatch { network: "main", .. })
    ));
}

#[test]
fn genesis_verification_failures() {
    let _init_guard = juno_test::init();

    let main = mainnet();
    let genesis = main.genesis();
    let merkle_root = genesis.merkle_root();

    let test_hash: block::Hash = TESTNET_GENESIS_HASH.parse().expect("valid hash");
    assert_eq!(
        genesis.verify(
            "main",
            &GenesisCommitments {
                hash: test_hash,
                ..genesis.commitments()
            }
        ),
        Err(ParamsError::GenesisHashMismatch {
            network: "main",
            expected: test_hash,
            actual: genesis.hash(),
        })
    );

    let wrong_root = merkle::Root([0x42; 32]);
    assert_eq!(
        genesis.verify(
            "main",
            &GenesisCommitments {
                merkle_root: wrong_root,
                ..genesis.commitments()
            }
        ),
        Err(ParamsError::GenesisMerkleRootMismatch {
            network: "main",
            expected: wrong_root,
            actual: merkle_root,
        })
    );

    let test = testnet();
    assert_eq!(
        genesis.verify(
            "main",
            &GenesisCommitments {
                header_digest: test.genesis().header_digest(),
                ..genesis.commitments()
            }
        ),
        Err(ParamsError::GenesisHeaderMismatch {
            network: "main",
            expected: test.genesis().header_digest(),
            actual: genesis.header_digest(),
        })
    );

    // A threshold of 1 is below every real proof-of-work hash.
    let too_hard = GenesisParams::new(
        1_763_197_807,
        0x36,
        "db25196d5e054d96aca793c3acf2e0264da7547fcf0176dc41825eff2895a102",
        0x0300_0001,
    )
    .build();
    assert_eq!(
        too_hard.verify("regtest", &too_hard.commitments()),
        Err(ParamsError::GenesisDifficultyNotMet {
            network: "regtest",
            hash: too_hard.hash(),
        })
    );
}

#[test]
fn network_metadata() {
    let _init_guard = juno_test::init();

    let main = mainnet();
    let test = testnet();
    let regtest = regtest();

    assert_eq!(main.network_id(), "main");
    assert_eq!(test.network_id(), "test");
    assert_eq!(regtest.network_id(), "regtest");
    assert_eq!(main.to_string(), "main");
    assert_eq!(format!("{}", *regtest), "regtest");

    assert_eq!(main.currency_units(), "JUNO");
    assert_eq!(main.default_port(), 8234);
    assert_eq!(test.default_port(), 18234);
    assert_eq!(regtest.default_port(), 18345);

    assert_eq!(main.magic(), NetworkKind::Mainnet.magic());
    assert_ne!(main.magic(), test.magic());
    assert_ne!(test.magic(), regtest.magic());

    assert_eq!(main.default_donation_address(), Some(MAINNET_P2PKH_ADDRESS));
    assert_eq!(regtest.default_donation_address(), None);
    assert!(main.alert_pub_key().is_some());
    assert!(regtest.alert_pub_key().is_none());
    assert!(!main.dns_seeds().is_empty());
    assert!(regtest.dns_seeds().is_empty());

    assert!(main.policy().require_standard);
    assert!(!regtest.policy().require_standard);
    assert!(regtest.policy().mine_blocks_on_demand);
    assert!(test.policy().testnet_to_be_deprecated_field_rpc);

    assert!(main.founders_reward_addresses().is_empty());
    assert!(test.founders_reward_addresses().is_empty());
}

#[test]
fn mainnet_block_subsidy() {
    let _init_guard = juno_test::init();

    let main = mainnet();
    let consensus = main.consensus();

    // The slow start ramp pays MAX_BLOCK_SUBSIDY / 20_000 more per block.
    let step = 62_500;
    assert_eq!(consensus.subsidy_slow_start_shift(), 10_000);

    for (height, subsidy) in [
        (0, 0),
        (1, step),
        (9_999, step * 9_999),
        (10_000, step * 10_001),
        (19_999, step * 20_000),
        (20_000, 625_000_000),
        (1_699_999, 625_000_000),
        (1_700_000, 312_500_000),
        (3_379_999, 312_500_000),
        (3_380_000, 156_250_000),
    ] {
        assert_eq!(
            consensus.block_subsidy(Height(height)),
            Amount::new(subsidy),
            "height {height}"
        );
    }

    assert_eq!(consensus.halving(Height(0)), 0);
    assert_eq!(consensus.halving(Height(1_699_999)), 0);
    assert_eq!(consensus.halving(Height(1_700_000)), 1);
    assert_eq!(consensus.halving_height(Height(0), 1), Height(1_700_000));
    assert_eq!(consensus.halving_height(Height(0), 2), Height(3_380_000));
    assert_eq!(
        consensus.last_founders_reward_block_height(Height(0)),
        Height(1_699_999)
    );

    assert_eq!(
        consensus.block_subsidy(Height::MAX),
        Amount::<NonNegative>::zero()
    );
}

#[test]
fn regtest_block_subsidy() {
    let _init_guard = juno_test::init();

    let regtest = regtest();
    let consensus = regtest.consensus();

    assert_eq!(consensus.block_subsidy(Height(0)), Amount::new(625_000_000));
    assert_eq!(consensus.block_subsidy(Height(287)), Amount::new(625_000_000));
    assert_eq!(consensus.block_subsidy(Height(288)), Amount::new(312_500_000));
    assert_eq!(consensus.halving(Height(288)), 1);
    assert_eq!(
        consensus.last_founders_reward_block_height(Height(0)),
        Height(287)
    );

    assert_eq!(consensus.funding_period_length(), 6);
}

#[test]
fn pow_target_spacing_changes_at_blossom() {
    let _init_guard = juno_test::init();

    let main = mainnet();
    for height in [0, 1, 3, 1_000_000] {
        assert_eq!(
            main.consensus()
                .pow_target_spacing(Height(height))
                .num_seconds(),
            75
        );
    }

    let mut regtest = regtest();
    regtest.update_network_upgrade_parameters(Blossom, Height(100));

    let consensus = regtest.consensus();
    assert_eq!(consensus.pow_target_spacing(Height(99)).num_seconds(), 150);
    assert_eq!(consensus.pow_target_spacing(Height(100)).num_seconds(), 75);

    assert_eq!(
        consensus.averaging_window_timespan(Height(99)).num_seconds(),
        150 * 17
    );

    // 10 pre-Blossom blocks, then the last block before Blossom.
    assert_eq!(consensus.next_activation_height(Height(90)), Some(Height(100)));
    assert_eq!(
        consensus
            .seconds_left_to_next_epoch(Height(90))
            .map(|left| left.num_seconds()),
        Some(10 * 150)
    );
}

#[test]
fn estimate_network_height_across_blossom() {
    let _init_guard = juno_test::init();

    let mut regtest = regtest();
    regtest.update_network_upgrade_parameters(Blossom, Height(1_000));
    let consensus = regtest.consensus();

    let header_time = time(1_800_000_000);

    assert_eq!(
        consensus.estimate_network_height(Height(500), header_time, header_time),
        Height(500)
    );

    // Entirely before Blossom: 100 blocks at 150 seconds.
    assert_eq!(
        consensus.estimate_network_height(
            Height(500),
            header_time,
            time(1_800_000_000 + 100 * 150)
        ),
        Height(600)
    );

    // 500 blocks at 150 seconds, then 200 blocks at 75 seconds.
    assert_eq!(
        consensus.estimate_network_height(
            Height(500),
            header_time,
            time(1_800_000_000 + 500 * 150 + 200 * 75)
        ),
        Height(1_200)
    );

    // Entirely after Blossom.
    assert_eq!(
        consensus.estimate_network_height(
            Height(2_000),
            header_time,
            time(1_800_000_000 + 100 * 75)
        ),
        Height(2_100)
    );
}

#[test]
fn founders_reward_rotation() {
    let _init_guard = juno_test::init();

    let main = mainnet().with_founders_reward_addresses(&MAINNET_P2SH_ADDRESSES);
    let founders_reward = main.founders_reward();

    // Blossom is active from genesis, so heights count half.
    assert_eq!(founders_reward.adjusted_height(Height(1_000)), 500);
    assert_eq!(founders_reward.last_height(Height(1)), Height(1_699_999));

    // Each address is used for 212_500 adjusted heights.
    for (height, index) in [
        (1, 0),
        (424_999, 0),
        (425_000, 1),
        (849_999, 1),
        (850_000, 2),
        (1_275_000, 3),
        (1_699_999, 3),
    ] {
        assert_eq!(
            founders_reward.index_at_height(Height(height)),
            index,
            "height {height}"
        );
        assert_eq!(
            founders_reward.address_at_height(Height(height)),
            MAINNET_P2SH_ADDRESSES[index]
        );
    }

    for (index, address) in MAINNET_P2SH_ADDRESSES.iter().enumerate() {
        assert_eq!(founders_reward.address_at_index(index), *address);
    }

    let script = founders_reward
        .script_at_height(Height(425_000))
        .expect("valid P2SH address");
    let mut expected = vec![0xa9, 0x14];
    expected.extend_from_slice(&[0x11; 20]);
    expected.push(0x87);
    assert_eq!(script.as_raw_bytes(), expected.as_slice());
}

#[test]
fn founders_reward_adjusted_height_before_blossom() {
    let _init_guard = juno_test::init();

    let mut regtest = regtest();
    regtest.update_network_upgrade_parameters(Blossom, Height(100));

    let founders_reward = regtest.founders_reward();
    assert_eq!(founders_reward.adjusted_height(Height(50)), 50);
    assert_eq!(founders_reward.adjusted_height(Height(100)), 100);
    assert_eq!(founders_reward.adjusted_height(Height(150)), 125);
}

#[test]
fn founders_reward_rejects_non_p2sh_addresses() {
    let _init_guard = juno_test::init();

    for address in [MAINNET_P2PKH_ADDRESS, TESTNET_P2SH_ADDRESSES[0], "not an address"] {
        let main = mainnet().with_founders_reward_addresses(&[address]);
        let expected = Err(ParamsError::InvalidFoundersRewardAddress {
            network: "main",
            address: address.to_string(),
        });

        assert_eq!(main.founders_reward().script_at_height(Height(1)), expected);
        assert_eq!(main.validate(), expected.map(|_: Script| ()));
    }

    let test = testnet().with_founders_reward_addresses(&TESTNET_P2SH_ADDRESSES);
    assert_eq!(test.validate(), Ok(()));
    assert!(test.founders_reward().script_at_height(Height(1)).is_ok());
}

#[test]
#[should_panic]
fn founders_reward_height_zero_panics() {
    let _init_guard = juno_test::init();

    let main = mainnet().with_founders_reward_addresses(&MAINNET_P2SH_ADDRESSES);
    main.founders_reward().index_at_height(Height(0));
}

#[test]
#[should_panic]
fn founders_reward_after_last_height_panics() {
    let _init_guard = juno_test::init();

    let main = mainnet().with_founders_reward_addresses(&MAINNET_P2SH_ADDRESSES);
    main.founders_reward().index_at_height(Height(1_700_000));
}

#[test]
#[should_panic]
fn founders_reward_without_addresses_panics() {
    let _init_guard = juno_test::init();

    mainnet().founders_reward().address_at_height(Height(1));
}

#[test]
#[should_panic]
fn founders_reward_index_out_of_range_panics() {
    let _init_guard = juno_test::init();

    let main = mainnet().with_founders_reward_addresses(&MAINNET_P2SH_ADDRESSES);
    main.founders_reward().address_at_index(4);
}

#[test]
fn funding_streams() {
    let _init_guard = juno_test::init();

    let mut regtest = regtest();
    assert_eq!(regtest.consensus().active_funding_streams(Height(3)).count(), 0);

    let recipients: Vec<FundingStreamRecipient> = TESTNET_P2SH_ADDRESSES[..2]
        .iter()
        .map(|address| FundingStreamRecipient::Address(address.to_string()))
        .collect();

    // Funding periods are 6 blocks long, aligned to the first halving at 288.
    let stream = FundingStream::new(Height(0), Height(12), recipients.clone());
    regtest
        .update_funding_stream_parameters(FundingStreamIndex::FpfZcg, stream)
        .expect("valid funding stream");
    regtest
        .update_funding_stream_parameters(
            FundingStreamIndex::Deferred,
            FundingStream::new(Height(0), Height(12), vec![FundingStreamRecipient::DeferredPool; 2]),
        )
        .expect("valid funding stream");

    let consensus = regtest.consensus();
    assert!(consensus.has_funding_stream(FundingStreamIndex::FpfZcg));
    assert!(!consensus.has_funding_stream(FundingStreamIndex::Zip214Bp));

    let subsidy = consensus.block_subsidy(Height(3));
    assert_eq!(
        consensus
            .funding_stream_elements(Height(3), subsidy)
            .expect("valid amounts"),
        vec![
            (recipients[0].clone(), Amount::new(50_000_000)),
            (FundingStreamRecipient::DeferredPool, Amount::new(75_000_000)),
        ]
    );
    assert_eq!(
        consensus
            .funding_stream_elements(Height(6), subsidy)
            .expect("valid amounts")[0]
            .0,
        recipients[1]
    );
    assert!(consensus
        .funding_stream_elements(Height(12), subsidy)
        .expect("valid amounts")
        .is_empty());

    // A stream starting mid-period has a short first period.
    assert_eq!(consensus.funding_period_index(Height(5), Height(5)), 0);
    assert_eq!(consensus.funding_period_index(Height(5), Height(6)), 1);
}

#[test]
fn invalid_funding_streams_are_rejected() {
    let _init_guard = juno_test::init();

    let mut regtest = regtest();
    let one_recipient = vec![FundingStreamRecipient::DeferredPool];

    assert_eq!(
        regtest.update_funding_stream_parameters(
            FundingStreamIndex::Deferred,
            FundingStream::new(Height(0), Height(12), one_recipient.clone()),
        ),
        Err(ParamsError::FundingStreamInsufficientRecipients {
            expected: 2,
            actual: 1,
        })
    );

    assert_eq!(
        regtest.update_funding_stream_parameters(
            FundingStreamIndex::Deferred,
            FundingStream::new(Height(10), Height(5), one_recipient.clone()),
        ),
        Err(ParamsError::FundingStreamIllegalRange {
            start_height: Height(10),
            end_height: Height(5),
        })
    );

    regtest.update_network_upgrade_parameters(Canopy, Height(100));
    assert_eq!(
        regtest.update_funding_stream_parameters(
            FundingStreamIndex::Deferred,
            FundingStream::new(Height(50), Height(52), one_recipient),
        ),
        Err(ParamsError::FundingStreamCanopyNotActive(Height(50)))
    );

    assert!(!regtest
        .consensus()
        .has_funding_stream(FundingStreamIndex::Deferred));
}

#[test]
fn lockbox_disbursements() {
    let _init_guard = juno_test::init();

    assert_eq!(LockboxDisbursementIndex::new(LockboxDisbursementIndex::COUNT), None);
    let index = LockboxDisbursementIndex::new(0).expect("in range");
    let last = LockboxDisbursementIndex::new(11).expect("in range");

    let disbursement = |height| LockboxDisbursement {
        height: Height(height),
        recipient: TESTNET_P2SH_ADDRESSES[0].to_string(),
        amount: Amount::new(1_000),
    };

    let mut regtest = regtest();
    regtest
        .update_onetime_lockbox_disbursement_parameters(index, disbursement(10))
        .expect("NU6.1 is active");
    regtest
        .update_onetime_lockbox_disbursement_parameters(last, disbursement(20))
        .expect("NU6.1 is active");

    let consensus = regtest.consensus();
    assert!(consensus.has_lockbox_disbursement(index));
    assert_eq!(consensus.lockbox_disbursement(last), Some(&disbursement(20)));

    let due: Vec<_> = consensus.lockbox_disbursements_at(Height(10)).collect();
    assert_eq!(due, vec![(index, &disbursement(10))]);
    assert_eq!(consensus.lockbox_disbursements_at(Height(11)).count(), 0);

    regtest.update_network_upgrade_parameters(Nu6_1, Height(15));
    assert_eq!(
        regtest.update_onetime_lockbox_disbursement_parameters(index, disbursement(14)),
        Err(ParamsError::LockboxDisbursementTooEarly(Height(14)))
    );
}

#[test]
fn sprout_value_pool_turnstile() {
    let _init_guard = juno_test::init();

    let mut regtest = regtest();
    let genesis_hash = regtest.genesis_hash();
    let null_hash = block::Hash([0; 32]);
    let overdrawn: Amount<NegativeAllowed> = Amount::try_from(-5_i64).expect("valid amount");

    // Regtest never names a checkpoint block.
    assert_eq!(
        regtest
            .value_pool_checkpoint()
            .map(|checkpoint| checkpoint.block_hash),
        Some(null_hash)
    );

    // The guard starts disabled on regtest.
    assert!(!regtest.zip209_enabled());
    assert_eq!(
        regtest.check_value_pool(Height(0), &null_hash, overdrawn),
        Ok(())
    );

    regtest.set_zip209_enabled(true);
    assert_eq!(
        regtest.check_value_pool(Height(0), &null_hash, overdrawn),
        Err(ParamsError::TurnstileViolation {
            height: Height(0),
            expected: Amount::zero(),
            observed: overdrawn,
        })
    );
    assert_eq!(
        regtest.check_value_pool(Height(0), &null_hash, Amount::zero()),
        Ok(())
    );

    // Real regtest blocks are not checkpointed, not even the genesis block.
    assert_eq!(
        regtest.check_value_pool(Height(0), &genesis_hash, overdrawn),
        Ok(())
    );
    assert_eq!(
        regtest.check_value_pool(Height(1), &null_hash, overdrawn),
        Ok(())
    );

    // Mainnet checkpoints its genesis block.
    let main = mainnet();
    assert!(main.zip209_enabled());
    assert_eq!(
        main.check_value_pool(Height(0), &main.genesis_hash(), overdrawn),
        Err(ParamsError::TurnstileViolation {
            height: Height(0),
            expected: Amount::zero(),
            observed: overdrawn,
        })
    );
    assert_eq!(
        main.check_value_pool(Height(0), &block::Hash([1; 32]), overdrawn),
        Ok(())
    );
}

#[test]
fn update_regtest_pow() {
    let _init_guard = juno_test::init();

    let pow_limit: ExpandedDifficulty = "0007ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
        .parse()
        .expect("valid pow limit");

    let mut regtest = regtest();
    assert!(regtest.consensus().pow_no_retargeting());
    assert_eq!(regtest.consensus().pow_max_adjust_up(), 0);

    regtest.update_regtest_pow(32, 16, pow_limit, false);

    let consensus = regtest.consensus();
    assert_eq!(consensus.pow_max_adjust_down(), 32);
    assert_eq!(consensus.pow_max_adjust_up(), 16);
    assert_eq!(consensus.pow_limit(), pow_limit);
    assert!(!consensus.pow_no_retargeting());

    // A 17 block window at 75 seconds.
    assert_eq!(consensus.min_actual_timespan(Height(0)).num_seconds(), 1_071);
    assert_eq!(consensus.max_actual_timespan(Height(0)).num_seconds(), 1_683);
}

#[test]
fn coinbase_shielding_rule() {
    let _init_guard = juno_test::init();

    let mut regtest = regtest();
    assert!(regtest.consensus().coinbase_must_be_shielded());

    regtest.set_coinbase_must_be_shielded(false);
    assert!(!regtest.consensus().coinbase_must_be_shielded());
}

#[test]
#[should_panic]
fn sprout_activation_height_cannot_change() {
    let _init_guard = juno_test::init();

    regtest().update_network_upgrade_parameters(Sprout, Height(1));
}

#[test]
fn checkpoints() {
    let _init_guard = juno_test::init();

    let main = mainnet();
    let checkpoints = main.checkpoints();
    let checkpoint_hash: block::Hash =
        "000000460b68ba29bc26af81f40d9ff798afbcac35ae3db80bc12cfaf78b9beb"
            .parse()
            .expect("valid hash");

    assert_eq!(checkpoints.hash(Height(0)), Some(main.genesis_hash()));
    assert!(checkpoints.contains(Height(29_453)));
    assert!(!checkpoints.contains(Height(29_454)));
    assert_eq!(checkpoints.max_height(), Height(29_453));
    assert_eq!(checkpoints.iter().count(), 2);

    assert!(checkpoints.is_valid_hash(Height(29_453), &checkpoint_hash));
    assert!(!checkpoints.is_valid_hash(Height(29_453), &main.genesis_hash()));
    assert!(checkpoints.is_valid_hash(Height(100), &main.genesis_hash()));

    assert!(!checkpoints.permits_reorg_at(Height(29_452)));
    assert!(checkpoints.permits_reorg_at(Height(29_453)));
    assert!(checkpoints.can_skip_script_checks(Height(29_453)));
    assert!(!checkpoints.can_skip_script_checks(Height(29_454)));

    let regtest = regtest();
    assert_eq!(regtest.checkpoints().max_height(), Height(0));
}

#[test]
fn invalid_checkpoint_lists() {
    let _init_guard = juno_test::init();

    let genesis = block::Hash([0; 32]);
    let a = block::Hash([1; 32]);
    let stats = CheckpointStats::default();

    let errors = [
        CheckpointList::new(genesis, std::iter::empty(), stats),
        CheckpointList::new(genesis, [(Height(1), a)], stats),
        CheckpointList::new(genesis, [(Height(0), a)], stats),
        CheckpointList::new(genesis, [(Height(0), genesis), (Height(1), genesis)], stats),
        CheckpointList::new(
            genesis,
            [(Height(0), genesis), (Height(1), a), (Height(1), a)],
            stats,
        ),
    ];

    for error in errors {
        assert!(
            matches!(error, Err(ParamsError::InvalidCheckpointList(_))),
            "{error:?}"
        );
    }

    assert!(CheckpointList::new(genesis, [(Height(1), a), (Height(0), genesis)], stats).is_ok());
}

#[test]
fn verification_progress() {
    let _init_guard = juno_test::init();

    let main = mainnet();
    let checkpoints = main.checkpoints();
    let stats = checkpoints.stats();
    let checkpoint_time = time(stats.time_last_checkpoint);

    let at_checkpoint = |transactions, now| {
        checkpoints.guess_verification_progress(transactions, checkpoint_time, now, true)
    };

    assert_eq!(at_checkpoint(0, checkpoint_time), 0.0);
    assert_eq!(at_checkpoint(stats.transactions_last_checkpoint / 2, checkpoint_time), 0.5);
    assert_eq!(at_checkpoint(stats.transactions_last_checkpoint, checkpoint_time), 1.0);

    // A day later, the day's expected transactions are still to be verified.
    let day_later = time(stats.time_last_checkpoint + 24 * 60 * 60);
    let progress = checkpoints.guess_verification_progress(
        stats.transactions_last_checkpoint,
        checkpoint_time,
        day_later,
        false,
    );
    let expected = 29_484.0 / (29_484.0 + 720.0);
    assert!((progress - expected).abs() < 1e-9, "{progress}");

    // Signature checks make the remaining work more expensive.
    assert!(at_checkpoint(stats.transactions_last_checkpoint, day_later) < progress);

    // An empty chain with no statistics has made no progress.
    let regtest = regtest();
    assert_eq!(
        regtest
            .checkpoints()
            .guess_verification_progress(0, checkpoint_time, day_later, true),
        0.0
    );
}

#[test]
fn network_names() {
    let _init_guard = juno_test::init();

    for kind in NetworkKind::iter() {
        assert_eq!(kind.id().parse::<NetworkKind>(), Ok(kind));
        assert_eq!(kind.to_string(), kind.id());
    }

    for name in ["mainnet", "testnet", "Main", "", "regtest "] {
        assert_eq!(
            name.parse::<NetworkKind>(),
            Err(ParamsError::UnknownNetwork(name.to_string()))
        );
    }

    assert!(!NetworkKind::Mainnet.is_a_test_network());
    assert!(NetworkKind::Regtest.is_a_test_network());
}

#[test]
fn registry_selects_once() {
    let _init_guard = juno_test::init();

    let registry = registry();
    assert_eq!(registry.selected(), None);
    assert_eq!(registry.try_current(), Err(ParamsError::NotSelected));

    // Lookups don't select a network.
    assert_eq!(
        registry.lookup("mainnet"),
        Err(ParamsError::UnknownNetwork("mainnet".to_string()))
    );
    let main = registry.lookup("main").expect("known network");
    assert_eq!(main.kind(), NetworkKind::Mainnet);
    assert_eq!(main.genesis_hash().to_string(), MAINNET_GENESIS_HASH);
    assert_eq!(registry.selected(), None);

    assert_eq!(
        registry.select_network("testnet"),
        Err(ParamsError::UnknownNetwork("testnet".to_string()))
    );
    assert_eq!(registry.selected(), None);

    let selected = registry.select_network("regtest").expect("first selection");
    assert_eq!(selected.kind(), NetworkKind::Regtest);
    assert!(selected.as_regtest().is_some());
    assert_eq!(registry.selected(), Some(NetworkKind::Regtest));
    assert_eq!(registry.current(), selected);

    assert_eq!(
        registry.select_network("main"),
        Err(ParamsError::AlreadySelected("regtest"))
    );
    assert_eq!(
        registry.select_with_config(&Config::default()),
        Err(ParamsError::AlreadySelected("regtest"))
    );
    assert_eq!(registry.current().kind(), NetworkKind::Regtest);
}

#[test]
fn regtest_updates_replace_the_snapshot() {
    let _init_guard = juno_test::init();

    let registry = registry();
    let before = registry.network(NetworkKind::Regtest);

    registry.update_regtest(|regtest| regtest.update_network_upgrade_parameters(Nu6_1, Height(500)));

    let after = registry.network(NetworkKind::Regtest);
    assert!(!after.consensus().is_active(Height(499), Nu6_1));
    assert!(after.consensus().is_active(Height(500), Nu6_1));

    // Readers holding the old snapshot are unaffected, and so are the
    // other networks.
    assert!(before.consensus().is_active(Height(499), Nu6_1));
    for kind in [NetworkKind::Mainnet, NetworkKind::Testnet] {
        assert!(registry
            .network(kind)
            .consensus()
            .is_active(Height(499), Nu6_1));
    }
}

#[test]
fn select_with_regtest_config() {
    let _init_guard = juno_test::init();

    let config = Config {
        network: NetworkKind::Regtest,
        regtest: RegtestConfig {
            shield_coinbase: true,
            developer_set_pool_size_zero: true,
            activation_heights: ConfiguredActivationHeights {
                canopy: Some(Height(10)),
                nu5: Some(Height(20)),
                nu6: Some(Height(20)),
                nu6_1: Some(Height(30)),
                ..Default::default()
            },
        },
    };

    let registry = registry();
    let network = registry.select_with_config(&config).expect("valid config");

    assert_eq!(network.kind(), NetworkKind::Regtest);
    assert!(network.zip209_enabled());
    assert!(network.consensus().coinbase_must_be_shielded());
    assert_eq!(network.consensus().current_epoch(Height(9)), Heartwood);
    assert_eq!(network.consensus().current_epoch(Height(10)), Canopy);
    assert_eq!(network.consensus().current_epoch(Height(29)), Nu6);
    assert_eq!(network.consensus().current_epoch(Height(30)), Nu6_1);
    assert_eq!(registry.current(), network);
}

#[test]
fn invalid_regtest_config_keeps_the_snapshot() {
    let _init_guard = juno_test::init();

    // NU6 is still active from genesis, so NU5 can't activate later.
    let config = Config {
        network: NetworkKind::Regtest,
        regtest: RegtestConfig {
            activation_heights: ConfiguredActivationHeights {
                nu5: Some(Height(20)),
                ..Default::default()
            },
            ..Default::default()
        },
    };

    let registry = registry();
    let before = registry.regtest();

    assert_eq!(
        registry.select_with_config(&config),
        Err(ParamsError::ActivationHeightsOutOfOrder {
            earlier: Nu5,
            earlier_height: ActivationHeight::At(Height(20)),
            later: Nu6,
            later_height: ActivationHeight::AlwaysActive,
        })
    );
    assert_eq!(registry.selected(), None);
    assert_eq!(registry.regtest(), before);

    assert_eq!(
        RegtestParams::with_config(&config.regtest).map(|_| ()),
        Err(ParamsError::ActivationHeightsOutOfOrder {
            earlier: Nu5,
            earlier_height: ActivationHeight::At(Height(20)),
            later: Nu6,
            later_height: ActivationHeight::AlwaysActive,
        })
    );
}

#[test]
fn regtest_config_is_ignored_on_other_networks() {
    let _init_guard = juno_test::init();

    let config = Config {
        network: NetworkKind::Testnet,
        regtest: RegtestConfig {
            developer_set_pool_size_zero: true,
            ..Default::default()
        },
    };

    let registry = registry();
    let network = registry.select_with_config(&config).expect("valid config");

    assert_eq!(network.kind(), NetworkKind::Testnet);
    assert!(!registry.regtest().zip209_enabled());
}

#[test]
fn config_deserialization() {
    let _init_guard = juno_test::init();

    let config: Config = serde_json::from_str(
        r#"{
            "network": "regtest",
            "regtest": {
                "shield_coinbase": true,
                "activation_heights": { "Canopy": 10, "NU5": 20, "NU6.1": 30, "ZFuture": 40 }
            }
        }"#,
    )
    .expect("valid config");

    assert_eq!(config.network, NetworkKind::Regtest);
    assert!(config.regtest.shield_coinbase);
    assert!(!config.regtest.developer_set_pool_size_zero);
    assert_eq!(
        config.regtest.activation_heights.iter().collect::<Vec<_>>(),
        vec![
            (Canopy, Height(10)),
            (Nu5, Height(20)),
            (Nu6_1, Height(30)),
            (ZFuture, Height(40)),
        ]
    );

    let default: Config = serde_json::from_str("{}").expect("every field has a default");
    assert_eq!(default, Config::default());
    assert_eq!(default.network, NetworkKind::Mainnet);
    assert!(default.regtest.activation_heights.is_empty());

    for invalid in [
        r#"{ "network": "mainnet" }"#,
        r#"{ "network": "main", "datadir": "/tmp" }"#,
        r#"{ "regtest": { "activation_heights": { "Sprout": 1 } } }"#,
        r#"{ "regtest": { "activation_heights": { "Nu6_1": 1 } } }"#,
    ] {
        assert!(
            serde_json::from_str::<Config>(invalid).is_err(),
            "{invalid} must be rejected"
        );
    }
}
