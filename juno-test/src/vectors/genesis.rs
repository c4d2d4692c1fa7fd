//! Genesis block test vectors
//!
//! The serialized blocks are the canonical encoding of the height-0 block of
//! each network, so a change in the genesis builder shows up as a byte diff.

#![allow(missing_docs)]

use hex::FromHex;
use lazy_static::lazy_static;

/// The merkle root shared by the genesis blocks of all three networks, in display order.
pub const GENESIS_MERKLE_ROOT: &str =
    "e53f8696814445c3b5668803e8f2475004dc9c00c05c68a67f92c731c1432c67";

/// The SHA-256d digest of the genesis coinbase transaction, in display order.
pub const GENESIS_COINBASE_TXID: &str = GENESIS_MERKLE_ROOT;

/// The main genesis block hash, in display order.
pub const MAINNET_GENESIS_HASH: &str =
    "0091ff2592b34a24eb014637f76c5ee416ce7a6928e8940f96e78954351d70bc";

/// The SHA-256d digest of the main genesis block header, in display order.
pub const MAINNET_GENESIS_HEADER_DIGEST: &str =
    "5d8cd9db4ed358dc6078667d932628c466d29fb910aa7892cca5165c58971ad2";

/// The test genesis block hash, in display order.
pub const TESTNET_GENESIS_HASH: &str =
    "009a83c6bd95d1f0548fe4c5f6555c785e9c456ca33f58c2d7755c2bdd1e842f";

/// The SHA-256d digest of the test genesis block header, in display order.
pub const TESTNET_GENESIS_HEADER_DIGEST: &str =
    "20bff21982a2162fc61cbd8aa9bedceec468d93d4524b78ae8b0750e892ef989";

/// The regtest genesis block hash, in display order.
pub const REGTEST_GENESIS_HASH: &str =
    "02a19528ff5e8241dc7601cf7f54a74d26e0f2acc393a7ac964d055e6d1925db";

/// The SHA-256d digest of the regtest genesis block header, in display order.
pub const REGTEST_GENESIS_HEADER_DIGEST: &str =
    "a55d3fa289255dcb52dc594512dbf5d1941c90419b99f1e4b84fcdbb7eb3c207";

lazy_static! {
    /// The serialized main genesis block.
    pub static ref MAINNET_GENESIS_BYTES: Vec<u8> = <Vec<u8>>::from_hex(
        [
            "040000000000000000000000000000000000000000000000000000000000000000000000672c43c1",
            "31c7927fa6685cc0009cdc045047f2e8038866b5c345448196863fe5000000000000000000000000",
            "000000000000000000000000000000000000000071431869ffff0020981300000000000000000000",
            "000000000000000000000000000000000000000020bc701d355489e7960f94e828697ace16e45e6c",
            "f7374601eb244ab39225ff9100010400008085202f89010000000000000000000000000000000000",
            "000000000000000000000000000000ffffffff4804ffff071f010440623763393233313535303030",
            "30303030303030303763613861343962316663333065323062643964356133636139613039326166",
            "393230663266323762306333ffffffff010000000000000000434104678afdb0fe5548271967f1a6",
            "7130b7105cd6a828e03909a67962e0ea1f61deb649f6bc3f4cef38c4f35504e51ec112de5c384df7",
            "ba0b8d578a4c702b6bf11d5fac00000000000000000000000000000000000000",
        ]
        .concat(),
    )
    .expect("genesis block test vector is valid hex");

    /// The serialized test genesis block.
    pub static ref TESTNET_GENESIS_BYTES: Vec<u8> = <Vec<u8>>::from_hex(
        [
            "040000000000000000000000000000000000000000000000000000000000000000000000672c43c1",
            "31c7927fa6685cc0009cdc045047f2e8038866b5c345448196863fe5000000000000000000000000",
            "000000000000000000000000000000000000000070431869ffff0020c00000000000000000000000",
            "0000000000000000000000000000000000000000202f841edd2b5c75d7c2583fa36c459c5e785c55",
            "f6c5e48f54f0d195bdc6839a00010400008085202f89010000000000000000000000000000000000",
            "000000000000000000000000000000ffffffff4804ffff071f010440623763393233313535303030",
            "30303030303030303763613861343962316663333065323062643964356133636139613039326166",
            "393230663266323762306333ffffffff010000000000000000434104678afdb0fe5548271967f1a6",
            "7130b7105cd6a828e03909a67962e0ea1f61deb649f6bc3f4cef38c4f35504e51ec112de5c384df7",
            "ba0b8d578a4c702b6bf11d5fac00000000000000000000000000000000000000",
        ]
        .concat(),
    )
    .expect("genesis block test vector is valid hex");

    /// The serialized regtest genesis block.
    pub static ref REGTEST_GENESIS_BYTES: Vec<u8> = <Vec<u8>>::from_hex(
        [
            "040000000000000000000000000000000000000000000000000000000000000000000000672c43c1",
            "31c7927fa6685cc0009cdc045047f2e8038866b5c345448196863fe5000000000000000000000000",
            "00000000000000000000000000000000000000006f4318690f0f0f20360000000000000000000000",
            "000000000000000000000000000000000000000020db25196d5e054d96aca793c3acf2e0264da754",
            "7fcf0176dc41825eff2895a102010400008085202f89010000000000000000000000000000000000",
            "000000000000000000000000000000ffffffff4804ffff071f010440623763393233313535303030",
            "30303030303030303763613861343962316663333065323062643964356133636139613039326166",
            "393230663266323762306333ffffffff010000000000000000434104678afdb0fe5548271967f1a6",
            "7130b7105cd6a828e03909a67962e0ea1f61deb649f6bc3f4cef38c4f35504e51ec112de5c384df7",
            "ba0b8d578a4c702b6bf11d5fac00000000000000000000000000000000000000",
        ]
        .concat(),
    )
    .expect("genesis block test vector is valid hex");
}
