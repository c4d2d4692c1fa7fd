//! Address and key encoding prefixes for each network.
//!
//! The key-encoding collaborator looks prefixes up by kind. This module only
//! stores the tables; general address encoding lives elsewhere.

/// Base58Check version prefix kinds.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Base58Type {
    /// Transparent P2PKH addresses.
    PubkeyAddress,
    /// Transparent P2SH addresses.
    ScriptAddress,
    /// WIF-encoded secret keys.
    SecretKey,
    /// BIP-32 extended public keys.
    ExtPublicKey,
    /// BIP-32 extended secret keys.
    ExtSecretKey,
    /// Sprout payment addresses.
    ZcPaymentAddress,
    /// Sprout incoming viewing keys.
    ZcViewingKey,
    /// Sprout spending keys.
    ZcSpendingKey,
}

/// Bech32 human-readable part kinds.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Bech32Type {
    /// Sapling payment addresses.
    SaplingPaymentAddress,
    /// Sapling full viewing keys.
    SaplingFullViewingKey,
    /// Sapling incoming viewing keys.
    SaplingIncomingViewingKey,
    /// Sapling extended spending keys.
    SaplingExtendedSpendKey,
    /// Sapling extended full viewing keys.
    SaplingExtendedFvk,
}

/// Bech32m human-readable part kinds.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Bech32mType {
    /// ZIP-320 transparent-source-only (TEX) addresses.
    TexAddress,
}

/// The encoding prefix table of one network.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct AddressPrefixes {
    pub(crate) pubkey_address: &'static [u8],
    pub(crate) script_address: &'static [u8],
    pub(crate) secret_key: &'static [u8],
    pub(crate) ext_public_key: &'static [u8],
    pub(crate) ext_secret_key: &'static [u8],
    pub(crate) zc_payment_address: &'static [u8],
    pub(crate) zc_viewing_key: &'static [u8],
    pub(crate) zc_spending_key: &'static [u8],

    pub(crate) sapling_payment_address: &'static str,
    pub(crate) sapling_full_viewing_key: &'static str,
    pub(crate) sapling_incoming_viewing_key: &'static str,
    pub(crate) sapling_extended_spend_key: &'static str,
    pub(crate) sapling_extended_fvk: &'static str,

    pub(crate) tex_address: &'static str,
}

impl AddressPrefixes {
    /// Returns the Base58Check version bytes for `kind`.
    pub fn base58(&self, kind: Base58Type) -> &'static [u8] {
        match kind {
            Base58Type::PubkeyAddress => self.pubkey_address,
            Base58Type::ScriptAddress => self.script_address,
            Base58Type::SecretKey => self.secret_key,
            Base58Type::ExtPublicKey => self.ext_public_key,
            Base58Type::ExtSecretKey => self.ext_secret_key,
            Base58Type::ZcPaymentAddress => self.zc_payment_address,
            Base58Type::ZcViewingKey => self.zc_viewing_key,
            Base58Type::ZcSpendingKey => self.zc_spending_key,
        }
    }

    /// Returns the Bech32 human-readable part for `kind`.
    pub fn bech32_hrp(&self, kind: Bech32Type) -> &'static str {
        match kind {
            Bech32Type::SaplingPaymentAddress => self.sapling_payment_address,
            Bech32Type::SaplingFullViewingKey => self.sapling_full_viewing_key,
            Bech32Type::SaplingIncomingViewingKey => self.sapling_incoming_viewing_key,
            Bech32Type::SaplingExtendedSpendKey => self.sapling_extended_spend_key,
            Bech32Type::SaplingExtendedFvk => self.sapling_extended_fvk,
        }
    }

    /// Returns the Bech32m human-readable part for `kind`.
    pub fn bech32m_hrp(&self, kind: Bech32mType) -> &'static str {
        match kind {
            Bech32mType::TexAddress => self.tex_address,
        }
    }
}

/// Prefixes for the production network.
///
/// The transparent prefixes make Base58Check P2PKH addresses start with "t1",
/// and P2SH addresses start with "t3".
pub const MAINNET: AddressPrefixes = AddressPrefixes {
    pubkey_address: &[0x1C, 0xB8],
    script_address: &[0x1C, 0xBD],
    secret_key: &[0x80],
    ext_public_key: &[0x04, 0x88, 0xB2, 0x1E],
    ext_secret_key: &[0x04, 0x88, 0xAD, 0xE4],
    zc_payment_address: &[0x16, 0x9A],
    zc_viewing_key: &[0xA8, 0xAB, 0xD3],
    zc_spending_key: &[0xAB, 0x36],

    sapling_payment_address: "zs",
    sapling_full_viewing_key: "zviews",
    sapling_incoming_viewing_key: "zivks",
    sapling_extended_spend_key: "secret-extended-key-main",
    sapling_extended_fvk: "zxviews",

    tex_address: "tex",
};

/// Prefixes for the public test network.
pub const TESTNET: AddressPrefixes = AddressPrefixes {
    pubkey_address: &[0x1D, 0x25],
    script_address: &[0x1C, 0xBA],
    secret_key: &[0xEF],
    ext_public_key: &[0x04, 0x35, 0x87, 0xCF],
    ext_secret_key: &[0x04, 0x35, 0x83, 0x94],
    zc_payment_address: &[0x16, 0xB6],
    zc_viewing_key: &[0xA8, 0xAC, 0x0C],
    zc_spending_key: &[0xAC, 0x08],

    sapling_payment_address: "ztestsapling",
    sapling_full_viewing_key: "zviewtestsapling",
    sapling_incoming_viewing_key: "zivktestsapling",
    sapling_extended_spend_key: "secret-extended-key-test",
    sapling_extended_fvk: "zxviewtestsapling",

    tex_address: "textest",
};

/// Prefixes for local regression test networks.
///
/// The Base58 prefixes are shared with the test network; only the
/// human-readable parts differ.
pub const REGTEST: AddressPrefixes = AddressPrefixes {
    sapling_payment_address: "zregtestsapling",
    sapling_full_viewing_key: "zviewregtestsapling",
    sapling_incoming_viewing_key: "zivkregtestsapling",
    sapling_extended_spend_key: "secret-extended-key-regtest",
    sapling_extended_fvk: "zxviewregtestsapling",

    tex_address: "texregtest",

    ..TESTNET
};
