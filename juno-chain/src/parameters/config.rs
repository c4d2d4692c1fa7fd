//! Network selection options.
//!
//! The caller deserializes these from its own configuration source. This
//! crate never reads files.

use crate::block::Height;

use super::{NetworkKind, NetworkUpgrade};

/// Which network to run, and how to adjust regtest.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    /// The network to select: `main`, `test` or `regtest`.
    pub network: NetworkKind,

    /// Options that only apply to regtest.
    ///
    /// They are ignored, with a warning, on other networks.
    pub regtest: RegtestConfig,
}

/// Regtest-only options.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RegtestConfig {
    /// Enforce the rule that coinbase outputs must be shielded.
    ///
    /// Equivalent to `-regtestshieldcoinbase`.
    pub shield_coinbase: bool,

    /// Enable the ZIP-209 Sprout value pool guard, for debugging turnstile
    /// violations.
    ///
    /// Equivalent to `-developersetpoolsizezero`.
    pub developer_set_pool_size_zero: bool,

    /// Activation height overrides.
    pub activation_heights: ConfiguredActivationHeights,
}

/// Configurable activation heights for regtest.
///
/// Unset upgrades keep their default activation height.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct ConfiguredActivationHeights {
    /// Activation height for the `TestDummy` network upgrade.
    pub test_dummy: Option<Height>,
    /// Activation height for the `Overwinter` network upgrade.
    pub overwinter: Option<Height>,
    /// Activation height for the `Sapling` network upgrade.
    pub sapling: Option<Height>,
    /// Activation height for the `Blossom` network upgrade.
    pub blossom: Option<Height>,
    /// Activation height for the `Heartwood` network upgrade.
    pub heartwood: Option<Height>,
    /// Activation height for the `Canopy` network upgrade.
    pub canopy: Option<Height>,
    /// Activation height for the `NU5` network upgrade.
    #[serde(rename = "NU5")]
    pub nu5: Option<Height>,
    /// Activation height for the `NU6` network upgrade.
    #[serde(rename = "NU6")]
    pub nu6: Option<Height>,
    /// Activation height for the `NU6.1` network upgrade.
    #[serde(rename = "NU6.1")]
    pub nu6_1: Option<Height>,
    /// Activation height for the `ZFuture` network upgrade.
    #[serde(rename = "ZFuture")]
    pub z_future: Option<Height>,
}

impl ConfiguredActivationHeights {
    /// Returns the configured activation heights, in upgrade order.
    pub fn iter(&self) -> impl Iterator<Item = (NetworkUpgrade, Height)> {
        use NetworkUpgrade::*;

        let ConfiguredActivationHeights {
            test_dummy,
            overwinter,
            sapling,
            blossom,
            heartwood,
            canopy,
            nu5,
            nu6,
            nu6_1,
            z_future,
        } = *self;

        [
            (TestDummy, test_dummy),
            (Overwinter, overwinter),
            (Sapling, sapling),
            (Blossom, blossom),
            (Heartwood, heartwood),
            (Canopy, canopy),
            (Nu5, nu5),
            (Nu6, nu6),
            (Nu6_1, nu6_1),
            (ZFuture, z_future),
        ]
        .into_iter()
        .filter_map(|(upgrade, height)| Some((upgrade, height?)))
    }

    /// Returns `true` if no activation heights are configured.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}
