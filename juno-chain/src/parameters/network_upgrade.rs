//! Network upgrade consensus parameters for Juno Cash.

use NetworkUpgrade::*;

use std::fmt;

use hex::{FromHex, ToHex};

use crate::block::Height;

use super::ParamsError;

#[cfg(any(test, feature = "proptest-impl"))]
use proptest_derive::Arbitrary;

/// A Juno Cash network upgrade.
///
/// Network upgrades can change the network protocol or consensus rules in
/// incompatible ways. The variants are in the fixed upgrade order, which is
/// also the order of their activation heights.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(any(test, feature = "proptest-impl"), derive(Arbitrary))]
pub enum NetworkUpgrade {
    /// The base epoch, active from genesis on every network.
    Sprout,
    /// An upgrade reserved for tests, never active on the public networks.
    TestDummy,
    /// The Overwinter upgrade.
    Overwinter,
    /// The Sapling upgrade.
    Sapling,
    /// The Blossom upgrade, which halves the target block spacing.
    Blossom,
    /// The Heartwood upgrade.
    Heartwood,
    /// The Canopy upgrade.
    Canopy,
    /// Network Upgrade 5, which adds the Orchard shielded protocol.
    Nu5,
    /// Network Upgrade 6.
    Nu6,
    /// Network Upgrade 6.1.
    Nu6_1,
    /// Placeholder for the next upgrade, never active on the public networks.
    ZFuture,
}

/// The number of network upgrades, including the base epoch.
pub const NETWORK_UPGRADE_COUNT: usize = 11;

/// All network upgrades, in their fixed order.
pub const NETWORK_UPGRADES_IN_ORDER: [NetworkUpgrade; NETWORK_UPGRADE_COUNT] = [
    Sprout, TestDummy, Overwinter, Sapling, Blossom, Heartwood, Canopy, Nu5, Nu6, Nu6_1, ZFuture,
];

impl fmt::Display for NetworkUpgrade {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The Consensus Branch Id, used to bind transactions and blocks to a
/// particular network upgrade.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct ConsensusBranchId(u32);

impl ConsensusBranchId {
    /// Return the hash bytes in big-endian byte-order suitable for printing out byte by byte.
    ///
    /// Consensus branch IDs are displayed in big-endian byte-order,
    /// following the convention set by zcashd.
    fn bytes_in_display_order(&self) -> [u8; 4] {
        self.0.to_be_bytes()
    }
}

impl From<ConsensusBranchId> for u32 {
    fn from(branch: ConsensusBranchId) -> u32 {
        branch.0
    }
}

impl ToHex for &ConsensusBranchId {
    fn encode_hex<T: FromIterator<char>>(&self) -> T {
        self.bytes_in_display_order().encode_hex()
    }

    fn encode_hex_upper<T: FromIterator<char>>(&self) -> T {
        self.bytes_in_display_order().encode_hex_upper()
    }
}

impl ToHex for ConsensusBranchId {
    fn encode_hex<T: FromIterator<char>>(&self) -> T {
        self.bytes_in_display_order().encode_hex()
    }

    fn encode_hex_upper<T: FromIterator<char>>(&self) -> T {
        self.bytes_in_display_order().encode_hex_upper()
    }
}

impl FromHex for ConsensusBranchId {
    type Error = <[u8; 4] as FromHex>::Error;

    fn from_hex<T: AsRef<[u8]>>(hex: T) -> Result<Self, Self::Error> {
        let branch = <[u8; 4]>::from_hex(hex)?;
        Ok(ConsensusBranchId(u32::from_be_bytes(branch)))
    }
}

impl fmt::Display for ConsensusBranchId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.encode_hex::<String>())
    }
}

/// Network Upgrade Consensus Branch Ids.
///
/// Branch ids are the same on every network.
///
/// This is actually a bijective map, but it is const, so we use a vector, and
/// do the uniqueness check in the unit tests.
pub(crate) const CONSENSUS_BRANCH_IDS: &[(NetworkUpgrade, ConsensusBranchId)] = &[
    (Sprout, ConsensusBranchId(0)),
    (TestDummy, ConsensusBranchId(0x74736554)),
    (Overwinter, ConsensusBranchId(0x5ba81b19)),
    (Sapling, ConsensusBranchId(0x76b809bb)),
    (Blossom, ConsensusBranchId(0x2bb40e60)),
    (Heartwood, ConsensusBranchId(0xf5b9230b)),
    (Canopy, ConsensusBranchId(0xe9ff75a6)),
    (Nu5, ConsensusBranchId(0xc2d6d0b4)),
    (Nu6, ConsensusBranchId(0xc8e71055)),
    (Nu6_1, ConsensusBranchId(0x4dec4df0)),
    (ZFuture, ConsensusBranchId(0xffffffff)),
];

impl NetworkUpgrade {
    /// Returns an iterator over all network upgrades, in order.
    pub fn iter() -> impl DoubleEndedIterator<Item = NetworkUpgrade> {
        NETWORK_UPGRADES_IN_ORDER.into_iter()
    }

    /// Returns the position of this upgrade in the fixed upgrade order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the human-readable name of this upgrade.
    pub fn name(&self) -> &'static str {
        match self {
            Sprout => "Sprout",
            TestDummy => "Test dummy",
            Overwinter => "Overwinter",
            Sapling => "Sapling",
            Blossom => "Blossom",
            Heartwood => "Heartwood",
            Canopy => "Canopy",
            Nu5 => "NU5",
            Nu6 => "NU6",
            Nu6_1 => "NU6.1",
            ZFuture => "ZFuture",
        }
    }

    /// Returns the consensus branch id of this upgrade.
    pub fn branch_id(&self) -> ConsensusBranchId {
        CONSENSUS_BRANCH_IDS[self.index()].1
    }

    /// Returns the NetworkUpgrade given an u32 as ConsensusBranchId
    pub fn from_branch_id(branch_id: u32) -> Option<NetworkUpgrade> {
        CONSENSUS_BRANCH_IDS
            .iter()
            .find(|id| id.1 == ConsensusBranchId(branch_id))
            .map(|nu| nu.0)
    }

    /// Returns the upgrade after this one in the fixed order.
    pub fn next_upgrade(self) -> Option<NetworkUpgrade> {
        NETWORK_UPGRADES_IN_ORDER.get(self.index() + 1).copied()
    }

    /// Returns the upgrade before this one in the fixed order.
    pub fn previous_upgrade(self) -> Option<NetworkUpgrade> {
        self.index()
            .checked_sub(1)
            .map(|index| NETWORK_UPGRADES_IN_ORDER[index])
    }
}

/// When a network upgrade activates.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ActivationHeight {
    /// Active at every height, including genesis.
    AlwaysActive,
    /// Active from this height onwards.
    At(Height),
    /// Never active.
    Never,
}

impl ActivationHeight {
    /// Returns the first height the upgrade is active at, or `None` if it
    /// never activates.
    ///
    /// [`ActivationHeight::AlwaysActive`] counts as height zero.
    pub fn height(self) -> Option<Height> {
        match self {
            ActivationHeight::AlwaysActive => Some(Height(0)),
            ActivationHeight::At(height) => Some(height),
            ActivationHeight::Never => None,
        }
    }

    /// Returns `true` if the upgrade is active at `height`.
    pub fn is_active_at(self, height: Height) -> bool {
        self.height()
            .is_some_and(|activation_height| activation_height <= height)
    }
}

impl From<Height> for ActivationHeight {
    fn from(height: Height) -> Self {
        ActivationHeight::At(height)
    }
}

/// The consensus parameters of one network upgrade.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct UpgradeDescriptor {
    /// Which upgrade these parameters are for.
    pub upgrade: NetworkUpgrade,
    /// The minimum peer protocol version that supports this upgrade.
    pub protocol_version: u32,
    /// When the upgrade activates.
    pub activation_height: ActivationHeight,
}

/// The upgrade schedule of a network, indexed by [`NetworkUpgrade`].
///
/// Every query is a scan over the fixed, small set of upgrades.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct UpgradeSchedule {
    upgrades: [UpgradeDescriptor; NETWORK_UPGRADE_COUNT],
}

impl UpgradeSchedule {
    /// Builds a schedule from `(protocol_version, activation_height)` pairs in
    /// upgrade order, checking it with [`UpgradeSchedule::validate`].
    pub fn new(
        entries: [(u32, ActivationHeight); NETWORK_UPGRADE_COUNT],
    ) -> Result<Self, ParamsError> {
        let mut index = 0;
        let upgrades = entries.map(|(protocol_version, activation_height)| {
            let upgrade = NETWORK_UPGRADES_IN_ORDER[index];
            index += 1;

            UpgradeDescriptor {
                upgrade,
                protocol_version,
                activation_height,
            }
        });

        let schedule = Self { upgrades };
        schedule.validate()?;

        Ok(schedule)
    }

    /// Checks that Sprout is always active, and that the activation heights
    /// of upgrades that activate never decrease in upgrade order.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.descriptor(Sprout).activation_height != ActivationHeight::AlwaysActive {
            return Err(ParamsError::SproutNotAlwaysActive);
        }

        let mut activating = self
            .upgrades
            .iter()
            .filter(|descriptor| descriptor.activation_height.height().is_some());

        let Some(mut earlier) = activating.next() else {
            return Ok(());
        };

        for later in activating {
            if later.activation_height.height() < earlier.activation_height.height() {
                return Err(ParamsError::ActivationHeightsOutOfOrder {
                    earlier: earlier.upgrade,
                    earlier_height: earlier.activation_height,
                    later: later.upgrade,
                    later_height: later.activation_height,
                });
            }

            earlier = later;
        }

        Ok(())
    }

    /// Returns the parameters of `upgrade`.
    pub fn descriptor(&self, upgrade: NetworkUpgrade) -> &UpgradeDescriptor {
        &self.upgrades[upgrade.index()]
    }

    /// Returns the parameters of every upgrade, in upgrade order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &UpgradeDescriptor> {
        self.upgrades.iter()
    }

    /// Returns the first height `upgrade` is active at, or `None` if it never
    /// activates.
    pub fn activation_height(&self, upgrade: NetworkUpgrade) -> Option<Height> {
        self.descriptor(upgrade).activation_height.height()
    }

    /// Returns `true` if `upgrade` is active at `height`.
    pub fn is_active(&self, height: Height, upgrade: NetworkUpgrade) -> bool {
        self.descriptor(upgrade).activation_height.is_active_at(height)
    }

    /// Returns the most recent upgrade that is active at `height`.
    ///
    /// When several upgrades activate at the same height, the later upgrade
    /// wins.
    pub fn current_epoch(&self, height: Height) -> NetworkUpgrade {
        self.upgrades
            .iter()
            .rev()
            .find(|descriptor| descriptor.activation_height.is_active_at(height))
            .map_or(Sprout, |descriptor| descriptor.upgrade)
    }

    /// Returns the consensus branch id of the epoch at `height`.
    pub fn current_epoch_branch_id(&self, height: Height) -> ConsensusBranchId {
        self.current_epoch(height).branch_id()
    }

    /// Returns the upgrade with the lowest activation height above `height`,
    /// or `None` if no upgrade is pending.
    pub fn next_epoch(&self, height: Height) -> Option<NetworkUpgrade> {
        self.upgrades
            .iter()
            .skip(1)
            .filter_map(|descriptor| {
                let activation_height = descriptor.activation_height.height()?;
                (activation_height > height).then_some((activation_height, descriptor.upgrade))
            })
            .min_by_key(|&(activation_height, _)| activation_height)
            .map(|(_, upgrade)| upgrade)
    }

    /// Returns the lowest activation height above `height`, or `None` if no
    /// upgrade is pending.
    pub fn next_activation_height(&self, height: Height) -> Option<Height> {
        self.next_epoch(height)
            .and_then(|upgrade| self.activation_height(upgrade))
    }

    /// Returns `true` if `upgrade` activates exactly at `height`.
    pub fn is_activation_height(&self, height: Height, upgrade: NetworkUpgrade) -> bool {
        self.activation_height(upgrade) == Some(height)
    }

    /// Returns `true` if any upgrade other than Sprout activates exactly at
    /// `height`.
    pub fn is_activation_height_for_any_upgrade(&self, height: Height) -> bool {
        NetworkUpgrade::iter()
            .skip(1)
            .any(|upgrade| self.is_activation_height(height, upgrade))
    }

    /// Replaces the activation height of `upgrade`.
    ///
    /// Does not check the upgrade order, so callers can test out-of-order
    /// schedules.
    pub(crate) fn set_activation_height(
        &mut self,
        upgrade: NetworkUpgrade,
        activation_height: ActivationHeight,
    ) {
        self.upgrades[upgrade.index()].activation_height = activation_height;
    }
}
