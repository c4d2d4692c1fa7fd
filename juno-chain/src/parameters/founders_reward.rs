//! Legacy founders' reward address rotation.
//!
//! Addresses rotate at a fixed cadence over the founders' reward period. After
//! Blossom, blocks come twice as fast, so heights are rescaled to keep the
//! rotation in step with wall-clock time.
//!
//! <https://zips.z.cash/zip-0208>

use crate::{
    block::{Height, HeightDiff},
    transparent::{self, Script},
};

use super::{
    constants::BLOSSOM_POW_TARGET_SPACING_RATIO, NetworkParams, NetworkUpgrade, ParamsError,
};

/// Maps block heights to a network's founders' reward addresses.
///
/// Created by [`NetworkParams::founders_reward`].
#[derive(Copy, Clone, Debug)]
pub struct FoundersReward<'a> {
    network: &'a NetworkParams,
}

impl NetworkParams {
    /// Returns the founders' reward address rotation of this network.
    pub fn founders_reward(&self) -> FoundersReward<'_> {
        FoundersReward { network: self }
    }
}

impl<'a> FoundersReward<'a> {
    /// Returns the configured addresses, in rotation order.
    pub fn addresses(&self) -> &'a [String] {
        self.network.founders_reward_addresses()
    }

    /// Returns the last height paying the founders' reward, using the rules
    /// in force at `height`.
    pub fn last_height(&self, height: Height) -> Height {
        self.network
            .consensus()
            .last_founders_reward_block_height(height)
    }

    /// Returns `FounderAddressAdjustedHeight(height)`.
    ///
    /// Heights after Blossom count half, so the adjusted height tracks the
    /// pre-Blossom block rate.
    pub fn adjusted_height(&self, height: Height) -> HeightDiff {
        let consensus = self.network.consensus();

        match consensus.activation_height(NetworkUpgrade::Blossom) {
            Some(blossom_height) if consensus.is_active(height, NetworkUpgrade::Blossom) => {
                blossom_height.as_i64()
                    + (height - blossom_height)
                        / HeightDiff::from(BLOSSOM_POW_TARGET_SPACING_RATIO)
            }
            _ => height.as_i64(),
        }
    }

    /// Returns the index of the address paid at `height`.
    ///
    /// # Panics
    ///
    /// If `height` is zero, after the last founders' reward block, or the
    /// network has no founders' reward addresses.
    pub fn index_at_height(&self, height: Height) -> usize {
        let last_height = self.last_height(height);

        assert!(
            height > Height(0) && height <= last_height,
            "founders' reward height {height:?} is outside 1..={last_height:?}"
        );

        let addresses = self.addresses();
        assert!(
            !addresses.is_empty(),
            "{} has no founders' reward addresses",
            self.network.kind()
        );

        // The rotation is always spread over the pre-Blossom reward period.
        let consensus = self.network.consensus();
        let pre_blossom_max_height = consensus.pre_blossom_subsidy_halving_interval()
            + consensus.subsidy_slow_start_shift()
            - 1;

        let address_count = addresses.len() as HeightDiff;
        let address_change_interval = (pre_blossom_max_height + address_count) / address_count;

        let index = usize::try_from(self.adjusted_height(height) / address_change_interval)
            .expect("adjusted heights are positive");

        index.min(addresses.len() - 1)
    }

    /// Returns the founders' reward address for the block at `height`.
    ///
    /// # Panics
    ///
    /// For the same heights as [`FoundersReward::index_at_height`].
    pub fn address_at_height(&self, height: Height) -> &'a str {
        &self.addresses()[self.index_at_height(height)]
    }

    /// Returns the lock script paying the founders' reward at `height`.
    ///
    /// Founders' reward addresses must be P2SH multisig addresses. Any other
    /// address means the hard-coded list is corrupt.
    ///
    /// # Panics
    ///
    /// For the same heights as [`FoundersReward::index_at_height`].
    pub fn script_at_height(&self, height: Height) -> Result<Script, ParamsError> {
        self.script_for(self.address_at_height(height))
    }

    /// Returns the founders' reward address at `index` in the list.
    ///
    /// # Panics
    ///
    /// If `index` is out of range.
    pub fn address_at_index(&self, index: usize) -> &'a str {
        let addresses = self.addresses();

        assert!(
            index < addresses.len(),
            "founders' reward address index {index} is out of range for {} addresses",
            addresses.len()
        );

        &addresses[index]
    }

    /// Decodes `address` into a P2SH lock script, using the network's
    /// prefixes.
    pub(crate) fn script_for(&self, address: &str) -> Result<Script, ParamsError> {
        let invalid = || ParamsError::InvalidFoundersRewardAddress {
            network: self.network.kind().id(),
            address: address.to_string(),
        };

        let decoded = transparent::Address::decode(address, self.network.address_prefixes())
            .map_err(|_| invalid())?;

        if !decoded.is_script_hash() {
            return Err(invalid());
        }

        Ok(decoded.script())
    }
}
