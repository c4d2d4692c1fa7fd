//! Block subsidy, funding streams, and one-time lockbox disbursements.
//!
//! The halving arithmetic matches zcashd exactly, including its integer
//! rounding, because the subsidy decides which coinbase transactions are valid.

use std::fmt;

use crate::{
    amount::{Amount, NonNegative},
    block::{Height, HeightDiff},
};

use super::{
    constants::{
        BLOSSOM_POW_TARGET_SPACING_RATIO, FUNDING_STREAM_RECEIVER_DENOMINATOR, MAX_BLOCK_SUBSIDY,
    },
    ConsensusParams, NetworkUpgrade, ParamsError,
};

#[cfg(any(test, feature = "proptest-impl"))]
use proptest_derive::Arbitrary;

/// Halvings beyond this index shift the whole subsidy away.
const MAX_HALVINGS: i64 = 64;

/// The funding streams known to the consensus rules, in index order.
///
/// No public network defines any of them, but regtest can enable them for
/// tests.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(any(test, feature = "proptest-impl"), derive(Arbitrary))]
pub enum FundingStreamIndex {
    /// The ZIP-214 bootstrap project stream.
    Zip214Bp,
    /// The ZIP-214 foundation stream.
    Zip214Zf,
    /// The ZIP-214 major grants stream.
    Zip214Mg,
    /// The ZIP-1015 community grants stream.
    FpfZcg,
    /// The ZIP-1015 deferred lockbox stream.
    Deferred,
    /// The community grants stream until the third halving.
    FpfZcgH3,
    /// The coinholder-controlled fund stream until the third halving.
    CcfH3,
}

impl FundingStreamIndex {
    /// Returns an iterator over all funding stream indexes, in order.
    pub fn iter() -> impl Iterator<Item = FundingStreamIndex> {
        use FundingStreamIndex::*;

        [Zip214Bp, Zip214Zf, Zip214Mg, FpfZcg, Deferred, FpfZcgH3, CcfH3].into_iter()
    }

    /// Returns the percentage of the block subsidy paid to this stream.
    pub fn numerator(&self) -> u64 {
        use FundingStreamIndex::*;

        match self {
            Zip214Bp => 7,
            Zip214Zf => 5,
            Zip214Mg => 8,
            FpfZcg => 8,
            Deferred => 12,
            FpfZcgH3 => 8,
            CcfH3 => 12,
        }
    }

    /// Returns a human-readable description of the stream's recipient.
    pub fn recipient_name(&self) -> &'static str {
        use FundingStreamIndex::*;

        match self {
            Zip214Bp => "Electric Coin Company",
            Zip214Zf => "Zcash Foundation",
            Zip214Mg => "Major Grants",
            FpfZcg => "Zcash Community Grants NU6",
            Deferred => "Lockbox NU6",
            FpfZcgH3 => "Zcash Community Grants to third halving",
            CcfH3 => "Coinholder-Controlled Fund to third halving",
        }
    }

    /// Returns `fs.Value(block_subsidy)`, the amount paid to this stream.
    pub fn value(
        &self,
        block_subsidy: Amount<NonNegative>,
    ) -> Result<Amount<NonNegative>, crate::amount::Error> {
        // Amount division truncates, like zcashd's integer division.
        (block_subsidy * self.numerator())? / FUNDING_STREAM_RECEIVER_DENOMINATOR
    }
}

impl fmt::Display for FundingStreamIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.recipient_name())
    }
}

/// Where a funding stream pays to, for one funding period.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum FundingStreamRecipient {
    /// An encoded address, decoded by the caller with the network's prefixes.
    Address(String),
    /// The deferred development fund lockbox, which has no output.
    DeferredPool,
}

/// A funding stream: a height range and one recipient per funding period.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct FundingStream {
    start_height: Height,
    end_height: Height,
    recipients: Vec<FundingStreamRecipient>,
}

impl FundingStream {
    /// Creates a funding stream paying from `start_height` up to, but not
    /// including, `end_height`.
    ///
    /// Use [`FundingStream::validate`] to check the stream against a
    /// network's parameters.
    pub fn new(
        start_height: Height,
        end_height: Height,
        recipients: Vec<FundingStreamRecipient>,
    ) -> Self {
        Self {
            start_height,
            end_height,
            recipients,
        }
    }

    /// Returns the first height of this stream.
    pub fn start_height(&self) -> Height {
        self.start_height
    }

    /// Returns the first height after this stream.
    pub fn end_height(&self) -> Height {
        self.end_height
    }

    /// Returns the recipients, one per funding period.
    pub fn recipients(&self) -> &[FundingStreamRecipient] {
        &self.recipients
    }

    /// Returns `true` if this stream pays out at `height`.
    pub fn is_active_at(&self, height: Height) -> bool {
        self.start_height <= height && height < self.end_height
    }

    /// Checks that the stream starts after Canopy, that its range is not
    /// reversed, and that it has a recipient for every funding period.
    pub fn validate(&self, params: &ConsensusParams) -> Result<(), ParamsError> {
        if !params.is_active(self.start_height, NetworkUpgrade::Canopy) {
            return Err(ParamsError::FundingStreamCanopyNotActive(self.start_height));
        }

        if self.end_height < self.start_height {
            return Err(ParamsError::FundingStreamIllegalRange {
                start_height: self.start_height,
                end_height: self.end_height,
            });
        }

        // An empty range needs no recipients.
        let Some(last_height) = self.end_height.previous().filter(|&h| h >= self.start_height)
        else {
            return Ok(());
        };

        let expected = params.funding_period_index(self.start_height, last_height) + 1;
        if expected > self.recipients.len() {
            return Err(ParamsError::FundingStreamInsufficientRecipients {
                expected,
                actual: self.recipients.len(),
            });
        }

        Ok(())
    }

    /// Returns the recipient for the funding period containing `height`.
    ///
    /// # Panics
    ///
    /// If `height` is before the stream starts, or the stream has no recipient
    /// for that period. [`FundingStream::validate`] rules the second case out
    /// for heights inside the stream.
    pub fn recipient(&self, params: &ConsensusParams, height: Height) -> &FundingStreamRecipient {
        let index = params.funding_period_index(self.start_height, height);

        self.recipients.get(index).unwrap_or_else(|| {
            panic!(
                "funding stream has {} recipients, but period {index} was requested",
                self.recipients.len()
            )
        })
    }
}

/// The index of a one-time lockbox disbursement.
///
/// A disbursement can be split over several outputs, so there are a few
/// indexes available.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LockboxDisbursementIndex(u8);

impl LockboxDisbursementIndex {
    /// The number of lockbox disbursement indexes.
    pub const COUNT: u8 = 12;

    /// Returns the index `index`, or `None` if it is out of range.
    pub fn new(index: u8) -> Option<Self> {
        (index < Self::COUNT).then_some(Self(index))
    }

    /// Returns the index as a number.
    pub fn get(&self) -> u8 {
        self.0
    }
}

/// A one-time payment from the lockbox at a single height.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct LockboxDisbursement {
    /// The height of the block that must contain the disbursement.
    pub height: Height,
    /// The encoded address receiving the disbursement.
    pub recipient: String,
    /// The amount paid out of the lockbox.
    pub amount: Amount<NonNegative>,
}

impl LockboxDisbursement {
    /// Checks that NU6.1 is active at the disbursement height.
    pub fn validate(&self, params: &ConsensusParams) -> Result<(), ParamsError> {
        if params.is_active(self.height, NetworkUpgrade::Nu6_1) {
            Ok(())
        } else {
            Err(ParamsError::LockboxDisbursementTooEarly(self.height))
        }
    }
}

/// Subsidy and halving arithmetic.
impl ConsensusParams {
    /// Returns `SlowStartShift`, half the slow start interval.
    pub fn subsidy_slow_start_shift(&self) -> HeightDiff {
        self.subsidy_slow_start_interval / 2
    }

    /// Returns the Blossom activation height as a signed value, if Blossom is
    /// active at `height`.
    fn blossom_height_if_active(&self, height: Height) -> Option<HeightDiff> {
        if self.is_active(height, NetworkUpgrade::Blossom) {
            self.activation_height(NetworkUpgrade::Blossom)
                .map(Height::as_i64)
        } else {
            None
        }
    }

    /// Returns `Halving(height)`, the number of halvings before `height`.
    ///
    /// Heights in the slow start ramp have no halvings.
    pub fn halving(&self, height: Height) -> u32 {
        let slow_start_shift = self.subsidy_slow_start_shift();

        let halvings = if let Some(blossom_height) = self.blossom_height_if_active(height) {
            // Scaling by the post-Blossom interval keeps the pre-Blossom part
            // of the count as an exact rational number.
            let scaled_halvings = (blossom_height - slow_start_shift)
                * HeightDiff::from(BLOSSOM_POW_TARGET_SPACING_RATIO)
                + (height.as_i64() - blossom_height);

            scaled_halvings / self.post_blossom_subsidy_halving_interval
        } else {
            (height.as_i64() - slow_start_shift) / self.pre_blossom_subsidy_halving_interval
        };

        u32::try_from(halvings.max(0)).unwrap_or(u32::MAX)
    }

    /// Returns the first height of halving `halving_index`, using the
    /// Blossom rules in force at `height`.
    ///
    /// # Panics
    ///
    /// If `halving_index` is zero.
    pub fn halving_height(&self, height: Height, halving_index: u32) -> Height {
        assert!(halving_index > 0, "halving indexes start at 1");

        let halving_index = HeightDiff::from(halving_index);
        let slow_start_shift = self.subsidy_slow_start_shift();

        let halving_height = if let Some(blossom_height) = self.blossom_height_if_active(height) {
            self.post_blossom_subsidy_halving_interval * halving_index
                - HeightDiff::from(BLOSSOM_POW_TARGET_SPACING_RATIO)
                    * (blossom_height - slow_start_shift)
                + blossom_height
        } else {
            self.pre_blossom_subsidy_halving_interval * halving_index + slow_start_shift
        };

        Height::try_from(halving_height.max(0)).unwrap_or(Height::MAX)
    }

    /// Returns the last height that can pay the legacy founders' reward.
    pub fn last_founders_reward_block_height(&self, height: Height) -> Height {
        (self.halving_height(height, 1) - 1).unwrap_or(Height::MIN)
    }

    /// Returns the index of the funding period containing `height`, for a
    /// funding stream starting at `start_height`.
    ///
    /// Funding periods are aligned to the first halving, so the first period
    /// of a stream can be shorter than the others.
    ///
    /// # Panics
    ///
    /// If `height` is below `start_height`.
    pub fn funding_period_index(&self, start_height: Height, height: Height) -> usize {
        assert!(
            start_height <= height,
            "funding period heights must not be before the stream starts"
        );

        let first_halving_height = self.halving_height(start_height, 1);
        let start_period_offset =
            (start_height - first_halving_height).rem_euclid(self.funding_period_length);

        let index = (height - start_height + start_period_offset) / self.funding_period_length;

        usize::try_from(index).expect("both terms are non-negative")
    }

    /// Returns `BlockSubsidy(height)`, the total coinbase subsidy at `height`.
    ///
    /// The subsidy ramps up linearly during the slow start interval, then
    /// halves every halving interval.
    pub fn block_subsidy(&self, height: Height) -> Amount<NonNegative> {
        let max_subsidy = MAX_BLOCK_SUBSIDY;
        let slow_start_interval = self.subsidy_slow_start_interval;
        let h = height.as_i64();

        let subsidy = if h < self.subsidy_slow_start_shift() {
            max_subsidy / slow_start_interval as u64 * h as u64
        } else if h < slow_start_interval {
            max_subsidy / slow_start_interval as u64 * (h as u64 + 1)
        } else {
            let halvings = self.halving(height);

            if i64::from(halvings) >= MAX_HALVINGS {
                0
            } else if self.is_active(height, NetworkUpgrade::Blossom) {
                (max_subsidy / u64::from(BLOSSOM_POW_TARGET_SPACING_RATIO)) >> halvings
            } else {
                max_subsidy >> halvings
            }
        };

        Amount::try_from(subsidy).expect("the subsidy is never above the maximum block subsidy")
    }

    /// Returns the funding streams that pay out at `height`, in index order.
    ///
    /// Funding streams only pay out once Canopy is active.
    pub fn active_funding_streams(
        &self,
        height: Height,
    ) -> impl Iterator<Item = (FundingStreamIndex, &FundingStream)> {
        let canopy_active = self.is_active(height, NetworkUpgrade::Canopy);

        self.funding_streams
            .iter()
            .filter(move |(_, stream)| canopy_active && stream.is_active_at(height))
            .map(|(&index, stream)| (index, stream))
    }

    /// Returns the recipient and value of each funding stream output required
    /// at `height`, for a block with `block_subsidy`.
    pub fn funding_stream_elements(
        &self,
        height: Height,
        block_subsidy: Amount<NonNegative>,
    ) -> Result<Vec<(FundingStreamRecipient, Amount<NonNegative>)>, crate::amount::Error> {
        self.active_funding_streams(height)
            .map(|(index, stream)| {
                index
                    .value(block_subsidy)
                    .map(|value| (stream.recipient(self, height).clone(), value))
            })
            .collect()
    }

    /// Returns the one-time lockbox disbursements due at `height`, in index
    /// order.
    pub fn lockbox_disbursements_at(
        &self,
        height: Height,
    ) -> impl Iterator<Item = (LockboxDisbursementIndex, &LockboxDisbursement)> {
        self.lockbox_disbursements
            .iter()
            .filter(move |(_, disbursement)| disbursement.height == height)
            .map(|(&index, disbursement)| (index, disbursement))
    }
}
