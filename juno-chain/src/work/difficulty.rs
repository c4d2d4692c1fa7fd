//! Difficulty thresholds.
//!
//! Block headers store their target threshold as 32-bit "compact bits". A
//! block hash meets the threshold when, read as a little-endian 256-bit
//! integer, it is less than or equal to the expanded threshold.
//!
//! Each network's `PoWLimit`, its easiest allowed target, is an
//! [`ExpandedDifficulty`].

use std::{cmp::Ordering, fmt, io, str::FromStr};

use byteorder::{LittleEndian, WriteBytesExt};

use crate::{
    block,
    serialization::{SerializationError, ZcashSerialize},
};

pub use crate::work::u256::U256;


/// A compact difficulty threshold: a base-256 float with an 8-bit exponent
/// offset by 3, and a 24-bit signed mantissa.
///
/// The bit pattern is consensus-critical, because it is hashed as part of the
/// block header.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct CompactDifficulty(pub u32);

impl fmt::Debug for CompactDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("CompactDifficulty")
            .field(&format_args!("{:#010x}", self.0))
            .field(&self.to_expanded())
            .finish()
    }
}

impl CompactDifficulty {
    /// The exponent offset.
    const OFFSET: i32 = 3;

    /// The number of mantissa bits, including the sign bit.
    const PRECISION: u32 = 24;

    /// The mantissa sign bit.
    const SIGN_BIT: u32 = 1 << (Self::PRECISION - 1);

    /// The largest unsigned mantissa, which is also its mask.
    const MANTISSA_MASK: u32 = Self::SIGN_BIT - 1;

    /// Expands this threshold, like zcashd's `arith_uint256::SetCompact`.
    ///
    /// Returns `None` for negative, zero and overflowing thresholds, which
    /// zcashd rejects before comparing the hash.
    pub fn to_expanded(self) -> Option<ExpandedDifficulty> {
        if self.0 & Self::SIGN_BIT != 0 {
            return None;
        }

        let mantissa = self.0 & Self::MANTISSA_MASK;
        let exponent = (self.0 >> Self::PRECISION) as i32 - Self::OFFSET;

        // Overflows are only allowed if every overflowing bit is zero.
        // Underflowing bits are discarded.
        let (mantissa, exponent) = match exponent {
            e if e >= 32 => return None,
            31 if mantissa > 0xff => return None,
            31 => (mantissa << 16, 29),
            30 if mantissa > 0xffff => return None,
            30 => (mantissa << 8, 29),
            e if e < 0 => (mantissa >> (e.unsigned_abs() * 8), 0),
            e => (mantissa, e),
        };

        let expanded = U256::from(mantissa) << (8 * exponent as usize);

        (!expanded.is_zero()).then_some(ExpandedDifficulty(expanded))
    }
}

impl ZcashSerialize for CompactDifficulty {
    fn zcash_serialize<W: io::Write>(&self, mut writer: W) -> Result<(), io::Error> {
        writer.write_u32::<LittleEndian>(self.0)
    }
}

/// A 256-bit target threshold, or a network's proof-of-work limit.
///
/// Zero is never a valid threshold.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ExpandedDifficulty(U256);

impl ExpandedDifficulty {
    /// Returns the easiest possible target, `2^256 - 1`.
    pub fn max() -> ExpandedDifficulty {
        ExpandedDifficulty(U256::MAX)
    }

    /// Returns the number of whole copies of this target that fit in
    /// `2^256 - 1`.
    ///
    /// Difficulty adjustment sums one target per block in its averaging
    /// window, so a `PoWLimit` needs at least a window's worth of headroom.
    pub fn headroom(self) -> U256 {
        U256::MAX / self.0
    }

    /// Compresses this target, like zcashd's `arith_uint256::GetCompact`.
    ///
    /// Precision below the top 23 mantissa bits is lost.
    ///
    /// # Panics
    ///
    /// If the target is zero.
    pub fn to_compact(self) -> CompactDifficulty {
        assert!(!self.0.is_zero(), "zero targets have no compact encoding");

        // One extra byte keeps the top mantissa bit clear of the sign bit.
        let size = self.0.bits() / 8 + 1;

        let mantissa = if size <= 3 {
            self.0 << (8 * (3 - size))
        } else {
            self.0 >> (8 * (size - 3))
        };

        assert!(
            mantissa <= CompactDifficulty::MANTISSA_MASK.into(),
            "mantissa {mantissa:x?} must fit in the compact mantissa field",
        );

        let size = u32::try_from(size).expect("a 256-bit value is at most 33 bytes");

        CompactDifficulty(mantissa.low_u32() | (size << CompactDifficulty::PRECISION))
    }

    /// Reads `hash` as a little-endian 256-bit integer.
    fn from_hash(hash: &block::Hash) -> ExpandedDifficulty {
        ExpandedDifficulty(U256::from_little_endian(&hash.0))
    }
}

impl fmt::Debug for ExpandedDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("ExpandedDifficulty")
            .field(&self.to_string())
            .finish()
    }
}

impl fmt::Display for ExpandedDifficulty {
    /// Formats the target as 64 big-endian hex digits, like zcashd's
    /// `uint256::GetHex`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut bytes = [0; 32];
        self.0.to_big_endian(&mut bytes);

        f.write_str(&hex::encode(bytes))
    }
}

impl FromStr for ExpandedDifficulty {
    type Err = SerializationError;

    /// Parses up to 64 big-endian hex digits, with an optional `0x` prefix.
    ///
    /// Leading zero digits can be omitted, like zcashd's `uint256S`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);

        if digits.is_empty() || digits.len() > 64 {
            return Err(SerializationError::Parse(
                "256-bit hex value must have between 1 and 64 digits",
            ));
        }

        U256::from_str_radix(digits, 16)
            .map(ExpandedDifficulty)
            .map_err(|_| SerializationError::Parse("invalid 256-bit hex value"))
    }
}

impl From<U256> for ExpandedDifficulty {
    fn from(value: U256) -> Self {
        ExpandedDifficulty(value)
    }
}

impl From<ExpandedDifficulty> for U256 {
    fn from(value: ExpandedDifficulty) -> Self {
        value.0
    }
}

impl From<ExpandedDifficulty> for CompactDifficulty {
    fn from(value: ExpandedDifficulty) -> Self {
        value.to_compact()
    }
}

/// Hashes are compared with thresholds as little-endian integers. Larger
/// values represent less work.
impl PartialEq<block::Hash> for ExpandedDifficulty {
    fn eq(&self, other: &block::Hash) -> bool {
        *self == ExpandedDifficulty::from_hash(other)
    }
}

impl PartialOrd<block::Hash> for ExpandedDifficulty {
    fn partial_cmp(&self, other: &block::Hash) -> Option<Ordering> {
        Some(self.cmp(&ExpandedDifficulty::from_hash(other)))
    }
}

impl PartialEq<ExpandedDifficulty> for block::Hash {
    fn eq(&self, other: &ExpandedDifficulty) -> bool {
        other == self
    }
}

impl PartialOrd<ExpandedDifficulty> for block::Hash {
    fn partial_cmp(&self, other: &ExpandedDifficulty) -> Option<Ordering> {
        other.partial_cmp(self).map(Ordering::reverse)
    }
}
