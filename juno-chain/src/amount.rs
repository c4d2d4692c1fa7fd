//! Zatoshi amounts, range-checked on construction.
//!
//! An [`Amount`] carries a [`Constraint`] marker type that fixes its valid
//! range. Subsidy arithmetic on amounts is checked, and returns a [`Result`]
//! instead of wrapping or saturating.

use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    io,
    marker::PhantomData,
    ops::RangeInclusive,
};

use byteorder::{LittleEndian, WriteBytesExt};

use crate::serialization::ZcashSerialize;


/// The result of an amount operation.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Number of zatoshis in 1 coin.
pub const COIN: i64 = 100_000_000;

/// The maximum zatoshi amount.
pub const MAX_MONEY: i64 = 21_000_000 * COIN;

/// A number of zatoshis, restricted to the range allowed by `C`.
#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64", bound = "C: Constraint + Clone")]
pub struct Amount<C = NegativeAllowed>(i64, #[serde(skip)] PhantomData<C>);

impl<C> Amount<C> {
    /// Returns the number of zatoshis in this amount.
    pub fn zatoshis(&self) -> i64 {
        self.0
    }

    /// Returns a zero amount, which every constraint allows.
    pub fn zero() -> Self
    where
        C: Constraint,
    {
        Self(0, PhantomData)
    }

    /// Returns this amount under another constraint, if it is in range.
    pub fn constrain<C2: Constraint>(self) -> Result<Amount<C2>> {
        Amount::try_from(self.0)
    }

    fn checked(value: i128) -> Result<Self>
    where
        C: Constraint,
    {
        let value = i64::try_from(value).map_err(|source| Error::Convert { value, source })?;

        C::validate(value).map(|value| Self(value, PhantomData))
    }
}

impl Amount<NonNegative> {
    /// Returns a non-negative amount of `zatoshis`.
    ///
    /// # Panics
    ///
    /// If `zatoshis` is negative or above [`MAX_MONEY`].
    pub const fn new(zatoshis: i64) -> Self {
        assert!(zatoshis >= 0 && zatoshis <= MAX_MONEY);

        Self(zatoshis, PhantomData)
    }
}

impl<C> fmt::Display for Amount<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl<C> fmt::Debug for Amount<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple(&format!("Amount<{}>", std::any::type_name::<C>()))
            .field(&self.0)
            .finish()
    }
}

impl<C: Constraint> TryFrom<i64> for Amount<C> {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        Self::checked(value.into())
    }
}

impl<C: Constraint> TryFrom<u64> for Amount<C> {
    type Error = Error;

    fn try_from(value: u64) -> Result<Self> {
        Self::checked(value.into())
    }
}

impl<C> From<Amount<C>> for i64 {
    fn from(amount: Amount<C>) -> Self {
        amount.0
    }
}

impl<C: Constraint> std::ops::Add for Amount<C> {
    type Output = Result<Amount<C>>;

    fn add(self, rhs: Amount<C>) -> Self::Output {
        Self::checked(i128::from(self.0) + i128::from(rhs.0))
    }
}

impl<C: Constraint> std::ops::Sub for Amount<C> {
    type Output = Result<Amount<C>>;

    fn sub(self, rhs: Amount<C>) -> Self::Output {
        Self::checked(i128::from(self.0) - i128::from(rhs.0))
    }
}

impl<C: Constraint> std::ops::Mul<u64> for Amount<C> {
    type Output = Result<Amount<C>>;

    /// Multiplies in `i128`, which holds every `i64 * u64` product.
    fn mul(self, rhs: u64) -> Self::Output {
        let product = i128::from(self.0) * i128::from(rhs);

        Self::checked(product).map_err(|_| Error::MultiplicationOverflow {
            amount: self.0,
            multiplier: rhs,
            overflowing_result: product,
        })
    }
}

impl<C: Constraint> std::ops::Div<u64> for Amount<C> {
    type Output = Result<Amount<C>>;

    /// Truncates towards zero, like integer division in zcashd.
    fn div(self, rhs: u64) -> Self::Output {
        if rhs == 0 {
            return Err(Error::DivideByZero { amount: self.0 });
        }

        Self::checked(i128::from(self.0) / i128::from(rhs))
    }
}

impl<C> Hash for Amount<C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

/// Amounts compare by value, whatever their constraints.
impl<C1, C2> PartialEq<Amount<C2>> for Amount<C1> {
    fn eq(&self, other: &Amount<C2>) -> bool {
        self.0 == other.0
    }
}

impl<C> PartialEq<i64> for Amount<C> {
    fn eq(&self, other: &i64) -> bool {
        self.0 == *other
    }
}

impl<C> Eq for Amount<C> {}

impl<C1, C2> PartialOrd<Amount<C2>> for Amount<C1> {
    fn partial_cmp(&self, other: &Amount<C2>) -> Option<Ordering> {
        Some(self.0.cmp(&other.0))
    }
}

impl<C> Ord for Amount<C> {
    fn cmp(&self, other: &Amount<C>) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<C> ZcashSerialize for Amount<C> {
    fn zcash_serialize<W: io::Write>(&self, mut writer: W) -> std::result::Result<(), io::Error> {
        writer.write_i64::<LittleEndian>(self.0)
    }
}

/// Errors from constructing or computing [`Amount`]s.
#[allow(missing_docs)]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{value} zatoshis is outside the valid amount range {range:?}")]
    Constraint {
        value: i64,
        range: RangeInclusive<i64>,
    },

    #[error("{value} zatoshis does not fit in an i64 amount")]
    Convert {
        value: i128,
        source: std::num::TryFromIntError,
    },

    #[error("multiplying {amount} zatoshis by {multiplier} gives {overflowing_result}, which is out of range")]
    MultiplicationOverflow {
        amount: i64,
        multiplier: u64,
        overflowing_result: i128,
    },

    #[error("cannot divide {amount} zatoshis by zero")]
    DivideByZero { amount: i64 },
}

/// Ranges of valid zatoshi values.
pub trait Constraint {
    /// Returns the range of valid values.
    fn valid_range() -> RangeInclusive<i64>;

    /// Returns `value` if it is in range.
    fn validate(value: i64) -> Result<i64> {
        let range = Self::valid_range();

        if range.contains(&value) {
            Ok(value)
        } else {
            Err(Error::Constraint { value, range })
        }
    }
}

/// Allows amounts from `-MAX_MONEY` to `MAX_MONEY`, such as value pool
/// balance changes.
///
/// ```
/// # use juno_chain::amount::{Constraint, MAX_MONEY, NegativeAllowed};
/// assert_eq!(NegativeAllowed::valid_range(), -MAX_MONEY..=MAX_MONEY);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Default)]
pub struct NegativeAllowed;

impl Constraint for NegativeAllowed {
    fn valid_range() -> RangeInclusive<i64> {
        -MAX_MONEY..=MAX_MONEY
    }
}

/// Allows amounts from zero to `MAX_MONEY`, such as output values and
/// subsidies.
///
/// ```
/// # use juno_chain::amount::{Constraint, MAX_MONEY, NonNegative};
/// assert_eq!(NonNegative::valid_range(), 0..=MAX_MONEY);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Default)]
pub struct NonNegative;

impl Constraint for NonNegative {
    fn valid_range() -> RangeInclusive<i64> {
        0..=MAX_MONEY
    }
}
