//! Fixed-point, non-negative token amounts.
//!
//! An `Amount` is a count of base units; `COIN` is the process-wide scale
//! factor that turns base units into whole coins. All arithmetic is
//! deterministic and saturating-free — overflow or going negative is a
//! fatal invariant violation, never clamped.

use std::fmt;
use std::iter::Sum;
use thiserror::Error;

use crate::codec::{Decode, Encode, Reader};

/// Decimal scale factor: one coin is `COIN` base units.
pub const COIN: u64 = 1_000_000_000_000_000_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("amount arithmetic overflowed")]
    Overflow,
    #[error("amount underflowed below zero")]
    Underflow,
    #[error("amount divided by zero")]
    DivideByZero,
}

/// A non-negative quantity of base units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub fn from_base_units(v: u64) -> Self {
        Amount(v)
    }

    pub fn from_coins(coins: u64) -> Self {
        Amount(coins.saturating_mul(COIN))
    }

    pub fn base_units(self) -> u64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn add(self, rhs: Amount) -> Result<Amount, AmountError> {
        self.0.checked_add(rhs.0).map(Amount).ok_or(AmountError::Overflow)
    }

    pub fn sub(self, rhs: Amount) -> Result<Amount, AmountError> {
        self.0.checked_sub(rhs.0).map(Amount).ok_or(AmountError::Underflow)
    }

    /// Multiplies by a plain integer coefficient (`MulC` in the reference
    /// implementation): `amount * c`.
    pub fn mul_c(self, c: u64) -> Result<Amount, AmountError> {
        (self.0 as u128)
            .checked_mul(c as u128)
            .and_then(|v| u64::try_from(v).ok())
            .map(Amount)
            .ok_or(AmountError::Overflow)
    }

    /// Truncating integer division by a plain coefficient (`DivC`):
    /// `amount / c`.
    pub fn div_c(self, c: u64) -> Result<Amount, AmountError> {
        if c == 0 {
            return Err(AmountError::DivideByZero);
        }
        Ok(Amount(self.0 / c))
    }

    /// Forms `(self * numerator) / denominator` in one widened step —
    /// `amount * gen_count * tier_efficiency / 1000` and similar
    /// two-coefficient scalings must use this rather than chaining
    /// `mul_c`/`div_c`, since each of those narrows back to `u64` between
    /// steps and can overflow at an intermediate that the final division
    /// would have brought back into range.
    pub fn scale(self, numerator: u64, denominator: u64) -> Result<Amount, AmountError> {
        if denominator == 0 {
            return Err(AmountError::DivideByZero);
        }
        let scaled = (self.0 as u128)
            .checked_mul(numerator as u128)
            .ok_or(AmountError::Overflow)?;
        let quotient = scaled / (denominator as u128);
        u64::try_from(quotient).map(Amount).map_err(|_| AmountError::Overflow)
    }

    /// Forms `(self * rhs) / COIN` at full precision, widened through
    /// `u128` so neither the product nor the intermediate can overflow a
    /// `u64` before the final division narrows it back down.
    pub fn mul(self, rhs: Amount) -> Result<Amount, AmountError> {
        let product = (self.0 as u128)
            .checked_mul(rhs.0 as u128)
            .ok_or(AmountError::Overflow)?;
        let scaled = product / (COIN as u128);
        u64::try_from(scaled).map(Amount).map_err(|_| AmountError::Overflow)
    }

    /// Forms `(self * COIN) / rhs` — the canonical way to build a
    /// reward-sharing ratio at `COIN` precision.
    pub fn div(self, rhs: Amount) -> Result<Amount, AmountError> {
        if rhs.0 == 0 {
            return Err(AmountError::DivideByZero);
        }
        let scaled = (self.0 as u128)
            .checked_mul(COIN as u128)
            .ok_or(AmountError::Overflow)?;
        let quotient = scaled / (rhs.0 as u128);
        u64::try_from(quotient).map(Amount).map_err(|_| AmountError::Overflow)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, |acc, v| acc.add(v).expect("reward sum overflow"))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:018}", self.0 / COIN, self.0 % COIN)
    }
}

impl Encode for Amount {
    fn encode(&self, out: &mut Vec<u8>) {
        self.0.encode(out);
    }
}

impl Decode for Amount {
    fn decode(r: &mut Reader<'_>) -> Result<Self, crate::codec::CodecError> {
        Ok(Amount(u64::decode(r)?))
    }
}
