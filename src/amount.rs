//! Exact decimal amount used for every monetary value in a request.
//!
//! Uses `rust_decimal` internally so round-up arithmetic never suffers from
//! binary floating-point drift. On the wire amounts are JSON numbers.
//!
//! Arithmetic saturates at `Decimal::MAX` / `Decimal::MIN` instead of
//! panicking, so any amount accepted at the boundary can flow through the
//! pipeline.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{ser, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};
use std::str::FromStr;

/// A signed monetary amount with exact decimal arithmetic.
///
/// Equality and hashing are numeric: `10` and `10.00` compare equal, which is
/// what duplicate detection relies on.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use roundup_engine::Amount;
///
/// let amount = Amount::from_str("175").unwrap();
/// assert_eq!(amount.round_up_to_hundred().to_string(), "200");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    /// Zero value.
    pub const ZERO: Self = Amount(Decimal::ZERO);

    /// Wraps a `Decimal`.
    pub fn new(value: Decimal) -> Self {
        Amount(value)
    }

    /// Returns `true` if this value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns `true` if this value is strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Smallest multiple of 100 greater than or equal to this amount.
    ///
    /// Amounts within 100 of `Decimal::MAX` round up to `Decimal::MAX`.
    pub fn round_up_to_hundred(self) -> Self {
        Amount(
            (self.0 / Decimal::ONE_HUNDRED)
                .ceil()
                .saturating_mul(Decimal::ONE_HUNDRED),
        )
    }

    /// Returns the underlying decimal.
    pub fn into_inner(self) -> Decimal {
        self.0
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Amount(Decimal::from(value))
    }
}

impl FromStr for Amount {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        let decimal = Decimal::from_str(trimmed)?;
        Ok(Amount(decimal))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Amount(self.0.saturating_sub(rhs.0))
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Whole amounts go out exactly as JSON integers; anything else as a
        // double.
        let value = self.0.normalize();
        if value.scale() == 0 {
            if let Some(integer) = value.to_i64() {
                return serializer.serialize_i64(integer);
            }
        }

        match value.to_f64() {
            Some(value) => serializer.serialize_f64(value),
            None => Err(ser::Error::custom(format!(
                "amount {} is not representable",
                self
            ))),
        }
    }
}

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a numeric string")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> std::result::Result<Amount, E> {
        Ok(Amount(Decimal::from(value)))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> std::result::Result<Amount, E> {
        Ok(Amount(Decimal::from(value)))
    }

    // f64 Display yields the shortest representation that round-trips, so
    // 0.1 becomes exactly 0.1 rather than its binary expansion.
    fn visit_f64<E: de::Error>(self, value: f64) -> std::result::Result<Amount, E> {
        if !value.is_finite() {
            return Err(E::custom(format!("amount {} is not finite", value)));
        }
        Amount::from_str(&value.to_string()).map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<Amount, E> {
        Amount::from_str(value).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(AmountVisitor)
    }
}
