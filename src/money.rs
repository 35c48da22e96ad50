//! Money
//!
//! The upstream API serialises monetary fields either as JSON numbers or as
//! numeric strings (`10`, `"12.50"`). Everything entering the crate is
//! normalised into a [`Price`] so arithmetic only ever sees a [`Decimal`].

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    iter::Sum,
    ops::{Add, Deref},
    str::FromStr,
};

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A normalised, non-`NaN` monetary amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(Decimal);

impl Price {
    /// Zero.
    pub const ZERO: Self = Price(Decimal::ZERO);

    /// Creates a new price from a decimal amount.
    pub const fn new(amount: Decimal) -> Self {
        Price(amount)
    }

    /// Creates a price from minor units (pence/cents/céntimos).
    pub fn from_minor(minor: i64) -> Self {
        Price(Decimal::new(minor, 2))
    }

    /// Returns the underlying amount.
    pub const fn amount(self) -> Decimal {
        self.0
    }

    /// Multiplies the price by a line quantity, saturating at the
    /// representable bounds.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Price(self.0.saturating_mul(Decimal::from(quantity)))
    }

    /// Subtracts `rhs`, saturating at the representable bounds.
    #[must_use]
    pub fn saturating_sub(self, rhs: Self) -> Self {
        Price(self.0.saturating_sub(rhs.0))
    }
}

impl Deref for Price {
    type Target = Decimal;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Price(amount)
    }
}

impl FromStr for Price {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Price(to_amount(s)))
    }
}

impl Add for Price {
    type Output = Price;

    fn add(self, rhs: Self) -> Self::Output {
        Price(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Price::ZERO, Add::add)
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

/// Coerces a numeric string into an amount.
///
/// Accepts plain decimals (`"12.50"`) and anything `f64` understands
/// (`"1e3"`). Blank, unparseable and non-finite input yields zero.
pub fn to_amount(s: &str) -> Decimal {
    let trimmed = s.trim();

    if let Ok(amount) = Decimal::from_str(trimmed) {
        return amount;
    }

    trimmed
        .parse::<f64>()
        .ok()
        .and_then(float_to_amount)
        .unwrap_or_default()
}

fn float_to_amount(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }

    Decimal::try_from(value).ok()
}

/// Wire representations of a price.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Integer(i64),
    Float(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

impl From<RawPrice> for Price {
    fn from(raw: RawPrice) -> Self {
        let amount = match raw {
            RawPrice::Integer(value) => Decimal::from(value),
            RawPrice::Float(value) => float_to_amount(value).unwrap_or_default(),
            RawPrice::Text(text) => to_amount(&text),
            RawPrice::Other(_) => Decimal::ZERO,
        };

        Price(amount)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawPrice::deserialize(deserializer).map(Price::from)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

/// Converts an amount into money of the given currency.
pub fn to_money(price: Price, currency: &Currency) -> Money<'_, Currency> {
    Money::from_decimal(price.amount(), currency)
}

/// Formats a price for display, e.g. `S/ 12.50`.
pub fn format_price(price: Price, currency: &Currency) -> String {
    format!("{} {:.2}", currency.symbol, price.amount().round_dp(2))
}
