//! Value objects for the order domain.

use std::str::FromStr;

use common::ItemId;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::ItemStatus;

/// Money amount in major units, held as a decimal.
///
/// Amounts keep the precision the terminal sent (`0.004` stays `0.004`) and
/// arithmetic on them is exact. On the wire it travels as a plain JSON
/// number, which is what the POS terminals send and expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(Decimal);

/// A number that cannot be held as a money amount.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("amount {0} is out of range")]
pub struct InvalidAmount(pub f64);

impl Money {
    /// Creates a Money amount from cents.
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Creates a Money amount from whole major units.
    pub fn from_major(units: i64) -> Self {
        Self(Decimal::from(units))
    }

    pub fn from_decimal(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Returns zero money.
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is negative.
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Adds two amounts, or `None` past the decimal range.
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Multiplies by a quantity, or `None` past the decimal range.
    pub fn checked_mul(self, quantity: u32) -> Option<Money> {
        self.0.checked_mul(Decimal::from(quantity)).map(Money)
    }

    /// Applies a rate given in basis points (500 = 5%). The result is exact.
    pub fn checked_rate_bps(self, bps: u32) -> Option<Money> {
        self.0
            .checked_mul(Decimal::from(bps))?
            .checked_div(Decimal::from(10_000u32))
            .map(Money)
    }

    /// Adds two amounts, clamping at the decimal range.
    pub fn saturating_add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }

    /// Sums amounts, or `None` if the total leaves the decimal range.
    pub fn checked_sum(amounts: impl IntoIterator<Item = Money>) -> Option<Money> {
        amounts
            .into_iter()
            .try_fold(Money::zero(), |acc, m| acc.checked_add(m))
    }

    /// Divides evenly over `count` shares, rounded half away from zero to the
    /// cent. Zero shares give zero.
    pub fn average(self, count: usize) -> Money {
        if count == 0 {
            return Money::zero();
        }
        self.0
            .checked_div(Decimal::from(count))
            .map(|share| {
                Money(share.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
            })
            .unwrap_or_default()
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Saturates at the decimal range. Billing goes through [`Money::checked_sum`].
impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Money::saturating_add)
    }
}

impl TryFrom<f64> for Money {
    type Error = InvalidAmount;

    /// Takes the shortest decimal that reads back as `amount`, so `15.5`
    /// becomes exactly 15.5 rather than its binary expansion.
    fn try_from(amount: f64) -> Result<Self, Self::Error> {
        if !amount.is_finite() {
            return Err(InvalidAmount(amount));
        }
        Decimal::from_str(&amount.to_string())
            .map(Money)
            .map_err(|_| InvalidAmount(amount))
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = f64::from_str(&self.0.to_string())
            .map_err(<S::Error as serde::ser::Error>::custom)?;
        serializer.serialize_f64(value)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Money::try_from(amount).map_err(<D::Error as serde::de::Error>::custom)
    }
}

/// Whether the guests eat in or take the food away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderKind {
    #[default]
    #[serde(rename = "dine-in")]
    DineIn,
    #[serde(rename = "takeaway")]
    Takeaway,
}

impl OrderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderKind::DineIn => "dine-in",
            OrderKind::Takeaway => "takeaway",
        }
    }
}

impl std::fmt::Display for OrderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Table designator: a free-form label, or the reserved takeaway marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableNumber(String);

impl TableNumber {
    /// Marker used for orders that have no table.
    pub const TAKEAWAY: &'static str = "Takeaway";

    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn takeaway() -> Self {
        Self(Self::TAKEAWAY.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_takeaway(&self) -> bool {
        self.0 == Self::TAKEAWAY
    }
}

impl std::fmt::Display for TableNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A line item as stored on an order.
///
/// `name` and `price` are a snapshot taken when the order was placed, so
/// later menu edits never change an existing order or its bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: ItemId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub price: Money,
    pub quantity: u32,
    #[serde(default)]
    pub status: ItemStatus,
}

impl OrderItem {
    /// Creates a pending item.
    pub fn new(id: ItemId, name: impl Into<String>, price: Money, quantity: u32) -> Self {
        Self {
            id,
            name: name.into(),
            category: None,
            price,
            quantity,
            status: ItemStatus::Pending,
        }
    }

    /// Returns the total price for this item (quantity * price), or `None`
    /// past the decimal range.
    pub fn line_total(&self) -> Option<Money> {
        self.price.checked_mul(self.quantity)
    }

    pub fn is_active(&self) -> bool {
        !self.status.is_cancelled()
    }
}
