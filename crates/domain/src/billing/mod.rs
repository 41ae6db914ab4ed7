//! Bills and the billing finalizer.

mod finalizer;

pub use finalizer::BillingFinalizer;

use chrono::{DateTime, Utc};
use common::{BillId, OrderId};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::order::{Money, OrderItem, OrderKind, TableNumber};

/// Tax applied to every bill, in basis points (5%).
pub const TAX_RATE_BPS: u32 = 500;

/// Subtotal, tax and total for a set of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillTotals {
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

impl BillTotals {
    /// Totals over the active items; cancelled ones are skipped.
    ///
    /// Tax is the exact 5% of the subtotal, with no rounding.
    pub fn compute<'a>(
        items: impl IntoIterator<Item = &'a OrderItem>,
    ) -> Result<Self, ValidationError> {
        let lines = items
            .into_iter()
            .filter(|item| item.is_active())
            .map(OrderItem::line_total)
            .collect::<Option<Vec<_>>>()
            .ok_or(ValidationError::AmountOutOfRange)?;
        let subtotal = Money::checked_sum(lines).ok_or(ValidationError::AmountOutOfRange)?;
        let tax = subtotal
            .checked_rate_bps(TAX_RATE_BPS)
            .ok_or(ValidationError::AmountOutOfRange)?;
        let total = subtotal
            .checked_add(tax)
            .ok_or(ValidationError::AmountOutOfRange)?;
        Ok(Self {
            subtotal,
            tax,
            total,
        })
    }
}

/// Frozen settlement for an order.
///
/// Table, kind and items are copied at billing time, so later changes to
/// the order never alter an issued bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: BillId,
    pub order_id: OrderId,
    pub table_number: TableNumber,
    pub order_type: OrderKind,
    pub items: Vec<OrderItem>,
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
    pub timestamp: DateTime<Utc>,
}

impl Bill {
    /// Number of units across all billed items.
    pub fn item_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}
