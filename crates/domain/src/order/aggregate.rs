//! The order entity.

use chrono::{DateTime, Utc};
use common::{ItemId, OrderId, UserId};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, NotFound, ValidationError};

use super::{
    ItemStatus, LifecyclePolicy, OrderDraft, OrderItem, OrderKind, OrderStatus, TableNumber,
};

/// A restaurant order.
///
/// The item list is fixed at submission; afterwards items can only be
/// cancelled, never removed or reordered. Orders are never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    id: OrderId,
    table_number: TableNumber,
    order_type: OrderKind,
    items: Vec<OrderItem>,
    #[serde(default)]
    notes: Option<String>,
    status: OrderStatus,
    #[serde(default)]
    cashier_id: Option<UserId>,
    timestamp: DateTime<Utc>,
    #[serde(default)]
    kot_printed_at: Option<DateTime<Utc>>,
}

// Query methods
impl Order {
    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn table_number(&self) -> &TableNumber {
        &self.table_number
    }

    pub fn order_type(&self) -> OrderKind {
        self.order_type
    }

    /// All items in submission order, cancelled ones included.
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Items that are still to be prepared and billed.
    pub fn active_items(&self) -> impl Iterator<Item = &OrderItem> {
        self.items.iter().filter(|item| item.is_active())
    }

    pub fn get_item(&self, item_id: ItemId) -> Option<&OrderItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn cashier_id(&self) -> Option<UserId> {
        self.cashier_id
    }

    /// When the order was submitted.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn kot_printed_at(&self) -> Option<DateTime<Utc>> {
        self.kot_printed_at
    }
}

// Mutations
impl Order {
    /// Builds a fresh order from a validated draft.
    pub fn place(id: OrderId, draft: OrderDraft, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            table_number: draft.table_number,
            order_type: draft.order_type,
            items: draft.items,
            notes: draft.notes,
            status: OrderStatus::Pending,
            cashier_id: draft.cashier_id,
            timestamp,
            kot_printed_at: None,
        }
    }

    /// Moves the order to `target` on behalf of the kitchen.
    pub fn advance(
        &mut self,
        target: OrderStatus,
        policy: LifecyclePolicy,
    ) -> Result<(), ValidationError> {
        if policy.is_strict() && !self.status.can_advance_to(target) {
            return Err(ValidationError::InvalidTransition {
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        Ok(())
    }

    /// Cancels one item. Returns `false` if it was already cancelled.
    pub fn cancel_item(
        &mut self,
        item_id: ItemId,
        policy: LifecyclePolicy,
    ) -> Result<bool, DomainError> {
        let order_id = self.id;
        if policy.is_strict() && !self.status.can_cancel_items() {
            return Err(ValidationError::OrderCompleted { order_id }.into());
        }

        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or(NotFound::Item { order_id, item_id })?;

        if item.status.is_cancelled() {
            return Ok(false);
        }
        item.status = ItemStatus::Cancelled;
        Ok(true)
    }

    /// Checks that the order may be billed under `policy`.
    pub fn ensure_billable(&self, policy: LifecyclePolicy) -> Result<(), ValidationError> {
        if !policy.is_strict() {
            return Ok(());
        }
        match self.status {
            OrderStatus::Completed => Err(ValidationError::AlreadyBilled { order_id: self.id }),
            status if !status.can_bill() => Err(ValidationError::NotReadyForBilling {
                order_id: self.id,
                status,
            }),
            _ => Ok(()),
        }
    }

    /// Closes the order. Only billing calls this.
    pub(crate) fn complete(&mut self) {
        self.status = OrderStatus::Completed;
    }

    /// Records the first time the kitchen ticket was printed.
    /// Returns `false` if it had already been stamped.
    pub fn mark_kot_printed(&mut self, at: DateTime<Utc>) -> bool {
        if self.kot_printed_at.is_some() {
            return false;
        }
        self.kot_printed_at = Some(at);
        true
    }
}
