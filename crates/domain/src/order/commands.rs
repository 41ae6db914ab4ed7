//! Order commands.
//!
//! Commands carry the caller's intent; [`SubmitOrder::validate`] turns a raw
//! submission into an [`OrderDraft`] that is safe to store.

use std::collections::HashSet;

use common::{ItemId, MenuItemId, OrderId, UserId};

use crate::billing::BillTotals;
use crate::catalog::{MenuItem, User};
use crate::error::ValidationError;

use super::{ItemStatus, Money, OrderItem, OrderKind, OrderStatus, TableNumber};

/// A line item as submitted by a cashier terminal.
///
/// `name` and `price` may be left out, in which case they are resolved from
/// the menu entry with the same id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub id: ItemId,
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<Money>,
    pub quantity: i64,
    /// Whatever status the client sent. Ignored: new items are always pending.
    pub status: Option<ItemStatus>,
}

impl NewOrderItem {
    /// An item referencing a menu entry by id only.
    pub fn from_menu(id: impl Into<ItemId>, quantity: i64) -> Self {
        Self {
            id: id.into(),
            name: None,
            category: None,
            price: None,
            quantity,
            status: None,
        }
    }

    /// An item carrying its own name and price snapshot.
    pub fn priced(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        price: Money,
        quantity: i64,
    ) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            category: None,
            price: Some(price),
            quantity,
            status: None,
        }
    }
}

/// Command to submit a new order to the kitchen.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOrder {
    pub table_number: Option<String>,
    pub order_type: OrderKind,
    pub items: Vec<NewOrderItem>,
    pub notes: Option<String>,
    pub cashier_id: Option<UserId>,
}

impl SubmitOrder {
    /// A dine-in order for `table`.
    pub fn dine_in(table: impl Into<String>, items: Vec<NewOrderItem>) -> Self {
        Self {
            table_number: Some(table.into()),
            order_type: OrderKind::DineIn,
            items,
            notes: None,
            cashier_id: None,
        }
    }

    /// A takeaway order.
    pub fn takeaway(items: Vec<NewOrderItem>) -> Self {
        Self {
            table_number: None,
            order_type: OrderKind::Takeaway,
            items,
            notes: None,
            cashier_id: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_cashier(mut self, cashier_id: UserId) -> Self {
        self.cashier_id = Some(cashier_id);
        self
    }

    /// Checks the submission against the menu and the user list.
    ///
    /// Nothing is mutated here; a draft that comes back `Ok` only needs an
    /// id and a timestamp to become an order.
    pub fn validate(
        self,
        menu: &[MenuItem],
        users: &[User],
    ) -> Result<OrderDraft, ValidationError> {
        if self.items.is_empty() {
            return Err(ValidationError::EmptyOrder);
        }

        let table_number = match self.order_type {
            OrderKind::DineIn => {
                let label = self.table_number.as_deref().map(str::trim).unwrap_or_default();
                if label.is_empty() {
                    return Err(ValidationError::TableNumberRequired);
                }
                TableNumber::new(label)
            }
            OrderKind::Takeaway => match self.table_number.as_deref().map(str::trim) {
                Some(label) if !label.is_empty() => TableNumber::new(label),
                _ => TableNumber::takeaway(),
            },
        };

        if let Some(cashier_id) = self.cashier_id
            && !users.iter().any(|u| u.id == cashier_id)
        {
            return Err(ValidationError::UnknownCashier { cashier_id });
        }

        let mut seen = HashSet::with_capacity(self.items.len());
        let mut items = Vec::with_capacity(self.items.len());
        for item in self.items {
            if !seen.insert(item.id) {
                return Err(ValidationError::DuplicateItem { item_id: item.id });
            }
            items.push(resolve_item(item, menu)?);
        }
        BillTotals::compute(&items)?;

        Ok(OrderDraft {
            table_number,
            order_type: self.order_type,
            items,
            notes: self.notes,
            cashier_id: self.cashier_id,
        })
    }
}

fn resolve_item(item: NewOrderItem, menu: &[MenuItem]) -> Result<OrderItem, ValidationError> {
    let quantity = u32::try_from(item.quantity)
        .ok()
        .filter(|q| *q > 0)
        .ok_or(ValidationError::InvalidQuantity {
            item_id: item.id,
            quantity: item.quantity,
        })?;

    let (name, category, price) = match (item.name, item.price) {
        (Some(name), Some(price)) => (name, item.category, price),
        (name, price) => {
            let menu_item_id = MenuItemId::from(item.id);
            let entry = menu
                .iter()
                .find(|m| m.id == menu_item_id)
                .ok_or(ValidationError::UnknownMenuItem { menu_item_id })?;
            if !entry.enabled {
                return Err(ValidationError::MenuItemDisabled { menu_item_id });
            }
            (
                name.unwrap_or_else(|| entry.name.clone()),
                item.category.or_else(|| Some(entry.category.clone())),
                price.unwrap_or(entry.price),
            )
        }
    };

    if price.is_negative() {
        return Err(ValidationError::InvalidPrice { item_id: item.id });
    }

    Ok(OrderItem {
        id: item.id,
        name,
        category,
        price,
        quantity,
        status: ItemStatus::Pending,
    })
}

/// A validated submission waiting for an id.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub table_number: TableNumber,
    pub order_type: OrderKind,
    pub items: Vec<OrderItem>,
    pub notes: Option<String>,
    pub cashier_id: Option<UserId>,
}

/// Command to move an order to a new kitchen status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceStatus {
    pub order_id: OrderId,
    pub status: OrderStatus,
}

impl AdvanceStatus {
    pub fn new(order_id: OrderId, status: OrderStatus) -> Self {
        Self { order_id, status }
    }
}

/// Command to cancel one line item of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancelItem {
    pub order_id: OrderId,
    pub item_id: ItemId,
}

impl CancelItem {
    pub fn new(order_id: OrderId, item_id: ItemId) -> Self {
        Self { order_id, item_id }
    }
}
