//! Domain error types.

use common::{ItemId, MenuItemId, OrderId, UserId};
use thiserror::Error;

use crate::order::OrderStatus;

/// Errors that can occur during domain operations.
///
/// Every variant is scoped to the request that triggered it; none of them
/// leave the store in a partially mutated state.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A referenced record does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFound),

    /// The request was rejected before any state was touched.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// The record a lookup failed to find.
///
/// Messages are part of the HTTP contract and are kept short on purpose.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotFound {
    #[error("Order not found")]
    Order { order_id: OrderId },

    #[error("Item not found")]
    Item { order_id: OrderId, item_id: ItemId },

    #[error("Item not found")]
    MenuItem { menu_item_id: MenuItemId },
}

/// Reasons a request is rejected as invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Order has no items")]
    EmptyOrder,

    #[error("Table number is required for dine-in orders")]
    TableNumberRequired,

    #[error("Invalid quantity for item {item_id}: {quantity} (must be greater than 0)")]
    InvalidQuantity { item_id: ItemId, quantity: i64 },

    #[error("Invalid price for item {item_id} (must not be negative)")]
    InvalidPrice { item_id: ItemId },

    #[error("Item {item_id} appears more than once")]
    DuplicateItem { item_id: ItemId },

    #[error("Menu item {menu_item_id} does not exist")]
    UnknownMenuItem { menu_item_id: MenuItemId },

    #[error("Menu item {menu_item_id} is not available")]
    MenuItemDisabled { menu_item_id: MenuItemId },

    #[error("Unknown cashier {cashier_id}")]
    UnknownCashier { cashier_id: UserId },

    #[error("Invalid status transition: cannot move from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("Order {order_id} is completed and can no longer be changed")]
    OrderCompleted { order_id: OrderId },

    #[error("Order {order_id} is {status}; only ready orders can be billed")]
    NotReadyForBilling { order_id: OrderId, status: OrderStatus },

    #[error("Order {order_id} has already been billed")]
    AlreadyBilled { order_id: OrderId },

    #[error("Field {0} is required")]
    MissingField(&'static str),

    #[error("Price must not be negative")]
    NegativePrice,

    #[error("Order total is too large")]
    AmountOutOfRange,
}

impl DomainError {
    /// Returns true if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound(_))
    }
}
