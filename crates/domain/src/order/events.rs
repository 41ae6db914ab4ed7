//! Realtime order events.
//!
//! These are the notifications pushed to kitchen and cashier screens. They
//! serialize as `{"event": <name>, "data": <payload>}`.

use common::{ItemId, OrderId};
use serde::{Deserialize, Serialize};

use super::{Order, OrderStatus};

/// Events fanned out to every connected display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum OrderEvent {
    /// A new order was submitted. Carries the full order.
    NewOrder(Order),

    /// The kitchen moved an order to a new status.
    OrderStatusUpdate(OrderStatusUpdateData),

    /// A line item was cancelled.
    ItemCancelled(ItemCancelledData),

    /// Someone asked for a ticket to be printed again. Advisory only.
    KotReprint(KotReprintData),
}

impl OrderEvent {
    pub const NEW_ORDER: &'static str = "new_order";
    pub const ORDER_STATUS_UPDATE: &'static str = "order_status_update";
    pub const ITEM_CANCELLED: &'static str = "item_cancelled";
    pub const KOT_REPRINT: &'static str = "kot_reprint";

    /// Every event name, in declaration order.
    pub const NAMES: [&'static str; 4] = [
        Self::NEW_ORDER,
        Self::ORDER_STATUS_UPDATE,
        Self::ITEM_CANCELLED,
        Self::KOT_REPRINT,
    ];

    /// Returns the event name used on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            OrderEvent::NewOrder(_) => Self::NEW_ORDER,
            OrderEvent::OrderStatusUpdate(_) => Self::ORDER_STATUS_UPDATE,
            OrderEvent::ItemCancelled(_) => Self::ITEM_CANCELLED,
            OrderEvent::KotReprint(_) => Self::KOT_REPRINT,
        }
    }

    /// Returns the order this event refers to.
    pub fn order_id(&self) -> OrderId {
        match self {
            OrderEvent::NewOrder(order) => order.id(),
            OrderEvent::OrderStatusUpdate(data) => data.order_id,
            OrderEvent::ItemCancelled(data) => data.order_id,
            OrderEvent::KotReprint(data) => data.order_id,
        }
    }

    pub fn new_order(order: Order) -> Self {
        OrderEvent::NewOrder(order)
    }

    pub fn status_update(order_id: OrderId, status: OrderStatus) -> Self {
        OrderEvent::OrderStatusUpdate(OrderStatusUpdateData { order_id, status })
    }

    pub fn item_cancelled(order_id: OrderId, item_id: ItemId) -> Self {
        OrderEvent::ItemCancelled(ItemCancelledData { order_id, item_id })
    }

    pub fn kot_reprint(order_id: OrderId) -> Self {
        OrderEvent::KotReprint(KotReprintData { order_id })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusUpdateData {
    pub order_id: OrderId,
    pub status: OrderStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemCancelledData {
    pub order_id: OrderId,
    pub item_id: ItemId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KotReprintData {
    pub order_id: OrderId,
}
