//! Orders and their lifecycle.

mod aggregate;
mod commands;
mod events;
mod order_store;
mod service;
mod state;
mod value_objects;

pub use aggregate::Order;
pub use commands::*;
pub use events::{ItemCancelledData, KotReprintData, OrderEvent, OrderStatusUpdateData};
pub use order_store::OrderStore;
pub use service::{OrderService, SubmittedOrder};
pub use state::{ItemStatus, LifecyclePolicy, OrderStatus, UnknownStatus};
pub use value_objects::{InvalidAmount, Money, OrderItem, OrderKind, TableNumber};
