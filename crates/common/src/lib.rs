//! Shared types used across the POS workspace.

pub mod types;

pub use types::{BillId, ItemId, KotLogId, MenuItemId, OrderId, UserId};
