//! Domain layer for the restaurant POS.
//!
//! This crate owns everything the order pipeline needs to be correct:
//! - Order lifecycle (submission, kitchen status, item cancellation)
//! - Kitchen order ticket (KOT) logging and latency statistics
//! - Bill finalization with tax
//! - Menu catalog and staff directory
//!
//! State lives in a single [`PosDatabase`] document behind a [`store::Store`].
//! Changes are pushed to connected screens through an [`EventPublisher`].

pub mod billing;
pub mod catalog;
pub mod database;
pub mod error;
pub mod kot;
pub mod order;
pub mod publisher;

pub use billing::{Bill, BillTotals, BillingFinalizer, TAX_RATE_BPS};
pub use catalog::{
    MenuCatalog, MenuItem, MenuItemPatch, NewMenuItem, Role, User, UserDirectory, UserProfile,
};
pub use database::PosDatabase;
pub use error::{DomainError, NotFound, ValidationError};
pub use kot::{KotEventType, KotLogEntry, KotLogRecorder, KotStats};
pub use order::{
    AdvanceStatus, CancelItem, InvalidAmount, ItemStatus, LifecyclePolicy, Money, NewOrderItem,
    Order, OrderEvent, OrderItem, OrderKind, OrderService, OrderStatus, SubmitOrder,
    SubmittedOrder, TableNumber,
};
pub use publisher::{EventPublisher, NullPublisher, RecordingPublisher};
