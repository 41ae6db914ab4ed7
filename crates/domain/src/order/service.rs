//! Order lifecycle service.

use std::sync::Arc;
use std::time::Instant;

use chrono::{SubsecRound, Utc};
use common::OrderId;
use serde::Serialize;
use store::Store;

use crate::database::PosDatabase;
use crate::error::DomainError;
use crate::kot::{KotEventType, KotLogEntry, KotLogRecorder};
use crate::publisher::EventPublisher;

use super::{
    AdvanceStatus, CancelItem, LifecyclePolicy, Order, OrderEvent, OrderStatus, OrderStore,
    SubmitOrder,
};

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmittedOrder {
    pub order: Order,
    /// Milliseconds from the start of the call until the order was persisted.
    pub latency_ms: u64,
}

/// Drives orders through their lifecycle.
///
/// Every mutation is persisted first and published second, so a screen that
/// reacts to an event and re-reads the order always sees the change.
#[derive(Clone)]
pub struct OrderService {
    orders: OrderStore,
    kot: KotLogRecorder,
    publisher: Arc<dyn EventPublisher>,
    policy: LifecyclePolicy,
}

impl OrderService {
    /// Creates a service over `store` that publishes through `publisher`.
    pub fn new(store: Store<PosDatabase>, publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            orders: OrderStore::new(store.clone()),
            kot: KotLogRecorder::new(store),
            publisher,
            policy: LifecyclePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: LifecyclePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn orders(&self) -> &OrderStore {
        &self.orders
    }

    pub fn kot(&self) -> &KotLogRecorder {
        &self.kot
    }

    /// Validates and stores a new order, then notifies the kitchen.
    #[tracing::instrument(
        skip(self, cmd),
        fields(order_type = %cmd.order_type, items = cmd.items.len())
    )]
    pub async fn submit(&self, cmd: SubmitOrder) -> Result<SubmittedOrder, DomainError> {
        let started = Instant::now();

        let order = self
            .orders
            .create(|db, id| {
                let draft = cmd.validate(&db.menu, &db.users)?;
                Ok(Order::place(id, draft, Utc::now().trunc_subsecs(3)))
            })
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "order rejected"))?;

        let latency_ms = elapsed_ms(started);

        self.publisher.publish(OrderEvent::new_order(order.clone()));
        self.kot
            .record(order.id(), KotEventType::NewOrder, true, latency_ms)
            .await;

        metrics::counter!("orders_submitted_total").increment(1);
        tracing::info!(order_id = %order.id(), latency_ms, "order sent to kitchen");

        Ok(SubmittedOrder { order, latency_ms })
    }

    /// Moves an order to `cmd.status` and broadcasts the change.
    #[tracing::instrument(skip(self))]
    pub async fn advance_status(&self, cmd: AdvanceStatus) -> Result<Order, DomainError> {
        let policy = self.policy;
        let (order, from) = self
            .orders
            .update(cmd.order_id, |order| {
                let from = order.status();
                order.advance(cmd.status, policy)?;
                Ok(from)
            })
            .await?;

        self.publisher
            .publish(OrderEvent::status_update(order.id(), order.status()));

        metrics::counter!("order_status_updates_total", "status" => cmd.status.as_str())
            .increment(1);
        tracing::info!(order_id = %order.id(), %from, to = %order.status(), "order status updated");

        Ok(order)
    }

    /// Cancels one item. Cancelling an already cancelled item is a no-op.
    #[tracing::instrument(skip(self))]
    pub async fn cancel_item(&self, cmd: CancelItem) -> Result<Order, DomainError> {
        let policy = self.policy;
        let (order, changed) = self
            .orders
            .update(cmd.order_id, |order| order.cancel_item(cmd.item_id, policy))
            .await?;

        if changed {
            self.publisher
                .publish(OrderEvent::item_cancelled(cmd.order_id, cmd.item_id));
            metrics::counter!("order_items_cancelled_total").increment(1);
            tracing::info!(order_id = %cmd.order_id, item_id = %cmd.item_id, "item cancelled");
        } else {
            tracing::debug!(
                order_id = %cmd.order_id,
                item_id = %cmd.item_id,
                "item already cancelled"
            );
        }

        Ok(order)
    }

    /// Stamps the time the kitchen first printed the ticket.
    #[tracing::instrument(skip(self))]
    pub async fn mark_kot_printed(&self, order_id: OrderId) -> Result<Order, DomainError> {
        let (order, _) = self
            .orders
            .update(order_id, |order| {
                Ok(order.mark_kot_printed(Utc::now().trunc_subsecs(3)))
            })
            .await?;
        Ok(order)
    }

    /// Relays a reprint request to every screen and logs it.
    ///
    /// Reprinting is a client-side action; no order state changes. The log
    /// entry is marked unsuccessful when the order does not exist.
    #[tracing::instrument(skip(self))]
    pub async fn request_reprint(&self, order_id: OrderId) -> KotLogEntry {
        let started = Instant::now();
        let exists = self.orders.get(order_id).await.is_ok();

        self.publisher.publish(OrderEvent::kot_reprint(order_id));
        let latency_ms = elapsed_ms(started);

        if !exists {
            tracing::warn!(%order_id, "reprint requested for unknown order");
        }
        self.kot
            .record(order_id, KotEventType::ReprintKot, exists, latency_ms)
            .await
    }

    /// All orders in submission order, optionally filtered by status.
    pub async fn list(&self, status: Option<OrderStatus>) -> Vec<Order> {
        self.orders.list(status).await
    }

    /// Snapshot of one order, for screens that just (re)connected.
    pub async fn get(&self, order_id: OrderId) -> Result<Order, DomainError> {
        self.orders.get(order_id).await
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
