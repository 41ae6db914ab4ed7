use chrono::{SubsecRound, Utc};
use common::{BillId, OrderId};
use store::Store;

use crate::database::PosDatabase;
use crate::error::{DomainError, NotFound};
use crate::order::{LifecyclePolicy, OrderStatus};

use super::{Bill, BillTotals};

/// Settles orders: computes the bill and closes the order.
///
/// This is the only way an order reaches [`OrderStatus::Completed`]. It does
/// not publish anything; screens learn about completed orders on their next
/// snapshot read.
#[derive(Clone)]
pub struct BillingFinalizer {
    store: Store<PosDatabase>,
    policy: LifecyclePolicy,
}

impl BillingFinalizer {
    pub fn new(store: Store<PosDatabase>) -> Self {
        Self {
            store,
            policy: LifecyclePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: LifecyclePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Bills `order_id` and marks it completed, in one store write.
    #[tracing::instrument(skip(self))]
    pub async fn finalize(&self, order_id: OrderId) -> Result<Bill, DomainError> {
        let policy = self.policy;
        let bill = self
            .store
            .try_update(|db| {
                let order = db
                    .orders
                    .iter()
                    .find(|o| o.id() == order_id)
                    .ok_or(NotFound::Order { order_id })?;
                order.ensure_billable(policy)?;

                let totals = BillTotals::compute(order.items())?;
                let bill = Bill {
                    id: BillId::next_after(db.bills.iter().map(|b| b.id)),
                    order_id,
                    table_number: order.table_number().clone(),
                    order_type: order.order_type(),
                    items: order.active_items().cloned().collect(),
                    subtotal: totals.subtotal,
                    tax: totals.tax,
                    total: totals.total,
                    timestamp: Utc::now().trunc_subsecs(3),
                };

                if let Some(order) = db.orders.iter_mut().find(|o| o.id() == order_id) {
                    order.complete();
                }
                db.bills.push(bill.clone());
                Ok::<_, DomainError>(bill)
            })
            .await?;

        metrics::counter!("bills_generated_total").increment(1);
        tracing::info!(
            %order_id,
            bill_id = %bill.id,
            total = %bill.total,
            status = %OrderStatus::Completed,
            "order billed"
        );
        Ok(bill)
    }

    /// All bills, oldest first.
    pub async fn bills(&self) -> Vec<Bill> {
        self.store.read(|db| db.bills.clone()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::order::{
        AdvanceStatus, CancelItem, Money, NewOrderItem, OrderService, SubmitOrder,
    };
    use crate::publisher::NullPublisher;
    use common::ItemId;
    use std::sync::Arc;

    async fn ready_order(service: &OrderService, items: Vec<NewOrderItem>) -> OrderId {
        let order_id = service
            .submit(SubmitOrder::dine_in("5", items))
            .await
            .unwrap()
            .order
            .id();
        for status in [OrderStatus::Preparing, OrderStatus::Ready] {
            service
                .advance_status(AdvanceStatus::new(order_id, status))
                .await
                .unwrap();
        }
        order_id
    }

    fn setup(policy: LifecyclePolicy) -> (OrderService, BillingFinalizer) {
        let store = Store::in_memory();
        let service =
            OrderService::new(store.clone(), Arc::new(NullPublisher)).with_policy(policy);
        let billing = BillingFinalizer::new(store).with_policy(policy);
        (service, billing)
    }

    #[tokio::test]
    async fn test_finalize_excludes_cancelled_items() {
        let (service, billing) = setup(LifecyclePolicy::Strict);
        let order_id = ready_order(
            &service,
            vec![
                NewOrderItem::priced(ItemId::new(1), "Tikka", Money::from_major(100), 2),
                NewOrderItem::priced(ItemId::new(2), "Raita", Money::from_major(50), 1),
            ],
        )
        .await;
        service
            .cancel_item(CancelItem::new(order_id, ItemId::new(2)))
            .await
            .unwrap();

        let bill = billing.finalize(order_id).await.unwrap();

        assert_eq!(bill.subtotal, Money::from_major(200));
        assert_eq!(bill.tax, Money::from_major(10));
        assert_eq!(bill.total, Money::from_major(210));
        assert_eq!(bill.items.len(), 1);
        assert_eq!(bill.id, BillId::first());

        let order = service.get(order_id).await.unwrap();
        assert_eq!(order.status(), OrderStatus::Completed);
    }

    #[tokio::test]
    async fn test_finalize_unknown_order() {
        let (_, billing) = setup(LifecyclePolicy::Strict);
        let err = billing.finalize(OrderId::new(77)).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_strict_rejects_second_bill() {
        let (service, billing) = setup(LifecyclePolicy::Strict);
        let order_id = ready_order(
            &service,
            vec![NewOrderItem::priced(ItemId::new(1), "Tea", Money::from_major(20), 1)],
        )
        .await;

        billing.finalize(order_id).await.unwrap();
        let err = billing.finalize(order_id).await.unwrap_err();

        assert!(matches!(
            err,
            DomainError::Validation(ValidationError::AlreadyBilled { .. })
        ));
        assert_eq!(billing.bills().await.len(), 1);
    }

    #[tokio::test]
    async fn test_strict_requires_ready() {
        let (service, billing) = setup(LifecyclePolicy::Strict);
        let order_id = service
            .submit(SubmitOrder::takeaway(vec![NewOrderItem::priced(
                ItemId::new(1),
                "Tea",
                Money::from_major(20),
                1,
            )]))
            .await
            .unwrap()
            .order
            .id();

        let err = billing.finalize(order_id).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationError::NotReadyForBilling {
                status: OrderStatus::Pending,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_permissive_allows_duplicate_bills() {
        let (service, billing) = setup(LifecyclePolicy::Permissive);
        let order_id = service
            .submit(SubmitOrder::dine_in(
                "3",
                vec![NewOrderItem::priced(ItemId::new(1), "Tea", Money::from_major(20), 1)],
            ))
            .await
            .unwrap()
            .order
            .id();

        let first = billing.finalize(order_id).await.unwrap();
        let second = billing.finalize(order_id).await.unwrap();

        assert_eq!(first.order_id, second.order_id);
        assert_eq!(second.id, BillId::new(2));
    }

    #[tokio::test]
    async fn test_bill_is_a_snapshot() {
        let (service, billing) = setup(LifecyclePolicy::Permissive);
        let order_id = ready_order(
            &service,
            vec![
                NewOrderItem::priced(ItemId::new(1), "Tea", Money::from_major(20), 1),
                NewOrderItem::priced(ItemId::new(2), "Coffee", Money::from_major(30), 1),
            ],
        )
        .await;

        let bill = billing.finalize(order_id).await.unwrap();
        service
            .cancel_item(CancelItem::new(order_id, ItemId::new(2)))
            .await
            .unwrap();

        assert_eq!(billing.bills().await[0], bill);
        assert_eq!(bill.items.len(), 2);
    }
}
