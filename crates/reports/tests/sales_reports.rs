use std::sync::Arc;

use chrono::Utc;
use common::ItemId;
use domain::{
    AdvanceStatus, BillingFinalizer, Money, NewOrderItem, NullPublisher, OrderService,
    OrderStatus, SubmitOrder,
};
use reports::SalesReports;
use store::Store;

async fn settle(
    service: &OrderService,
    billing: &BillingFinalizer,
    items: Vec<NewOrderItem>,
) {
    let order_id = service
        .submit(SubmitOrder::dine_in("1", items))
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
    billing.finalize(order_id).await.unwrap();
}

#[tokio::test]
async fn todays_report_reflects_settled_bills() {
    let store = Store::in_memory();
    let service = OrderService::new(store.clone(), Arc::new(NullPublisher));
    let billing = BillingFinalizer::new(store.clone());
    let reports = SalesReports::new(store);

    settle(
        &service,
        &billing,
        vec![NewOrderItem::priced(ItemId::new(1), "Tea", Money::from_major(20), 2)],
    )
    .await;
    settle(
        &service,
        &billing,
        vec![NewOrderItem::priced(ItemId::new(1), "Tea", Money::from_major(20), 1)],
    )
    .await;
    // submitted but never billed
    service
        .submit(SubmitOrder::takeaway(vec![NewOrderItem::priced(
            ItemId::new(9),
            "Thali",
            Money::from_major(150),
            1,
        )]))
        .await
        .unwrap();

    let report = reports.daily(None).await;

    assert_eq!(report.date, Utc::now().date_naive());
    assert_eq!(report.total_orders, 2);
    assert_eq!(report.total_items, 3);
    // 42.00 + 21.00
    assert_eq!(report.total_revenue, Money::from_major(63));
    assert_eq!(report.avg_order_value, Money::from_cents(3150));
    assert_eq!(report.item_sales.len(), 1);
    assert_eq!(report.item_sales[0].revenue, Money::from_major(60));
}

#[tokio::test]
async fn other_days_are_empty() {
    let reports = SalesReports::new(Store::in_memory());
    let date = chrono::NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();

    let report = reports.daily(Some(date)).await;

    assert_eq!(report.date, date);
    assert!(report.bills.is_empty());
}
