//! Daily sales rollup.

use chrono::NaiveDate;
use domain::{Bill, Money};
use serde::Serialize;

/// Units sold and revenue for one dish name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemSales {
    pub name: String,
    pub quantity: u64,
    pub revenue: Money,
}

/// Sales for a single UTC calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySalesReport {
    pub date: NaiveDate,
    /// Sum of bill totals, tax included.
    pub total_revenue: Money,
    pub total_orders: usize,
    pub total_items: u64,
    /// Zero when no bills were settled.
    pub avg_order_value: Money,
    /// Best sellers first, by pre-tax revenue.
    pub item_sales: Vec<ItemSales>,
    pub bills: Vec<Bill>,
}

impl DailySalesReport {
    /// Builds the report from every bill settled on `date`.
    pub fn build<'a>(bills: impl IntoIterator<Item = &'a Bill>, date: NaiveDate) -> Self {
        let bills: Vec<Bill> = bills
            .into_iter()
            .filter(|bill| bill.timestamp.date_naive() == date)
            .cloned()
            .collect();

        let total_revenue: Money = bills.iter().map(|bill| bill.total).sum();
        let total_orders = bills.len();
        let total_items = bills.iter().map(|bill| bill.item_quantity()).sum();

        let avg_order_value = total_revenue.average(total_orders);

        Self {
            date,
            total_revenue,
            total_orders,
            total_items,
            avg_order_value,
            item_sales: item_sales(&bills),
            bills,
        }
    }
}

// Grouped by name; ties keep first-sold order.
fn item_sales(bills: &[Bill]) -> Vec<ItemSales> {
    let mut sales: Vec<ItemSales> = Vec::new();
    for item in bills.iter().flat_map(|bill| bill.items.iter()) {
        // Billed lines were range-checked when the bill was issued.
        let revenue = item.line_total().unwrap_or_default();
        match sales.iter_mut().find(|s| s.name == item.name) {
            Some(entry) => {
                entry.quantity += u64::from(item.quantity);
                entry.revenue = entry.revenue.saturating_add(revenue);
            }
            None => sales.push(ItemSales {
                name: item.name.clone(),
                quantity: u64::from(item.quantity),
                revenue,
            }),
        }
    }
    sales.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    sales
}
