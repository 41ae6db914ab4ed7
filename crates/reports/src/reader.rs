use chrono::{NaiveDate, Utc};
use domain::PosDatabase;
use store::Store;

use crate::daily::DailySalesReport;

/// Builds reports from the live database.
#[derive(Clone)]
pub struct SalesReports {
    store: Store<PosDatabase>,
}

impl SalesReports {
    pub fn new(store: Store<PosDatabase>) -> Self {
        Self { store }
    }

    /// Report for `date`, or for today (UTC) when `None`.
    #[tracing::instrument(skip(self))]
    pub async fn daily(&self, date: Option<NaiveDate>) -> DailySalesReport {
        let date = date.unwrap_or_else(|| Utc::now().date_naive());
        let report = self
            .store
            .read(|db| DailySalesReport::build(&db.bills, date))
            .await;
        tracing::debug!(%date, orders = report.total_orders, "daily report built");
        report
    }
}
