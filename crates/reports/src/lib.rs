//! Read-only reports over the POS database.
//!
//! Reports never mutate anything; they are recomputed from settled bills on
//! every request.

pub mod daily;
pub mod reader;

pub use daily::{DailySalesReport, ItemSales};
pub use reader::SalesReports;
