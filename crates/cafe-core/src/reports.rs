//! # Reports Module
//!
//! Read-only aggregation of the sales list for the reporting dashboard.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  KPI cards      total revenue · total profit · number of orders         │
//! │  Sales chart    revenue/profit per day, last 7 days, oldest first       │
//! │  Top items      5 best sellers by quantity across every sale            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::Sale;

/// Days shown on the sales chart, today included.
pub const REPORT_WINDOW_DAYS: u64 = 7;

/// Entries shown on the top-items chart.
pub const TOP_ITEMS_LIMIT: usize = 5;

/// Revenue and profit for one calendar day (UTC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DailySales {
    #[ts(as = "String")]
    pub date: NaiveDate,
    /// Chart axis label, e.g. `Oct 9`.
    pub label: String,
    pub revenue: Money,
    pub profit: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TopItem {
    pub item_id: String,
    /// Name from the first sale the item appeared in.
    pub name: String,
    pub quantity: i64,
    pub revenue: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SalesReport {
    pub total_revenue: Money,
    pub total_profit: Money,
    /// One cleared table is one order.
    pub total_orders: usize,
    pub daily: Vec<DailySales>,
    pub top_items: Vec<TopItem>,
}

impl SalesReport {
    /// Builds the dashboard for the week ending on `today`.
    ///
    /// KPIs and top items cover every sale; the daily series only the
    /// window, and sales outside it are ignored there.
    pub fn build(sales: &[Sale], today: NaiveDate) -> Self {
        SalesReport {
            total_revenue: sales.iter().map(|s| s.total_revenue).sum(),
            total_profit: sales.iter().map(|s| s.profit).sum(),
            total_orders: sales.len(),
            daily: daily_sales(sales, today),
            top_items: top_items(sales, TOP_ITEMS_LIMIT),
        }
    }
}

/// One bucket per day of the window, oldest first, empty days included.
pub fn daily_sales(sales: &[Sale], today: NaiveDate) -> Vec<DailySales> {
    let mut days: Vec<DailySales> = (0..REPORT_WINDOW_DAYS)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(back)))
        .map(|date| DailySales {
            date,
            label: date.format("%b %-d").to_string(),
            revenue: Money::zero(),
            profit: Money::zero(),
        })
        .collect();

    for sale in sales {
        let day = sale.date.date_naive();
        if let Some(bucket) = days.iter_mut().find(|d| d.date == day) {
            bucket.revenue += sale.total_revenue;
            bucket.profit += sale.profit;
        }
    }

    days
}

/// Best sellers by quantity. Ties keep the order items were first seen in.
pub fn top_items(sales: &[Sale], limit: usize) -> Vec<TopItem> {
    let mut items: Vec<TopItem> = Vec::new();

    for line in sales.iter().flat_map(|sale| &sale.order.items) {
        match items.iter_mut().find(|i| i.item_id == line.item_id) {
            Some(item) => {
                item.quantity += line.quantity;
                item.revenue += line.line_total();
            }
            None => items.push(TopItem {
                item_id: line.item_id.clone(),
                name: line.name.clone(),
                quantity: line.quantity,
                revenue: line.line_total(),
            }),
        }
    }

    // sort_by is stable, so equal quantities stay in first-seen order
    items.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    items.truncate(limit);
    items
}
