//! # Bill Module
//!
//! The read-only projection of an order that is handed to the bill text
//! service, the service's answer, and a plain-text receipt renderer.
//!
//! ## Bill Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Order (in AppState)                                                    │
//! │       │  BillRequest::from_order(order, 8.5%)                           │
//! │       ▼                                                                 │
//! │  BillRequest { orderItems: [{name, price, quantity}], salesTaxRate }    │
//! │       │  BillService (cafe-store, async, may fail)                      │
//! │       ▼                                                                 │
//! │  BillOutcome::BillDetails { billDetails }  ──► shown in the bill dialog │
//! │  BillOutcome::Error { error }              ──► transient notification   │
//! │                                                                         │
//! │  Nothing here ever flows back into AppState.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{Money, TaxRate};
use crate::types::Order;

// =============================================================================
// Request / Response
// =============================================================================

/// One itemized line as the bill service sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BillLine {
    pub name: String,
    pub price: Money,
    pub quantity: i64,
}

impl BillLine {
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

/// Input to the bill text service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BillRequest {
    pub order_items: Vec<BillLine>,
    /// On the wire as a percentage number (`8.5`).
    #[serde(with = "percent")]
    #[ts(as = "f64")]
    pub sales_tax_rate: TaxRate,
    /// Free-text purchase history a smarter service can use for discounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_history: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ongoing_promotions: Option<String>,
}

impl BillRequest {
    /// Copies the lines of `order`; the order itself is not borrowed past this call.
    pub fn from_order(order: &Order, sales_tax_rate: TaxRate) -> Self {
        BillRequest {
            order_items: order
                .items
                .iter()
                .map(|item| BillLine {
                    name: item.name.clone(),
                    price: item.price,
                    quantity: item.quantity,
                })
                .collect(),
            sales_tax_rate,
            customer_history: None,
            ongoing_promotions: None,
        }
    }

    pub fn with_customer_history(mut self, history: impl Into<String>) -> Self {
        self.customer_history = Some(history.into());
        self
    }

    pub fn with_promotions(mut self, promotions: impl Into<String>) -> Self {
        self.ongoing_promotions = Some(promotions.into());
        self
    }
}

/// What the bill service answers: formatted text, or an error message.
///
/// Untagged, so the JSON is exactly `{"billDetails": "..."}` or
/// `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum BillOutcome {
    BillDetails {
        #[serde(rename = "billDetails")]
        bill_details: String,
    },
    Error {
        error: String,
    },
}

impl BillOutcome {
    pub fn details(text: impl Into<String>) -> Self {
        BillOutcome::BillDetails {
            bill_details: text.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        BillOutcome::Error {
            error: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, BillOutcome::Error { .. })
    }
}

mod percent {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::money::TaxRate;

    pub fn serialize<S: Serializer>(rate: &TaxRate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(rate.percentage())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TaxRate, D::Error> {
        f64::deserialize(deserializer).map(TaxRate::from_percentage)
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Subtotal, tax and total for a request.
///
/// Tax is charged once on the subtotal, not per line, so the receipt always
/// adds up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BillBreakdown {
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

impl BillBreakdown {
    pub fn compute(request: &BillRequest) -> Self {
        let subtotal: Money = request.order_items.iter().map(BillLine::line_total).sum();
        let tax = subtotal.calculate_tax(request.sales_tax_rate);
        BillBreakdown {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}

// =============================================================================
// Receipt Rendering
// =============================================================================

/// Everything on a printed receipt that is not in the request.
#[derive(Debug, Clone)]
pub struct ReceiptHeader {
    pub store_name: String,
    pub table_id: Option<u32>,
    pub printed_at: DateTime<Utc>,
    pub currency_symbol: String,
    /// Paper width in characters (32 fits a 58mm roll).
    pub width: usize,
}

/// Renders a monospace receipt.
///
/// ```text
///             Café POS
///         Table 3 · 2026-10-16 09:30
/// --------------------------------
/// Espresso Beans x2          $7.00
/// Croissant x1               $3.00
/// --------------------------------
/// Subtotal                  $10.00
/// Tax (8.50%)                $0.85
/// TOTAL                     $10.85
/// ```
pub fn render_receipt(request: &BillRequest, header: &ReceiptHeader) -> String {
    let width = header.width.max(24);
    let symbol = header.currency_symbol.as_str();
    let rule = "-".repeat(width);
    let totals = BillBreakdown::compute(request);

    let mut lines = vec![center(&header.store_name, width)];
    let stamp = header.printed_at.format("%Y-%m-%d %H:%M").to_string();
    lines.push(center(
        &match header.table_id {
            Some(table) => format!("Table {} · {}", table, stamp),
            None => stamp,
        },
        width,
    ));
    lines.push(rule.clone());

    if request.order_items.is_empty() {
        lines.push("(no items)".to_string());
    }
    for item in &request.order_items {
        lines.push(two_column(
            &format!("{} x{}", item.name, item.quantity),
            &item.line_total().format_with(symbol),
            width,
        ));
        if item.quantity > 1 {
            lines.push(format!("  @ {}", item.price.format_with(symbol)));
        }
    }

    lines.push(rule.clone());
    lines.push(two_column("Subtotal", &totals.subtotal.format_with(symbol), width));
    lines.push(two_column(
        &format!("Tax ({})", request.sales_tax_rate),
        &totals.tax.format_with(symbol),
        width,
    ));
    lines.push(two_column("TOTAL", &totals.total.format_with(symbol), width));

    if let Some(promotions) = &request.ongoing_promotions {
        lines.push(rule);
        lines.push(format!("Promotions: {}", promotions));
    }

    lines.join("\n")
}

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    format!("{}{}", " ".repeat((width - len) / 2), text)
}

fn two_column(left: &str, right: &str, width: usize) -> String {
    let used = left.chars().count() + right.chars().count();
    let gap = if used < width { width - used } else { 1 };
    format!("{}{}{}", left, " ".repeat(gap), right)
}
