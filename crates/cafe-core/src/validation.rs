//! # Validation Module
//!
//! Checks that run before anything is dispatched.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Inventory form ──► validate_inventory_item ──► Action::AddInventoryItem│
//! │                           │                     Action::UpdateInventory │
//! │                           └── Err: shown next to the field, nothing     │
//! │                               reaches the reducer                       │
//! │                                                                         │
//! │  Bill button ─────► validate_bill_request ───► BillService              │
//! │                           │                                             │
//! │                           └── Err: "Invalid input." notification        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The reducer itself never validates; it only has to stay total.

use crate::bill::{BillLine, BillRequest};
use crate::error::ValidationError;
use crate::money::Money;
use crate::types::NewInventoryItem;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Shortest accepted inventory item name, after trimming.
pub const MIN_ITEM_NAME_LEN: usize = 2;

/// Longest accepted inventory item name, after trimming.
pub const MAX_ITEM_NAME_LEN: usize = 100;

/// Tax rates above 100% are always a typo.
pub const MAX_TAX_RATE_BPS: u32 = 10_000;

// =============================================================================
// Inventory
// =============================================================================

/// Validates the fields of the inventory form.
///
/// ## Rules
/// - name: 2 to 100 characters after trimming
/// - stock, cost, price, low-stock threshold: zero or more
///
/// ```rust
/// use cafe_core::types::NewInventoryItem;
/// use cafe_core::validation::validate_inventory_item;
///
/// let mut item = NewInventoryItem { name: "Chai Latte".into(), ..Default::default() };
/// assert!(validate_inventory_item(&item).is_ok());
///
/// item.stock = -1;
/// assert!(validate_inventory_item(&item).is_err());
/// ```
pub fn validate_inventory_item(item: &NewInventoryItem) -> ValidationResult<()> {
    validate_item_name(&item.name)?;
    validate_non_negative_count("stock", item.stock)?;
    validate_non_negative_money("cost", item.cost)?;
    validate_non_negative_money("price", item.price)?;
    validate_non_negative_count("lowStockThreshold", item.low_stock_threshold)?;
    Ok(())
}

pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    let len = name.chars().count();
    if len < MIN_ITEM_NAME_LEN {
        return Err(ValidationError::TooShort {
            field: "name".to_string(),
            min: MIN_ITEM_NAME_LEN,
        });
    }
    if len > MAX_ITEM_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_ITEM_NAME_LEN,
        });
    }

    Ok(())
}

fn validate_non_negative_count(field: &str, value: i64) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    Ok(())
}

fn validate_non_negative_money(field: &str, value: Money) -> ValidationResult<()> {
    if value.is_negative() {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Bill Boundary
// =============================================================================

pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > MAX_TAX_RATE_BPS {
        return Err(ValidationError::OutOfRange {
            field: "salesTaxRate".to_string(),
            min: 0,
            max: MAX_TAX_RATE_BPS as i64,
        });
    }
    Ok(())
}

pub fn validate_bill_line(line: &BillLine) -> ValidationResult<()> {
    if line.name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }
    if line.quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    validate_non_negative_money("price", line.price)
}

/// Everything the bill service is handed must pass this first.
///
/// An order with no lines is still a valid request; it bills to zero.
pub fn validate_bill_request(request: &BillRequest) -> ValidationResult<()> {
    validate_tax_rate_bps(request.sales_tax_rate.bps())?;
    request.order_items.iter().try_for_each(validate_bill_line)
}
