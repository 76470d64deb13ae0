//! # Seed Data
//!
//! The state a fresh install opens with: an empty floor, the café's stock
//! list, and a few days of sales history so the reports have something to
//! show.
//!
//! ## Inventory
//! ```text
//! ┌──────────────────┬───────┬────────┬────────┬──────┬───────────┐
//! │ Item             │ Stock │ Cost   │ Price  │ Menu │ Low stock │
//! ├──────────────────┼───────┼────────┼────────┼──────┼───────────┤
//! │ Espresso Beans   │  100  │ $10.00 │  $3.50 │ yes  │    20     │
//! │ Whole Milk       │   50  │  $2.00 │  $0.50 │ no   │    10     │
//! │ Croissant        │   30  │  $1.00 │  $3.00 │ yes  │     5     │
//! │ Muffin           │   25  │  $1.20 │  $3.25 │ yes  │     5     │
//! │ Vanilla Syrup    │   20  │  $5.00 │  $0.75 │ no   │     5     │
//! │ Green Tea        │   80  │  $8.00 │  $2.50 │ yes  │    15     │
//! │ Decaf Beans      │   50  │ $12.00 │  $3.50 │ yes  │    10     │
//! │ Turkey Sandwich  │   15  │  $3.50 │  $8.50 │ yes  │     5     │
//! └──────────────────┴───────┴────────┴────────┴──────┴───────────┘
//! ```

use cafe_core::{
    AppState, InventoryItem, Money, Order, OrderItem, Sale, DEFAULT_TABLE_COUNT,
};
use chrono::{DateTime, Duration, Utc};

/// `(id, name, stock, cost, price, is_menu_item, low_stock_threshold)`, money in cents.
const INVENTORY: &[(&str, &str, i64, i64, i64, bool, i64)] = &[
    ("coffee-beans-1", "Espresso Beans", 100, 1000, 350, true, 20),
    ("milk-1", "Whole Milk", 50, 200, 50, false, 10),
    ("pastry-1", "Croissant", 30, 100, 300, true, 5),
    ("pastry-2", "Muffin", 25, 120, 325, true, 5),
    ("syrup-1", "Vanilla Syrup", 20, 500, 75, false, 5),
    ("tea-1", "Green Tea", 80, 800, 250, true, 15),
    ("coffee-beans-2", "Decaf Beans", 50, 1200, 350, true, 10),
    ("sandwich-1", "Turkey Sandwich", 15, 350, 850, true, 5),
];

/// Historical sale: lines as `(item_id, quantity)`, days before now, cost in cents.
struct SeedSale {
    lines: &'static [(&'static str, i64)],
    days_ago: i64,
    cost: i64,
}

const SALES: &[SeedSale] = &[
    SeedSale {
        lines: &[("coffee-beans-1", 2), ("pastry-1", 1)],
        days_ago: 1,
        cost: 450,
    },
    SeedSale {
        lines: &[("tea-1", 1), ("pastry-2", 1)],
        days_ago: 2,
        cost: 180,
    },
    SeedSale {
        lines: &[("sandwich-1", 1)],
        days_ago: 1,
        cost: 350,
    },
    SeedSale {
        lines: &[("coffee-beans-1", 5), ("pastry-1", 3)],
        days_ago: 3,
        cost: 1150,
    },
    SeedSale {
        lines: &[("coffee-beans-2", 2)],
        days_ago: 4,
        cost: 300,
    },
];

/// The café's stock list.
pub fn inventory() -> Vec<InventoryItem> {
    INVENTORY
        .iter()
        .map(
            |&(id, name, stock, cost, price, is_menu_item, low_stock_threshold)| InventoryItem {
                id: id.to_string(),
                name: name.to_string(),
                stock,
                cost: Money::from_cents(cost),
                price: Money::from_cents(price),
                is_menu_item,
                low_stock_threshold,
            },
        )
        .collect()
}

/// Seed state with the default floor plan.
pub fn initial_state(now: DateTime<Utc>) -> AppState {
    initial_state_with_tables(now, DEFAULT_TABLE_COUNT)
}

/// Seed state with `table_count` free tables and sales dated relative to `now`.
pub fn initial_state_with_tables(now: DateTime<Utc>, table_count: u32) -> AppState {
    let inventory = inventory();
    let sales = history(&inventory, now);

    AppState {
        inventory,
        sales,
        ..AppState::with_tables(table_count)
    }
}

fn history(inventory: &[InventoryItem], now: DateTime<Utc>) -> Vec<Sale> {
    SALES
        .iter()
        .enumerate()
        .map(|(i, seed)| {
            let date = now - Duration::days(seed.days_ago);
            let mut order = Order::new(format!("order-{}", i + 1), date);
            order.items = seed
                .lines
                .iter()
                .filter_map(|&(item_id, quantity)| {
                    inventory.iter().find(|item| item.id == item_id).map(|item| OrderItem {
                        quantity,
                        served: true,
                        ..OrderItem::from_inventory(item)
                    })
                })
                .collect();

            let revenue = order.total();
            Sale::record(
                format!("sale-{}", i + 1),
                order,
                date,
                revenue,
                Money::from_cents(seed.cost),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cafe_core::TableStatus;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_floor_starts_empty() {
        let state = initial_state(now());
        assert_eq!(state.tables.len(), 12);
        assert!(state.tables.iter().all(|t| t.status == TableStatus::Free && t.order_id.is_none()));
        assert_eq!(state.tables.first().map(|t| t.id), Some(1));
        assert_eq!(state.tables.last().map(|t| t.id), Some(12));
        assert!(state.orders.is_empty());
    }

    #[test]
    fn test_inventory() {
        let state = initial_state(now());
        assert_eq!(state.inventory.len(), 8);

        let beans = state.inventory_item("coffee-beans-1").unwrap();
        assert_eq!(beans.price, Money::from_cents(350));
        assert_eq!(beans.low_stock_threshold, 20);

        let menu: Vec<&str> = state.menu_items().map(|i| i.name.as_str()).collect();
        assert!(!menu.contains(&"Whole Milk"));
        assert!(!menu.contains(&"Vanilla Syrup"));
        assert_eq!(menu.len(), 6);
        assert_eq!(state.low_stock_items().count(), 0);
    }

    #[test]
    fn test_sales_history() {
        let state = initial_state(now());
        assert_eq!(state.sales.len(), 5);

        let revenue: Vec<i64> = state.sales.iter().map(|s| s.total_revenue.cents()).collect();
        assert_eq!(revenue, vec![1000, 575, 850, 2650, 700]);

        for sale in &state.sales {
            assert_eq!(sale.profit, sale.total_revenue - sale.total_cost);
            assert!(sale.order.all_served());
            assert!(sale.date < now());
            assert!(sale.date >= now() - Duration::days(4));
        }
    }

    #[test]
    fn test_custom_table_count() {
        let state = initial_state_with_tables(now(), 4);
        assert_eq!(state.tables.len(), 4);
        assert_eq!(state.inventory.len(), 8);
    }
}
