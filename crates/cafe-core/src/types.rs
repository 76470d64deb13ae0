//! # Domain Types
//!
//! The four containers the café state is made of, and the records inside them.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                              AppState                                   │
//! │                                                                         │
//! │  ┌───────────────┐   ┌───────────────┐   ┌─────────────────────┐        │
//! │  │    Table      │   │    Order      │   │   InventoryItem     │        │
//! │  │  ───────────  │   │  ───────────  │   │  ─────────────────  │        │
//! │  │  id (1..=12)  │──►│  id           │   │  id                 │        │
//! │  │  status       │   │  items ───────┼──►│  name, stock        │        │
//! │  │  order_id?    │   │  created_at   │ by│  cost, price        │        │
//! │  └───────────────┘   └───────┬───────┘ id│  is_menu_item       │        │
//! │                              │ by value  │  low_stock_threshold│        │
//! │                      ┌───────▼───────┐   └─────────────────────┘        │
//! │                      │     Sale      │                                  │
//! │                      │  revenue/cost │                                  │
//! │                      │  profit       │                                  │
//! │                      └───────────────┘                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Order lines reference inventory by id but snapshot `name` and `price` at
//! the moment they are added. Repricing a croissant never changes what an
//! open order already says about it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Inventory
// =============================================================================

/// A stocked good. Menu items can be put on an order, the rest (milk, syrup)
/// are tracked for stock only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    /// Units on hand. Goes negative when a cleared table oversold it.
    pub stock: i64,
    /// What one unit costs the café.
    pub cost: Money,
    /// What one unit sells for.
    pub price: Money,
    pub is_menu_item: bool,
    pub low_stock_threshold: i64,
}

impl InventoryItem {
    /// At or below the threshold the inventory screen flags the row.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.low_stock_threshold
    }

    /// Whether the order screen offers this item.
    ///
    /// Only a UI hint: the reducer accepts out-of-stock adds.
    #[inline]
    pub fn is_available(&self) -> bool {
        self.is_menu_item && self.stock > 0
    }
}

/// Payload of `AddInventoryItem`: an inventory item before it has an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewInventoryItem {
    pub name: String,
    pub stock: i64,
    pub cost: Money,
    pub price: Money,
    pub is_menu_item: bool,
    pub low_stock_threshold: i64,
}

impl NewInventoryItem {
    /// Attaches an id, producing the stored record.
    pub fn with_id(self, id: String) -> InventoryItem {
        InventoryItem {
            id,
            name: self.name,
            stock: self.stock,
            cost: self.cost,
            price: self.price,
            is_menu_item: self.is_menu_item,
            low_stock_threshold: self.low_stock_threshold,
        }
    }
}

impl Default for NewInventoryItem {
    /// The blank inventory form: nothing in stock, not on the menu,
    /// warn below 10.
    fn default() -> Self {
        NewInventoryItem {
            name: String::new(),
            stock: 0,
            cost: Money::zero(),
            price: Money::zero(),
            is_menu_item: false,
            low_stock_threshold: 10,
        }
    }
}

// =============================================================================
// Tables
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum TableStatus {
    #[default]
    Free,
    Occupied,
}

/// A seating unit. The set of tables is fixed when the store starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Table {
    pub id: u32,
    pub status: TableStatus,
    /// The open order while Occupied, `None` while Free.
    pub order_id: Option<String>,
}

impl Table {
    /// A free table with no order.
    pub fn free(id: u32) -> Self {
        Table {
            id,
            status: TableStatus::Free,
            order_id: None,
        }
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.status == TableStatus::Occupied
    }
}

// =============================================================================
// Orders
// =============================================================================

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderItem {
    /// Inventory id this line was rung up from.
    pub item_id: String,
    /// Name at the time of the first add (frozen).
    pub name: String,
    pub quantity: i64,
    /// Unit price at the time of the first add (frozen).
    pub price: Money,
    /// Flips to true once, never back.
    pub served: bool,
}

impl OrderItem {
    /// A fresh unserved line of one, snapshotting the item's name and price.
    pub fn from_inventory(item: &InventoryItem) -> Self {
        OrderItem {
            item_id: item.id.clone(),
            name: item.name.clone(),
            quantity: 1,
            price: item.price,
            served: false,
        }
    }

    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

/// The running tab for one table visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Order {
    pub id: String,
    /// Display order is insertion order. At most one line per `item_id`.
    pub items: Vec<OrderItem>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn new(id: String, created_at: DateTime<Utc>) -> Self {
        Order {
            id,
            items: Vec::new(),
            created_at,
        }
    }

    /// Sum of line totals, computed on every call so it can never go stale.
    pub fn total(&self) -> Money {
        self.items.iter().map(OrderItem::line_total).sum()
    }

    pub fn line(&self, item_id: &str) -> Option<&OrderItem> {
        self.items.iter().find(|i| i.item_id == item_id)
    }

    /// True when every line has gone out to the table (vacuously for an empty order).
    pub fn all_served(&self) -> bool {
        self.items.iter().all(|i| i.served)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Sales
// =============================================================================

/// The finalized record written when a table is cleared.
///
/// Build it with [`Sale::record`] so `profit` is always
/// `total_revenue - total_cost`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Sale {
    pub id: String,
    /// Owned copy of the order as it stood at clear time.
    pub order: Order,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    pub total_revenue: Money,
    pub total_cost: Money,
    pub profit: Money,
}

impl Sale {
    pub fn record(
        id: String,
        order: Order,
        date: DateTime<Utc>,
        total_revenue: Money,
        total_cost: Money,
    ) -> Self {
        Sale {
            id,
            order,
            date,
            total_revenue,
            total_cost,
            profit: total_revenue - total_cost,
        }
    }
}

// =============================================================================
// Application State
// =============================================================================

/// One immutable snapshot of everything the café knows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AppState {
    pub tables: Vec<Table>,
    pub orders: Vec<Order>,
    pub inventory: Vec<InventoryItem>,
    pub sales: Vec<Sale>,
}

impl AppState {
    /// An empty state with tables `1..=table_count`, all free.
    pub fn with_tables(table_count: u32) -> Self {
        AppState {
            tables: (1..=table_count).map(Table::free).collect(),
            ..AppState::default()
        }
    }

    pub fn table(&self, id: u32) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == id)
    }

    pub fn order(&self, id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    pub fn inventory_item(&self, id: &str) -> Option<&InventoryItem> {
        self.inventory.iter().find(|i| i.id == id)
    }

    /// The open order seated at `table_id`, if any.
    pub fn order_for_table(&self, table_id: u32) -> Option<&Order> {
        let order_id = self.table(table_id)?.order_id.as_deref()?;
        self.order(order_id)
    }

    /// Items that may be put on an order, in inventory order.
    pub fn menu_items(&self) -> impl Iterator<Item = &InventoryItem> {
        self.inventory.iter().filter(|i| i.is_menu_item)
    }

    pub fn low_stock_items(&self) -> impl Iterator<Item = &InventoryItem> {
        self.inventory.iter().filter(|i| i.is_low_stock())
    }

    pub fn occupied_count(&self) -> usize {
        self.tables.iter().filter(|t| t.is_occupied()).count()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn croissant(stock: i64) -> InventoryItem {
        InventoryItem {
            id: "pastry-1".to_string(),
            name: "Croissant".to_string(),
            stock,
            cost: Money::from_cents(100),
            price: Money::from_cents(300),
            is_menu_item: true,
            low_stock_threshold: 5,
        }
    }

    #[test]
    fn test_low_stock_is_inclusive() {
        assert!(croissant(5).is_low_stock());
        assert!(croissant(-2).is_low_stock());
        assert!(!croissant(6).is_low_stock());
    }

    #[test]
    fn test_availability_needs_menu_flag_and_stock() {
        assert!(croissant(1).is_available());
        assert!(!croissant(0).is_available());

        let mut milk = croissant(50);
        milk.is_menu_item = false;
        assert!(!milk.is_available());
    }

    #[test]
    fn test_order_total_is_computed() {
        let mut order = Order::new("order-1".to_string(), Utc::now());
        assert_eq!(order.total(), Money::zero());

        let mut line = OrderItem::from_inventory(&croissant(10));
        line.quantity = 3;
        order.items.push(line);
        assert_eq!(order.total(), Money::from_cents(900));
        assert!(!order.all_served());
    }

    #[test]
    fn test_sale_profit_is_derived() {
        let order = Order::new("order-1".to_string(), Utc::now());
        let sale = Sale::record(
            "sale-1".to_string(),
            order,
            Utc::now(),
            Money::from_cents(1000),
            Money::from_cents(2100),
        );
        assert_eq!(sale.profit, Money::from_cents(-1100));
        assert_eq!(sale.profit, sale.total_revenue - sale.total_cost);
    }

    #[test]
    fn test_order_for_table() {
        let mut state = AppState::with_tables(3);
        assert_eq!(state.tables.len(), 3);
        assert!(state.order_for_table(2).is_none());

        state.orders.push(Order::new("order-a".to_string(), Utc::now()));
        state.tables[1].status = TableStatus::Occupied;
        state.tables[1].order_id = Some("order-a".to_string());

        assert_eq!(state.order_for_table(2).map(|o| o.id.as_str()), Some("order-a"));
        assert_eq!(state.occupied_count(), 1);
        assert!(state.order_for_table(99).is_none());
    }

    #[test]
    fn test_camel_case_wire_format() {
        let json = serde_json::to_value(Table::free(7)).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["status"], "Free");
        assert!(json["orderId"].is_null());
    }
}
