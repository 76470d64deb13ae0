//! # Order & Inventory Reducer
//!
//! Applies one [`Action`] to an [`AppState`] snapshot and returns the next one.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Table Free ── CreateOrder ──► Table Occupied ◄─────────────┐           │
//! │                                    │                        │           │
//! │                     AddItemToOrder / RemoveItemFromOrder    │           │
//! │                     UpdateItemQuantity / MarkItemAsServed ──┘           │
//! │                                    │                                    │
//! │                                ClearTable                               │
//! │                                    │                                    │
//! │           ┌────────────────────────┼────────────────────────┐           │
//! │           ▼                        ▼                        ▼           │
//! │    stock −= quantity        Sale appended            Table Free         │
//! │    (matched lines)     (revenue, cost, profit)     (order kept)         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules
//! - The input snapshot is never mutated; every change builds a new state.
//! - Every action is total. When a referenced table, order, line or item
//!   does not exist the action is a no-op and the state comes back equal.
//! - Stock is only touched by `ClearTable`, and it is allowed to go negative.
//! - Quantity, stock and money arithmetic saturates, so no input can panic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;
use crate::types::{
    AppState, InventoryItem, NewInventoryItem, Order, OrderItem, Sale, TableStatus,
};

// =============================================================================
// Actions
// =============================================================================

/// The closed set of state transitions the UI can request.
///
/// Serialized as `{ "type": "ADD_ITEM_TO_ORDER", "payload": { ... } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum Action {
    CreateOrder {
        table_id: u32,
    },
    AddItemToOrder {
        order_id: String,
        item_id: String,
    },
    RemoveItemFromOrder {
        order_id: String,
        item_id: String,
    },
    /// Absolute set. Zero or below removes the line.
    UpdateItemQuantity {
        order_id: String,
        item_id: String,
        quantity: i64,
    },
    MarkItemAsServed {
        order_id: String,
        item_id: String,
    },
    ClearTable {
        table_id: u32,
    },
    AddInventoryItem {
        item: NewInventoryItem,
    },
    UpdateInventoryItem {
        item: InventoryItem,
    },
}

impl Action {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Action::CreateOrder { .. } => "create_order",
            Action::AddItemToOrder { .. } => "add_item_to_order",
            Action::RemoveItemFromOrder { .. } => "remove_item_from_order",
            Action::UpdateItemQuantity { .. } => "update_item_quantity",
            Action::MarkItemAsServed { .. } => "mark_item_as_served",
            Action::ClearTable { .. } => "clear_table",
            Action::AddInventoryItem { .. } => "add_inventory_item",
            Action::UpdateInventoryItem { .. } => "update_inventory_item",
        }
    }
}

// =============================================================================
// Environment
// =============================================================================

/// Which kind of record a new id is for. Becomes the id prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    Order,
    Sale,
    Inventory,
}

impl IdKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            IdKind::Order => "order",
            IdKind::Sale => "sale",
            IdKind::Inventory => "inv",
        }
    }
}

/// The only non-deterministic inputs the reducer needs.
pub trait Environment {
    fn new_id(&self, kind: IdKind) -> String;
    fn now(&self) -> DateTime<Utc>;
}

/// UUID v4 ids (`order-<uuid>`) and the wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn new_id(&self, kind: IdKind) -> String {
        format!("{}-{}", kind.prefix(), Uuid::new_v4())
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

// =============================================================================
// Reducer
// =============================================================================

/// Returns the state after `action`. Unmet preconditions return a clone of
/// `state`.
pub fn reduce(state: &AppState, action: Action, env: &impl Environment) -> AppState {
    apply(state, action, env).unwrap_or_else(|| state.clone())
}

/// Like [`reduce`] but `None` means the action was a no-op.
pub fn apply(state: &AppState, action: Action, env: &impl Environment) -> Option<AppState> {
    match action {
        Action::CreateOrder { table_id } => create_order(state, table_id, env),
        Action::AddItemToOrder { order_id, item_id } => {
            add_item_to_order(state, &order_id, &item_id)
        }
        Action::RemoveItemFromOrder { order_id, item_id } => {
            remove_item_from_order(state, &order_id, &item_id)
        }
        Action::UpdateItemQuantity {
            order_id,
            item_id,
            quantity,
        } => update_item_quantity(state, &order_id, &item_id, quantity),
        Action::MarkItemAsServed { order_id, item_id } => {
            mark_item_as_served(state, &order_id, &item_id)
        }
        Action::ClearTable { table_id } => clear_table(state, table_id, env),
        Action::AddInventoryItem { item } => Some(add_inventory_item(state, item, env)),
        Action::UpdateInventoryItem { item } => update_inventory_item(state, item),
    }
}

fn create_order(state: &AppState, table_id: u32, env: &impl Environment) -> Option<AppState> {
    let table_index = state.tables.iter().position(|t| t.id == table_id)?;

    // A seated table is re-pointed at the new order; the old one stays in
    // `orders`.
    let order = Order::new(env.new_id(IdKind::Order), env.now());
    let mut next = state.clone();
    let table = &mut next.tables[table_index];
    table.status = TableStatus::Occupied;
    table.order_id = Some(order.id.clone());
    next.orders.push(order);
    Some(next)
}

fn add_item_to_order(state: &AppState, order_id: &str, item_id: &str) -> Option<AppState> {
    let item = state.inventory_item(item_id)?;
    let order_index = find_order(state, order_id)?;

    let mut next = state.clone();
    let items = &mut next.orders[order_index].items;
    match items.iter().position(|line| line.item_id == item_id) {
        Some(line) => items[line].quantity = items[line].quantity.saturating_add(1),
        None => items.push(OrderItem::from_inventory(item)),
    }
    Some(next)
}

fn remove_item_from_order(state: &AppState, order_id: &str, item_id: &str) -> Option<AppState> {
    let (order_index, line_index) = line_position(state, order_id, item_id)?;

    let mut next = state.clone();
    next.orders[order_index].items.remove(line_index);
    Some(next)
}

fn update_item_quantity(
    state: &AppState,
    order_id: &str,
    item_id: &str,
    quantity: i64,
) -> Option<AppState> {
    if quantity <= 0 {
        return remove_item_from_order(state, order_id, item_id);
    }

    let (order_index, line_index) = line_position(state, order_id, item_id)?;
    if state.orders[order_index].items[line_index].quantity == quantity {
        return None;
    }

    let mut next = state.clone();
    next.orders[order_index].items[line_index].quantity = quantity;
    Some(next)
}

fn mark_item_as_served(state: &AppState, order_id: &str, item_id: &str) -> Option<AppState> {
    let (order_index, line_index) = line_position(state, order_id, item_id)?;
    if state.orders[order_index].items[line_index].served {
        return None;
    }

    let mut next = state.clone();
    next.orders[order_index].items[line_index].served = true;
    Some(next)
}

fn clear_table(state: &AppState, table_id: u32, env: &impl Environment) -> Option<AppState> {
    let table_index = state.tables.iter().position(|t| t.id == table_id)?;
    let order_id = state.tables[table_index].order_id.as_deref()?;
    let order = state.order(order_id)?;

    let mut next = state.clone();

    // Lines whose inventory item has since disappeared still count toward
    // revenue but contribute no cost and deduct nothing.
    let mut total_cost = Money::zero();
    for line in &order.items {
        if let Some(stocked) = next.inventory.iter_mut().find(|i| i.id == line.item_id) {
            stocked.stock = stocked.stock.saturating_sub(line.quantity);
            total_cost += stocked.cost.multiply_quantity(line.quantity);
        }
    }
    let total_revenue = order.total();

    next.sales.push(Sale::record(
        env.new_id(IdKind::Sale),
        order.clone(),
        env.now(),
        total_revenue,
        total_cost,
    ));

    let table = &mut next.tables[table_index];
    table.status = TableStatus::Free;
    table.order_id = None;
    Some(next)
}

fn add_inventory_item(
    state: &AppState,
    item: NewInventoryItem,
    env: &impl Environment,
) -> AppState {
    let mut next = state.clone();
    next.inventory.push(item.with_id(env.new_id(IdKind::Inventory)));
    next
}

fn update_inventory_item(state: &AppState, item: InventoryItem) -> Option<AppState> {
    let index = state.inventory.iter().position(|i| i.id == item.id)?;
    if state.inventory[index] == item {
        return None;
    }

    let mut next = state.clone();
    next.inventory[index] = item;
    Some(next)
}

fn find_order(state: &AppState, order_id: &str) -> Option<usize> {
    state.orders.iter().position(|o| o.id == order_id)
}

fn line_position(state: &AppState, order_id: &str, item_id: &str) -> Option<(usize, usize)> {
    let order_index = find_order(state, order_id)?;
    let line_index = state.orders[order_index]
        .items
        .iter()
        .position(|line| line.item_id == item_id)?;
    Some((order_index, line_index))
}

// =============================================================================
// Unit Tests
// =============================================================================
