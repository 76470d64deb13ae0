//! # Store
//!
//! The single writer of [`AppState`]. Every change goes through
//! [`Store::dispatch`], which runs the reducer and publishes the new snapshot
//! to subscribers.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   UI event ──► Store::dispatch(Action)                                  │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │            reducer::apply(&current, action, &env)                       │
//! │                      │                                                  │
//! │          ┌───────────┴────────────┐                                     │
//! │          ▼                        ▼                                     │
//! │   Some(next)                    None                                    │
//! │   swap Arc, notify              keep Arc, nobody woken                  │
//! │   DispatchOutcome::Applied      DispatchOutcome::Unchanged              │
//! │          │                                                              │
//! │          ▼                                                              │
//! │   watch::Receiver<Arc<AppState>> (table grid, inventory, reports)       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Dispatches are serialized by the channel's write lock, so actions apply
//! one at a time in arrival order. Readers hold an `Arc` to an immutable
//! snapshot and never block the writer for longer than a pointer swap.

use std::sync::Arc;

use cafe_core::bill::BillRequest;
use cafe_core::reducer::{apply, Action, Environment, SystemEnvironment};
use cafe_core::reports::SalesReport;
use cafe_core::validation::validate_inventory_item;
use cafe_core::{AppState, CoreError, CoreResult, InventoryItem, NewInventoryItem, TaxRate};
use chrono::{NaiveDate, Utc};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::config::CafeConfig;
use crate::error::StoreResult;
use crate::seed;

/// Whether a dispatch changed the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Applied,
    /// The action's preconditions were not met; subscribers were not notified.
    Unchanged,
}

impl DispatchOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, DispatchOutcome::Applied)
    }
}

pub struct Store<E = SystemEnvironment> {
    state_tx: watch::Sender<Arc<AppState>>,
    env: E,
}

impl Store<SystemEnvironment> {
    /// A store opened on the seed data with the default floor plan.
    pub fn with_seed() -> Self {
        Store::new(seed::initial_state(Utc::now()), SystemEnvironment)
    }

    /// A store opened on the seed data, sized by `config`.
    pub fn from_config(config: &CafeConfig) -> Self {
        let state = seed::initial_state_with_tables(Utc::now(), config.floor.table_count);
        info!(
            store = %config.store.name,
            tables = config.floor.table_count,
            "Opening cafe store"
        );
        Store::new(state, SystemEnvironment)
    }
}

impl<E: Environment> Store<E> {
    pub fn new(initial: AppState, env: E) -> Self {
        let (state_tx, _) = watch::channel(Arc::new(initial));
        Store { state_tx, env }
    }

    /// Applies `action` to the current state.
    pub fn dispatch(&self, action: Action) -> DispatchOutcome {
        let name = action.name();
        let mut recorded = None;

        let modified = self.state_tx.send_if_modified(|current| {
            match apply(&**current, action, &self.env) {
                Some(next) => {
                    if next.sales.len() > current.sales.len() {
                        recorded = next.sales.last().cloned();
                    }
                    *current = Arc::new(next);
                    true
                }
                None => false,
            }
        });

        if let Some(sale) = recorded {
            info!(
                sale_id = %sale.id,
                revenue = %sale.total_revenue,
                cost = %sale.total_cost,
                profit = %sale.profit,
                "Sale recorded"
            );
        }

        if modified {
            debug!(action = name, "Action applied");
            DispatchOutcome::Applied
        } else {
            debug!(action = name, "Action was a no-op");
            DispatchOutcome::Unchanged
        }
    }

    /// The current state. Cheap: clones an `Arc`.
    pub fn snapshot(&self) -> Arc<AppState> {
        self.state_tx.borrow().clone()
    }

    /// A receiver that is woken after every applied action.
    pub fn subscribe(&self) -> watch::Receiver<Arc<AppState>> {
        self.state_tx.subscribe()
    }

    // =========================================================================
    // Order Operations
    // =========================================================================

    pub fn create_order(&self, table_id: u32) -> DispatchOutcome {
        self.dispatch(Action::CreateOrder { table_id })
    }

    pub fn add_item_to_order(&self, order_id: &str, item_id: &str) -> DispatchOutcome {
        self.dispatch(Action::AddItemToOrder {
            order_id: order_id.to_string(),
            item_id: item_id.to_string(),
        })
    }

    pub fn remove_item_from_order(&self, order_id: &str, item_id: &str) -> DispatchOutcome {
        self.dispatch(Action::RemoveItemFromOrder {
            order_id: order_id.to_string(),
            item_id: item_id.to_string(),
        })
    }

    /// Zero or negative removes the line.
    pub fn update_item_quantity(
        &self,
        order_id: &str,
        item_id: &str,
        quantity: i64,
    ) -> DispatchOutcome {
        self.dispatch(Action::UpdateItemQuantity {
            order_id: order_id.to_string(),
            item_id: item_id.to_string(),
            quantity,
        })
    }

    pub fn mark_item_as_served(&self, order_id: &str, item_id: &str) -> DispatchOutcome {
        self.dispatch(Action::MarkItemAsServed {
            order_id: order_id.to_string(),
            item_id: item_id.to_string(),
        })
    }

    pub fn clear_table(&self, table_id: u32) -> DispatchOutcome {
        self.dispatch(Action::ClearTable { table_id })
    }

    // =========================================================================
    // Inventory Operations
    // =========================================================================

    /// Validates the form, then adds the item under a fresh id.
    pub fn add_inventory_item(&self, item: NewInventoryItem) -> StoreResult<DispatchOutcome> {
        validate_inventory_item(&item)?;
        Ok(self.dispatch(Action::AddInventoryItem { item }))
    }

    /// Validates the edit, then replaces the stored record with the same id.
    ///
    /// An unknown id is `Unchanged`, the same as the raw action.
    pub fn update_inventory_item(&self, item: InventoryItem) -> StoreResult<DispatchOutcome> {
        validate_inventory_item(&NewInventoryItem {
            name: item.name.clone(),
            stock: item.stock,
            cost: item.cost,
            price: item.price,
            is_menu_item: item.is_menu_item,
            low_stock_threshold: item.low_stock_threshold,
        })?;

        Ok(self.dispatch(Action::UpdateInventoryItem { item }))
    }

    // =========================================================================
    // Read Side
    // =========================================================================

    /// The bill request for whatever is on `table_id`'s order right now.
    pub fn bill_request_for_table(
        &self,
        table_id: u32,
        sales_tax_rate: TaxRate,
    ) -> CoreResult<BillRequest> {
        let state = self.snapshot();
        let table = state
            .table(table_id)
            .ok_or(CoreError::TableNotFound(table_id))?;
        let order_id = table
            .order_id
            .as_deref()
            .ok_or(CoreError::TableHasNoOrder(table_id))?;
        let order = state
            .order(order_id)
            .ok_or_else(|| CoreError::OrderNotFound(order_id.to_string()))?;

        Ok(BillRequest::from_order(order, sales_tax_rate))
    }

    /// Dashboard figures for the week ending on `today`.
    pub fn report(&self, today: NaiveDate) -> SalesReport {
        SalesReport::build(&self.snapshot().sales, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cafe_core::reducer::IdKind;
    use cafe_core::{Money, TableStatus, ValidationError};
    use chrono::{DateTime, TimeZone};
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::Duration;

    /// Sequential ids (`order-1`, `sale-2`, ...) and a frozen clock.
    struct TestEnvironment {
        next: AtomicU64,
    }

    impl TestEnvironment {
        fn new() -> Self {
            TestEnvironment {
                next: AtomicU64::new(1),
            }
        }
    }

    impl Environment for TestEnvironment {
        fn new_id(&self, kind: IdKind) -> String {
            format!("{}-{}", kind.prefix(), self.next.fetch_add(1, Ordering::SeqCst))
        }

        fn now(&self) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap()
        }
    }

    fn store() -> Store<TestEnvironment> {
        let env = TestEnvironment::new();
        Store::new(seed::initial_state(env.now()), env)
    }

    fn croissant_form() -> NewInventoryItem {
        NewInventoryItem {
            name: "Almond Croissant".to_string(),
            stock: 12,
            cost: Money::from_cents(140),
            price: Money::from_cents(375),
            is_menu_item: true,
            ..NewInventoryItem::default()
        }
    }

    #[test]
    fn test_order_round_trip_to_sale() {
        let store = store();
        assert!(store.create_order(3).is_applied());
        let order_id = store.snapshot().order_for_table(3).unwrap().id.clone();
        assert_eq!(order_id, "order-1");

        store.add_item_to_order(&order_id, "coffee-beans-1");
        store.add_item_to_order(&order_id, "coffee-beans-1");
        store.add_item_to_order(&order_id, "pastry-1");
        store.mark_item_as_served(&order_id, "pastry-1");

        assert!(store.clear_table(3).is_applied());

        let state = store.snapshot();
        let table = state.table(3).unwrap();
        assert_eq!(table.status, TableStatus::Free);
        assert!(table.order_id.is_none());

        let sale = state.sales.last().unwrap();
        assert_eq!(sale.id, "sale-2");
        assert_eq!(sale.total_revenue, Money::from_cents(1000));
        assert_eq!(sale.total_cost, Money::from_cents(2100));
        assert_eq!(sale.profit, Money::from_cents(-1100));
        assert_eq!(state.inventory_item("coffee-beans-1").unwrap().stock, 98);
        assert_eq!(state.inventory_item("pastry-1").unwrap().stock, 29);
    }

    #[test]
    fn test_no_op_keeps_the_same_snapshot() {
        let store = store();
        let before = store.snapshot();

        assert_eq!(store.clear_table(5), DispatchOutcome::Unchanged);
        assert_eq!(store.create_order(99), DispatchOutcome::Unchanged);
        assert_eq!(
            store.add_item_to_order("order-missing", "coffee-beans-1"),
            DispatchOutcome::Unchanged
        );

        assert!(Arc::ptr_eq(&before, &store.snapshot()));
    }

    #[test]
    fn test_snapshots_are_immutable() {
        let store = store();
        let before = store.snapshot();
        store.create_order(1);

        assert!(before.order_for_table(1).is_none());
        assert!(store.snapshot().order_for_table(1).is_some());
    }

    #[test]
    fn test_add_inventory_item_validates_first() {
        let store = store();

        let err = store
            .add_inventory_item(NewInventoryItem {
                name: "X".to_string(),
                ..croissant_form()
            })
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(store.snapshot().inventory.len(), 8);

        assert!(store.add_inventory_item(croissant_form()).unwrap().is_applied());
        let state = store.snapshot();
        let added = state.inventory.last().unwrap();
        assert_eq!(added.id, "inv-1");
        assert_eq!(added.low_stock_threshold, 10);
    }

    #[test]
    fn test_update_inventory_item() {
        let store = store();
        let mut muffin = store.snapshot().inventory_item("pastry-2").unwrap().clone();
        muffin.price = Money::from_cents(350);

        assert!(store.update_inventory_item(muffin.clone()).unwrap().is_applied());
        assert_eq!(
            store.snapshot().inventory_item("pastry-2").unwrap().price,
            Money::from_cents(350)
        );

        // Same record again changes nothing
        assert_eq!(
            store.update_inventory_item(muffin.clone()).unwrap(),
            DispatchOutcome::Unchanged
        );

        muffin.stock = -1;
        let err = store.update_inventory_item(muffin.clone()).unwrap_err();
        assert!(err.is_validation());

        let ghost = InventoryItem {
            id: "inv-ghost".to_string(),
            stock: 1,
            ..muffin
        };
        let before = store.snapshot();
        assert_eq!(
            store.update_inventory_item(ghost).unwrap(),
            DispatchOutcome::Unchanged
        );
        assert!(Arc::ptr_eq(&before, &store.snapshot()));
    }

    #[test]
    fn test_bill_request_for_table() {
        let store = store();
        let rate = TaxRate::from_bps(850);

        assert!(matches!(
            store.bill_request_for_table(42, rate),
            Err(CoreError::TableNotFound(42))
        ));
        assert!(matches!(
            store.bill_request_for_table(2, rate),
            Err(CoreError::TableHasNoOrder(2))
        ));

        store.create_order(2);
        let order_id = store.snapshot().order_for_table(2).unwrap().id.clone();
        store.add_item_to_order(&order_id, "sandwich-1");
        store.update_item_quantity(&order_id, "sandwich-1", 2);

        let request = store.bill_request_for_table(2, rate).unwrap();
        assert_eq!(request.order_items.len(), 1);
        assert_eq!(request.order_items[0].name, "Turkey Sandwich");
        assert_eq!(request.order_items[0].quantity, 2);
        assert_eq!(request.sales_tax_rate, rate);
    }

    #[test]
    fn test_report_includes_new_sales() {
        let store = store();
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let before = store.report(today);

        store.create_order(1);
        let order_id = store.snapshot().order_for_table(1).unwrap().id.clone();
        store.add_item_to_order(&order_id, "tea-1");
        store.clear_table(1);

        let after = store.report(today);
        assert_eq!(after.total_orders, before.total_orders + 1);
        assert_eq!(after.total_revenue, before.total_revenue + Money::from_cents(250));
        assert_eq!(after.daily[6].revenue, Money::from_cents(250));
    }

    #[test]
    fn test_validation_error_surface() {
        let store = store();
        let err = store
            .add_inventory_item(NewInventoryItem {
                price: Money::from_cents(-1),
                ..croissant_form()
            })
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            format!(
                "Validation error: {}",
                ValidationError::Negative {
                    field: "price".to_string()
                }
            )
        );
    }

    #[tokio::test]
    async fn test_subscribers_see_applied_actions_only() {
        let store = store();
        let mut rx = store.subscribe();

        store.clear_table(7);
        assert!(!rx.has_changed().unwrap());

        store.create_order(7);
        assert!(rx.has_changed().unwrap());
        let seen = rx.borrow_and_update().clone();
        assert_eq!(seen.table(7).unwrap().status, TableStatus::Occupied);
    }

    #[tokio::test]
    async fn test_subscriber_task_wakes_on_dispatch() {
        let store = store();
        let mut rx = store.subscribe();

        let watcher = tokio::spawn(async move {
            rx.changed().await.unwrap();
            let state = rx.borrow().clone();
            state.occupied_count()
        });

        store.create_order(4);

        let occupied = tokio::time::timeout(Duration::from_secs(1), watcher)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(occupied, 1);
    }
}
