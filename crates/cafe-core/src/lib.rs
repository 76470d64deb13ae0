//! # cafe-core: Pure Business Logic for Café POS
//!
//! Tables, orders, inventory and sales, and the reducer that moves a café
//! between them. No I/O: everything here is a function of its inputs.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Café POS Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │        UI: table grid · order modal · inventory · reports       │    │
//! │  └───────────────┬───────────────────────────────▲─────────────────┘    │
//! │                  │ Action                        │ Arc<AppState>        │
//! │  ┌───────────────▼───────────────────────────────┴─────────────────┐    │
//! │  │          cafe-store: Store (single writer, watch channel)       │    │
//! │  │          config · tracing · BillService boundary                │    │
//! │  └───────────────┬─────────────────────────────────────────────────┘    │
//! │                  │                                                      │
//! │  ┌───────────────▼─────────────────────────────────────────────────┐    │
//! │  │               ★ cafe-core (THIS CRATE) ★                        │    │
//! │  │                                                                 │    │
//! │  │   types · money · reducer · validation · reports · bill         │    │
//! │  │                                                                 │    │
//! │  │   NO I/O • NO LOGGING • PURE FUNCTIONS                          │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Tables, orders, inventory items, sales, `AppState`
//! - [`money`] - Integer-cent `Money` and basis-point `TaxRate`
//! - [`reducer`] - The `Action` enum and `reduce`
//! - [`validation`] - Inventory form and bill request checks
//! - [`reports`] - Dashboard aggregation over the sales list
//! - [`bill`] - Bill service contract and receipt rendering
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use cafe_core::reducer::{reduce, Action, SystemEnvironment};
//! use cafe_core::{AppState, TableStatus};
//!
//! let env = SystemEnvironment;
//! let state = AppState::with_tables(12);
//! let state = reduce(&state, Action::CreateOrder { table_id: 3 }, &env);
//!
//! assert_eq!(state.table(3).unwrap().status, TableStatus::Occupied);
//! assert!(state.order_for_table(3).unwrap().items.is_empty());
//! ```

pub mod bill;
pub mod error;
pub mod money;
pub mod reducer;
pub mod reports;
pub mod types;
pub mod validation;

// These allow users to do `use cafe_core::Money` instead of
// `use cafe_core::money::Money`
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, TaxRate};
pub use reducer::{Action, Environment, SystemEnvironment};
pub use types::*;

/// Tables the café seats when nothing else is configured.
pub const DEFAULT_TABLE_COUNT: u32 = 12;

/// Sales tax applied to bills: 8.5%.
pub const DEFAULT_SALES_TAX_BPS: u32 = 850;
