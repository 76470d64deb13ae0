//! # cafe-store: State Controller for Café POS
//!
//! Owns the one live [`AppState`](cafe_core::AppState), feeds it actions, and
//! carries the pieces that touch the outside world: config, logging and the
//! bill service.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           cafe-store                                    │
//! │                                                                         │
//! │   CafeConfig::load ──► Store::from_config ──► seed::initial_state       │
//! │                              │                                          │
//! │           dispatch(Action)   │   subscribe() / snapshot()               │
//! │   UI ───────────────────────►│◄──────────────────────────────── UI      │
//! │                              │                                          │
//! │                              ▼                                          │
//! │                  cafe_core::reducer::apply                              │
//! │                                                                         │
//! │   bill_request_for_table ──► generate_bill(&dyn BillService)            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use cafe_store::{CafeConfig, Store};
//!
//! let store = Store::from_config(&CafeConfig::default());
//! store.create_order(5);
//!
//! let order_id = store.snapshot().order_for_table(5).unwrap().id.clone();
//! store.add_item_to_order(&order_id, "pastry-1");
//! assert!(store.clear_table(5).is_applied());
//! ```

pub mod bill_service;
pub mod config;
pub mod error;
pub mod seed;
pub mod store;
pub mod telemetry;

pub use bill_service::{generate_bill, BillService, LocalBillService};
pub use config::CafeConfig;
pub use error::{StoreError, StoreResult};
pub use store::{DispatchOutcome, Store};
pub use telemetry::init_tracing;
