//! # Bill Service
//!
//! Turns a [`BillRequest`] into customer-facing bill text.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  BillRequest ──► validate ──► BillService::generate ──► BillOutcome     │
//! │                     │                  │                                │
//! │                     ▼                  ▼                                │
//! │          { error: "Invalid input." }   { error: "Failed to generate     │
//! │                                                   bill using AI." }     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The caller only ever sees a [`BillOutcome`]. Failure details go to the log.

use async_trait::async_trait;
use cafe_core::bill::{render_receipt, BillOutcome, BillRequest, ReceiptHeader};
use cafe_core::validation::validate_bill_request;
use chrono::Utc;
use tracing::{debug, error, warn};

use crate::config::CafeConfig;
use crate::error::{StoreError, StoreResult};

/// Message returned when the request fails validation.
pub const INVALID_INPUT_MESSAGE: &str = "Invalid input.";

/// Message returned when the service errors or answers with nothing.
/// The UI matches on this text, so it must not change.
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate bill using AI.";

/// Something that can write a bill.
///
/// Implementations may be slow (a remote text generator); the store never
/// holds state across the call.
#[async_trait]
pub trait BillService: Send + Sync {
    async fn generate(&self, request: &BillRequest) -> StoreResult<String>;
}

/// Renders the plain receipt locally. Always available, never fails.
#[derive(Debug, Clone)]
pub struct LocalBillService {
    store_name: String,
    currency_symbol: String,
    width: usize,
}

impl LocalBillService {
    pub fn new(store_name: impl Into<String>, currency_symbol: impl Into<String>, width: usize) -> Self {
        LocalBillService {
            store_name: store_name.into(),
            currency_symbol: currency_symbol.into(),
            width,
        }
    }

    pub fn from_config(config: &CafeConfig) -> Self {
        LocalBillService::new(
            config.store.name.clone(),
            config.store.currency_symbol.clone(),
            config.billing.receipt_width,
        )
    }
}

#[async_trait]
impl BillService for LocalBillService {
    async fn generate(&self, request: &BillRequest) -> StoreResult<String> {
        let header = ReceiptHeader {
            store_name: self.store_name.clone(),
            table_id: None,
            printed_at: Utc::now(),
            currency_symbol: self.currency_symbol.clone(),
            width: self.width,
        };
        Ok(render_receipt(request, &header))
    }
}

/// Fills in the customer context configured for this store, unless the
/// request already carries its own.
pub fn with_store_context(mut request: BillRequest, config: &CafeConfig) -> BillRequest {
    if request.customer_history.is_none() {
        request.customer_history = config.billing.customer_history.clone();
    }
    if request.ongoing_promotions.is_none() {
        request.ongoing_promotions = config.billing.ongoing_promotions.clone();
    }
    request
}

/// Validates `request`, runs it through `service`, and folds every failure
/// into [`BillOutcome::Error`].
pub async fn generate_bill(service: &dyn BillService, request: BillRequest) -> BillOutcome {
    if let Err(e) = validate_bill_request(&request) {
        warn!(error = %e, "Rejected bill request");
        return BillOutcome::error(INVALID_INPUT_MESSAGE);
    }

    debug!(lines = request.order_items.len(), "Generating bill");

    let result = service.generate(&request).await.and_then(|text| {
        if text.trim().is_empty() {
            Err(StoreError::BillService("service returned an empty bill".to_string()))
        } else {
            Ok(text)
        }
    });

    match result {
        Ok(text) => BillOutcome::details(text),
        Err(e) => {
            error!(error = %e, "Bill generation failed");
            BillOutcome::error(GENERATION_FAILED_MESSAGE)
        }
    }
}
