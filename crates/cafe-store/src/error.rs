//! # Store Error Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐  │
//! │  │  Configuration  │  │     Domain      │  │      Bill Service       │  │
//! │  │                 │  │                 │  │                         │  │
//! │  │  InvalidConfig  │  │  Core           │  │  BillService            │  │
//! │  │  ConfigLoad     │  │  (CoreError,    │  │                         │  │
//! │  │  ConfigParse    │  │   Validation)   │  │                         │  │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Dispatching an action never produces one of these. They come from the
//! edges: loading config, validating a form, calling the bill service.

use cafe_core::{CoreError, ValidationError};
use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to read config: {0}")]
    ConfigLoad(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("{0}")]
    Core(#[from] CoreError),

    /// The bill text service failed or returned nothing usable.
    #[error("Bill service error: {0}")]
    BillService(String),
}

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::Core(CoreError::Validation(err))
    }
}

impl StoreError {
    /// Whether the error came from rejected user input.
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Core(CoreError::Validation(_)))
    }
}
