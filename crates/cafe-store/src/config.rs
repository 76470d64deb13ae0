//! # Café Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                            │
//! │     CAFE_STORE_NAME="Corner Café"                                       │
//! │     CAFE_SALES_TAX_RATE=8.5                                             │
//! │                                                                         │
//! │  2. TOML Config File                                                    │
//! │     ~/.config/cafe-pos/cafe.toml (Linux)                                │
//! │     ~/Library/Application Support/com.cafe.pos/cafe.toml (macOS)        │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                    │
//! │     12 tables, 8.5% sales tax, "$"                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # cafe.toml
//! [store]
//! name = "Corner Café"
//! currency_symbol = "$"
//!
//! [floor]
//! table_count = 12
//!
//! [billing]
//! sales_tax_rate = 8.5          # percent
//! receipt_width = 32            # characters
//! ongoing_promotions = "10% off on all coffee drinks on weekdays."
//! ```

use std::path::PathBuf;

use cafe_core::validation::validate_tax_rate_bps;
use cafe_core::{TaxRate, DEFAULT_SALES_TAX_BPS, DEFAULT_TABLE_COUNT};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};

/// Largest floor plan the table grid is laid out for.
pub const MAX_TABLE_COUNT: u32 = 200;

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSection {
    /// Printed at the top of every receipt.
    #[serde(default = "default_store_name")]
    pub name: String,

    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_store_name() -> String {
    "Café POS".to_string()
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

impl Default for StoreSection {
    fn default() -> Self {
        StoreSection {
            name: default_store_name(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorSection {
    /// Tables are numbered `1..=table_count` and fixed for the store's life.
    #[serde(default = "default_table_count")]
    pub table_count: u32,
}

fn default_table_count() -> u32 {
    DEFAULT_TABLE_COUNT
}

impl Default for FloorSection {
    fn default() -> Self {
        FloorSection {
            table_count: default_table_count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingSection {
    /// Percent, e.g. `8.5`.
    #[serde(default = "default_sales_tax_rate")]
    pub sales_tax_rate: f64,

    #[serde(default = "default_receipt_width")]
    pub receipt_width: usize,

    /// Passed through to the bill service with every request.
    #[serde(default)]
    pub ongoing_promotions: Option<String>,

    #[serde(default)]
    pub customer_history: Option<String>,
}

fn default_sales_tax_rate() -> f64 {
    TaxRate::from_bps(DEFAULT_SALES_TAX_BPS).percentage()
}

fn default_receipt_width() -> usize {
    32
}

impl Default for BillingSection {
    fn default() -> Self {
        BillingSection {
            sales_tax_rate: default_sales_tax_rate(),
            receipt_width: default_receipt_width(),
            ongoing_promotions: None,
            customer_history: None,
        }
    }
}

// =============================================================================
// Top-Level Config
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CafeConfig {
    #[serde(default)]
    pub store: StoreSection,

    #[serde(default)]
    pub floor: FloorSection,

    #[serde(default)]
    pub billing: BillingSection,
}

impl CafeConfig {
    /// Loads from `config_path` (or the platform default), applies `CAFE_*`
    /// environment overrides, then validates.
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading cafe config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Same as [`CafeConfig::load`], falling back to defaults on any error.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load cafe config: {}. Using defaults.", e);
            Self::default()
        })
    }

    pub fn from_toml(contents: &str) -> StoreResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// `cafe.toml` in the per-user config directory.
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "cafe", "pos").map(|dirs| dirs.config_dir().join("cafe.toml"))
    }

    /// Applies overrides from `lookup`, which maps a variable name to its value.
    ///
    /// | Variable               | Field                      |
    /// |------------------------|----------------------------|
    /// | `CAFE_STORE_NAME`      | `store.name`               |
    /// | `CAFE_CURRENCY_SYMBOL` | `store.currency_symbol`    |
    /// | `CAFE_TABLE_COUNT`     | `floor.table_count`        |
    /// | `CAFE_SALES_TAX_RATE`  | `billing.sales_tax_rate`   |
    ///
    /// Unparseable numbers are logged and ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup("CAFE_STORE_NAME") {
            self.store.name = name;
        }

        if let Some(symbol) = lookup("CAFE_CURRENCY_SYMBOL") {
            self.store.currency_symbol = symbol;
        }

        if let Some(count) = lookup("CAFE_TABLE_COUNT") {
            match count.trim().parse() {
                Ok(count) => self.floor.table_count = count,
                Err(_) => warn!(value = %count, "Ignoring invalid CAFE_TABLE_COUNT"),
            }
        }

        if let Some(rate) = lookup("CAFE_SALES_TAX_RATE") {
            match rate.trim().parse() {
                Ok(rate) => self.billing.sales_tax_rate = rate,
                Err(_) => warn!(value = %rate, "Ignoring invalid CAFE_SALES_TAX_RATE"),
            }
        }
    }

    pub fn validate(&self) -> StoreResult<()> {
        if self.store.name.trim().is_empty() {
            return Err(StoreError::InvalidConfig(
                "store.name must not be empty".to_string(),
            ));
        }

        if self.floor.table_count == 0 || self.floor.table_count > MAX_TABLE_COUNT {
            return Err(StoreError::InvalidConfig(format!(
                "floor.table_count must be between 1 and {}",
                MAX_TABLE_COUNT
            )));
        }

        let rate = self.billing.sales_tax_rate;
        if !rate.is_finite() || rate < 0.0 {
            return Err(StoreError::InvalidConfig(
                "billing.sales_tax_rate must be a non-negative percentage".to_string(),
            ));
        }
        validate_tax_rate_bps(self.sales_tax_rate().bps())?;

        Ok(())
    }

    pub fn sales_tax_rate(&self) -> TaxRate {
        TaxRate::from_percentage(self.billing.sales_tax_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CafeConfig::default();
        assert_eq!(config.store.name, "Café POS");
        assert_eq!(config.floor.table_count, 12);
        assert_eq!(config.sales_tax_rate().bps(), 850);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CafeConfig::from_toml(
            r#"
            [store]
            name = "Corner Café"

            [billing]
            sales_tax_rate = 7.25
            "#,
        )
        .unwrap();

        assert_eq!(config.store.name, "Corner Café");
        assert_eq!(config.store.currency_symbol, "$");
        assert_eq!(config.floor.table_count, 12);
        assert_eq!(config.sales_tax_rate().bps(), 725);
        assert_eq!(config.billing.receipt_width, 32);
    }

    #[test]
    fn test_bad_toml_is_a_parse_error() {
        let err = CafeConfig::from_toml("[floor]\ntable_count = \"many\"").unwrap_err();
        assert!(matches!(err, StoreError::ConfigParse(_)));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = CafeConfig::default();
        config.apply_overrides(vars(&[
            ("CAFE_STORE_NAME", "Night Owl"),
            ("CAFE_TABLE_COUNT", "20"),
            ("CAFE_SALES_TAX_RATE", "not-a-number"),
        ]));

        assert_eq!(config.store.name, "Night Owl");
        assert_eq!(config.floor.table_count, 20);
        assert_eq!(config.sales_tax_rate().bps(), 850);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = CafeConfig::default();
        config.floor.table_count = 0;
        assert!(matches!(config.validate(), Err(StoreError::InvalidConfig(_))));

        let mut config = CafeConfig::default();
        config.billing.sales_tax_rate = 250.0;
        assert!(config.validate().unwrap_err().is_validation());

        let mut config = CafeConfig::default();
        config.billing.sales_tax_rate = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config =
            CafeConfig::load_or_default(Some(PathBuf::from("/nonexistent/cafe-pos/cafe.toml")));
        assert_eq!(config.floor.table_count, CafeConfig::default().floor.table_count);
    }
}
