//! # Configuration State
//!
//! Storefront configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`BUNBO_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::Serialize;
use tracing::warn;

use bunbo_core::{Money, PricingPolicy};
use bunbo_core::{DEFAULT_FLAT_DELIVERY_FEE, DEFAULT_FREE_SHIPPING_THRESHOLD, DEFAULT_STORAGE_KEY};

/// Fallback data directory when the platform has no home directory.
const FALLBACK_DATA_DIR: &str = ".bunbo";

/// Settings the cart store needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartConfig {
    /// Slot the snapshot is written under.
    pub storage_key: String,
    pub free_shipping_threshold: Money,
    pub flat_delivery_fee: Money,
}

impl Default for CartConfig {
    fn default() -> Self {
        CartConfig {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            free_shipping_threshold: Money::new(DEFAULT_FREE_SHIPPING_THRESHOLD),
            flat_delivery_fee: Money::new(DEFAULT_FLAT_DELIVERY_FEE),
        }
    }
}

impl CartConfig {
    pub fn pricing(&self) -> PricingPolicy {
        PricingPolicy::new(self.free_shipping_threshold, self.flat_delivery_fee)
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// Where snapshot files live.
    pub data_dir: PathBuf,

    /// `menu.json` location; `None` means `<data_dir>/menu.json`.
    pub menu_path: Option<PathBuf>,

    pub cart: CartConfig,
}

impl Default for StoreConfig {
    /// ## Default Values
    /// - Data dir: platform data directory (`~/.local/share/bunbo-storefront` on Linux)
    /// - Storage key: `bunbo-cart`
    /// - Free shipping from 250.000 ₫, otherwise 15.000 ₫
    fn default() -> Self {
        StoreConfig {
            data_dir: default_data_dir(),
            menu_path: None,
            cart: CartConfig::default(),
        }
    }
}

impl StoreConfig {
    /// Creates a StoreConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `BUNBO_DATA_DIR`: Directory for snapshot files
    /// - `BUNBO_STORAGE_KEY`: Slot name for the cart snapshot
    /// - `BUNBO_FREE_SHIPPING_THRESHOLD`: Subtotal (VND) for free delivery
    /// - `BUNBO_DELIVERY_FEE`: Flat delivery fee (VND)
    /// - `BUNBO_MENU_PATH`: Path to `menu.json`
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Same as [`StoreConfig::from_env`] but reads variables through `lookup`.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = StoreConfig::default();

        if let Some(dir) = lookup("BUNBO_DATA_DIR").filter(|v| !v.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(key) = lookup("BUNBO_STORAGE_KEY") {
            match bunbo_storage::validate_key(&key) {
                Ok(()) => config.cart.storage_key = key,
                Err(e) => warn!(error = %e, "BUNBO_STORAGE_KEY ignored"),
            }
        }

        if let Some(amount) = parse_amount(&lookup, "BUNBO_FREE_SHIPPING_THRESHOLD") {
            config.cart.free_shipping_threshold = amount;
        }

        if let Some(amount) = parse_amount(&lookup, "BUNBO_DELIVERY_FEE") {
            config.cart.flat_delivery_fee = amount;
        }

        if let Some(path) = lookup("BUNBO_MENU_PATH").filter(|v| !v.trim().is_empty()) {
            config.menu_path = Some(PathBuf::from(path));
        }

        config
    }

    pub fn menu_path(&self) -> PathBuf {
        self.menu_path
            .clone()
            .unwrap_or_else(|| self.data_dir.join("menu.json"))
    }

    /// Formats an amount the way the storefront shows prices.
    ///
    /// ## Example
    /// ```rust
    /// use bunbo_core::Money;
    /// use bunbo_storefront::state::StoreConfig;
    ///
    /// let config = StoreConfig::default();
    /// assert_eq!(config.format_currency(Money::new(215_000)), "215.000 ₫");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        amount.to_string()
    }

    /// Like [`StoreConfig::format_currency`], but free delivery reads "Miễn phí".
    pub fn format_delivery_fee(&self, fee: Money) -> String {
        if fee.is_zero() {
            "Miễn phí".to_string()
        } else {
            self.format_currency(fee)
        }
    }
}

fn default_data_dir() -> PathBuf {
    ProjectDirs::from("vn", "bunbo", "storefront")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(FALLBACK_DATA_DIR))
}

/// Reads a non-negative VND amount; anything else keeps the default.
fn parse_amount<F>(lookup: &F, name: &str) -> Option<Money>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(name)?;
    match raw.trim().parse::<i64>() {
        Ok(amount) if amount >= 0 => Some(Money::new(amount)),
        _ => {
            warn!(variable = name, value = %raw, "not a non-negative amount, keeping default");
            None
        }
    }
}
