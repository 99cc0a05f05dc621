//! # Bunbo Storefront Library
//!
//! The cart store and the commands built on it. The `bunbo` binary is a
//! thin clap front end over this library.
//!
//! ## Module Organization
//! ```text
//! bunbo_storefront/
//! ├── lib.rs          ◄─── You are here (tracing setup, store wiring)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── CartStore: shared cart, persistence, dispatch
//! │   └── config.rs   ◄─── StoreConfig / CartConfig
//! ├── commands/
//! │   ├── cart.rs     ◄─── Cart manipulation commands
//! │   ├── checkout.rs ◄─── Order placement and payment result
//! │   └── menu.rs     ◄─── Menu loading and filtering
//! ├── notify.rs       ◄─── Toasts and notification sinks
//! ├── cli.rs          ◄─── `bunbo` command line
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Wiring
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  StoreConfig::from_env()                                                │
//! │        │                                                                │
//! │        ├── data_dir ──► FileStorage ───────┐                            │
//! │        ├── cart ──────► CartConfig ────────┼──► CartStore::open()       │
//! │        └── (caller) ──► NotificationSink ──┘        │                   │
//! │                                                     ▼                   │
//! │                                      commands::{cart, checkout, menu}   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod notify;
pub mod state;

use std::sync::Arc;

use bunbo_storage::FileStorage;
use tracing::info;
use tracing_subscriber::EnvFilter;

use notify::NotificationSink;
use state::{CartStore, StoreConfig};

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn,bunbo=info";

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages, including every command
/// - `RUST_LOG=bunbo=trace` - Trace for bunbo crates only
/// - Default: [`DEFAULT_LOG_FILTER`]
///
/// Logs go to stderr so command output on stdout stays clean.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Opens the cart store over the file slot in `config.data_dir`.
pub fn open_store(config: &StoreConfig, sink: Arc<dyn NotificationSink>) -> CartStore {
    info!(
        data_dir = %config.data_dir.display(),
        key = %config.cart.storage_key,
        "opening cart store"
    );
    let storage = Arc::new(FileStorage::new(&config.data_dir));
    CartStore::open(storage, sink, config.cart.clone())
}
