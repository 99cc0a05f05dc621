//! # State Module
//!
//! Application state for the storefront.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────────┐   ┌──────────────────────────────┐   │
//! │  │         CartStore            │   │        StoreConfig           │   │
//! │  │                              │   │                              │   │
//! │  │  Arc<Mutex<cart, revision>>  │   │  data_dir, menu_path         │   │
//! │  │  Arc<dyn SnapshotStorage>    │   │  CartConfig                  │   │
//! │  │  Arc<dyn NotificationSink>   │   │   storage_key, fee rules     │   │
//! │  └──────────────────────────────┘   └──────────────────────────────┘   │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CartStore: clones share one cart behind a Mutex                     │
//! │  • StoreConfig: read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;

pub use cart::CartStore;
pub use config::{CartConfig, StoreConfig};
