//! # bunbo-storage: Snapshot Storage for the Bunbo Storefront
//!
//! Durable string slots the cart store persists its snapshot into.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  apps/storefront::CartStore                                             │
//! │        │  get(key) at startup, set(key, json) after each mutation       │
//! │        ▼                                                                │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │            ★ bunbo-storage (THIS CRATE) ★                       │   │
//! │  │   SnapshotStorage ──┬── MemoryStorage                           │   │
//! │  │                     └── FileStorage  (<dir>/<key>.json)         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The slots know nothing about carts; the value is opaque text.
//!
//! ## Usage
//!
//! ```rust
//! use bunbo_storage::{MemoryStorage, SnapshotStorage};
//!
//! let storage = MemoryStorage::new();
//! storage.set("bunbo-cart", "[]").unwrap();
//! assert_eq!(storage.get("bunbo-cart").unwrap().as_deref(), Some("[]"));
//! ```

pub mod error;
pub mod file;
pub mod slot;

pub use error::{StorageError, StorageResult};
pub use file::FileStorage;
pub use slot::{validate_key, MemoryStorage, SnapshotStorage};
