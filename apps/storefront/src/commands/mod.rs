//! # Commands Module
//!
//! The storefront's command handlers. Each takes the state it needs as
//! arguments and returns a serializable response or an [`ApiError`].
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── cart.rs      ◄─── Cart manipulation
//! ├── checkout.rs  ◄─── Order placement, payment gateway, payment result
//! └── menu.rs      ◄─── Menu loading and filtering
//! ```
//!
//! [`ApiError`]: crate::error::ApiError

pub mod cart;
pub mod checkout;
pub mod menu;
