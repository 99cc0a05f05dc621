//! # bunbo-core: Pure Business Logic for the Bunbo Storefront
//!
//! This crate holds the cart state machine and everything the checkout
//! flow derives from it, as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Bunbo Storefront Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/storefront (CartStore, CLI)                │   │
//! │  │    add_to_cart ──► update_cart_item ──► place_order             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bunbo-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────────┐  │   │
//! │  │   │   cart   │ │ snapshot │ │ pricing  │ │ order/validation │  │   │
//! │  │   │ Cart     │ │ encode   │ │ delivery │ │ CheckoutForm     │  │   │
//! │  │   │ Command  │ │ decode   │ │ fee      │ │ Confirmation     │  │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 bunbo-storage (Snapshot Slots)                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Cart lines and line candidates
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The cart state machine (`Cart::apply`)
//! - [`snapshot`] - Tolerant JSON snapshot codec
//! - [`pricing`] - Delivery fee policy and checkout totals
//! - [`menu`] - Menu catalog (dishes and branches)
//! - [`order`] - Checkout form, order confirmation, payment outcome
//! - [`validation`] - Checkout form rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use bunbo_core::cart::{Cart, CartCommand};
//! use bunbo_core::types::LineCandidate;
//! use bunbo_core::Money;
//!
//! let cart = Cart::new();
//! let candidate = LineCandidate::new("bun-bo-dac-biet", "Bún bò đặc biệt", Money::new(65_000));
//!
//! let transition = cart.apply(&CartCommand::add(candidate, 2));
//! let next = transition.next.expect("adding a new dish changes the cart");
//!
//! assert_eq!(next.item_count(), 2);
//! assert_eq!(next.subtotal(), Money::new(130_000));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod menu;
pub mod money;
pub mod order;
pub mod pricing;
pub mod snapshot;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartCommand, CartEvent, Transition};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::{CheckoutTotals, PricingPolicy};
pub use types::{CartLine, LineCandidate, Variant};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single line in the cart.
///
/// Requests above this are clamped, never rejected.
pub const MAX_LINE_QUANTITY: u32 = 99;

/// Largest unit price (VND) a cart line may carry.
///
/// Keeps `price × MAX_LINE_QUANTITY` and any realistic subtotal well inside
/// `i64`. Lines priced outside `0..=MAX_UNIT_PRICE` are never stored.
pub const MAX_UNIT_PRICE: i64 = 100_000_000_000;

/// Storage key the cart snapshot lives under unless configured otherwise.
///
/// The key carries no schema version; older snapshots are handled by
/// per-field checks in [`snapshot::decode`].
pub const DEFAULT_STORAGE_KEY: &str = "bunbo-cart";

/// Subtotal (VND) at which delivery becomes free.
pub const DEFAULT_FREE_SHIPPING_THRESHOLD: i64 = 250_000;

/// Flat delivery fee (VND) charged below the free-shipping threshold.
pub const DEFAULT_FLAT_DELIVERY_FEE: i64 = 15_000;
