//! # Cart Commands
//!
//! Command handlers for cart manipulation. Each returns the cart as it
//! stands after the command.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Order   │       │
//! │  │  Cart    │     │          │     │  Form    │     │ Success  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                                │
//! │                   add_to_cart                                           │
//! │                   update_cart_item                                      │
//! │                   remove_from_cart                                      │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────► (back to empty)   │
//! │                   reset_cart ── also deletes the saved snapshot        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::debug;

use bunbo_core::menu::Menu;
use bunbo_core::{CartLine, CheckoutTotals};

use crate::error::ApiResult;
use crate::state::CartStore;

/// Cart response including items and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLine>,
    pub totals: CheckoutTotals,
}

impl From<&CartStore> for CartResponse {
    /// Items and totals are read under one lock, so they always agree.
    fn from(store: &CartStore) -> Self {
        let pricing = store.config().pricing();
        store.with_cart(|cart| CartResponse {
            items: cart.lines().to_vec(),
            totals: pricing.totals(cart),
        })
    }
}

/// Gets the current cart contents.
pub fn get_cart(store: &CartStore) -> CartResponse {
    debug!("get_cart command");
    CartResponse::from(store)
}

/// Adds a dish from the menu to the cart.
///
/// ## Behavior
/// - Dish already in cart: quantity increases (capped at 99)
/// - Dish not in cart: added with the menu price frozen into the line
/// - Quantity defaults to 1; zero or negative does nothing
///
/// ## Errors
/// `NOT_FOUND` when `dish_id` is not on the menu.
pub fn add_to_cart(
    store: &CartStore,
    menu: &Menu,
    dish_id: &str,
    quantity: Option<i64>,
    size: Option<String>,
) -> ApiResult<CartResponse> {
    let quantity = quantity.unwrap_or(1);
    debug!(dish_id, quantity, "add_to_cart command");

    let dish = menu.require_dish(dish_id)?;
    let mut candidate = dish.to_candidate();
    if let Some(size) = size {
        candidate = candidate.with_size(size);
    }

    store.add_line(candidate, quantity);
    Ok(CartResponse::from(store))
}

/// Sets the quantity of a line; 0 removes it.
pub fn update_cart_item(store: &CartStore, id: &str, quantity: i64) -> CartResponse {
    debug!(id, quantity, "update_cart_item command");
    store.update_quantity(id, quantity);
    CartResponse::from(store)
}

/// Removes a line from the cart.
pub fn remove_from_cart(store: &CartStore, id: &str) -> CartResponse {
    debug!(id, "remove_from_cart command");
    store.remove_item(id);
    CartResponse::from(store)
}

/// Clears all lines from the cart.
pub fn clear_cart(store: &CartStore) -> CartResponse {
    debug!("clear_cart command");
    store.clear_cart();
    CartResponse::from(store)
}

/// Empties the cart and deletes its saved snapshot.
///
/// ## Errors
/// `STORAGE_ERROR` when the snapshot cannot be removed; the cart is kept.
pub fn reset_cart(store: &CartStore) -> ApiResult<CartResponse> {
    debug!("reset_cart command");
    store.reset()?;
    Ok(CartResponse::from(store))
}
