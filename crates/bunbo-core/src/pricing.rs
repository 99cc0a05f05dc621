//! # Delivery Pricing
//!
//! The delivery fee is a step function of the subtotal:
//!
//! ```text
//!   fee
//!    │
//! 15k│        ●━━━━━━━━━━━━━━━━━━━○
//!    │        │                   │
//!  0 ●━━━━━━━━┘                   ●━━━━━━━━━━━━━━━━━━━━━━━━━━━
//!    └────────┴───────────────────┴──────────────────────────► subtotal
//!             0+              250k (free shipping threshold)
//! ```
//!
//! An empty cart (subtotal 0) has no delivery fee.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::money::Money;
use crate::{DEFAULT_FLAT_DELIVERY_FEE, DEFAULT_FREE_SHIPPING_THRESHOLD};

/// Delivery fee configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPolicy {
    /// Subtotal at or above which delivery is free.
    pub free_shipping_threshold: Money,
    /// Fee charged for non-empty carts below the threshold.
    pub flat_delivery_fee: Money,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        PricingPolicy {
            free_shipping_threshold: Money::new(DEFAULT_FREE_SHIPPING_THRESHOLD),
            flat_delivery_fee: Money::new(DEFAULT_FLAT_DELIVERY_FEE),
        }
    }
}

impl PricingPolicy {
    pub fn new(free_shipping_threshold: Money, flat_delivery_fee: Money) -> Self {
        PricingPolicy {
            free_shipping_threshold,
            flat_delivery_fee,
        }
    }

    /// Delivery fee for a given subtotal.
    ///
    /// ```rust
    /// use bunbo_core::{Money, PricingPolicy};
    ///
    /// let policy = PricingPolicy::default();
    /// assert_eq!(policy.delivery_fee(Money::new(200_000)), Money::new(15_000));
    /// assert_eq!(policy.delivery_fee(Money::new(250_000)), Money::zero());
    /// assert_eq!(policy.delivery_fee(Money::zero()), Money::zero());
    /// ```
    pub fn delivery_fee(&self, subtotal: Money) -> Money {
        if !subtotal.is_positive() || subtotal >= self.free_shipping_threshold {
            Money::zero()
        } else {
            self.flat_delivery_fee
        }
    }

    /// How much more the customer has to order for free delivery.
    ///
    /// `None` once the threshold is reached or while the cart is empty.
    pub fn remaining_for_free_shipping(&self, subtotal: Money) -> Option<Money> {
        if subtotal.is_positive() && subtotal < self.free_shipping_threshold {
            Some(self.free_shipping_threshold - subtotal)
        } else {
            None
        }
    }

    /// Computes every checkout figure for a cart.
    pub fn totals(&self, cart: &Cart) -> CheckoutTotals {
        let subtotal = cart.subtotal();
        let delivery_fee = self.delivery_fee(subtotal);
        CheckoutTotals {
            line_count: cart.line_count(),
            item_count: cart.item_count(),
            subtotal,
            delivery_fee,
            total: subtotal + delivery_fee,
        }
    }
}

/// Cart totals summary for the checkout flow and command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutTotals {
    #[ts(type = "number")]
    pub line_count: usize,
    #[ts(type = "number")]
    pub item_count: u64,
    pub subtotal: Money,
    pub delivery_fee: Money,
    pub total: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartCommand;
    use crate::types::LineCandidate;

    fn cart_with_subtotal(amount: i64) -> Cart {
        if amount == 0 {
            return Cart::new();
        }
        let candidate = LineCandidate::new("combo", "Combo", Money::new(amount));
        Cart::new()
            .apply(&CartCommand::add(candidate, 1))
            .next
            .unwrap()
    }

    #[test]
    fn test_fee_scenarios() {
        let policy = PricingPolicy::default();

        let totals = policy.totals(&cart_with_subtotal(200_000));
        assert_eq!(totals.delivery_fee, Money::new(15_000));
        assert_eq!(totals.total, Money::new(215_000));

        let totals = policy.totals(&cart_with_subtotal(250_000));
        assert_eq!(totals.delivery_fee, Money::zero());
        assert_eq!(totals.total, Money::new(250_000));

        let totals = policy.totals(&cart_with_subtotal(0));
        assert_eq!(totals.delivery_fee, Money::zero());
        assert_eq!(totals.total, Money::zero());
    }

    #[test]
    fn test_fee_boundaries() {
        let policy = PricingPolicy::default();
        assert_eq!(policy.delivery_fee(Money::new(1)), Money::new(15_000));
        assert_eq!(policy.delivery_fee(Money::new(249_999)), Money::new(15_000));
        assert_eq!(policy.delivery_fee(Money::new(1_000_000)), Money::zero());
    }

    #[test]
    fn test_zero_priced_lines_pay_no_fee() {
        // Subtotal 0 means "no order yet" even if a free item is in the cart.
        let candidate = LineCandidate::new("tra-da", "Trà đá", Money::zero());
        let cart = Cart::new()
            .apply(&CartCommand::add(candidate, 2))
            .next
            .unwrap();
        let totals = PricingPolicy::default().totals(&cart);

        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.delivery_fee, Money::zero());
    }

    #[test]
    fn test_custom_policy() {
        let policy = PricingPolicy::new(Money::new(100_000), Money::new(20_000));
        assert_eq!(policy.delivery_fee(Money::new(99_000)), Money::new(20_000));
        assert_eq!(policy.delivery_fee(Money::new(100_000)), Money::zero());
    }

    #[test]
    fn test_remaining_for_free_shipping() {
        let policy = PricingPolicy::default();
        assert_eq!(
            policy.remaining_for_free_shipping(Money::new(200_000)),
            Some(Money::new(50_000))
        );
        assert_eq!(policy.remaining_for_free_shipping(Money::new(250_000)), None);
        assert_eq!(policy.remaining_for_free_shipping(Money::zero()), None);
    }
}
