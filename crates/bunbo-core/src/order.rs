//! # Orders
//!
//! Everything the checkout flow assembles from the cart.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CheckoutForm ──validate──► CustomerDetails ─┐                          │
//! │                                              ├─► OrderConfirmation     │
//! │  Cart ──PricingPolicy::totals──► totals ─────┘     code  BB123456      │
//! │                                                    items (copied)      │
//! │                                                    subtotal/fee/total  │
//! │                                                         │               │
//! │                   ┌─────────────────────────────────────┤               │
//! │                   ▼                                     ▼               │
//! │            PaymentMethod::Cod                 PaymentMethod::Momo       │
//! │            confirm, clear cart                PaymentRequest → gateway  │
//! │                                               resultCode "0" = success  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::menu::Branch;
use crate::money::Money;
use crate::pricing::PricingPolicy;
use crate::types::CartLine;
use crate::validation::{normalize_phone, validate_checkout_form};

/// Prefix of every order code.
pub const ORDER_CODE_PREFIX: &str = "BB";

// =============================================================================
// Payment Method
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum PaymentMethod {
    /// Cash or card on delivery.
    #[default]
    Cod,
    /// MoMo e-wallet, paid on the provider's page.
    Momo,
}

impl PaymentMethod {
    /// Label shown on the order summary.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cod => "Thanh toán khi nhận hàng",
            PaymentMethod::Momo => "Ví MoMo",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PaymentMethod::Cod => "Trả bằng tiền mặt hoặc quẹt thẻ khi nhận món.",
            PaymentMethod::Momo => "Quét mã QR MoMo sau khi xác nhận đơn.",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cod => "cod",
            PaymentMethod::Momo => "momo",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cod" => Ok(PaymentMethod::Cod),
            "momo" => Ok(PaymentMethod::Momo),
            other => Err(CoreError::UnknownPaymentMethod(other.to_string())),
        }
    }
}

// =============================================================================
// Checkout Form
// =============================================================================

/// Raw customer input from the checkout page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct CheckoutForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub branch_id: String,
    pub payment_method: PaymentMethod,
    pub note: String,
}

/// Validated, trimmed customer details attached to an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CustomerDetails {
    pub name: String,
    /// Phone with all whitespace removed.
    pub phone: String,
    pub email: String,
    pub address: String,
    pub note: String,
    pub branch_id: String,
    /// Empty when the branch id is not in the menu.
    pub branch_name: String,
    pub payment_method: PaymentMethod,
    pub payment_label: String,
}

impl CustomerDetails {
    /// Validates the form and normalizes its fields.
    pub fn from_form(form: &CheckoutForm, branch: Option<&Branch>) -> CoreResult<Self> {
        validate_checkout_form(form)?;
        Ok(CustomerDetails {
            name: form.name.trim().to_string(),
            phone: normalize_phone(&form.phone),
            email: form.email.trim().to_string(),
            address: form.address.trim().to_string(),
            note: form.note.trim().to_string(),
            branch_id: branch.map_or_else(|| form.branch_id.clone(), |b| b.id.clone()),
            branch_name: branch.map(|b| b.name.clone()).unwrap_or_default(),
            payment_method: form.payment_method,
            payment_label: form.payment_method.label().to_string(),
        })
    }
}

// =============================================================================
// Order Confirmation
// =============================================================================

/// The order record handed to the confirmation page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderConfirmation {
    pub code: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    pub customer: CustomerDetails,
    /// Copy of the cart lines at checkout time.
    pub items: Vec<CartLine>,
    pub subtotal: Money,
    pub delivery_fee: Money,
    pub total: Money,
}

impl OrderConfirmation {
    /// Builds the order for the current cart.
    ///
    /// ## Errors
    /// - `CoreError::EmptyCart` when the cart has no lines
    /// - `CoreError::Validation` when the form is invalid
    pub fn build(
        form: &CheckoutForm,
        branch: Option<&Branch>,
        cart: &Cart,
        pricing: &PricingPolicy,
        now: DateTime<Utc>,
    ) -> CoreResult<Self> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }
        let customer = CustomerDetails::from_form(form, branch)?;
        let totals = pricing.totals(cart);

        Ok(OrderConfirmation {
            code: order_code(now),
            created_at: now,
            customer,
            items: cart.lines().to_vec(),
            subtotal: totals.subtotal,
            delivery_fee: totals.delivery_fee,
            total: totals.total,
        })
    }

    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|l| u64::from(l.quantity)).sum()
    }
}

/// Order code: [`ORDER_CODE_PREFIX`] followed by the last six digits of the
/// millisecond timestamp.
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use bunbo_core::order::order_code;
///
/// let at = Utc.timestamp_millis_opt(1_717_000_042_123).unwrap();
/// assert_eq!(order_code(at), "BB042123");
/// ```
pub fn order_code(now: DateTime<Utc>) -> String {
    format!(
        "{}{:06}",
        ORDER_CODE_PREFIX,
        now.timestamp_millis().rem_euclid(1_000_000)
    )
}

// =============================================================================
// Payment
// =============================================================================

/// What the checkout sends to the payment provider to open a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PaymentRequest {
    pub order_code: String,
    pub amount: Money,
}

impl PaymentRequest {
    pub fn for_order(order: &OrderConfirmation) -> Self {
        PaymentRequest {
            order_code: order.code.clone(),
            amount: order.total,
        }
    }
}

/// The provider's answer: where to send the customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PaymentSession {
    pub pay_url: String,
}

/// Result reported on the provider's return URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum PaymentOutcome {
    Success,
    Failed,
}

impl PaymentOutcome {
    /// `"0"` is the only success code; anything else, including a missing
    /// code, is a failure.
    pub fn from_result_code(code: Option<&str>) -> Self {
        match code.map(str::trim) {
            Some("0") => PaymentOutcome::Success,
            _ => PaymentOutcome::Failed,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PaymentOutcome::Success)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
