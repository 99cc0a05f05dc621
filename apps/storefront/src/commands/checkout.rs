//! # Checkout Commands
//!
//! Turns the cart into an order.
//!
//! ## Payment Paths
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  place_order(form)                                                      │
//! │        │                                                                │
//! │        ├── cart empty ─────────────────────────► CART_EMPTY             │
//! │        ├── form invalid ───────────────────────► VALIDATION_ERROR       │
//! │        ├── branch unknown ─────────────────────► NOT_FOUND              │
//! │        │                                                                │
//! │        ├── COD  ──► OrderConfirmation ──► clear cart ──► Confirmed      │
//! │        │                                                                │
//! │        └── MoMo ──► PaymentGateway::create_session(total)               │
//! │                       ├── Ok  ──► Redirect { pay_url }  (cart kept)     │
//! │                       └── Err ──► PAYMENT_ERROR         (cart kept)     │
//! │                                                                         │
//! │  payment_result(resultCode)                                             │
//! │        ├── "0"  ──► Success, clear cart                                 │
//! │        └── else ──► Failed, cart kept for a retry                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use bunbo_core::menu::Menu;
use bunbo_core::Cart;
use bunbo_core::order::{
    CheckoutForm, OrderConfirmation, PaymentMethod, PaymentOutcome, PaymentRequest, PaymentSession,
};

use crate::error::{ApiError, ApiResult, PaymentError};
use crate::state::CartStore;

/// Payment provider that hosts the e-wallet payment page.
pub trait PaymentGateway: Send + Sync {
    /// Opens a payment session for `request.amount`.
    fn create_session(&self, request: &PaymentRequest) -> Result<PaymentSession, PaymentError>;
}

/// Gateway used when no provider is configured; every request fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableGateway;

impl PaymentGateway for UnavailableGateway {
    fn create_session(&self, _request: &PaymentRequest) -> Result<PaymentSession, PaymentError> {
        Err(PaymentError::new("Không thể kết nối MoMo"))
    }
}

/// What the front end should do after `place_order`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum CheckoutOutcome {
    /// Order accepted; show the confirmation page.
    Confirmed { order: OrderConfirmation },
    /// Send the customer to the provider's payment page.
    #[serde(rename_all = "camelCase")]
    Redirect {
        order: OrderConfirmation,
        pay_url: String,
    },
}

impl CheckoutOutcome {
    pub fn order(&self) -> &OrderConfirmation {
        match self {
            CheckoutOutcome::Confirmed { order } | CheckoutOutcome::Redirect { order, .. } => order,
        }
    }
}

/// Places an order for the current cart.
///
/// ## Errors
/// - `CART_EMPTY`: nothing in the cart, nothing else happens
/// - `VALIDATION_ERROR`: the form breaks a field rule
/// - `NOT_FOUND`: the branch is not on the menu
/// - `PAYMENT_ERROR`: the gateway refused a MoMo session
pub fn place_order(
    store: &CartStore,
    menu: &Menu,
    form: &CheckoutForm,
    gateway: &dyn PaymentGateway,
    now: DateTime<Utc>,
) -> ApiResult<CheckoutOutcome> {
    debug!(
        payment_method = %form.payment_method,
        branch_id = %form.branch_id,
        "place_order command"
    );

    let branch = menu.branch(form.branch_id.trim());
    let pricing = store.config().pricing();
    let build = |cart: &Cart| -> ApiResult<OrderConfirmation> {
        let order = OrderConfirmation::build(form, branch, cart, &pricing, now)?;
        if branch.is_none() && !menu.branches.is_empty() {
            return Err(ApiError::not_found("Branch", &order.customer.branch_id));
        }
        Ok(order)
    };

    match form.payment_method {
        PaymentMethod::Cod => {
            // The order and the emptied cart come from the same locked read.
            let order = store.check_out(build)?;
            info!(
                code = %order.code,
                total = order.total.amount(),
                items = order.item_count(),
                "order placed (cash on delivery)"
            );
            Ok(CheckoutOutcome::Confirmed { order })
        }
        PaymentMethod::Momo => {
            let order = store.with_cart(build)?;
            let request = PaymentRequest::for_order(&order);
            let session = gateway.create_session(&request).map_err(|e| {
                warn!(code = %order.code, error = %e, "payment session failed");
                ApiError::from(e)
            })?;

            info!(code = %order.code, amount = request.amount.amount(), "redirecting to MoMo");
            Ok(CheckoutOutcome::Redirect {
                order,
                pay_url: session.pay_url,
            })
        }
    }
}

/// Result page content after returning from the payment provider.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResultResponse {
    pub outcome: PaymentOutcome,
    pub title: String,
    pub message: String,
}

/// Handles the provider's return URL.
///
/// A successful payment empties the cart; a failed one keeps it so the
/// customer can try again.
pub fn payment_result(store: &CartStore, result_code: Option<&str>) -> PaymentResultResponse {
    let outcome = PaymentOutcome::from_result_code(result_code);
    debug!(?result_code, ?outcome, "payment_result command");

    match outcome {
        PaymentOutcome::Success => {
            store.clear_cart();
            PaymentResultResponse {
                outcome,
                title: "Thanh toán thành công!".to_string(),
                message: "Cảm ơn bạn đã thanh toán qua MoMo. Đơn hàng của bạn đã được ghi nhận."
                    .to_string(),
            }
        }
        PaymentOutcome::Failed => PaymentResultResponse {
            outcome,
            title: "Thanh toán thất bại!".to_string(),
            message: "Giao dịch chưa được thực hiện thành công. Vui lòng thử lại.".to_string(),
        },
    }
}
