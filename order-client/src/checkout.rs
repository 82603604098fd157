//! Checkout protocol
//!
//! Sequences order creation, the optional payment step, and the
//! post-success cart clearing. Each submit attempt walks the state
//! machine
//!
//! ```text
//! Draft -> Creating -> Created -> (PayPending -> Paid | PayFailed) -> Finalized
//!                   \-> CreateFailed
//! ```
//!
//! The cart is cleared if and only if the attempt reaches
//! `Finalized`; every failure or cancellation leaves the cart and the
//! selection exactly as they were, so the user can simply resubmit.

use crate::collaborators::{OrderService, PaymentGateway, PaymentOutcome, PaymentRequest};
use crate::session::{Session, lock};
use shared::models::{OrderDraft, PersistedOrder};
use shared::{AppError, AppResult, ErrorCode};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// Description forwarded to the payment gateway
const PAYMENT_DESCRIPTION: &str = "Restaurant table order";

/// Protocol state of the current (or last) submit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckoutState {
    #[default]
    Draft,
    Creating,
    Created,
    PayPending,
    Paid,
    PayFailed,
    CreateFailed,
    Finalized,
}

/// Successful submit result
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutOutcome {
    /// Order created (and paid, when payment is configured); cart
    /// cleared
    Finalized { order: PersistedOrder },
    /// User cancelled the payment; the order stays `PENDING`
    /// server-side and the cart is untouched, so payment can be
    /// retried later
    PaymentCancelled { order: PersistedOrder },
}

/// Releases the in-flight flag on every exit path
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Checkout protocol over the order and payment collaborators
pub struct CheckoutProtocol {
    orders: Arc<dyn OrderService>,
    payments: Arc<dyn PaymentGateway>,
    payment_required: bool,
    in_flight: AtomicBool,
    state: Mutex<CheckoutState>,
}

impl CheckoutProtocol {
    pub fn new(orders: Arc<dyn OrderService>, payments: Arc<dyn PaymentGateway>) -> Self {
        Self {
            orders,
            payments,
            payment_required: true,
            in_flight: AtomicBool::new(false),
            state: Mutex::new(CheckoutState::Draft),
        }
    }

    /// Skip the payment step (pay-at-counter configurations)
    pub fn without_payment(mut self) -> Self {
        self.payment_required = false;
        self
    }

    /// State of the current or most recent attempt
    pub fn state(&self) -> CheckoutState {
        *lock(&self.state)
    }

    /// Whether a submit attempt is currently in flight
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    fn set_state(&self, state: CheckoutState) {
        *lock(&self.state) = state;
    }

    /// Execute one checkout attempt for the draft
    ///
    /// At most one attempt may be in flight; a reentrant call is
    /// rejected with `AlreadySubmitting` and triggers no collaborator
    /// call.
    pub async fn submit(&self, draft: &OrderDraft, session: &Session) -> AppResult<CheckoutOutcome> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(AppError::new(ErrorCode::AlreadySubmitting));
        }
        let _guard = InFlightGuard(&self.in_flight);

        self.set_state(CheckoutState::Creating);
        let order = match self.orders.create_order(draft).await {
            Ok(order) => order,
            Err(err) => {
                self.set_state(CheckoutState::CreateFailed);
                warn!(code = %err.code, "order creation failed");
                // Surface the collaborator's message verbatim; the
                // cart has not been touched, so resubmit is safe.
                return Err(AppError::with_message(ErrorCode::OrderCreateFailed, err.message)
                    .with_detail("cause", err.code.code()));
            }
        };
        self.set_state(CheckoutState::Created);
        info!(order_id = %order.order_id, total = order.total_amount, "order created");

        if self.payment_required {
            self.set_state(CheckoutState::PayPending);
            let request = PaymentRequest {
                order_id: order.order_id.clone(),
                amount: draft.total_amount,
                description: PAYMENT_DESCRIPTION.to_string(),
            };
            match self.payments.pay(&request).await {
                Ok(PaymentOutcome::Paid) => self.set_state(CheckoutState::Paid),
                Ok(PaymentOutcome::Cancelled) => {
                    // Normal terminal outcome of PayPending: back to
                    // Created semantics, order still pending.
                    self.set_state(CheckoutState::Created);
                    info!(order_id = %order.order_id, "payment cancelled by user");
                    return Ok(CheckoutOutcome::PaymentCancelled { order });
                }
                Ok(PaymentOutcome::Failed { message }) => {
                    self.set_state(CheckoutState::PayFailed);
                    warn!(order_id = %order.order_id, %message, "payment failed");
                    return Err(AppError::with_message(ErrorCode::PaymentFailed, message));
                }
                Err(err) => {
                    self.set_state(CheckoutState::PayFailed);
                    warn!(order_id = %order.order_id, code = %err.code, "payment call failed");
                    return Err(AppError::with_message(ErrorCode::PaymentFailed, err.message));
                }
            }
        }

        // Reached only on Paid, or on Created without a payment step
        session.clear_cart()?;
        self.set_state(CheckoutState::Finalized);
        info!(order_id = %order.order_id, "checkout finalized");
        Ok(CheckoutOutcome::Finalized { order })
    }
}
