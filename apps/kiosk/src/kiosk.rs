//! # Kiosk Commands
//!
//! One method per customer action. Each command runs against the shared
//! session under its lock, projects a fresh [`KioskView`], releases the lock,
//! and hands the view to the renderer.
//!
//! ## Command Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Lifecycle                                    │
//! │                                                                         │
//! │  ┌──────────┐   lock    ┌──────────────┐  project  ┌──────────┐        │
//! │  │ command  │ ────────► │ OrderSession │ ────────► │KioskView │        │
//! │  └──────────┘           └──────────────┘           └────┬─────┘        │
//! │                              unlock                     │              │
//! │                                                         ▼              │
//! │                                                  renderer.render()     │
//! │                                                                         │
//! │  Rejected transitions render too, so the screen always matches the     │
//! │  session.                                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use kiosk_core::{
    Catalog, Category, CompletedOrder, CurrencyFormat, FulfillmentType, KioskView, OrderSession,
    PaymentMethod, PaymentStatus, RejectReason, SessionDefaults, Step, Transition,
};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::config::KioskConfig;
use crate::error::{KioskError, KioskResult};
use crate::payment::{PaymentGateway, PaymentHandle, PaymentResult};
use crate::renderer::Renderer;
use crate::state::SessionState;

/// The running kiosk: one session, one menu, one screen.
pub struct Kiosk<G: PaymentGateway> {
    session: SessionState,
    catalog: Arc<Catalog>,
    renderer: Arc<dyn Renderer>,
    gateway: Arc<G>,
    currency: CurrencyFormat,
}

impl<G: PaymentGateway> Kiosk<G> {
    /// Creates a kiosk with the built-in defaults (`Rp` formatting, the
    /// `paket-nasi` category, QRIS preselected).
    pub fn new(catalog: Catalog, renderer: Arc<dyn Renderer>, gateway: G) -> Self {
        Self::with_parts(
            catalog,
            renderer,
            gateway,
            SessionDefaults::default(),
            CurrencyFormat::default(),
        )
    }

    /// Creates a kiosk with defaults and formatting taken from `config`.
    pub fn from_config(
        config: &KioskConfig,
        catalog: Catalog,
        renderer: Arc<dyn Renderer>,
        gateway: G,
    ) -> Self {
        Self::with_parts(
            catalog,
            renderer,
            gateway,
            config.session_defaults(),
            config.currency_format(),
        )
    }

    fn with_parts(
        catalog: Catalog,
        renderer: Arc<dyn Renderer>,
        gateway: G,
        defaults: SessionDefaults,
        currency: CurrencyFormat,
    ) -> Self {
        Kiosk {
            session: SessionState::new(defaults),
            catalog: Arc::new(catalog),
            renderer,
            gateway: Arc::new(gateway),
            currency,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn step(&self) -> Step {
        self.session.with_session(|s| s.step())
    }

    /// The current view, without rendering it.
    pub fn view(&self) -> KioskView {
        self.session
            .with_session(|s| KioskView::project(s, &self.catalog, &self.currency))
    }

    /// Receipt of the paid order while the queue number is on screen.
    pub fn receipt(&self) -> Option<CompletedOrder> {
        self.session.with_session(|s| s.completed_order().cloned())
    }

    /// Paints the current screen. Call once at startup.
    pub fn refresh(&self) {
        self.renderer.render(&self.view());
    }

    // =========================================================================
    // Step Commands
    // =========================================================================

    pub fn start_order(&self) -> Transition {
        self.transition("start_order", |s| s.start_order())
    }

    pub fn select_fulfillment(&self, fulfillment: FulfillmentType) -> Transition {
        self.transition("select_fulfillment", |s| s.select_fulfillment(fulfillment))
    }

    pub fn go_to_checkout(&self) -> Transition {
        self.transition("go_to_checkout", |s| s.go_to_checkout())
    }

    pub fn go_to_payment(&self) -> Transition {
        self.transition("go_to_payment", |s| s.go_to_payment())
    }

    pub fn finish_order(&self) -> Transition {
        self.transition("finish_order", |s| s.finish_order())
    }

    /// Abandons the current order and returns to the welcome screen.
    pub fn reset(&self) -> Transition {
        self.transition("reset", |s| s.reset())
    }

    // =========================================================================
    // Menu and Cart Commands
    // =========================================================================

    pub fn select_category(&self, category: impl Into<Category>) {
        let category = category.into();
        debug!(category = %category, "select_category command");
        self.update(|s| s.select_category(category));
    }

    /// Returns `false` while a payment is pending or already approved.
    pub fn select_payment(&self, method: PaymentMethod) -> bool {
        debug!(method = %method, "select_payment command");
        self.update(|s| s.select_payment(method))
    }

    /// Adds one unit of the catalog item `item_id` to the cart.
    ///
    /// `Ok(false)` means the order is frozen or the line is at its cap.
    pub fn add_item(&self, item_id: &str) -> KioskResult<bool> {
        let item = self
            .catalog
            .find_item(item_id)
            .ok_or_else(|| KioskError::UnknownItem(item_id.to_string()))?;

        debug!(item_id, price = item.price.minor(), "add_item command");
        Ok(self.update(|s| s.add_item(item)))
    }

    /// Returns `false` when the cart has no line for `item_id` or the order
    /// is frozen.
    pub fn change_quantity(&self, item_id: &str, delta: i64) -> bool {
        debug!(item_id, delta, "change_quantity command");
        self.update(|s| s.change_quantity(item_id, delta))
    }

    /// Returns `false` when the cart has no line for `item_id` or the order
    /// is frozen.
    pub fn remove_item(&self, item_id: &str) -> bool {
        debug!(item_id, "remove_item command");
        self.update(|s| s.remove_item(item_id))
    }

    pub fn clear_cart(&self) -> bool {
        debug!("clear_cart command");
        self.update(|s| s.clear_cart())
    }

    // =========================================================================
    // Payment
    // =========================================================================

    /// Starts confirming the payment for the current order.
    ///
    /// The session stays on the payment screen with a busy view until the
    /// gateway answers. The confirmation runs on a spawned task and finishes
    /// even if the returned handle is dropped.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn confirm_payment(&self) -> Result<PaymentHandle, RejectReason> {
        let (transition, request) =
            self.update(|s| (s.begin_payment(), s.payment_request()));
        log_transition("confirm_payment", &transition);

        if let Transition::Rejected { reason, .. } = transition {
            return Err(reason);
        }

        info!(
            order_id = %request.order_id,
            amount = request.amount.minor(),
            method = %request.method,
            "Payment confirmation started"
        );

        let (tx, rx) = oneshot::channel();
        let handle = PaymentHandle::new(request.order_id, rx);

        let session = self.session.clone();
        let catalog = Arc::clone(&self.catalog);
        let renderer = Arc::clone(&self.renderer);
        let gateway = Arc::clone(&self.gateway);
        let currency = self.currency.clone();

        tokio::spawn(async move {
            let outcome = gateway.authorize(request).await;

            let (transition, result, view) = session.with_session_mut(|s| {
                let transition = s.complete_payment(outcome, &mut rand::thread_rng());
                let result = if transition.is_applied() {
                    settled_result(s)
                } else {
                    None
                };
                (transition, result, KioskView::project(s, &catalog, &currency))
            });
            log_transition("complete_payment", &transition);

            renderer.render(&view);

            let Some(result) = result else {
                warn!("Payment finished without a pending confirmation");
                return;
            };

            match &result {
                PaymentResult::Approved(queue_number) => {
                    info!(queue_number = %queue_number, "Payment approved");
                }
                PaymentResult::Declined(message) => {
                    warn!(reason = %message, "Payment declined");
                    renderer.payment_failed(message);
                }
            }

            // The caller may have dropped the handle.
            let _ = tx.send(result);
        });

        Ok(handle)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn transition<F>(&self, command: &str, f: F) -> Transition
    where
        F: FnOnce(&mut OrderSession) -> Transition,
    {
        let transition = self.update(f);
        log_transition(command, &transition);
        transition
    }

    /// Runs `f` under the lock, then renders outside it.
    fn update<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut OrderSession) -> R,
    {
        let (result, view) = self.session.with_session_mut(|s| {
            let result = f(s);
            (result, KioskView::project(s, &self.catalog, &self.currency))
        });
        self.renderer.render(&view);
        result
    }
}

fn settled_result(session: &OrderSession) -> Option<PaymentResult> {
    match session.payment_status() {
        PaymentStatus::Succeeded => session.queue_number().cloned().map(PaymentResult::Approved),
        PaymentStatus::Failed { message } => Some(PaymentResult::Declined(message.clone())),
        PaymentStatus::Idle | PaymentStatus::Pending => None,
    }
}

fn log_transition(command: &str, transition: &Transition) {
    match transition {
        Transition::Applied { from, to } => {
            info!(command, from = %from, to = %to, "Transition applied");
        }
        Transition::Rejected { at, reason } => {
            debug!(command, at = %at, ?reason, "Transition rejected");
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
