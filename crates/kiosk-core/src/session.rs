//! # Order Session
//!
//! The six-step state machine that walks one customer through one order.
//!
//! ## Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Order Session Steps                              │
//! │                                                                         │
//! │  ┌──────────┐ start_order ┌──────────────┐ select_fulfillment ┌──────┐ │
//! │  │1 Welcome │────────────►│2 Fulfillment │───────────────────►│3 Menu│ │
//! │  └──────────┘             └──────────────┘                    └──┬───┘ │
//! │       ▲                                         go_to_checkout   │     │
//! │       │                                         (cart non-empty) ▼     │
//! │       │ finish_order  ┌──────────┐ complete   ┌─────────┐  ┌──────────┐│
//! │       └───────────────│6 Queue   │◄───────────│5 Payment│◄─│4 Checkout││
//! │                       └──────────┘ (approved) └─┬─────▲─┘  └──────────┘│
//! │                                      begin_payment │     │ declined     │
//! │                                                  ▼     │              │
//! │                                              [Pending]──┘              │
//! │                                                                         │
//! │  • Triggers fired from the wrong step are rejected, state unchanged.   │
//! │  • While payment is pending, every trigger is rejected.                │
//! │  • While payment is pending or approved the order is frozen: cart      │
//! │    edits and select_payment are refused (they return false).           │
//! │  • select_category is a free setter at any step.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rejections are values ([`Transition::Rejected`]), not errors: an empty
//! cart at checkout is an ordinary situation the renderer handles by keeping
//! the button disabled.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::{Cart, LineItem};
use crate::money::Money;
use crate::queue::QueueNumber;
use crate::types::{Category, FulfillmentType, Item, PaymentMethod, Step};

// =============================================================================
// Transition Outcome
// =============================================================================

/// Why a trigger was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum RejectReason {
    /// The trigger belongs to another step.
    WrongStep { expected: Step },

    /// Checkout needs at least one line in the cart.
    EmptyCart,

    /// A payment confirmation is in flight and cannot be cancelled.
    PaymentPending,

    /// `complete_payment` arrived without a pending payment.
    NoPendingPayment,
}

/// The outcome of a step trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum Transition {
    /// The trigger ran. `from` and `to` are equal for triggers that change
    /// state without leaving the step (starting or declining a payment).
    Applied { from: Step, to: Step },

    /// The trigger was refused; the session is unchanged.
    Rejected { at: Step, reason: RejectReason },
}

impl Transition {
    pub fn is_applied(&self) -> bool {
        matches!(self, Transition::Applied { .. })
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Transition::Rejected { .. })
    }

    /// The step the session is on after this transition.
    pub fn step(&self) -> Step {
        match self {
            Transition::Applied { to, .. } => *to,
            Transition::Rejected { at, .. } => *at,
        }
    }
}

// =============================================================================
// Payment State
// =============================================================================

/// Where the payment confirmation stands.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum PaymentStatus {
    /// Nothing submitted yet.
    #[default]
    Idle,
    /// Confirmation in flight. The renderer shows a busy indicator.
    Pending,
    /// Confirmed; a queue number has been assigned.
    Succeeded,
    /// Declined or failed. The customer may retry from the payment screen.
    Failed { message: String },
}

impl PaymentStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, PaymentStatus::Pending)
    }

    /// Message to show the customer after a failed attempt.
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            PaymentStatus::Failed { message } => Some(message),
            _ => None,
        }
    }
}

/// What the payment gateway decided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "result")]
pub enum PaymentOutcome {
    Approved,
    Declined { reason: String },
}

/// Everything a gateway needs to confirm one payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub order_id: Uuid,
    pub amount: Money,
    pub method: PaymentMethod,
}

/// Receipt data for a paid order, kept until the customer finishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedOrder {
    pub order_id: Uuid,
    pub queue_number: QueueNumber,
    pub fulfillment: Option<FulfillmentType>,
    pub payment_method: PaymentMethod,
    pub lines: Vec<LineItem>,
    pub total: Money,
    pub paid_at: DateTime<Utc>,
}

// =============================================================================
// Session Defaults
// =============================================================================

/// Values a session falls back to when it starts or resets.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionDefaults {
    /// Category shown when the menu opens.
    pub category: Category,

    /// Method preselected on the payment screen.
    pub payment_method: PaymentMethod,
}

// =============================================================================
// Order Session
// =============================================================================

/// One customer's pass through the kiosk.
///
/// ## Invariants
/// - `step` only moves along the table in the module docs
/// - `queue_number` is `Some` only after an approved payment
/// - `completed` is `Some` exactly when `step == QueueDisplay`
/// - Cart and payment method do not change while a payment is pending or
///   after it succeeded, so the receipt matches what was authorized
#[derive(Debug, Clone)]
pub struct OrderSession {
    defaults: SessionDefaults,
    order_id: Uuid,
    started_at: DateTime<Utc>,
    step: Step,
    fulfillment: Option<FulfillmentType>,
    selected_category: Category,
    payment_method: PaymentMethod,
    payment: PaymentStatus,
    queue_number: Option<QueueNumber>,
    cart: Cart,
    completed: Option<CompletedOrder>,
}

impl OrderSession {
    /// Creates a session at the welcome screen with the built-in defaults.
    pub fn new() -> Self {
        Self::with_defaults(SessionDefaults::default())
    }

    pub fn with_defaults(defaults: SessionDefaults) -> Self {
        OrderSession {
            order_id: Uuid::new_v4(),
            started_at: Utc::now(),
            step: Step::Welcome,
            fulfillment: None,
            selected_category: defaults.category.clone(),
            payment_method: defaults.payment_method,
            payment: PaymentStatus::Idle,
            queue_number: None,
            cart: Cart::new(),
            completed: None,
            defaults,
        }
    }

    // =========================================================================
    // Step Triggers
    // =========================================================================

    /// 1 → 2.
    pub fn start_order(&mut self) -> Transition {
        self.advance(Step::Welcome, Step::FulfillmentSelect, |_| {})
    }

    /// 2 → 3. Records the fulfillment type and opens the default category.
    pub fn select_fulfillment(&mut self, fulfillment: FulfillmentType) -> Transition {
        self.advance(Step::FulfillmentSelect, Step::MenuBrowse, |s| {
            s.fulfillment = Some(fulfillment);
            s.selected_category = s.defaults.category.clone();
        })
    }

    /// 3 → 4, only with a non-empty cart.
    pub fn go_to_checkout(&mut self) -> Transition {
        if let Some(rejected) = self.guard(Step::MenuBrowse) {
            return rejected;
        }
        if self.cart.is_empty() {
            return self.reject(RejectReason::EmptyCart);
        }
        self.advance(Step::MenuBrowse, Step::Checkout, |_| {})
    }

    /// 4 → 5. Preselects the default payment method.
    pub fn go_to_payment(&mut self) -> Transition {
        self.advance(Step::Checkout, Step::Payment, |s| {
            s.payment_method = s.defaults.payment_method;
        })
    }

    /// Marks the payment as in flight. Stays on step 5.
    ///
    /// Allowed again after a declined attempt.
    pub fn begin_payment(&mut self) -> Transition {
        self.advance(Step::Payment, Step::Payment, |s| {
            s.payment = PaymentStatus::Pending;
        })
    }

    /// Applies the gateway's answer to a pending payment.
    ///
    /// Approved: assigns a queue number, records the receipt, moves to 6.
    /// Declined: stays on 5 with the reason as the failure message.
    pub fn complete_payment(&mut self, outcome: PaymentOutcome, rng: &mut impl Rng) -> Transition {
        if !self.payment.is_pending() {
            return self.reject(RejectReason::NoPendingPayment);
        }

        match outcome {
            PaymentOutcome::Approved => {
                let queue_number = QueueNumber::generate(rng);
                self.completed = Some(CompletedOrder {
                    order_id: self.order_id,
                    queue_number: queue_number.clone(),
                    fulfillment: self.fulfillment,
                    payment_method: self.payment_method,
                    lines: self.cart.lines().to_vec(),
                    total: self.cart.grand_total(),
                    paid_at: Utc::now(),
                });
                self.queue_number = Some(queue_number);
                self.payment = PaymentStatus::Succeeded;
                self.step = Step::QueueDisplay;
                Transition::Applied {
                    from: Step::Payment,
                    to: Step::QueueDisplay,
                }
            }
            PaymentOutcome::Declined { reason } => {
                self.payment = PaymentStatus::Failed { message: reason };
                Transition::Applied {
                    from: Step::Payment,
                    to: Step::Payment,
                }
            }
        }
    }

    /// 6 → 1. Resets the session and empties the cart.
    pub fn finish_order(&mut self) -> Transition {
        if let Some(rejected) = self.guard(Step::QueueDisplay) {
            return rejected;
        }
        self.reset()
    }

    /// Returns to the welcome screen from anywhere except a pending payment.
    ///
    /// Issues a fresh order id; defaults are kept.
    pub fn reset(&mut self) -> Transition {
        if self.payment.is_pending() {
            return self.reject(RejectReason::PaymentPending);
        }
        let from = self.step;
        *self = OrderSession::with_defaults(self.defaults.clone());
        Transition::Applied {
            from,
            to: Step::Welcome,
        }
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Switches the visible menu category. No guard, no step change.
    pub fn select_category(&mut self, category: Category) {
        self.selected_category = category;
    }

    /// Chooses how to pay. No step change.
    ///
    /// Returns `false` while the order is frozen.
    pub fn select_payment(&mut self, method: PaymentMethod) -> bool {
        if self.is_order_frozen() {
            return false;
        }
        self.payment_method = method;
        true
    }

    // =========================================================================
    // Cart Delegation
    // =========================================================================
    //
    // Each returns whether the cart changed. A frozen order never changes.

    pub fn add_item(&mut self, item: &Item) -> bool {
        !self.is_order_frozen() && self.cart.add_item(item)
    }

    pub fn change_quantity(&mut self, item_id: &str, delta: i64) -> bool {
        !self.is_order_frozen() && self.cart.change_quantity(item_id, delta)
    }

    pub fn remove_item(&mut self, item_id: &str) -> bool {
        !self.is_order_frozen() && self.cart.remove_item(item_id)
    }

    pub fn clear_cart(&mut self) -> bool {
        !self.is_order_frozen() && self.cart.clear()
    }

    // =========================================================================
    // Read Access
    // =========================================================================

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn order_id(&self) -> Uuid {
        self.order_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn fulfillment(&self) -> Option<FulfillmentType> {
        self.fulfillment
    }

    pub fn selected_category(&self) -> &Category {
        &self.selected_category
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn payment_status(&self) -> &PaymentStatus {
        &self.payment
    }

    pub fn queue_number(&self) -> Option<&QueueNumber> {
        self.queue_number.as_ref()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn completed_order(&self) -> Option<&CompletedOrder> {
        self.completed.as_ref()
    }

    pub fn defaults(&self) -> &SessionDefaults {
        &self.defaults
    }

    /// Whether cart edits and payment method changes are refused: a payment
    /// is in flight, or the order is paid and its queue number is showing.
    pub fn is_order_frozen(&self) -> bool {
        matches!(self.payment, PaymentStatus::Pending | PaymentStatus::Succeeded)
    }

    /// Whether the checkout button should be enabled.
    pub fn can_checkout(&self) -> bool {
        !self.cart.is_empty()
    }

    /// The request to hand to a payment gateway for the current order.
    pub fn payment_request(&self) -> PaymentRequest {
        PaymentRequest {
            order_id: self.order_id,
            amount: self.cart.grand_total(),
            method: self.payment_method,
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn guard(&self, expected: Step) -> Option<Transition> {
        if self.payment.is_pending() {
            return Some(self.reject(RejectReason::PaymentPending));
        }
        if self.step != expected {
            return Some(self.reject(RejectReason::WrongStep { expected }));
        }
        None
    }

    fn advance(&mut self, from: Step, to: Step, effect: impl FnOnce(&mut Self)) -> Transition {
        if let Some(rejected) = self.guard(from) {
            return rejected;
        }
        effect(self);
        self.step = to;
        Transition::Applied { from, to }
    }

    fn reject(&self, reason: RejectReason) -> Transition {
        Transition::Rejected {
            at: self.step,
            reason,
        }
    }
}

impl Default for OrderSession {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(2024)
    }

    fn at_menu() -> OrderSession {
        let mut session = OrderSession::new();
        session.start_order();
        session.select_fulfillment(FulfillmentType::DineIn);
        session
    }

    fn at_payment(catalog: &Catalog) -> OrderSession {
        let mut session = at_menu();
        session.add_item(catalog.find_item("p1").unwrap());
        session.go_to_checkout();
        session.go_to_payment();
        session
    }

    #[test]
    fn test_new_session_is_blank() {
        let session = OrderSession::new();
        assert_eq!(session.step(), Step::Welcome);
        assert_eq!(session.fulfillment(), None);
        assert_eq!(session.selected_category().as_str(), "paket-nasi");
        assert_eq!(session.payment_method(), PaymentMethod::Qris);
        assert_eq!(session.payment_status(), &PaymentStatus::Idle);
        assert!(session.queue_number().is_none());
        assert!(session.cart().is_empty());
    }

    #[test]
    fn test_select_fulfillment_resets_category() {
        let mut session = OrderSession::new();
        session.start_order();
        session.select_category(Category::new("dessert"));

        let t = session.select_fulfillment(FulfillmentType::Takeaway);

        assert_eq!(
            t,
            Transition::Applied {
                from: Step::FulfillmentSelect,
                to: Step::MenuBrowse
            }
        );
        assert_eq!(session.fulfillment(), Some(FulfillmentType::Takeaway));
        assert_eq!(session.selected_category().as_str(), "paket-nasi");
    }

    #[test]
    fn test_checkout_with_empty_cart_is_rejected() {
        let mut session = at_menu();

        let t = session.go_to_checkout();

        assert_eq!(
            t,
            Transition::Rejected {
                at: Step::MenuBrowse,
                reason: RejectReason::EmptyCart
            }
        );
        assert_eq!(session.step(), Step::MenuBrowse);
        assert!(!session.can_checkout());
    }

    #[test]
    fn test_adding_an_item_unblocks_checkout() {
        let catalog = Catalog::standard();
        let mut session = at_menu();
        assert!(session.go_to_checkout().is_rejected());

        session.add_item(catalog.find_item("m3").unwrap());

        assert!(session.can_checkout());
        assert!(session.go_to_checkout().is_applied());
        assert_eq!(session.step(), Step::Checkout);
    }

    #[test]
    fn test_emptying_cart_blocks_checkout_again() {
        let catalog = Catalog::standard();
        let mut session = at_menu();
        session.add_item(catalog.find_item("m3").unwrap());
        session.change_quantity("m3", -1);

        assert!(session.go_to_checkout().is_rejected());
    }

    #[test]
    fn test_out_of_step_triggers_are_rejected() {
        let mut session = OrderSession::new();

        assert_eq!(
            session.go_to_payment(),
            Transition::Rejected {
                at: Step::Welcome,
                reason: RejectReason::WrongStep {
                    expected: Step::Checkout
                }
            }
        );
        assert!(session.select_fulfillment(FulfillmentType::DineIn).is_rejected());
        assert!(session.finish_order().is_rejected());
        assert!(session.begin_payment().is_rejected());
        assert_eq!(session.step(), Step::Welcome);
        assert_eq!(session.fulfillment(), None);

        session.start_order();
        assert!(session.start_order().is_rejected());
        assert_eq!(session.step(), Step::FulfillmentSelect);
    }

    #[test]
    fn test_go_to_payment_restores_default_method() {
        let catalog = Catalog::standard();
        let mut session = at_menu();
        session.add_item(catalog.find_item("p2").unwrap());
        session.go_to_checkout();
        session.select_payment(PaymentMethod::Cash);

        session.go_to_payment();

        assert_eq!(session.step(), Step::Payment);
        assert_eq!(session.payment_method(), PaymentMethod::Qris);
    }

    #[test]
    fn test_setters_work_at_any_step() {
        let mut session = OrderSession::new();
        session.select_category(Category::new("minuman"));
        assert!(session.select_payment(PaymentMethod::Card));

        assert_eq!(session.step(), Step::Welcome);
        assert_eq!(session.selected_category().as_str(), "minuman");
        assert_eq!(session.payment_method(), PaymentMethod::Card);
    }

    #[test]
    fn test_pending_payment_blocks_triggers() {
        let catalog = Catalog::standard();
        let mut session = at_payment(&catalog);

        assert!(session.begin_payment().is_applied());
        assert!(session.payment_status().is_pending());

        let pending = Transition::Rejected {
            at: Step::Payment,
            reason: RejectReason::PaymentPending,
        };
        assert_eq!(session.begin_payment(), pending);
        assert_eq!(session.reset(), pending);
        assert_eq!(session.finish_order(), pending);
        assert_eq!(session.step(), Step::Payment);
    }

    #[test]
    fn test_pending_payment_freezes_order() {
        let catalog = Catalog::standard();
        let mut session = at_payment(&catalog);
        session.begin_payment();
        let authorized = session.payment_request();

        assert!(session.is_order_frozen());
        assert!(!session.add_item(catalog.find_item("m1").unwrap()));
        assert!(!session.change_quantity("p1", 2));
        assert!(!session.remove_item("p1"));
        assert!(!session.clear_cart());
        assert!(!session.select_payment(PaymentMethod::Cash));
        assert_eq!(session.payment_request(), authorized);

        session.complete_payment(PaymentOutcome::Approved, &mut rng());

        let receipt = session.completed_order().unwrap();
        assert_eq!(receipt.total, authorized.amount);
        assert_eq!(receipt.payment_method, authorized.method);
        assert_eq!(receipt.lines.len(), 1);
        assert_eq!(receipt.lines[0].item_id, "p1");
    }

    #[test]
    fn test_paid_order_stays_frozen_until_finish() {
        let catalog = Catalog::standard();
        let mut session = at_payment(&catalog);
        session.begin_payment();
        session.complete_payment(PaymentOutcome::Approved, &mut rng());
        assert_eq!(session.step(), Step::QueueDisplay);

        assert!(!session.add_item(catalog.find_item("m1").unwrap()));
        assert!(!session.remove_item("p1"));
        assert!(!session.select_payment(PaymentMethod::Card));
        assert_eq!(session.cart().line_count(), 1);
        assert_eq!(session.payment_method(), PaymentMethod::Qris);

        session.finish_order();

        assert!(!session.is_order_frozen());
        assert!(session.add_item(catalog.find_item("m1").unwrap()));
        assert!(session.select_payment(PaymentMethod::Card));
    }

    #[test]
    fn test_declined_payment_unfreezes_order() {
        let catalog = Catalog::standard();
        let mut session = at_payment(&catalog);
        session.begin_payment();
        session.complete_payment(
            PaymentOutcome::Declined {
                reason: "Saldo tidak cukup".to_string(),
            },
            &mut rng(),
        );

        assert!(!session.is_order_frozen());
        assert!(session.select_payment(PaymentMethod::Cash));
        assert!(session.change_quantity("p1", 1));
        assert_eq!(session.payment_request().amount.minor(), 70000);
    }

    #[test]
    fn test_complete_without_pending_is_rejected() {
        let catalog = Catalog::standard();
        let mut session = at_payment(&catalog);

        let t = session.complete_payment(PaymentOutcome::Approved, &mut rng());

        assert_eq!(
            t,
            Transition::Rejected {
                at: Step::Payment,
                reason: RejectReason::NoPendingPayment
            }
        );
        assert!(session.queue_number().is_none());
    }

    #[test]
    fn test_declined_payment_can_be_retried() {
        let catalog = Catalog::standard();
        let mut session = at_payment(&catalog);

        session.begin_payment();
        let t = session.complete_payment(
            PaymentOutcome::Declined {
                reason: "QRIS timeout".to_string(),
            },
            &mut rng(),
        );

        assert_eq!(
            t,
            Transition::Applied {
                from: Step::Payment,
                to: Step::Payment
            }
        );
        assert_eq!(session.payment_status().failure_message(), Some("QRIS timeout"));
        assert!(session.queue_number().is_none());

        assert!(session.begin_payment().is_applied());
        session.complete_payment(PaymentOutcome::Approved, &mut rng());
        assert_eq!(session.step(), Step::QueueDisplay);
        assert_eq!(session.payment_status(), &PaymentStatus::Succeeded);
    }

    #[test]
    fn test_full_flow() {
        let catalog = Catalog::standard();
        let mut session = OrderSession::new();
        let first_order = session.order_id();

        assert!(session.start_order().is_applied());
        assert!(session.select_fulfillment(FulfillmentType::DineIn).is_applied());
        session.add_item(catalog.find_item("p1").unwrap());
        session.add_item(catalog.find_item("m1").unwrap());
        assert!(session.go_to_checkout().is_applied());
        assert!(session.go_to_payment().is_applied());
        assert_eq!(session.payment_request().amount.minor(), 40000);
        assert!(session.begin_payment().is_applied());

        let t = session.complete_payment(PaymentOutcome::Approved, &mut rng());

        assert_eq!(t.step(), Step::QueueDisplay);
        let ticket = session.queue_number().cloned().unwrap();
        let receipt = session.completed_order().unwrap();
        assert_eq!(receipt.queue_number, ticket);
        assert_eq!(receipt.total.minor(), 40000);
        assert_eq!(receipt.lines.len(), 2);
        assert_eq!(receipt.fulfillment, Some(FulfillmentType::DineIn));

        let t = session.finish_order();

        assert_eq!(
            t,
            Transition::Applied {
                from: Step::QueueDisplay,
                to: Step::Welcome
            }
        );
        assert_eq!(session.step(), Step::Welcome);
        assert!(session.cart().is_empty());
        assert!(session.queue_number().is_none());
        assert!(session.completed_order().is_none());
        assert_eq!(session.fulfillment(), None);
        assert_eq!(session.payment_status(), &PaymentStatus::Idle);
        assert_ne!(session.order_id(), first_order);
    }

    #[test]
    fn test_reset_keeps_configured_defaults() {
        let defaults = SessionDefaults {
            category: Category::new("minuman"),
            payment_method: PaymentMethod::Cash,
        };
        let mut session = OrderSession::with_defaults(defaults.clone());
        session.start_order();
        session.select_category(Category::new("dessert"));
        session.select_payment(PaymentMethod::Card);

        session.reset();

        assert_eq!(session.defaults(), &defaults);
        assert_eq!(session.selected_category().as_str(), "minuman");
        assert_eq!(session.payment_method(), PaymentMethod::Cash);
    }
}
