//! # Payment Confirmation
//!
//! The payment gateway seam and the simulated gateway the kiosk ships with.
//!
//! ## Confirmation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Payment Confirmation                                 │
//! │                                                                         │
//! │  confirm_payment()                                                      │
//! │     │                                                                   │
//! │     ├─► begin_payment()          status = Pending, view busy            │
//! │     │                                                                   │
//! │     ├─► tokio::spawn ───────────► gateway.authorize(request).await      │
//! │     │                                  │                                │
//! │     │                                  ▼                                │
//! │     │                            complete_payment(outcome)              │
//! │     │                            render, send PaymentResult             │
//! │     │                                  │                                │
//! │     └─► PaymentHandle ◄─── oneshot ────┘                                │
//! │                                                                         │
//! │  Dropping the handle does NOT cancel the confirmation.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use async_trait::async_trait;
use kiosk_core::{PaymentOutcome, PaymentRequest, QueueNumber};
use tokio::sync::oneshot;
use tracing::debug;
use uuid::Uuid;

use crate::config::{PaymentSettings, SimulatedOutcome};
use crate::error::{KioskError, KioskResult};

// =============================================================================
// Gateway
// =============================================================================

/// Something that can approve or decline a payment.
#[async_trait]
pub trait PaymentGateway: Send + Sync + 'static {
    async fn authorize(&self, request: PaymentRequest) -> PaymentOutcome;
}

/// Gateway that waits a fixed delay and then answers the same way every time.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    delay: Duration,
    outcome: SimulatedOutcome,
    decline_message: String,
}

impl SimulatedGateway {
    /// Approves every payment after `delay`.
    pub fn approving(delay: Duration) -> Self {
        SimulatedGateway {
            delay,
            outcome: SimulatedOutcome::Approve,
            decline_message: String::new(),
        }
    }

    /// Declines every payment after `delay` with `message`.
    pub fn declining(delay: Duration, message: impl Into<String>) -> Self {
        SimulatedGateway {
            delay,
            outcome: SimulatedOutcome::Decline,
            decline_message: message.into(),
        }
    }

    pub fn from_settings(settings: &PaymentSettings) -> Self {
        SimulatedGateway {
            delay: settings.confirmation_delay(),
            outcome: settings.simulated_outcome,
            decline_message: settings.decline_message.clone(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::approving(Duration::from_millis(kiosk_core::PAYMENT_CONFIRMATION_DELAY_MS))
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn authorize(&self, request: PaymentRequest) -> PaymentOutcome {
        debug!(
            order_id = %request.order_id,
            amount = request.amount.minor(),
            method = %request.method,
            delay_ms = self.delay.as_millis() as u64,
            "Simulating payment confirmation"
        );

        tokio::time::sleep(self.delay).await;

        match self.outcome {
            SimulatedOutcome::Approve => PaymentOutcome::Approved,
            SimulatedOutcome::Decline => PaymentOutcome::Declined {
                reason: self.decline_message.clone(),
            },
        }
    }
}

// =============================================================================
// Result Handle
// =============================================================================

/// How a confirmed payment ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentResult {
    /// Paid. The customer's ticket.
    Approved(QueueNumber),

    /// Not paid. The message shown to the customer.
    Declined(String),
}

impl PaymentResult {
    pub fn is_approved(&self) -> bool {
        matches!(self, PaymentResult::Approved(_))
    }

    pub fn queue_number(&self) -> Option<&QueueNumber> {
        match self {
            PaymentResult::Approved(q) => Some(q),
            PaymentResult::Declined(_) => None,
        }
    }
}

/// Completion signal for one in-flight payment.
#[derive(Debug)]
pub struct PaymentHandle {
    order_id: Uuid,
    rx: oneshot::Receiver<PaymentResult>,
}

impl PaymentHandle {
    pub(crate) fn new(order_id: Uuid, rx: oneshot::Receiver<PaymentResult>) -> Self {
        PaymentHandle { order_id, rx }
    }

    /// The order being paid for.
    pub fn order_id(&self) -> Uuid {
        self.order_id
    }

    /// Waits for the confirmation to finish.
    pub async fn wait(self) -> KioskResult<PaymentResult> {
        self.rx.await.map_err(|_| KioskError::PaymentTaskLost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiosk_core::{Money, PaymentMethod};

    fn request() -> PaymentRequest {
        PaymentRequest {
            order_id: Uuid::new_v4(),
            amount: Money::from_minor(40000),
            method: PaymentMethod::Qris,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_gateway_waits_then_approves() {
        let gateway = SimulatedGateway::default();
        let start = tokio::time::Instant::now();

        let outcome = gateway.authorize(request()).await;

        assert_eq!(outcome, PaymentOutcome::Approved);
        assert!(start.elapsed() >= Duration::from_millis(2000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_gateway_declines() {
        let gateway = SimulatedGateway::declining(Duration::from_millis(300), "Saldo tidak cukup");

        let outcome = gateway.authorize(request()).await;

        assert_eq!(
            outcome,
            PaymentOutcome::Declined {
                reason: "Saldo tidak cukup".to_string()
            }
        );
    }

    #[test]
    fn test_gateway_from_settings() {
        let settings = PaymentSettings {
            confirmation_delay_ms: 750,
            simulated_outcome: SimulatedOutcome::Decline,
            ..Default::default()
        };

        let gateway = SimulatedGateway::from_settings(&settings);
        assert_eq!(gateway.delay(), Duration::from_millis(750));
    }

    #[tokio::test]
    async fn test_handle_reports_lost_task() {
        let (tx, rx) = oneshot::channel::<PaymentResult>();
        let handle = PaymentHandle::new(Uuid::new_v4(), rx);
        drop(tx);

        assert!(matches!(handle.wait().await, Err(KioskError::PaymentTaskLost)));
    }
}
