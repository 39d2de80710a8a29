//! # Renderer Seam
//!
//! The kiosk never draws anything itself. After every command it projects the
//! session into a [`KioskView`] and hands it to a [`Renderer`].

use kiosk_core::KioskView;
use tracing::{info, warn};

/// Receives view updates from the kiosk.
///
/// Implementations must be cheap: `render` is called after every command and
/// from the payment task.
pub trait Renderer: Send + Sync {
    /// Paints the current screen.
    fn render(&self, view: &KioskView);

    /// Shows a payment failure message to the customer.
    fn payment_failed(&self, message: &str);
}

/// Renderer that discards everything. Useful for tests and headless runs.
pub struct NoOpRenderer;

impl Renderer for NoOpRenderer {
    fn render(&self, _view: &KioskView) {}
    fn payment_failed(&self, _message: &str) {}
}

/// Logs a one-line summary of each view.
pub struct TracingRenderer;

impl Renderer for TracingRenderer {
    fn render(&self, view: &KioskView) {
        info!(
            step = %view.step,
            category = %view.selected_category,
            menu_items = view.menu.len(),
            cart_items = view.cart.item_count,
            total = %view.cart.total_display,
            busy = view.busy,
            queue = view.queue_number.as_ref().map(|q| q.as_str()).unwrap_or("-"),
            "render"
        );
    }

    fn payment_failed(&self, message: &str) {
        warn!(reason = message, "payment failed");
    }
}
