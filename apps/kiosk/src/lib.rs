//! # Kiosk Runtime Library
//!
//! Runtime for the Sederhana self-service ordering kiosk.
//!
//! ## Module Organization
//! ```text
//! kiosk_app/
//! ├── lib.rs          ◄─── You are here (tracing setup & demo run)
//! ├── kiosk.rs        ◄─── Kiosk commands (one per customer action)
//! ├── payment.rs      ◄─── PaymentGateway trait, simulated gateway, handle
//! ├── renderer.rs     ◄─── Renderer trait + no-op / tracing renderers
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   └── session.rs  ◄─── Shared session (Arc<Mutex<OrderSession>>)
//! ├── config.rs       ◄─── kiosk.toml + KIOSK_* environment
//! └── error.rs        ◄─── KioskError
//! ```

pub mod config;
pub mod error;
pub mod kiosk;
pub mod payment;
pub mod renderer;
pub mod state;

use std::sync::Arc;

use kiosk_core::{Catalog, FulfillmentType};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

pub use config::{KioskConfig, SimulatedOutcome};
pub use error::{KioskError, KioskResult};
pub use kiosk::Kiosk;
pub use payment::{PaymentGateway, PaymentHandle, PaymentResult, SimulatedGateway};
pub use renderer::{NoOpRenderer, Renderer, TracingRenderer};
pub use state::SessionState;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=kiosk_app=trace` - Show trace for the runtime only
/// - Default: INFO, DEBUG for kiosk crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,kiosk=debug,kiosk_app=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Runs one scripted order through all six screens.
///
/// ## Demo Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Load kiosk.toml (or defaults) and the catalog                      │
/// │  2. Welcome ─► dine in ─► two of the first dish ─► one side dish       │
/// │  3. Checkout ─► payment ─► wait for the simulated confirmation         │
/// │  4. Approved: show the queue number, then finish                       │
/// │     Declined: log the message and reset                                │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> KioskResult<()> {
    let config = KioskConfig::load_or_default(None);
    info!(store = %config.store.name, "Starting kiosk");

    let catalog = config.load_catalog()?;
    let picks = demo_picks(&catalog);

    let gateway = SimulatedGateway::from_settings(&config.payment);
    let kiosk = Kiosk::from_config(&config, catalog, Arc::new(TracingRenderer), gateway);
    kiosk.refresh();

    kiosk.start_order();
    kiosk.select_fulfillment(FulfillmentType::DineIn);
    for (category, item_id, times) in &picks {
        kiosk.select_category(category.as_str());
        for _ in 0..*times {
            kiosk.add_item(item_id)?;
        }
    }
    kiosk.go_to_checkout();
    kiosk.go_to_payment();

    let handle = match kiosk.confirm_payment() {
        Ok(handle) => handle,
        Err(reason) => {
            warn!(?reason, "Could not start payment");
            kiosk.reset();
            return Ok(());
        }
    };

    match handle.wait().await? {
        PaymentResult::Approved(queue_number) => {
            info!(queue_number = %queue_number, "Order placed");
            kiosk.finish_order();
        }
        PaymentResult::Declined(message) => {
            warn!(reason = %message, "Order not paid");
            kiosk.reset();
        }
    }

    Ok(())
}

/// Two of the first item in the first section, one of the first item in the
/// second.
fn demo_picks(catalog: &Catalog) -> Vec<(String, String, u32)> {
    catalog
        .sections()
        .iter()
        .filter_map(|s| s.items.first().map(|item| (s.category.to_string(), item.id.clone())))
        .zip([2, 1])
        .map(|((category, id), times)| (category, id, times))
        .collect()
}
