//! # Kiosk Demo Entry Point
//!
//! Walks one scripted order through the kiosk with the tracing renderer.
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load kiosk.toml and the catalog
//! 3. Build the kiosk (session, renderer, simulated gateway)
//! 4. Run the scripted order
//!
//! Set `KIOSK_PAYMENT_OUTCOME=decline` to watch the failure path.

use tracing::error;

#[tokio::main]
async fn main() {
    // The actual setup is in lib.rs for better testability
    kiosk_app::init_tracing();

    if let Err(e) = kiosk_app::run().await {
        error!("Kiosk failed: {}", e);
        std::process::exit(1);
    }
}
