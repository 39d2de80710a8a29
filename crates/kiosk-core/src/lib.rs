//! # kiosk-core: Pure Ordering Logic for the Kiosk
//!
//! This crate is the **heart** of the ordering kiosk. It contains the cart,
//! the catalog and the six-step order session as plain synchronous code with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kiosk Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Renderer (web / terminal)                    │   │
//! │  │   Welcome ─► Fulfillment ─► Menu ─► Checkout ─► Pay ─► Queue    │   │
//! │  └─────────────────────────────▲───────────────────────────────────┘   │
//! │                                │ KioskView                              │
//! │  ┌─────────────────────────────┴───────────────────────────────────┐   │
//! │  │                    kiosk-app (runtime)                          │   │
//! │  │    commands, shared session, async payment, config, tracing     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kiosk-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐  │   │
//! │  │   │  money  │ │ catalog │ │  cart   │ │ session │ │  view   │  │   │
//! │  │   │  Money  │ │ Catalog │ │  Cart   │ │  Order  │ │ Kiosk   │  │   │
//! │  │   │ Rp fmt  │ │  Item   │ │LineItem │ │ Session │ │  View   │  │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO TIMERS • NO NETWORK • DETERMINISTIC (given RNG)   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Item, Category, Step, PaymentMethod, ...)
//! - [`money`] - Integer money and `Rp 35.000` formatting
//! - [`catalog`] - Read-only menu grouped by category
//! - [`cart`] - Line items with a derived total
//! - [`queue`] - Queue number generation and parsing
//! - [`session`] - The order step state machine
//! - [`view`] - Pure projection from session state to a renderer view model
//! - [`error`] - Domain error types
//! - [`validation`] - Catalog input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use kiosk_core::{Catalog, FulfillmentType, OrderSession, Step};
//!
//! let catalog = Catalog::standard();
//! let mut session = OrderSession::new();
//!
//! session.start_order();
//! session.select_fulfillment(FulfillmentType::DineIn);
//!
//! let rendang = catalog.find_item("p1").unwrap();
//! session.add_item(rendang);
//! session.add_item(rendang);
//!
//! assert_eq!(session.cart().total_item_count(), 2);
//! assert_eq!(session.cart().grand_total().minor(), 70_000);
//! assert!(session.go_to_checkout().is_applied());
//! assert_eq!(session.step(), Step::Checkout);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod queue;
pub mod session;
pub mod types;
pub mod validation;
pub mod view;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, LineItem};
pub use catalog::{Catalog, MenuSection};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{CurrencyFormat, Money};
pub use queue::QueueNumber;
pub use session::{
    CompletedOrder, OrderSession, PaymentOutcome, PaymentRequest, PaymentStatus, RejectReason,
    SessionDefaults, Transition,
};
pub use types::*;
pub use view::{CartView, CategoryTab, KioskView, LineView, MenuItemView};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Category shown when the menu opens.
pub const DEFAULT_CATEGORY: &str = "paket-nasi";

/// Letters a queue number may start with.
pub const QUEUE_LETTERS: &[u8] = b"ABCDEFGH";

/// Smallest numeric part of a queue number.
pub const QUEUE_NUMBER_MIN: u16 = 100;

/// Largest numeric part of a queue number.
pub const QUEUE_NUMBER_MAX: u16 = 999;

/// Most units of one item a cart line may hold.
///
/// Larger deltas on the quantity stepper clamp to this.
pub const MAX_ITEM_QUANTITY: u32 = 999;

/// Highest unit price a catalog item may carry (Rp 100.000.000).
pub const MAX_ITEM_PRICE: i64 = 100_000_000;

/// How long the simulated payment confirmation takes, in milliseconds.
pub const PAYMENT_CONFIRMATION_DELAY_MS: u64 = 2000;
