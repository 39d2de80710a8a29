//! # State Module
//!
//! Shared runtime state for the kiosk.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │   Kiosk commands ─────────┐           ┌───────── payment task          │
//! │   (caller thread)         ▼           ▼          (tokio::spawn)        │
//! │                  ┌──────────────────────────┐                          │
//! │                  │      SessionState        │                          │
//! │                  │  Arc<Mutex<OrderSession>>│                          │
//! │                  └──────────────────────────┘                          │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • Every read and write goes through the mutex                         │
//! │  • The lock is never held across an `.await`                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod session;

pub use session::SessionState;
