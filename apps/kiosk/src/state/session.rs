//! # Session State
//!
//! Holds the single in-progress [`OrderSession`].
//!
//! ## Thread Safety
//! The session is wrapped in `Arc<Mutex<T>>` because:
//! 1. Kiosk commands and the payment task both modify it
//! 2. Only one of them may modify it at a time
//! 3. The payment task outlives the command that started it
//!
//! ## Session Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session State Operations                             │
//! │                                                                         │
//! │  Customer Action          Kiosk Command           Session Change        │
//! │  ───────────────          ─────────────           ──────────────        │
//! │                                                                         │
//! │  Tap "Mulai" ────────────► start_order() ───────► step 1 → 2           │
//! │                                                                         │
//! │  Tap "Tambah" ───────────► add_item() ──────────► cart line +1         │
//! │                                                                         │
//! │  Tap "Bayar" ────────────► confirm_payment() ───► Pending              │
//! │                                   │                                     │
//! │                          (task, after delay) ───► Succeeded, step 6    │
//! │                                                                         │
//! │  NOTE: Reads also take the lock, and release it before rendering.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use kiosk_core::{OrderSession, SessionDefaults};

/// Shared handle to the kiosk's order session.
///
/// Cloning yields another handle to the same session.
#[derive(Debug, Clone)]
pub struct SessionState {
    session: Arc<Mutex<OrderSession>>,
}

impl SessionState {
    /// Creates a session at the welcome screen.
    pub fn new(defaults: SessionDefaults) -> Self {
        SessionState {
            session: Arc::new(Mutex::new(OrderSession::with_defaults(defaults))),
        }
    }

    /// Executes a function with read access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let step = session_state.with_session(|s| s.step());
    /// ```
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&OrderSession) -> R,
    {
        let session = self.session.lock().expect("Session mutex poisoned");
        f(&session)
    }

    /// Executes a function with write access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// session_state.with_session_mut(|s| s.start_order());
    /// ```
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut OrderSession) -> R,
    {
        let mut session = self.session.lock().expect("Session mutex poisoned");
        f(&mut session)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(SessionDefaults::default())
    }
}
