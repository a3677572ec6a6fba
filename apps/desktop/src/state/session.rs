//! # Session State
//!
//! The one form session the frontend is editing.
//!
//! ## Thread Safety
//! The session is wrapped in `Arc<Mutex<T>>`: every command reads or
//! mutates it through a closure, and the lock is never held across an
//! `.await`. Export work clones the frozen receipt out first.
//!
//! ## Command → Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session State Operations                             │
//! │                                                                         │
//! │  Frontend Action          Command                  Session Change       │
//! │  ───────────────          ───────                  ──────────────       │
//! │                                                                         │
//! │  Type in a box ──────────► update_field() ───────► ride.<field> = v    │
//! │                                                                         │
//! │  Pick a date ────────────► set_ride_date() ──────► ride.date = "…"     │
//! │                                                                         │
//! │  Click ↻ ────────────────► regenerate_invoice_id() ► new invoice id    │
//! │                                                                         │
//! │  Generate ───────────────► generate_receipt() ───► Previewing(receipt) │
//! │                                                                         │
//! │  Back ───────────────────► back_to_form() ───────► Editing             │
//! │                                                                         │
//! │  New receipt ────────────► reset_form() ─────────► trip cleared        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use cabslip_core::FormSession;

/// Shared handle to the form session.
#[derive(Clone)]
pub struct SessionState {
    session: Arc<Mutex<FormSession>>,
}

impl SessionState {
    pub fn new(session: FormSession) -> Self {
        SessionState {
            session: Arc::new(Mutex::new(session)),
        }
    }

    /// Executes a function with read access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let snapshot = session_state.with_session(|s| s.snapshot());
    /// ```
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&FormSession) -> R,
    {
        // Session methods never leave a half-updated phase
        let session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&session)
    }

    /// Executes a function with write access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// session_state.with_session_mut(|s| s.back_to_form())?;
    /// ```
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut FormSession) -> R,
    {
        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut session)
    }
}
