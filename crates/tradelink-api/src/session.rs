//! # Session Events
//!
//! The 401 path. Token issuance and storage live in an external auth
//! collaborator; this crate only reports that the session died.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  any request ──► 401 ──► SessionEvents::session_expired()               │
//! │                              │                                          │
//! │                              ▼                                          │
//! │                    external session manager                             │
//! │                    (clears token, routes to login)                      │
//! │                                                                         │
//! │  The failing call still returns ApiError::Unauthorized to its caller;  │
//! │  the callback is a side effect, not a replacement for the error.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::warn;

/// Callback into the external session manager.
///
/// Implemented by the app shell. Fired at most once per failing call.
pub trait SessionEvents: Send + Sync {
    /// The backend answered 401; the current token is dead.
    fn session_expired(&self);
}

/// Default implementation: log and move on.
///
/// Used when no session manager is wired up (tests, the demo binary).
#[derive(Debug, Default)]
pub struct LoggingSession;

impl SessionEvents for LoggingSession {
    fn session_expired(&self) {
        warn!("Session expired (401); no session manager registered");
    }
}
