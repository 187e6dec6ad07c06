//! # API Error Types
//!
//! Error taxonomy for calls against the trading backend.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       API Error Categories                              │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │      Auth       │  │   Transport     │  │      Backend            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Unauthorized   │  │  Transport      │  │  Validation             │ │
//! │  │  (fatal to the  │  │  Timeout        │  │  Conflict               │ │
//! │  │   session)      │  │                 │  │  Rejected, Server       │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  Handling strategy (per category):                                     │
//! │  • Unauthorized  → session-expired callback, never retried             │
//! │  • Transport     → surfaced to the user, manual retry only             │
//! │  • Conflict      → specific sale numbers + refresh-and-retry path      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Structured Conflicts
//! The backend reports an already-receipted sale with a structured payload
//! (`code: "SALE_ALREADY_RECEIPTED"`, `saleIds`, `receiptNumbers`). We
//! decode that payload into [`ApiError::Conflict`]; when the body carries
//! no identifiers the variant degrades to a generic conflict message.
//! Free-text pattern matching on server messages is deliberately absent.

use thiserror::Error;

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// API error type covering transport and backend failures.
#[derive(Debug, Error)]
pub enum ApiError {
    // =========================================================================
    // Auth Errors
    // =========================================================================
    /// HTTP 401. Fatal to the current session: the session-expired
    /// callback has already fired by the time the caller sees this.
    #[error("Session expired, please sign in again")]
    Unauthorized,

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// Network-level failure (DNS, connection refused, TLS, ...).
    #[error("Network error: {0}")]
    Transport(String),

    /// The configured request timeout elapsed.
    #[error("Request timed out")]
    Timeout,

    // =========================================================================
    // Backend Errors
    // =========================================================================
    /// HTTP 400/422: the backend rejected the input.
    #[error("Invalid request: {0}")]
    Validation(String),

    /// One or more sales are already claimed by an existing receipt.
    ///
    /// `sale_ids`/`receipt_numbers` come from the structured error payload
    /// and may be empty when the backend sent only a message.
    #[error("Conflict: {message}")]
    Conflict {
        message: String,
        sale_ids: Vec<String>,
        receipt_numbers: Vec<String>,
    },

    /// The envelope came back `success: false` with a 2xx status.
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// Any other non-success HTTP status.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Whether the current session is dead and the user must sign in again.
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// Whether the error is a claimed-sale conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(self, ApiError::Conflict { .. })
    }
}

/// Converts transport-level reqwest failures.
///
/// Decoding failures are mapped to [`ApiError::InvalidResponse`] so a
/// malformed body is distinguishable from a dead network.
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_decode() {
            ApiError::InvalidResponse(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
