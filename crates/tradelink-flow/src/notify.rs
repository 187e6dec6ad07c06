//! # Notification Sink
//!
//! Workflows never print or toast directly. They report outcomes through
//! [`NotificationSink`], and the host decides how to render them (the
//! demo binary logs, a desktop shell would toast).
//!
//! ## Severity Mapping
//! - `success` - the action committed, local state already updated
//! - `warning` - the action worked but with a weaker guarantee
//!   (degraded duplicate checking, cached wholesaler snapshot)
//! - `error`   - the action did not commit, local state untouched

use std::sync::Mutex;

// =============================================================================
// Sink Trait
// =============================================================================

pub trait NotificationSink: Send + Sync {
    fn success(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
}

// =============================================================================
// Tracing-Backed Sink
// =============================================================================

/// Default sink: emits structured tracing events.
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn success(&self, message: &str) {
        tracing::info!(outcome = "success", "{message}");
    }

    fn warning(&self, message: &str) {
        tracing::warn!(outcome = "warning", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(outcome = "error", "{message}");
    }
}

// =============================================================================
// Recording Sink
// =============================================================================

/// Sink that records every message, for asserting on workflow outcomes.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<(Severity, String)>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded messages, in emit order.
    pub fn messages(&self) -> Vec<(Severity, String)> {
        match self.messages.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Messages of a single severity.
    pub fn of(&self, severity: Severity) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, m)| m)
            .collect()
    }

    fn record(&self, severity: Severity, message: &str) {
        if let Ok(mut guard) = self.messages.lock() {
            guard.push((severity, message.to_string()));
        }
    }
}

impl NotificationSink for RecordingNotifier {
    fn success(&self, message: &str) {
        self.record(Severity::Success, message);
    }

    fn warning(&self, message: &str) {
        self.record(Severity::Warning, message);
    }

    fn error(&self, message: &str) {
        self.record(Severity::Error, message);
    }
}
