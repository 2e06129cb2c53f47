//! Notification collaborator interface
//!
//! The engine reports recoverable conditions through this trait and never
//! awaits or inspects the result - the subsystem behind it (a toast stack,
//! a terminal printer) is fire-and-forget.

use serde::Serialize;

/// Default display time for timed notices
pub const DEFAULT_DURATION_MS: u64 = 4000;
/// Shorter display time for low-priority confirmations
pub const SHORT_DURATION_MS: u64 = 2500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayDuration {
    Timed(u64),
    Persistent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
    pub duration: DisplayDuration,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Info,
            duration: DisplayDuration::Timed(SHORT_DURATION_MS),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
            duration: DisplayDuration::Timed(DEFAULT_DURATION_MS),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Warning,
            duration: DisplayDuration::Timed(DEFAULT_DURATION_MS),
        }
    }

    pub fn persistent_warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Warning,
            duration: DisplayDuration::Persistent,
        }
    }
}

pub trait Notifier {
    fn notify(&self, notice: Notice);
}

/// Discards every notice; useful for tests and headless runs
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _notice: Notice) {}
}
