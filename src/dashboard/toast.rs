//! Toast Notifications
//!
//! A single transient message slot. A new toast replaces the current one;
//! each expires on its own after the configured duration.

use serde::Serialize;
use std::time::Duration;
use tokio::time::Instant;

/// Default time a toast stays visible
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3200);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub message: String,
    pub variant: ToastVariant,
    expires_at: Instant,
}

impl Toast {
    /// Time left before the toast disappears
    pub fn remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}

/// The toast slot
#[derive(Debug, Clone)]
pub struct Toasts {
    current: Option<Toast>,
    duration: Duration,
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION)
    }
}

impl Toasts {
    pub fn new(duration: Duration) -> Self {
        Self {
            current: None,
            duration,
        }
    }

    pub fn show(&mut self, message: impl Into<String>, variant: ToastVariant) {
        self.current = Some(Toast {
            message: message.into(),
            variant,
            expires_at: Instant::now() + self.duration,
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.show(message, ToastVariant::Success);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.show(message, ToastVariant::Error);
    }

    /// The visible toast, if it has not expired
    pub fn current(&self) -> Option<&Toast> {
        self.current
            .as_ref()
            .filter(|t| Instant::now() < t.expires_at)
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}
