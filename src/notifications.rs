//! Notifications
//!
//! The cart decides message text and kind; rendering is left to whatever
//! [`NotificationSink`] the store was built with.

use std::fmt;

use tracing::{info, warn};

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// The requested change was applied.
    Success,

    /// The requested change was rejected.
    Error,

    /// Informational only.
    Info,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Info => "info",
        };

        f.write_str(label)
    }
}

/// A user-facing message emitted by the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Message text
    pub message: String,

    /// Message kind
    pub kind: NotificationKind,
}

impl Notification {
    /// Create a success notification.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Success,
        }
    }

    /// Create an error notification.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Error,
        }
    }

    /// Create an informational notification.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Info,
        }
    }
}

/// Receives notifications emitted by the cart store.
pub trait NotificationSink {
    /// Surface a message to the user.
    fn notify(&mut self, message: &str, kind: NotificationKind);
}

impl<F> NotificationSink for F
where
    F: FnMut(&str, NotificationKind),
{
    fn notify(&mut self, message: &str, kind: NotificationKind) {
        self(message, kind);
    }
}

/// Sink that keeps every notification in memory, in emission order.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    notifications: Vec<Notification>,
}

impl RecordingSink {
    /// Create an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications recorded so far.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// The most recent notification.
    pub fn last(&self) -> Option<&Notification> {
        self.notifications.last()
    }

    /// Drain the recorded notifications.
    pub fn take(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&mut self, message: &str, kind: NotificationKind) {
        self.notifications.push(Notification {
            message: message.to_string(),
            kind,
        });
    }
}

/// Sink that writes notifications to the `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&mut self, message: &str, kind: NotificationKind) {
        match kind {
            NotificationKind::Error => warn!(%kind, "{message}"),
            NotificationKind::Success | NotificationKind::Info => info!(%kind, "{message}"),
        }
    }
}
