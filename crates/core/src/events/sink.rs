//! Notification sink trait and implementations.

use std::sync::{Arc, Mutex, PoisonError};

use super::Notification;

/// Trait for receiving user-facing notifications.
///
/// # Design Rules
///
/// - `notify()` must be fast and non-blocking (no I/O)
/// - Failure to display must not affect the operation that emitted it
pub trait NotificationSink: Send + Sync {
    /// Deliver a single notification.
    fn notify(&self, notification: Notification);

    /// Deliver several notifications in order.
    fn notify_batch(&self, notifications: Vec<Notification>) {
        for notification in notifications {
            self.notify(notification);
        }
    }
}

/// No-op implementation for contexts without a UI.
#[derive(Clone, Default)]
pub struct NoOpNotificationSink;

impl NotificationSink for NoOpNotificationSink {
    fn notify(&self, _notification: Notification) {}
}

/// Mock sink for testing - collects notifications.
#[derive(Clone, Default)]
pub struct MockNotificationSink {
    notifications: Arc<Mutex<Vec<Notification>>>,
}

impl MockNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected notifications.
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Returns only the failure notifications.
    pub fn failures(&self) -> Vec<Notification> {
        self.notifications()
            .into_iter()
            .filter(Notification::is_failure)
            .collect()
    }

    /// Clears collected notifications.
    pub fn clear(&self) {
        self.notifications.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }

    pub fn len(&self) -> usize {
        self.notifications.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.lock().unwrap_or_else(PoisonError::into_inner).is_empty()
    }
}

impl NotificationSink for MockNotificationSink {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().unwrap_or_else(PoisonError::into_inner).push(notification);
    }
}
