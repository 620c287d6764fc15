//! Notification collaborator.
//!
//! The table and host screens report outcomes through a [`Notifier`]. Display
//! is up to the implementation: [`LogNotifier`] writes to the log facade,
//! [`MemoryNotifier`] queues notifications for the host to drain.

use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Notification level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NotificationLevel {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationLevel::Info => "info",
            NotificationLevel::Success => "success",
            NotificationLevel::Warning => "warning",
            NotificationLevel::Error => "error",
        }
    }
}

/// A user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    /// How long the notification stays visible.
    pub timeout: Duration,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timeout: Duration::from_secs(5),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, message)
    }

    /// Set custom timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Fire-and-forget notification sink.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);

    fn info(&self, message: &str) {
        self.notify(Notification::info(message));
    }

    fn success(&self, message: &str) {
        self.notify(Notification::success(message));
    }

    fn warning(&self, message: &str) {
        self.notify(Notification::warning(message));
    }

    fn error(&self, message: &str) {
        self.notify(Notification::error(message));
    }
}

/// Writes notifications to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Error => log::error!("{}", notification.message),
            NotificationLevel::Warning => log::warn!("{}", notification.message),
            NotificationLevel::Info | NotificationLevel::Success => {
                log::info!("{}", notification.message)
            }
        }
    }
}

/// Queues notifications in memory.
///
/// Clones share the same queue.
#[derive(Debug, Clone, Default)]
pub struct MemoryNotifier {
    pending: Arc<Mutex<Vec<Notification>>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all queued notifications.
    pub fn drain(&self) -> Vec<Notification> {
        self.pending
            .lock()
            .map(|mut guard| std::mem::take(&mut *guard))
            .unwrap_or_default()
    }

    /// Copy of the queued notifications, leaving them queued.
    pub fn snapshot(&self) -> Vec<Notification> {
        self.pending.lock().map(|g| g.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.pending.lock().map(|g| g.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Queued error notifications.
    pub fn errors(&self) -> Vec<Notification> {
        self.snapshot()
            .into_iter()
            .filter(|n| n.level == NotificationLevel::Error)
            .collect()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: Notification) {
        log::debug!(
            "Queued {} notification: {}",
            notification.level.as_str(),
            notification.message
        );
        if let Ok(mut guard) = self.pending.lock() {
            guard.push(notification);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_notifier_shares_queue() {
        let notifier = MemoryNotifier::new();
        let clone = notifier.clone();
        clone.error("boom");
        clone.success("saved");

        assert_eq!(notifier.len(), 2);
        assert_eq!(notifier.errors().len(), 1);

        let drained = notifier.drain();
        assert_eq!(drained[0].message, "boom");
        assert!(notifier.is_empty());
    }

    #[test]
    fn test_default_timeout() {
        assert_eq!(Notification::info("x").timeout, Duration::from_secs(5));
    }
}
