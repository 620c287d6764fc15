//! Terminal notification surface.

use std::io::Write;

use datatable::{Notification, NotificationLevel, Notifier};

/// Prints notifications to stderr and mirrors them into the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalNotifier;

impl TerminalNotifier {
    fn prefix(level: NotificationLevel) -> &'static str {
        match level {
            NotificationLevel::Info => "info",
            NotificationLevel::Success => "ok",
            NotificationLevel::Warning => "warning",
            NotificationLevel::Error => "error",
        }
    }

    pub(crate) fn format(notification: &Notification) -> String {
        format!(
            "[{}] {}",
            Self::prefix(notification.level),
            notification.message
        )
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        log::info!(
            "{} notification: {}",
            notification.level.as_str(),
            notification.message
        );
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(stderr, "{}", Self::format(&notification));
    }
}
