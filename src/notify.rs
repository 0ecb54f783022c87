//! User-facing notifications raised by timeline gestures.

use std::collections::VecDeque;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn new(kind: NotificationKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            kind,
        }
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, title, message)
    }

    /// A toast-style confirmation with no separate title.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, "", message)
    }
}

/// Receives notifications from the timeline controller.
pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

impl Notifier for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}

/// Bounded, newest-last notification history that also forwards every entry
/// to the log.
#[derive(Debug, Clone)]
pub struct NotificationLog {
    entries: VecDeque<Notification>,
    capacity: usize,
}

impl NotificationLog {
    pub const DEFAULT_CAPACITY: usize = 50;

    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(Self::DEFAULT_CAPACITY)),
            capacity: capacity.max(1),
        }
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.entries.back()
    }

    /// Entries, newest first.
    pub fn recent(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for NotificationLog {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl Notifier for NotificationLog {
    fn notify(&mut self, notification: Notification) {
        match notification.kind {
            NotificationKind::Warning | NotificationKind::Error => {
                tracing::warn!(title = %notification.title, "{}", notification.message)
            }
            NotificationKind::Info | NotificationKind::Success => {
                tracing::info!(title = %notification.title, "{}", notification.message)
            }
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_drops_oldest_when_full() {
        let mut log = NotificationLog::new(2);
        log.notify(Notification::success("one"));
        log.notify(Notification::success("two"));
        log.notify(Notification::success("three"));
        assert_eq!(log.len(), 2);
        assert_eq!(log.latest().map(|n| n.message.as_str()), Some("three"));
        let order: Vec<_> = log.recent().map(|n| n.message.as_str()).collect();
        assert_eq!(order, ["three", "two"]);
    }
}
