//! Transient user-facing notifications.
//!
//! Every handler reports its outcome by pushing a [`Notification`] here
//! instead of returning an error to the caller. A notification stays visible
//! for [`NOTIFICATION_TTL_SECS`] seconds.

use chrono::{DateTime, Duration, Utc};
use std::collections::VecDeque;

/// How long a notification stays on screen.
pub const NOTIFICATION_TTL_SECS: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
    Info,
}

impl NotificationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationLevel::Success => "success",
            NotificationLevel::Error => "error",
            NotificationLevel::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(message: impl Into<String>, level: NotificationLevel) -> Self {
        Self {
            message: message.into(),
            level,
            created_at: Utc::now(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Error)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Info)
    }

    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }

    /// Whether the notification is still on screen at `now`.
    pub fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at < Duration::seconds(NOTIFICATION_TTL_SECS)
    }
}

/// Queue of notifications not yet expired.
///
/// `unseen` counts the tail entries the shell hasn't printed yet.
#[derive(Debug, Default)]
pub struct Notifier {
    queue: VecDeque<Notification>,
    unseen: usize,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notification: Notification) {
        match notification.level {
            NotificationLevel::Error => tracing::debug!(message = %notification.message, "Error notification"),
            _ => tracing::debug!(message = %notification.message, "Notification"),
        }
        self.queue.push_back(notification);
        self.unseen += 1;
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Notification::success(message));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Notification::error(message));
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Notification::info(message));
    }

    /// Most recent notification, expired or not.
    pub fn latest(&self) -> Option<&Notification> {
        self.queue.back()
    }

    /// Notifications still visible at `now`, oldest first.
    pub fn visible_at(&self, now: DateTime<Utc>) -> Vec<&Notification> {
        self.queue.iter().filter(|n| n.is_visible_at(now)).collect()
    }

    pub fn visible(&self) -> Vec<&Notification> {
        self.visible_at(Utc::now())
    }

    /// Hand out notifications pushed since the last call.
    pub fn take_unseen(&mut self) -> Vec<Notification> {
        let start = self.queue.len().saturating_sub(self.unseen);
        self.unseen = 0;
        self.queue.iter().skip(start).cloned().collect()
    }

    /// Drop notifications that expired before `now`.
    pub fn prune(&mut self, now: DateTime<Utc>) {
        while let Some(front) = self.queue.front() {
            if front.is_visible_at(now) {
                break;
            }
            self.queue.pop_front();
        }
        self.unseen = self.unseen.min(self.queue.len());
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Every queued message, oldest first.
    pub fn messages(&self) -> Vec<&str> {
        self.queue.iter().map(|n| n.message.as_str()).collect()
    }
}

impl Extend<Notification> for Notifier {
    fn extend<I: IntoIterator<Item = Notification>>(&mut self, iter: I) {
        for notification in iter {
            self.push(notification);
        }
    }
}
