//! Load / export diagnostics.
//!
//! Non-fatal issues found while loading entities (unprocessed tags, dropped
//! proxy graphics, entities removed by the audit pass) are collected as
//! [`Notification`] items instead of aborting the load. Each notification can
//! carry the entity it was scoped to, so callers can tell which sibling in a
//! multi-entity stream was affected.

use std::fmt;

/// Severity level of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationType {
    /// Data was recognised but is not supported (skipped proxy records).
    NotSupported,
    /// Non-fatal warning (unprocessed tags, count tags that were recomputed).
    Warning,
    /// Error that was recovered from (bad blob, entity that failed to load).
    Error,
    /// An audit fix was applied (entity removed).
    Fixed,
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotSupported => write!(f, "NotSupported"),
            Self::Warning => write!(f, "Warning"),
            Self::Error => write!(f, "Error"),
            Self::Fixed => write!(f, "Fixed"),
        }
    }
}

/// A single notification produced during loading, exporting or auditing.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    /// The severity / category.
    pub notification_type: NotificationType,
    /// A human-readable description of the issue.
    pub message: String,
    /// Entity the issue is scoped to, e.g. `"LEADER(2F)"`.
    pub source: Option<String>,
}

impl Notification {
    /// Create a new notification.
    pub fn new(notification_type: NotificationType, message: impl Into<String>) -> Self {
        Self {
            notification_type,
            message: message.into(),
            source: None,
        }
    }

    /// Attach the entity this notification belongs to.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "[{}] {}: {}", self.notification_type, source, self.message),
            None => write!(f, "[{}] {}", self.notification_type, self.message),
        }
    }
}

/// Collects notifications during a load/export operation.
#[derive(Debug, Clone, Default)]
pub struct NotificationCollection {
    items: Vec<Notification>,
}

impl NotificationCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Record a notification.
    pub fn notify(&mut self, notification_type: NotificationType, message: impl Into<String>) {
        self.items.push(Notification::new(notification_type, message));
    }

    /// Record a prepared notification.
    pub fn push(&mut self, notification: Notification) {
        self.items.push(notification);
    }

    /// Move all notifications of `other` into this collection, tagging
    /// untagged ones with `source`.
    pub fn absorb(&mut self, other: NotificationCollection, source: &str) {
        self.items.extend(other.items.into_iter().map(|n| {
            if n.source.is_some() {
                n
            } else {
                n.with_source(source)
            }
        }));
    }

    /// Check if there are any notifications.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of notifications.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Iterate over all notifications.
    pub fn iter(&self) -> std::slice::Iter<'_, Notification> {
        self.items.iter()
    }

    /// Get all notifications of a specific type.
    pub fn of_type(&self, nt: NotificationType) -> Vec<&Notification> {
        self.items.iter().filter(|n| n.notification_type == nt).collect()
    }

    /// Check whether any notification of the given type exists.
    pub fn has_type(&self, nt: NotificationType) -> bool {
        self.items.iter().any(|n| n.notification_type == nt)
    }

    /// Consume the collection into a `Vec`.
    pub fn into_vec(self) -> Vec<Notification> {
        self.items
    }
}

impl IntoIterator for NotificationCollection {
    type Item = Notification;
    type IntoIter = std::vec::IntoIter<Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a NotificationCollection {
    type Item = &'a Notification;
    type IntoIter = std::slice::Iter<'a, Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_basics() {
        let mut c = NotificationCollection::new();
        assert!(c.is_empty());

        c.notify(NotificationType::Warning, "unprocessed tag 999");
        c.notify(NotificationType::Error, "blob length mismatch");
        c.notify(NotificationType::Warning, "unprocessed tag 1001");

        assert_eq!(c.len(), 3);
        assert_eq!(c.of_type(NotificationType::Warning).len(), 2);
        assert!(c.has_type(NotificationType::Error));
        assert!(!c.has_type(NotificationType::Fixed));
    }

    #[test]
    fn test_absorb_tags_source() {
        let mut inner = NotificationCollection::new();
        inner.notify(NotificationType::Warning, "w");
        inner.push(Notification::new(NotificationType::Error, "e").with_source("LINE(A)"));

        let mut outer = NotificationCollection::new();
        outer.absorb(inner, "LEADER(2F)");

        let sources: Vec<_> = outer.iter().map(|n| n.source.clone().unwrap()).collect();
        assert_eq!(sources, vec!["LEADER(2F)", "LINE(A)"]);
    }

    #[test]
    fn test_display() {
        let n = Notification::new(NotificationType::Fixed, "removed").with_source("LEADER(2F)");
        assert_eq!(format!("{}", n), "[Fixed] LEADER(2F): removed");
    }
}
