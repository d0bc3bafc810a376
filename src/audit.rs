//! Structural validation of loaded entities
//!
//! Entities inspect themselves through [`SchemaEntity::audit`](crate::entities::SchemaEntity::audit)
//! and report fixes to an [`Auditor`]. The auditor only records; removing
//! an entity is done by the owning [`EntityCollection`](crate::entities::EntityCollection).

use crate::notification::{Notification, NotificationCollection, NotificationType};
use std::fmt;

/// Kind of structural problem found by the audit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuditError {
    /// A path entity has fewer vertices than it needs
    InvalidVertexCount,
}

impl fmt::Display for AuditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditError::InvalidVertexCount => write!(f, "InvalidVertexCount"),
        }
    }
}

/// What to do with an audited entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuditAction {
    #[default]
    Keep,
    Remove,
}

/// A fix applied by the audit
#[derive(Debug, Clone, PartialEq)]
pub struct AuditFix {
    pub error: AuditError,
    /// Entity label, e.g. `"LEADER(2F)"`
    pub entity: String,
    pub message: String,
}

/// Collects the fixes of one audit run
#[derive(Debug, Clone, Default)]
pub struct Auditor {
    fixes: Vec<AuditFix>,
}

impl Auditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error that was fixed
    pub fn fixed_error(&mut self, error: AuditError, entity: impl Into<String>, message: impl Into<String>) {
        let fix = AuditFix {
            error,
            entity: entity.into(),
            message: message.into(),
        };
        tracing::debug!(error = %fix.error, entity = %fix.entity, "{}", fix.message);
        self.fixes.push(fix);
    }

    pub fn fixes(&self) -> &[AuditFix] {
        &self.fixes
    }

    pub fn has_fixes(&self) -> bool {
        !self.fixes.is_empty()
    }

    /// Fixes as `Fixed` notifications scoped to their entity
    pub fn notifications(&self) -> NotificationCollection {
        let mut notifications = NotificationCollection::new();
        for fix in &self.fixes {
            notifications.push(
                Notification::new(NotificationType::Fixed, fix.message.clone())
                    .with_source(fix.entity.clone()),
            );
        }
        notifications
    }
}
