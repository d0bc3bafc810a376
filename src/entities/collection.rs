//! Ordered entity storage

use super::EntityType;
use crate::audit::{AuditAction, Auditor};

/// Entities in stream order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityCollection {
    entities: Vec<EntityType>,
}

impl EntityCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entity
    pub fn push(&mut self, entity: impl Into<EntityType>) {
        self.entities.push(entity.into());
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&EntityType> {
        self.entities.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut EntityType> {
        self.entities.get_mut(index)
    }

    pub fn remove(&mut self, index: usize) -> Option<EntityType> {
        (index < self.entities.len()).then(|| self.entities.remove(index))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EntityType> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, EntityType> {
        self.entities.iter_mut()
    }

    /// Entities of one DXF type
    pub fn of_type<'a>(&'a self, dxftype: &'a str) -> impl Iterator<Item = &'a EntityType> + 'a {
        self.entities.iter().filter(move |e| e.dxftype() == dxftype)
    }

    /// Audit every entity and drop the ones the audit rejects
    ///
    /// Returns the number of removed entities.
    pub fn audit(&mut self, auditor: &mut Auditor) -> usize {
        let before = self.entities.len();
        self.entities
            .retain(|entity| entity.audit(auditor) == AuditAction::Keep);
        before - self.entities.len()
    }
}

impl FromIterator<EntityType> for EntityCollection {
    fn from_iter<I: IntoIterator<Item = EntityType>>(iter: I) -> Self {
        Self {
            entities: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for EntityCollection {
    type Item = EntityType;
    type IntoIter = std::vec::IntoIter<EntityType>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.into_iter()
    }
}

impl<'a> IntoIterator for &'a EntityCollection {
    type Item = &'a EntityType;
    type IntoIter = std::slice::Iter<'a, EntityType>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}
