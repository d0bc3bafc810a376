//! Schema-driven entity types and traits

use crate::audit::{AuditAction, Auditor};
use crate::error::Result;
use crate::io::dxf::DxfStreamWriter;
use crate::notification::NotificationCollection;
use crate::schema::{
    export_entity, export_subclass_attributes, EntitySchema, ExportOptions, LoadOptions,
    LoadReport, SubclassSchema,
};
use crate::tags::Tags;
use crate::types::DxfVersion;
use std::sync::Arc;

pub mod collection;
pub mod common;
pub mod leader;
pub mod line;
pub mod unknown_entity;

pub use collection::EntityCollection;
pub use common::EntityCommon;
pub use leader::{HooklineDirection, Leader, LeaderCreationType, LeaderPathType};
pub use line::Line;
pub use unknown_entity::UnknownEntity;

/// An entity whose state lives in a schema-described [`Namespace`](crate::schema::Namespace)
///
/// The load and export pipelines call the subclass hooks in schema order.
/// The defaults cover entities whose data is fully described by their
/// attribute schema; entities with list data (vertices, …) override them.
pub trait SchemaEntity {
    /// DXF type name, e.g. `"LINE"`
    fn dxftype(&self) -> &str;

    fn common(&self) -> &EntityCommon;

    fn common_mut(&mut self) -> &mut EntityCommon;

    /// Attribute schema of this entity
    fn schema(&self) -> &Arc<EntitySchema> {
        self.common().dxf.schema()
    }

    /// Oldest format version the entity can be written to
    fn min_export_version(&self) -> DxfVersion {
        DxfVersion::AC1009
    }

    /// Load hook, called with the tags a subclass's attributes did not consume
    ///
    /// Returns the tags the entity did not use either.
    fn load_subclass(
        &mut self,
        _subclass: &SubclassSchema,
        tags: Tags,
        _notifications: &mut NotificationCollection,
    ) -> Result<Tags> {
        Ok(tags)
    }

    /// Export hook for one subclass, called after its marker is written
    fn export_subclass(
        &self,
        subclass: &SubclassSchema,
        writer: &mut dyn DxfStreamWriter,
        options: &ExportOptions,
    ) -> Result<()> {
        export_subclass_attributes(writer, &self.common().dxf, subclass, options)
    }

    /// Write the complete entity
    fn export_dxf(&self, writer: &mut dyn DxfStreamWriter, options: &ExportOptions) -> Result<()> {
        export_entity(self, writer, options)
    }

    /// False if the entity is structurally unfit for output
    fn is_exportable(&self) -> bool {
        true
    }

    /// Structural validation
    fn audit(&self, _auditor: &mut Auditor) -> AuditAction {
        AuditAction::Keep
    }

    /// `"TYPE(handle)"`, used to scope diagnostics
    fn label(&self) -> String {
        match self.common().handle() {
            Some(handle) => format!("{}({})", self.dxftype(), handle),
            None => self.dxftype().to_string(),
        }
    }
}

/// Entity enumeration for the supported types
#[derive(Debug, Clone, PartialEq)]
pub enum EntityType {
    Line(Line),
    Leader(Leader),
    Unknown(UnknownEntity),
}

impl EntityType {
    /// Load an entity, dispatching on the structure tag
    pub fn from_tags(tags: Tags, options: &LoadOptions) -> Result<(EntityType, LoadReport)> {
        match tags.dxftype() {
            Some("LINE") => Line::from_tags(tags, options).map(|(e, r)| (EntityType::Line(e), r)),
            Some("LEADER") => {
                Leader::from_tags(tags, options).map(|(e, r)| (EntityType::Leader(e), r))
            }
            _ => UnknownEntity::from_tags(tags, options)
                .map(|(e, r)| (EntityType::Unknown(e), r)),
        }
    }

    pub fn as_entity(&self) -> &dyn SchemaEntity {
        match self {
            EntityType::Line(e) => e,
            EntityType::Leader(e) => e,
            EntityType::Unknown(e) => e,
        }
    }

    pub fn as_entity_mut(&mut self) -> &mut dyn SchemaEntity {
        match self {
            EntityType::Line(e) => e,
            EntityType::Leader(e) => e,
            EntityType::Unknown(e) => e,
        }
    }

    pub fn dxftype(&self) -> &str {
        self.as_entity().dxftype()
    }

    pub fn common(&self) -> &EntityCommon {
        self.as_entity().common()
    }

    pub fn min_export_version(&self) -> DxfVersion {
        self.as_entity().min_export_version()
    }

    pub fn is_exportable(&self) -> bool {
        self.as_entity().is_exportable()
    }

    pub fn label(&self) -> String {
        self.as_entity().label()
    }

    pub fn export_dxf(&self, writer: &mut dyn DxfStreamWriter, options: &ExportOptions) -> Result<()> {
        self.as_entity().export_dxf(writer, options)
    }

    pub fn audit(&self, auditor: &mut Auditor) -> AuditAction {
        self.as_entity().audit(auditor)
    }
}

impl From<Line> for EntityType {
    fn from(line: Line) -> Self {
        EntityType::Line(line)
    }
}

impl From<Leader> for EntityType {
    fn from(leader: Leader) -> Self {
        EntityType::Leader(leader)
    }
}

impl From<UnknownEntity> for EntityType {
    fn from(entity: UnknownEntity) -> Self {
        EntityType::Unknown(entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_on_type() {
        let options = LoadOptions::default();
        let tags = Tags::from_text("0\nLINE\n100\nAcDbEntity\n8\n0\n100\nAcDbLine\n10\n1\n20\n2\n30\n0\n").unwrap();
        let (entity, _) = EntityType::from_tags(tags, &options).unwrap();
        assert!(matches!(entity, EntityType::Line(_)));

        let tags = Tags::from_text("0\nLEADER\n100\nAcDbEntity\n8\n0\n").unwrap();
        let (entity, _) = EntityType::from_tags(tags, &options).unwrap();
        assert_eq!(entity.dxftype(), "LEADER");

        let tags = Tags::from_text("0\nACAD_PROXY_ENTITY\n100\nAcDbEntity\n8\n0\n").unwrap();
        let (entity, _) = EntityType::from_tags(tags, &options).unwrap();
        assert!(matches!(entity, EntityType::Unknown(_)));
        assert_eq!(entity.dxftype(), "ACAD_PROXY_ENTITY");
    }
}
