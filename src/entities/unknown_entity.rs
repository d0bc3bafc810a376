//! Unknown entity type for round-trip preservation.
//!
//! When the reader encounters an entity type without its own schema, the
//! common attributes (handle, layer, color, proxy graphic, …) are still
//! loaded through the AcDbEntity schema. Every other tag is kept in stream
//! order and written back unchanged.

use super::common::{graphic_schema, ACDB_ENTITY};
use super::{EntityCommon, SchemaEntity};
use crate::error::Result;
use crate::io::dxf::{DxfStreamWriter, DxfStreamWriterExt};
use crate::notification::NotificationCollection;
use crate::schema::{
    export_entity, export_subclass_attributes, is_legacy_layout, load_entity, EntitySchema,
    ExportOptions, LoadOptions, LoadReport, SubclassSchema,
};
use crate::tags::Tags;
use once_cell::sync::Lazy;
use std::sync::Arc;

static GRAPHIC_SCHEMA: Lazy<Arc<EntitySchema>> =
    Lazy::new(|| Arc::new(graphic_schema().expect("AcDbEntity schema is valid")));

/// An entity whose type has no schema of its own.
///
/// Preserves the DXF type name (e.g. `"ACAD_PROXY_ENTITY"`), the common
/// entity attributes and all remaining tags.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownEntity {
    /// Common entity data (handle, layer, color, proxy graphic, …).
    pub common: EntityCommon,
    /// The DXF type name as it appeared in the file.
    pub dxf_name: String,
    /// Tags of the base group not covered by the schema
    base_tags: Tags,
    /// Tags of the AcDbEntity group not covered by the schema
    entity_tags: Tags,
    /// Subclass groups after AcDbEntity, markers included
    trailing_tags: Tags,
    legacy: bool,
}

impl UnknownEntity {
    /// Create a new unknown entity with the given DXF type name.
    pub fn new(dxf_name: impl Into<String>) -> Self {
        Self {
            common: EntityCommon::new(Arc::clone(&GRAPHIC_SCHEMA)),
            dxf_name: dxf_name.into(),
            base_tags: Tags::new(),
            entity_tags: Tags::new(),
            trailing_tags: Tags::new(),
            legacy: false,
        }
    }

    /// Load an entity of any type
    ///
    /// Preserved tags are not reported as unprocessed.
    pub fn from_tags(tags: Tags, options: &LoadOptions) -> Result<(Self, LoadReport)> {
        let mut entity = Self::new(tags.dxftype().unwrap_or_default());
        entity.legacy = is_legacy_layout(&tags, options.version);

        let options = LoadOptions {
            log_unprocessed_tags: false,
            ..options.clone()
        };
        let mut report = load_entity(&mut entity, tags, &options)?;
        entity.trailing_tags = std::mem::take(&mut report.unprocessed);
        Ok((entity, report))
    }

    /// All preserved tags in stream order
    pub fn preserved_tags(&self) -> impl Iterator<Item = &crate::tags::DxfTag> {
        self.base_tags
            .iter()
            .chain(self.entity_tags.iter())
            .chain(self.trailing_tags.iter())
    }
}

impl SchemaEntity for UnknownEntity {
    fn dxftype(&self) -> &str {
        &self.dxf_name
    }

    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn load_subclass(
        &mut self,
        subclass: &SubclassSchema,
        tags: Tags,
        _notifications: &mut NotificationCollection,
    ) -> Result<Tags> {
        match subclass.name() {
            // the legacy pool still holds the AcDbEntity tags at this point
            None if self.legacy => return Ok(tags),
            None => self.base_tags = tags,
            Some(ACDB_ENTITY) => self.entity_tags = tags,
            Some(_) => return Ok(tags),
        }
        Ok(Tags::new())
    }

    fn export_subclass(
        &self,
        subclass: &SubclassSchema,
        writer: &mut dyn DxfStreamWriter,
        options: &ExportOptions,
    ) -> Result<()> {
        export_subclass_attributes(writer, &self.common.dxf, subclass, options)?;
        let preserved = match subclass.name() {
            None => &self.base_tags,
            Some(ACDB_ENTITY) => &self.entity_tags,
            Some(_) => return Ok(()),
        };
        write_preserved(writer, preserved, options)
    }

    fn export_dxf(&self, writer: &mut dyn DxfStreamWriter, options: &ExportOptions) -> Result<()> {
        export_entity(self, writer, options)?;
        write_preserved(writer, &self.trailing_tags, options)
    }
}

fn write_preserved(writer: &mut dyn DxfStreamWriter, tags: &Tags, options: &ExportOptions) -> Result<()> {
    let markers = options.version.supports_subclass_markers();
    for tag in tags.iter().filter(|t| markers || !t.is_subclass_marker()) {
        writer.write_tag(tag)?;
    }
    Ok(())
}
