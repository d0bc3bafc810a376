//! Export pipeline: write namespace values as tags

use super::attribute::{AttributeDefinition, AttributeKind};
use super::subclass::SubclassSchema;
use super::Namespace;
use crate::entities::common::ACDB_ENTITY;
use crate::entities::SchemaEntity;
use crate::error::{DxfError, Result};
use crate::io::dxf::{DxfStreamWriter, DxfStreamWriterExt, TagCollector};
use crate::proxy::export_proxy_graphic;
use crate::tags::{DxfTag, TagValue, Tags};
use crate::types::DxfVersion;

/// Options for exporting entities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// Target format version
    pub version: DxfVersion,
    /// Write optional attributes even if they equal their default
    pub force_optional: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            version: DxfVersion::AC1032,
            force_optional: false,
        }
    }
}

impl ExportOptions {
    pub fn for_version(version: DxfVersion) -> Self {
        Self {
            version,
            ..Self::default()
        }
    }

    pub fn with_force_optional(mut self, force: bool) -> Self {
        self.force_optional = force;
        self
    }
}

/// The tag to write for one attribute, or `None` if it is skipped
///
/// The value is the explicit one, or the default for mandatory attributes.
/// Attributes newer than the target version, attributes without a value and
/// optional attributes equal to their default are skipped.
pub fn attribute_tag(
    ns: &Namespace,
    definition: &AttributeDefinition,
    options: &ExportOptions,
) -> Option<DxfTag> {
    if definition.required_version() > options.version {
        return None;
    }
    let explicit = ns.get_explicit(definition.name()).ok().flatten();
    let value = match explicit {
        Some(value) => value,
        None if definition.is_optional() => return None,
        None => definition.default_value()?,
    };
    if definition.is_optional()
        && !options.force_optional
        && definition.default_value() == Some(value)
    {
        return None;
    }

    let value = match (definition.kind(), value) {
        (AttributeKind::Point2D, TagValue::Point3D(p)) => TagValue::Point2D(p.to_2d()),
        (_, value) => value.clone(),
    };
    Some(DxfTag::new(definition.code(), value))
}

/// Write the named attributes, in the given order
pub fn export_attributes(
    writer: &mut dyn DxfStreamWriter,
    ns: &Namespace,
    names: &[&str],
    options: &ExportOptions,
) -> Result<()> {
    for name in names {
        let definition = ns.definition(name)?;
        if let Some(tag) = attribute_tag(ns, definition, options) {
            writer.write_tag(&tag)?;
        }
    }
    Ok(())
}

/// Write all attributes of a subclass in declaration order
pub fn export_subclass_attributes(
    writer: &mut dyn DxfStreamWriter,
    ns: &Namespace,
    subclass: &SubclassSchema,
    options: &ExportOptions,
) -> Result<()> {
    for definition in subclass.attributes() {
        if let Some(tag) = attribute_tag(ns, definition, options) {
            writer.write_tag(&tag)?;
        }
    }
    Ok(())
}

/// Write a complete entity: structure tag, then each subclass with its
/// marker (omitted for R12), attributes and hook output
///
/// Fails with [`DxfError::ExportVersion`] if the entity type does not
/// exist in the target version.
pub fn export_entity<E: SchemaEntity + ?Sized>(
    entity: &E,
    writer: &mut dyn DxfStreamWriter,
    options: &ExportOptions,
) -> Result<()> {
    if entity.min_export_version() > options.version {
        return Err(DxfError::ExportVersion {
            entity: entity.label(),
            required: entity.min_export_version().as_str(),
            target: options.version.as_str(),
        });
    }

    let markers = options.version.supports_subclass_markers();
    writer.write_entity_type(entity.dxftype())?;
    for subclass in entity.schema().subclasses() {
        if let (Some(name), true) = (subclass.name(), markers) {
            writer.write_subclass(name)?;
        }
        entity.export_subclass(subclass, writer, options)?;
        if subclass.name() == Some(ACDB_ENTITY) && markers {
            if let Some(data) = &entity.common().proxy_graphic {
                export_proxy_graphic(writer, data, options.version)?;
            }
        }
    }
    Ok(())
}

/// Export an entity into a tag list
pub fn export_tags<E: SchemaEntity + ?Sized>(entity: &E, options: &ExportOptions) -> Result<Tags> {
    let mut collector = TagCollector::new();
    export_entity(entity, &mut collector, options)?;
    Ok(collector.into_tags())
}
