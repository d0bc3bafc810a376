//! Leader entity - Leader annotation line with arrow

use super::common::{acdb_entity, base_class, EntityCommon};
use super::SchemaEntity;
use crate::audit::{AuditAction, AuditError, Auditor};
use crate::error::Result;
use crate::io::dxf::{DxfStreamWriter, DxfStreamWriterExt};
use crate::notification::NotificationCollection;
use crate::schema::{
    export_attributes, export_subclass_attributes, load_entity, AttributeDefinition, EntitySchema,
    ExportOptions, LoadOptions, LoadReport, SubclassSchema,
};
use crate::tags::Tags;
use crate::types::{DxfVersion, Handle, Vector3};
use once_cell::sync::Lazy;
use std::sync::Arc;

/// Subclass marker of the leader attributes
pub const ACDB_LEADER: &str = "AcDbLeader";

const VERTEX_CODE: i32 = 10;
const VERTEX_COUNT_CODE: i32 = 76;

/// Attributes written before the vertex list
const ATTRIBS_BEFORE_VERTICES: [&str; 8] = [
    "dimstyle",
    "has_arrowhead",
    "path_type",
    "annotation_type",
    "hookline_direction",
    "has_hookline",
    "text_height",
    "text_width",
];

/// Attributes written after the vertex list
const ATTRIBS_AFTER_VERTICES: [&str; 6] = [
    "block_color",
    "annotation_handle",
    "normal_vector",
    "horizontal_direction",
    "leader_offset_block_ref",
    "leader_offset_annotation_placement",
];

fn acdb_leader() -> Result<SubclassSchema> {
    SubclassSchema::named(
        ACDB_LEADER,
        vec![
            AttributeDefinition::text("dimstyle", 3).with_default("Standard"),
            AttributeDefinition::integer("has_arrowhead", 71).with_default(1).optional(),
            AttributeDefinition::integer("path_type", 72).with_default(0).optional(),
            AttributeDefinition::integer("annotation_type", 73).with_default(3),
            AttributeDefinition::integer("hookline_direction", 74).with_default(1).optional(),
            AttributeDefinition::integer("has_hookline", 75).with_default(1).optional(),
            AttributeDefinition::real("text_height", 40).with_default(1.0).optional(),
            AttributeDefinition::real("text_width", 41).with_default(0.0).optional(),
            AttributeDefinition::integer("block_color", 77).with_default(7).optional(),
            AttributeDefinition::handle("annotation_handle", 340)
                .with_default(Handle::NULL)
                .optional(),
            AttributeDefinition::point3d("normal_vector", 210)
                .with_default(Vector3::UNIT_Z)
                .optional(),
            AttributeDefinition::point3d("horizontal_direction", 211)
                .with_default(Vector3::UNIT_X)
                .optional(),
            AttributeDefinition::point3d("leader_offset_block_ref", 212)
                .with_default(Vector3::ZERO)
                .optional(),
            AttributeDefinition::point3d("leader_offset_annotation_placement", 213)
                .with_default(Vector3::ZERO)
                .optional(),
        ],
    )
}

static LEADER_SCHEMA: Lazy<Arc<EntitySchema>> = Lazy::new(|| {
    let schema = [base_class(), acdb_entity(), acdb_leader()]
        .into_iter()
        .collect::<Result<Vec<_>>>()
        .and_then(EntitySchema::new)
        .expect("LEADER schema is valid");
    Arc::new(schema)
});

/// Leader path type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeaderPathType {
    /// Straight line segments
    #[default]
    StraightLine = 0,
    /// Spline path
    Spline = 1,
}

impl LeaderPathType {
    /// Create from DXF value
    pub fn from_value(value: i64) -> Self {
        match value {
            1 => LeaderPathType::Spline,
            _ => LeaderPathType::StraightLine,
        }
    }

    /// Convert to DXF value
    pub fn to_value(&self) -> i64 {
        *self as i64
    }
}

/// Annotation the leader was created with (group code 73)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeaderCreationType {
    WithText = 0,
    WithTolerance = 1,
    WithBlock = 2,
    #[default]
    NoAnnotation = 3,
}

impl LeaderCreationType {
    /// Create from DXF value
    pub fn from_value(value: i64) -> Self {
        match value {
            0 => LeaderCreationType::WithText,
            1 => LeaderCreationType::WithTolerance,
            2 => LeaderCreationType::WithBlock,
            _ => LeaderCreationType::NoAnnotation,
        }
    }

    /// Convert to DXF value
    pub fn to_value(&self) -> i64 {
        *self as i64
    }
}

/// Hookline direction relative to the horizontal direction (group code 74)
///
/// The DXF reference documents 0 and 1 the other way round; AutoCAD
/// writes 1 for "opposite".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HooklineDirection {
    Same = 0,
    #[default]
    Opposite = 1,
}

impl HooklineDirection {
    /// Create from DXF value
    pub fn from_value(value: i64) -> Self {
        match value {
            0 => HooklineDirection::Same,
            _ => HooklineDirection::Opposite,
        }
    }

    /// Convert to DXF value
    pub fn to_value(&self) -> i64 {
        *self as i64
    }
}

/// Leader entity - creates an annotation leader line with arrow
///
/// The leader consists of a series of line segments or a spline path,
/// with the arrowhead at the first vertex. At least two vertices are
/// required for a valid leader.
///
/// # DXF Entity Type
/// LEADER (AutoCAD 2000 and later)
///
/// # Example
/// ```
/// use acadtags::entities::Leader;
/// use acadtags::types::Vector3;
///
/// let leader = Leader::new()
///     .with_vertex(Vector3::new(0.0, 0.0, 0.0))
///     .with_vertex(Vector3::new(10.0, 10.0, 0.0));
/// assert_eq!(leader.vertex_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Leader {
    /// Common entity properties
    pub common: EntityCommon,
    /// Leader vertices (arrow point first)
    pub vertices: Vec<Vector3>,
}

impl Leader {
    /// Create a new empty leader
    pub fn new() -> Self {
        Self {
            common: EntityCommon::new(Arc::clone(&LEADER_SCHEMA)),
            vertices: Vec::new(),
        }
    }

    /// The LEADER schema
    pub fn entity_schema() -> &'static Arc<EntitySchema> {
        &LEADER_SCHEMA
    }

    /// Create a leader from a list of vertices
    pub fn from_vertices(vertices: impl IntoIterator<Item = Vector3>) -> Self {
        let mut leader = Self::new();
        leader.set_vertices(vertices);
        leader
    }

    /// Load a leader from its tags
    pub fn from_tags(tags: Tags, options: &LoadOptions) -> Result<(Self, LoadReport)> {
        let mut leader = Self::new();
        let report = load_entity(&mut leader, tags, options)?;
        Ok((leader, report))
    }

    /// Replace all vertices
    pub fn set_vertices(&mut self, vertices: impl IntoIterator<Item = Vector3>) {
        self.vertices = vertices.into_iter().collect();
    }

    /// Add a vertex to the leader path
    pub fn add_vertex(&mut self, vertex: Vector3) {
        self.vertices.push(vertex);
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// The arrow point (first vertex)
    pub fn arrow_point(&self) -> Option<Vector3> {
        self.vertices.first().copied()
    }

    /// Dimension style name
    pub fn dimstyle(&self) -> &str {
        self.common.dxf.get_str("dimstyle").ok().flatten().unwrap_or("Standard")
    }

    /// Whether an arrowhead is drawn
    pub fn has_arrowhead(&self) -> bool {
        self.int("has_arrowhead", 1) != 0
    }

    /// Path type
    pub fn path_type(&self) -> LeaderPathType {
        LeaderPathType::from_value(self.int("path_type", 0))
    }

    /// Annotation type
    pub fn creation_type(&self) -> LeaderCreationType {
        LeaderCreationType::from_value(self.int("annotation_type", 3))
    }

    /// Hookline direction
    pub fn hookline_direction(&self) -> HooklineDirection {
        HooklineDirection::from_value(self.int("hookline_direction", 1))
    }

    /// Handle of the associated annotation (MTEXT, TOLERANCE or INSERT)
    pub fn annotation_handle(&self) -> Handle {
        self.common
            .dxf
            .get_handle("annotation_handle")
            .ok()
            .flatten()
            .unwrap_or(Handle::NULL)
    }

    /// Normal vector
    pub fn normal(&self) -> Vector3 {
        self.common.extrusion("normal_vector")
    }

    /// Builder: add a vertex
    pub fn with_vertex(mut self, vertex: Vector3) -> Self {
        self.vertices.push(vertex);
        self
    }

    /// Builder: set the path type
    pub fn with_path_type(mut self, path_type: LeaderPathType) -> Result<Self> {
        self.common.dxf.set("path_type", path_type.to_value())?;
        Ok(self)
    }

    /// Builder: set the creation type
    pub fn with_creation_type(mut self, creation_type: LeaderCreationType) -> Result<Self> {
        self.common.dxf.set("annotation_type", creation_type.to_value())?;
        Ok(self)
    }

    /// Builder: link the annotation entity
    pub fn with_annotation(mut self, handle: Handle) -> Result<Self> {
        self.common.dxf.set("annotation_handle", handle)?;
        self.common
            .dxf
            .set("annotation_type", LeaderCreationType::WithText.to_value())?;
        Ok(self)
    }

    fn int(&self, name: &str, default: i64) -> i64 {
        self.common.dxf.get_i64(name).ok().flatten().unwrap_or(default)
    }

    fn export_leader(&self, writer: &mut dyn DxfStreamWriter, options: &ExportOptions) -> Result<()> {
        export_attributes(writer, &self.common.dxf, &ATTRIBS_BEFORE_VERTICES, options)?;
        // the count tag is 16 bits wide, longer leaders cannot be written
        let count = i64::try_from(self.vertices.len()).unwrap_or(i64::MAX);
        writer.write_int(VERTEX_COUNT_CODE, count)?;
        for vertex in &self.vertices {
            writer.write_point3d(VERTEX_CODE, *vertex)?;
        }
        export_attributes(writer, &self.common.dxf, &ATTRIBS_AFTER_VERTICES, options)
    }
}

impl Default for Leader {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaEntity for Leader {
    fn dxftype(&self) -> &str {
        "LEADER"
    }

    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn min_export_version(&self) -> DxfVersion {
        DxfVersion::AC1015
    }

    fn load_subclass(
        &mut self,
        subclass: &SubclassSchema,
        tags: Tags,
        _notifications: &mut NotificationCollection,
    ) -> Result<Tags> {
        if subclass.name() != Some(ACDB_LEADER) {
            return Ok(tags);
        }
        let mut rest = Tags::new();
        let mut vertices = Vec::new();
        for tag in tags {
            match (tag.code, tag.value.as_point()) {
                (VERTEX_CODE, Some(point)) => vertices.push(point),
                // the stored count is recomputed on export
                (VERTEX_COUNT_CODE, _) => {}
                _ => rest.push(tag),
            }
        }
        self.vertices = vertices;
        Ok(rest)
    }

    fn export_subclass(
        &self,
        subclass: &SubclassSchema,
        writer: &mut dyn DxfStreamWriter,
        options: &ExportOptions,
    ) -> Result<()> {
        if subclass.name() == Some(ACDB_LEADER) {
            self.export_leader(writer, options)
        } else {
            export_subclass_attributes(writer, &self.common.dxf, subclass, options)
        }
    }

    fn is_exportable(&self) -> bool {
        self.vertices.len() >= 2
    }

    fn audit(&self, auditor: &mut Auditor) -> AuditAction {
        if self.vertices.len() < 2 {
            auditor.fixed_error(
                AuditError::InvalidVertexCount,
                self.label(),
                format!(
                    "Deleted entity {} with invalid vertex count = {}.",
                    self.label(),
                    self.vertices.len()
                ),
            );
            return AuditAction::Remove;
        }
        AuditAction::Keep
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::export_tags;
    use crate::tags::TagValue;

    #[test]
    fn test_leader_defaults() {
        let leader = Leader::new();
        assert_eq!(leader.dimstyle(), "Standard");
        assert!(leader.has_arrowhead());
        assert_eq!(leader.path_type(), LeaderPathType::StraightLine);
        assert_eq!(leader.creation_type(), LeaderCreationType::NoAnnotation);
        assert_eq!(leader.hookline_direction(), HooklineDirection::Opposite);
        assert_eq!(leader.annotation_handle(), Handle::NULL);
        assert_eq!(leader.normal(), Vector3::UNIT_Z);
    }

    #[test]
    fn test_builder() {
        let leader = Leader::new()
            .with_vertex(Vector3::new(0.0, 0.0, 0.0))
            .with_vertex(Vector3::new(10.0, 10.0, 0.0))
            .with_path_type(LeaderPathType::Spline)
            .unwrap()
            .with_annotation(Handle::new(0x42))
            .unwrap();
        assert_eq!(leader.vertex_count(), 2);
        assert_eq!(leader.arrow_point(), Some(Vector3::ZERO));
        assert_eq!(leader.path_type(), LeaderPathType::Spline);
        assert_eq!(leader.creation_type(), LeaderCreationType::WithText);
        assert_eq!(leader.annotation_handle(), Handle::new(0x42));
    }

    #[test]
    fn test_export_places_vertices_between_attribute_groups() {
        let mut leader = Leader::from_vertices([Vector3::ZERO, Vector3::new(1.0, 1.0, 0.0)]);
        leader.common.dxf.set("block_color", 1).unwrap();

        let tags = export_tags(&leader, &ExportOptions::default()).unwrap();
        assert_eq!(
            tags.codes(),
            vec![0, 100, 8, 100, 3, 73, 76, 10, 10, 77]
        );
        assert_eq!(tags[6].value, TagValue::Int(2));
    }

    #[test]
    fn test_vertex_count_must_fit_count_tag() {
        let leader = Leader::from_vertices(vec![Vector3::ZERO; 32768]);
        let err = export_tags(&leader, &ExportOptions::default()).unwrap_err();
        assert!(matches!(err, crate::error::DxfError::InvalidValue { code: 76, .. }));

        let leader = Leader::from_vertices(vec![Vector3::ZERO; 32767]);
        let tags = export_tags(&leader, &ExportOptions::default()).unwrap();
        assert_eq!(tags.find_code(76).unwrap().value, TagValue::Int(32767));
    }

    #[test]
    fn test_leader_requires_r2000() {
        let leader = Leader::from_vertices([Vector3::ZERO, Vector3::UNIT_X]);
        assert!(export_tags(&leader, &ExportOptions::for_version(DxfVersion::AC1014)).is_err());
        assert!(export_tags(&leader, &ExportOptions::for_version(DxfVersion::AC1015)).is_ok());
    }

    #[test]
    fn test_audit_removes_short_leader() {
        let mut auditor = Auditor::new();
        let leader = Leader::from_vertices([Vector3::ZERO]);
        assert_eq!(leader.audit(&mut auditor), AuditAction::Remove);
        assert_eq!(auditor.fixes().len(), 1);
        assert_eq!(auditor.fixes()[0].error, AuditError::InvalidVertexCount);

        let leader = Leader::from_vertices([Vector3::ZERO, Vector3::UNIT_X]);
        assert_eq!(leader.audit(&mut auditor), AuditAction::Keep);
        assert_eq!(auditor.fixes().len(), 1);
    }
}
