//! Line entity

use super::common::{acdb_entity, base_class, EntityCommon};
use super::SchemaEntity;
use crate::error::Result;
use crate::schema::{
    load_entity, AttributeDefinition, EntitySchema, LoadOptions, LoadReport, SubclassSchema,
};
use crate::tags::Tags;
use crate::types::Vector3;
use once_cell::sync::Lazy;
use std::sync::Arc;

/// Subclass marker of the line attributes
pub const ACDB_LINE: &str = "AcDbLine";

fn acdb_line() -> Result<SubclassSchema> {
    SubclassSchema::named(
        ACDB_LINE,
        vec![
            AttributeDefinition::point3d("start", 10).with_default(Vector3::ZERO),
            AttributeDefinition::point3d("end", 11).with_default(Vector3::ZERO),
            AttributeDefinition::real("thickness", 39).with_default(0.0).optional(),
            AttributeDefinition::point3d("extrusion", 210)
                .with_default(Vector3::UNIT_Z)
                .optional(),
        ],
    )
}

static LINE_SCHEMA: Lazy<Arc<EntitySchema>> = Lazy::new(|| {
    let schema = [base_class(), acdb_entity(), acdb_line()]
        .into_iter()
        .collect::<Result<Vec<_>>>()
        .and_then(EntitySchema::new)
        .expect("LINE schema is valid");
    Arc::new(schema)
});

/// A line entity defined by two endpoints
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Common entity data
    pub common: EntityCommon,
}

impl Line {
    /// Create a new line from origin to origin
    pub fn new() -> Self {
        Line {
            common: EntityCommon::new(Arc::clone(&LINE_SCHEMA)),
        }
    }

    /// The LINE schema
    pub fn entity_schema() -> &'static Arc<EntitySchema> {
        &LINE_SCHEMA
    }

    /// Create a new line between two points
    pub fn from_points(start: Vector3, end: Vector3) -> Result<Self> {
        let mut line = Self::new();
        line.set_start(start)?;
        line.set_end(end)?;
        Ok(line)
    }

    /// Load a line from its tags
    pub fn from_tags(tags: Tags, options: &LoadOptions) -> Result<(Self, LoadReport)> {
        let mut line = Self::new();
        let report = load_entity(&mut line, tags, options)?;
        Ok((line, report))
    }

    /// Start point
    pub fn start(&self) -> Vector3 {
        self.point("start")
    }

    /// End point
    pub fn end(&self) -> Vector3 {
        self.point("end")
    }

    pub fn set_start(&mut self, point: Vector3) -> Result<()> {
        self.common.dxf.set("start", point)
    }

    pub fn set_end(&mut self, point: Vector3) -> Result<()> {
        self.common.dxf.set("end", point)
    }

    /// Thickness (extrusion in the normal direction)
    pub fn thickness(&self) -> f64 {
        self.common.dxf.get_f64("thickness").ok().flatten().unwrap_or(0.0)
    }

    /// Normal vector
    pub fn extrusion(&self) -> Vector3 {
        self.common.extrusion("extrusion")
    }

    fn point(&self, name: &str) -> Vector3 {
        self.common.dxf.get_point(name).ok().flatten().unwrap_or(Vector3::ZERO)
    }
}

impl Default for Line {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaEntity for Line {
    fn dxftype(&self) -> &str {
        "LINE"
    }

    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }
}
