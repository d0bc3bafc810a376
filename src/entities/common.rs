//! Attributes shared by all graphical entities

use crate::error::Result;
use crate::notification::{NotificationCollection, NotificationType};
use crate::proxy::{load_proxy_graphic, ProxyGraphic, VirtualEntity};
use crate::schema::{AttributeDefinition, EntitySchema, Namespace, SubclassSchema};
use crate::tags::Tags;
use crate::types::{Color, DxfVersion, Handle, LineWeight, Vector3};
use std::sync::Arc;

/// Subclass marker of the common graphical attributes
pub const ACDB_ENTITY: &str = "AcDbEntity";

/// Base class: the tags before the first subclass marker
pub fn base_class() -> Result<SubclassSchema> {
    SubclassSchema::base(vec![
        AttributeDefinition::handle("handle", 5),
        AttributeDefinition::handle("owner", 330).min_version(DxfVersion::AC1012),
    ])
}

/// AcDbEntity: layer, linetype, color and the other display attributes
pub fn acdb_entity() -> Result<SubclassSchema> {
    SubclassSchema::named(
        ACDB_ENTITY,
        vec![
            AttributeDefinition::integer("paperspace", 67).with_default(0).optional(),
            AttributeDefinition::text("layer", 8).with_default("0"),
            AttributeDefinition::text("linetype", 6).with_default("BYLAYER").optional(),
            AttributeDefinition::integer("color", 62).with_default(256).optional(),
            AttributeDefinition::integer("lineweight", 370)
                .with_default(-1)
                .optional()
                .min_version(DxfVersion::AC1015),
            AttributeDefinition::real("ltscale", 48)
                .with_default(1.0)
                .optional()
                .min_version(DxfVersion::AC1015),
            AttributeDefinition::integer("invisible", 60)
                .with_default(0)
                .optional()
                .min_version(DxfVersion::AC1015),
            AttributeDefinition::integer("true_color", 420)
                .optional()
                .min_version(DxfVersion::AC1018),
            AttributeDefinition::text("color_name", 430)
                .optional()
                .min_version(DxfVersion::AC1018),
            AttributeDefinition::integer("transparency", 440)
                .optional()
                .min_version(DxfVersion::AC1018),
            AttributeDefinition::integer("shadow_mode", 284)
                .optional()
                .min_version(DxfVersion::AC1021),
        ],
    )
}

/// Schema of an entity with only the common attributes
pub fn graphic_schema() -> Result<EntitySchema> {
    EntitySchema::new(vec![base_class()?, acdb_entity()?])
}

/// Shared entity state: the attribute namespace and proxy graphic bytes
#[derive(Debug, Clone, PartialEq)]
pub struct EntityCommon {
    /// Attribute values
    pub dxf: Namespace,
    /// Raw proxy graphic blob, if the entity carries one
    pub proxy_graphic: Option<Vec<u8>>,
}

impl EntityCommon {
    /// Empty state for a schema
    pub fn new(schema: Arc<EntitySchema>) -> Self {
        Self {
            dxf: Namespace::new(schema),
            proxy_graphic: None,
        }
    }

    /// Entity handle
    pub fn handle(&self) -> Option<Handle> {
        self.dxf.get_handle("handle").ok().flatten()
    }

    /// Layer name, `"0"` by default
    pub fn layer(&self) -> &str {
        self.dxf.get_str("layer").ok().flatten().unwrap_or("0")
    }

    /// Linetype name, `"BYLAYER"` by default
    pub fn linetype(&self) -> &str {
        self.dxf.get_str("linetype").ok().flatten().unwrap_or("BYLAYER")
    }

    /// Color from the index attribute (62)
    pub fn color(&self) -> Color {
        let index = self.dxf.get_i64("color").ok().flatten().unwrap_or(256);
        Color::from_index(index as i32)
    }

    /// True color (420), if set
    pub fn true_color(&self) -> Option<Color> {
        self.dxf
            .get_i64("true_color")
            .ok()
            .flatten()
            .map(|v| Color::from_true_color(v as u32))
    }

    /// Line weight (370)
    pub fn line_weight(&self) -> LineWeight {
        let value = self.dxf.get_i64("lineweight").ok().flatten().unwrap_or(-1);
        LineWeight::from_value(value as i32)
    }

    /// Set the entity handle
    pub fn set_handle(&mut self, handle: Handle) -> Result<()> {
        self.dxf.set("handle", handle)
    }

    /// Set the layer name
    pub fn set_layer(&mut self, layer: &str) -> Result<()> {
        self.dxf.set("layer", layer)
    }

    /// Set the color index; true colors go to the 420 attribute
    pub fn set_color(&mut self, color: Color) -> Result<()> {
        match color {
            Color::ByLayer => self.dxf.set("color", 256),
            Color::ByBlock => self.dxf.set("color", 0),
            Color::Index(index) => self.dxf.set("color", index as i64),
            Color::Rgb { r, g, b } => {
                let rgb = (r as i64) << 16 | (g as i64) << 8 | b as i64;
                self.dxf.set("true_color", rgb)
            }
        }
    }

    /// Extract the proxy graphic blob from the AcDbEntity tags
    ///
    /// A malformed blob is dropped with an error notification; the rest
    /// of the entity still loads.
    pub(crate) fn load_proxy_graphic(&mut self, tags: &mut Tags, notifications: &mut NotificationCollection) {
        match load_proxy_graphic(tags) {
            Ok(data) => self.proxy_graphic = data,
            Err(err) => {
                tracing::warn!(error = %err, "proxy graphic dropped");
                notifications.notify(
                    NotificationType::Error,
                    format!("proxy graphic dropped: {}", err),
                );
            }
        }
    }

    /// Decode the proxy graphic into display-only entities
    ///
    /// Empty if the entity has no proxy graphic.
    pub fn proxy_graphic_entities(&self) -> Result<Vec<VirtualEntity>> {
        match &self.proxy_graphic {
            Some(data) => Ok(ProxyGraphic::decode(data)?.virtual_entities().collect()),
            None => Ok(Vec::new()),
        }
    }

    /// Extrusion helper for entities with a 210 attribute
    pub(crate) fn extrusion(&self, name: &str) -> Vector3 {
        self.dxf
            .get_point(name)
            .ok()
            .flatten()
            .unwrap_or(Vector3::UNIT_Z)
    }
}
