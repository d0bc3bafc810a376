//! Display-only entities produced from proxy graphic records

use crate::types::{Color, LineWeight, Vector3};
use bitflags::bitflags;

bitflags! {
    /// Text generation flags (DXF group code 71 of TEXT)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TextGenerationFlags: u16 {
        const BACKWARD = 2;
        const UPSIDE_DOWN = 4;
    }
}

/// Display attributes in effect when a geometry record was read
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayAttributes {
    /// Always `"0"`: layer indices are not resolved against a layer table
    pub layer: String,
    /// Always `"BYLAYER"`: linetype indices are not resolved
    pub linetype: String,
    pub color: Color,
    pub true_color: Option<Color>,
    pub line_weight: LineWeight,
    pub ltscale: f64,
    pub thickness: f64,
    pub fill: bool,
    pub marker: Option<u32>,
    /// Raw ATTRIBUTE_LAYER index
    pub layer_index: Option<u32>,
    /// Raw ATTRIBUTE_LINETYPE index
    pub linetype_index: Option<u32>,
}

impl Default for DisplayAttributes {
    fn default() -> Self {
        Self {
            layer: "0".to_string(),
            linetype: "BYLAYER".to_string(),
            color: Color::ByLayer,
            true_color: None,
            line_weight: LineWeight::ByLayer,
            ltscale: 1.0,
            thickness: 0.0,
            fill: false,
            marker: None,
            layer_index: None,
            linetype_index: None,
        }
    }
}

/// Font details carried by TEXT2 and UNICODE_TEXT2 records
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FontInfo {
    pub font_file: String,
    pub bigfont_file: String,
    /// Only set by UNICODE_TEXT2
    pub typeface: Option<String>,
    pub bold: bool,
    pub italic: bool,
    pub charset: u32,
    pub pitch_and_family: u32,
    pub tracking_percentage: f64,
    pub vertical: bool,
    pub underline: bool,
    pub overline: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextGeometry {
    pub text: String,
    pub insert: Vector3,
    pub normal: Vector3,
    pub direction: Vector3,
    pub height: f64,
    pub width_factor: f64,
    /// Oblique angle in degrees
    pub oblique: f64,
    pub generation_flags: TextGenerationFlags,
    pub font: Option<FontInfo>,
}

impl TextGeometry {
    /// Rotation angle in degrees, from the text direction
    pub fn rotation(&self) -> f64 {
        self.direction.angle_deg()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolylineGeometry {
    pub vertices: Vec<Vector3>,
    pub closed: bool,
    /// Only set by POLYLINE_WITH_NORMALS
    pub normal: Option<Vector3>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CircleGeometry {
    pub center: Vector3,
    pub radius: f64,
    pub normal: Vector3,
}

/// Arc fill style of a CIRCULAR_ARC record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArcType {
    #[default]
    Simple,
    Sector,
    Chord,
}

impl ArcType {
    pub fn from_value(value: u32) -> Self {
        match value {
            1 => ArcType::Sector,
            2 => ArcType::Chord,
            _ => ArcType::Simple,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArcGeometry {
    pub center: Vector3,
    pub radius: f64,
    pub normal: Vector3,
    /// Direction from the center to the start point
    pub start_vector: Vector3,
    /// Sweep angle in radians, counter-clockwise
    pub sweep_angle: f64,
    pub arc_type: ArcType,
}

impl ArcGeometry {
    /// Start angle in degrees, measured in the plane of the start vector
    pub fn start_angle(&self) -> f64 {
        self.start_vector.angle_deg()
    }

    pub fn end_angle(&self) -> f64 {
        self.start_angle() + self.sweep_angle.to_degrees()
    }
}

/// Infinite line or ray: start point and direction
#[derive(Debug, Clone, PartialEq)]
pub struct LineGeometry {
    pub start: Vector3,
    pub direction: Vector3,
}

#[derive(Debug, Clone, PartialEq)]
pub enum VirtualGeometry {
    Text(TextGeometry),
    Polyline(PolylineGeometry),
    Circle(CircleGeometry),
    Arc(ArcGeometry),
    XLine(LineGeometry),
    Ray(LineGeometry),
}

/// An entity rebuilt from proxy graphic records
///
/// Virtual entities have no handle and are not part of any drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct VirtualEntity {
    pub geometry: VirtualGeometry,
    pub attributes: DisplayAttributes,
}

impl VirtualEntity {
    pub fn new(geometry: VirtualGeometry, attributes: DisplayAttributes) -> Self {
        Self { geometry, attributes }
    }

    /// DXF type the geometry corresponds to
    pub fn dxftype(&self) -> &'static str {
        match self.geometry {
            VirtualGeometry::Text(_) => "TEXT",
            VirtualGeometry::Polyline(_) => "POLYLINE",
            VirtualGeometry::Circle(_) => "CIRCLE",
            VirtualGeometry::Arc(_) => "ARC",
            VirtualGeometry::XLine(_) => "XLINE",
            VirtualGeometry::Ray(_) => "RAY",
        }
    }

    pub fn as_text(&self) -> Option<&TextGeometry> {
        match &self.geometry {
            VirtualGeometry::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_polyline(&self) -> Option<&PolylineGeometry> {
        match &self.geometry {
            VirtualGeometry::Polyline(polyline) => Some(polyline),
            _ => None,
        }
    }
}
