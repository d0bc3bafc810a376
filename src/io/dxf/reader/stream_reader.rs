//! DXF stream reader trait and common types

use crate::error::{DxfError, Result};
use crate::io::dxf::GroupCodeValueType;
use crate::types::{Vector2, Vector3};
use encoding_rs::Encoding;

/// A raw DXF code/value pair, exactly as read from the stream
#[derive(Debug, Clone, PartialEq)]
pub struct DxfCodePair {
    /// The DXF group code
    pub code: i32,

    /// String representation of the value
    pub value_string: String,

    /// Line number of the code line (1-based, 0 if unknown)
    pub line: usize,
}

impl DxfCodePair {
    /// Create a new code/value pair
    pub fn new(code: i32, value_string: impl Into<String>) -> Self {
        Self {
            code,
            value_string: value_string.into(),
            line: 0,
        }
    }

    /// Attach the source line number
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    /// The value type of this pair's group code
    pub fn value_type(&self) -> GroupCodeValueType {
        GroupCodeValueType::from_code(self.code)
    }

    /// Parse the value as integer
    pub fn as_i64(&self) -> Result<i64> {
        self.value_string
            .trim()
            .parse::<i64>()
            .map_err(|_| self.parse_error("integer"))
    }

    /// Parse the value as double
    pub fn as_double(&self) -> Result<f64> {
        self.value_string
            .trim()
            .parse::<f64>()
            .map_err(|_| self.parse_error("float"))
    }

    /// True for the structure tag `(0, name)`
    pub fn is_structure(&self, name: &str) -> bool {
        self.code == 0 && self.value_string == name
    }

    fn parse_error(&self, expected: &str) -> DxfError {
        DxfError::Parse(format!(
            "invalid {} value '{}' for group code {} at line {}",
            expected, self.value_string, self.code, self.line
        ))
    }
}

/// Trait for reading DXF code/value pairs from a stream
pub trait DxfStreamReader: Send {
    /// Read the next code/value pair
    fn read_pair(&mut self) -> Result<Option<DxfCodePair>>;

    /// Peek at the next code without consuming it
    fn peek_code(&mut self) -> Result<Option<i32>>;

    /// Push a pair back to be read again on next read_pair call
    fn push_back(&mut self, pair: DxfCodePair);

    /// Reset the reader to the beginning
    fn reset(&mut self) -> Result<()>;

    /// Fallback encoding for lines that are not valid UTF-8
    fn set_encoding(&mut self, encoding: &'static Encoding);
}

/// Helper for reading points from consecutive coordinate pairs
///
/// Collects the x, y and optional z pair of one point group.
/// A pair of a different group or axis order ends the point.
#[derive(Debug, Default)]
pub struct PointReader {
    x: Option<f64>,
    y: Option<f64>,
    z: Option<f64>,
    group: Option<i32>,
}

impl PointReader {
    /// Create a new point reader
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a coordinate pair; returns `false` if the pair does not continue this point
    pub fn add_coordinate(&mut self, pair: &DxfCodePair) -> Result<bool> {
        let (Some(axis), Some(group)) = (
            GroupCodeValueType::coordinate_axis(pair.code),
            GroupCodeValueType::coordinate_group(pair.code),
        ) else {
            return Ok(false);
        };
        if self.group.is_some_and(|g| g != group) {
            return Ok(false);
        }
        let expected_axis = match (self.x, self.y, self.z) {
            (None, _, _) => 0,
            (Some(_), None, _) => 1,
            (Some(_), Some(_), None) => 2,
            _ => return Ok(false),
        };
        if axis != expected_axis {
            return Ok(false);
        }

        let value = pair.as_double()?;
        self.group = Some(group);
        match axis {
            0 => self.x = Some(value),
            1 => self.y = Some(value),
            _ => self.z = Some(value),
        }
        Ok(true)
    }

    /// Check if we have at least x and y
    pub fn is_complete(&self) -> bool {
        self.x.is_some() && self.y.is_some()
    }

    /// Whether the z coordinate was present
    pub fn has_z(&self) -> bool {
        self.z.is_some()
    }

    /// Get the point as 3D (z = 0 if missing)
    pub fn get_point(&self) -> Option<Vector3> {
        match (self.x, self.y) {
            (Some(x), Some(y)) => Some(Vector3::new(x, y, self.z.unwrap_or(0.0))),
            _ => None,
        }
    }

    /// Get the point as 2D
    pub fn get_point2d(&self) -> Option<Vector2> {
        match (self.x, self.y) {
            (Some(x), Some(y)) => Some(Vector2::new(x, y)),
            _ => None,
        }
    }

    /// Reset the reader
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
