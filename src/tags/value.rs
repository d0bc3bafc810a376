//! Typed tag values

use crate::types::{Handle, Vector2, Vector3};
use std::fmt;

/// Value of a DXF tag
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    String(String),
    Int(i64),
    Double(f64),
    Point2D(Vector2),
    Point3D(Vector3),
    Handle(Handle),
    Binary(Vec<u8>),
}

impl TagValue {
    /// Short type name used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            TagValue::String(_) => "string",
            TagValue::Int(_) => "integer",
            TagValue::Double(_) => "float",
            TagValue::Point2D(_) => "2D point",
            TagValue::Point3D(_) => "3D point",
            TagValue::Handle(_) => "handle",
            TagValue::Binary(_) => "binary",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TagValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            TagValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Float value; integers widen
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TagValue::Double(v) => Some(*v),
            TagValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Point value; 2D points get z = 0
    pub fn as_point(&self) -> Option<Vector3> {
        match self {
            TagValue::Point3D(p) => Some(*p),
            TagValue::Point2D(p) => Some(p.to_3d()),
            _ => None,
        }
    }

    pub fn as_handle(&self) -> Option<Handle> {
        match self {
            TagValue::Handle(h) => Some(*h),
            _ => None,
        }
    }

    pub fn as_binary(&self) -> Option<&[u8]> {
        match self {
            TagValue::Binary(data) => Some(data),
            _ => None,
        }
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::String(s) => write!(f, "{}", s),
            TagValue::Int(v) => write!(f, "{}", v),
            TagValue::Double(v) => write!(f, "{}", v),
            TagValue::Point2D(p) => write!(f, "({}, {})", p.x, p.y),
            TagValue::Point3D(p) => write!(f, "{}", p),
            TagValue::Handle(h) => write!(f, "{}", h),
            TagValue::Binary(data) => write!(f, "<{} bytes>", data.len()),
        }
    }
}

impl From<&str> for TagValue {
    fn from(value: &str) -> Self {
        TagValue::String(value.to_string())
    }
}

impl From<String> for TagValue {
    fn from(value: String) -> Self {
        TagValue::String(value)
    }
}

impl From<i64> for TagValue {
    fn from(value: i64) -> Self {
        TagValue::Int(value)
    }
}

impl From<i32> for TagValue {
    fn from(value: i32) -> Self {
        TagValue::Int(value as i64)
    }
}

impl From<i16> for TagValue {
    fn from(value: i16) -> Self {
        TagValue::Int(value as i64)
    }
}

impl From<f64> for TagValue {
    fn from(value: f64) -> Self {
        TagValue::Double(value)
    }
}

impl From<Vector2> for TagValue {
    fn from(value: Vector2) -> Self {
        TagValue::Point2D(value)
    }
}

impl From<Vector3> for TagValue {
    fn from(value: Vector3) -> Self {
        TagValue::Point3D(value)
    }
}

impl From<Handle> for TagValue {
    fn from(value: Handle) -> Self {
        TagValue::Handle(value)
    }
}

impl From<Vec<u8>> for TagValue {
    fn from(value: Vec<u8>) -> Self {
        TagValue::Binary(value)
    }
}
