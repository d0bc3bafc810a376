//! In-memory stream writer collecting typed tags

use super::stream_writer::DxfStreamWriter;
use crate::error::Result;
use crate::tags::{DxfTag, TagValue, Tags};
use crate::types::{Handle, Vector2, Vector3};

/// Stream writer that records every written pair as a [`DxfTag`]
///
/// Points are kept as single point tags, binary chunks as raw bytes.
#[derive(Debug, Default)]
pub struct TagCollector {
    tags: Tags,
}

impl TagCollector {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Collected tags
    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    /// Consume the collector
    pub fn into_tags(self) -> Tags {
        self.tags
    }

    fn push(&mut self, code: i32, value: TagValue) -> Result<()> {
        self.tags.push(DxfTag::new(code, value));
        Ok(())
    }
}

impl DxfStreamWriter for TagCollector {
    fn write_string(&mut self, code: i32, value: &str) -> Result<()> {
        self.push(code, TagValue::String(value.to_string()))
    }

    fn write_i16(&mut self, code: i32, value: i16) -> Result<()> {
        self.push(code, TagValue::Int(value as i64))
    }

    fn write_i32(&mut self, code: i32, value: i32) -> Result<()> {
        self.push(code, TagValue::Int(value as i64))
    }

    fn write_i64(&mut self, code: i32, value: i64) -> Result<()> {
        self.push(code, TagValue::Int(value))
    }

    fn write_double(&mut self, code: i32, value: f64) -> Result<()> {
        self.push(code, TagValue::Double(value))
    }

    fn write_handle(&mut self, code: i32, handle: Handle) -> Result<()> {
        self.push(code, TagValue::Handle(handle))
    }

    fn write_binary(&mut self, code: i32, data: &[u8]) -> Result<()> {
        self.push(code, TagValue::Binary(data.to_vec()))
    }

    fn write_point2d(&mut self, x_code: i32, point: Vector2) -> Result<()> {
        self.push(x_code, TagValue::Point2D(point))
    }

    fn write_point3d(&mut self, x_code: i32, point: Vector3) -> Result<()> {
        self.push(x_code, TagValue::Point3D(point))
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}
