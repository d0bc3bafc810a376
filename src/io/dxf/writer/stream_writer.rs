//! DXF stream writer trait and common types

use crate::error::{DxfError, Result};
use crate::io::dxf::GroupCodeValueType;
use crate::tags::{DxfTag, TagValue};
use crate::types::{Handle, Vector2, Vector3};

/// Trait for writing DXF code/value pairs
///
/// Object safe, so exporters can take `&mut dyn DxfStreamWriter`.
pub trait DxfStreamWriter {
    /// Write a code/value pair with a string value
    fn write_string(&mut self, code: i32, value: &str) -> Result<()>;

    /// Write a code/value pair with an i16 value
    fn write_i16(&mut self, code: i32, value: i16) -> Result<()>;

    /// Write a code/value pair with an i32 value
    fn write_i32(&mut self, code: i32, value: i32) -> Result<()>;

    /// Write a code/value pair with an i64 value
    fn write_i64(&mut self, code: i32, value: i64) -> Result<()>;

    /// Write a code/value pair with a double value
    fn write_double(&mut self, code: i32, value: f64) -> Result<()>;

    /// Write a code/value pair with a handle value
    fn write_handle(&mut self, code: i32, handle: Handle) -> Result<()>;

    /// Write one binary chunk
    fn write_binary(&mut self, code: i32, data: &[u8]) -> Result<()>;

    /// Write a 2D point (codes x, x+10)
    fn write_point2d(&mut self, x_code: i32, point: Vector2) -> Result<()> {
        self.write_double(x_code, point.x)?;
        self.write_double(x_code + 10, point.y)
    }

    /// Write a 3D point (codes x, x+10, x+20)
    fn write_point3d(&mut self, x_code: i32, point: Vector3) -> Result<()> {
        self.write_double(x_code, point.x)?;
        self.write_double(x_code + 10, point.y)?;
        self.write_double(x_code + 20, point.z)
    }

    /// Flush the writer
    fn flush(&mut self) -> Result<()>;
}

/// Extension trait for convenient writing operations
pub trait DxfStreamWriterExt: DxfStreamWriter {
    /// Write an integer with the width its group code calls for
    ///
    /// Fails with [`DxfError::InvalidValue`] if the value does not fit.
    fn write_int(&mut self, code: i32, value: i64) -> Result<()> {
        let value_type = GroupCodeValueType::from_code(code);
        if let Some(range) = value_type.integer_range() {
            if !range.contains(&value) {
                return Err(DxfError::invalid_value(
                    "integer",
                    code,
                    "value in range of the group code",
                    value.to_string(),
                ));
            }
        }
        match value_type {
            GroupCodeValueType::Int32 => self.write_i32(code, value as i32),
            GroupCodeValueType::Int16 | GroupCodeValueType::Byte | GroupCodeValueType::Bool => {
                self.write_i16(code, value as i16)
            }
            _ => self.write_i64(code, value),
        }
    }

    /// Write a typed tag
    fn write_tag(&mut self, tag: &DxfTag) -> Result<()> {
        match &tag.value {
            TagValue::String(s) => self.write_string(tag.code, s),
            TagValue::Int(v) => self.write_int(tag.code, *v),
            TagValue::Double(v) => self.write_double(tag.code, *v),
            TagValue::Point2D(p) => self.write_point2d(tag.code, *p),
            TagValue::Point3D(p) => self.write_point3d(tag.code, *p),
            TagValue::Handle(h) => self.write_handle(tag.code, *h),
            TagValue::Binary(data) => self.write_binary(tag.code, data),
        }
    }

    /// Write the structure tag `(0, name)` that starts an entity
    fn write_entity_type(&mut self, entity_type: &str) -> Result<()> {
        self.write_string(0, entity_type)
    }

    /// Write a subclass marker
    fn write_subclass(&mut self, marker: &str) -> Result<()> {
        self.write_string(100, marker)
    }

    /// Write section start
    fn write_section_start(&mut self, section_name: &str) -> Result<()> {
        self.write_string(0, "SECTION")?;
        self.write_string(2, section_name)
    }

    /// Write section end
    fn write_section_end(&mut self) -> Result<()> {
        self.write_string(0, "ENDSEC")
    }

    /// Write end of file
    fn write_eof(&mut self) -> Result<()> {
        self.write_string(0, "EOF")
    }
}

impl<T: DxfStreamWriter + ?Sized> DxfStreamWriterExt for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::dxf::TagCollector;

    #[test]
    fn test_write_int_checks_code_width() {
        let mut collector = TagCollector::new();
        collector.write_int(62, 256).unwrap();
        collector.write_int(420, 0x00FF_8000).unwrap();
        assert_eq!(collector.tags().codes(), vec![62, 420]);

        assert!(matches!(
            collector.write_int(62, 70000),
            Err(DxfError::InvalidValue { code: 62, .. })
        ));
        assert!(collector.write_int(90, i64::from(i32::MAX) + 1).is_err());
        assert_eq!(collector.tags().len(), 2);
    }
}
