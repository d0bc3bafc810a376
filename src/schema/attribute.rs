//! Attribute definitions
//!
//! An attribute maps a name to a group code and a value kind. Defaults,
//! optionality and the minimum format version drive export.

use crate::error::{DxfError, Result};
use crate::io::dxf::{decode_hex, GroupCodeValueType};
use crate::tags::TagValue;
use crate::types::{DxfVersion, Handle};

/// Value kind of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Text,
    Integer,
    Real,
    /// Exported as x and y only
    Point2D,
    Point3D,
    /// 2D or 3D, exported as stored
    AnyPoint,
    Handle,
    Binary,
}

impl AttributeKind {
    /// Name used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            AttributeKind::Text => "string",
            AttributeKind::Integer => "integer",
            AttributeKind::Real => "float",
            AttributeKind::Point2D => "2D point",
            AttributeKind::Point3D => "3D point",
            AttributeKind::AnyPoint => "point",
            AttributeKind::Handle => "handle",
            AttributeKind::Binary => "binary",
        }
    }

    /// Convert `value` to this kind
    ///
    /// Lossless widenings are applied (integer to float, 2D to 3D point,
    /// numeric strings to numbers, hex strings to handles); everything else
    /// is rejected with [`DxfError::InvalidValue`].
    pub fn coerce(&self, name: &str, code: i32, value: TagValue) -> Result<TagValue> {
        let reject = |value: &TagValue| {
            DxfError::invalid_value(name, code, self.name(), format!("{} {}", value.kind_name(), value))
        };

        let coerced = match (self, value) {
            (AttributeKind::Text, TagValue::String(s)) => TagValue::String(s),
            (AttributeKind::Text, TagValue::Int(v)) => TagValue::String(v.to_string()),
            (AttributeKind::Text, TagValue::Double(v)) => TagValue::String(v.to_string()),
            (AttributeKind::Text, TagValue::Handle(h)) => TagValue::String(h.to_hex()),

            (AttributeKind::Integer, TagValue::Int(v)) => TagValue::Int(v),
            (AttributeKind::Integer, TagValue::Double(v)) if v.fract() == 0.0 && v.is_finite() => {
                TagValue::Int(v as i64)
            }
            (AttributeKind::Integer, TagValue::String(s)) => match s.trim().parse::<i64>() {
                Ok(v) => TagValue::Int(v),
                Err(_) => return Err(reject(&TagValue::String(s))),
            },

            (AttributeKind::Real, TagValue::Double(v)) => TagValue::Double(v),
            (AttributeKind::Real, TagValue::Int(v)) => TagValue::Double(v as f64),
            (AttributeKind::Real, TagValue::String(s)) => match s.trim().parse::<f64>() {
                Ok(v) => TagValue::Double(v),
                Err(_) => return Err(reject(&TagValue::String(s))),
            },

            (AttributeKind::Point2D, TagValue::Point2D(p)) => TagValue::Point2D(p),
            (AttributeKind::Point2D, TagValue::Point3D(p)) => TagValue::Point2D(p.to_2d()),
            (AttributeKind::Point3D, TagValue::Point3D(p)) => TagValue::Point3D(p),
            (AttributeKind::Point3D, TagValue::Point2D(p)) => TagValue::Point3D(p.to_3d()),
            (AttributeKind::AnyPoint, v @ (TagValue::Point2D(_) | TagValue::Point3D(_))) => v,

            (AttributeKind::Handle, TagValue::Handle(h)) => TagValue::Handle(h),
            (AttributeKind::Handle, TagValue::String(s)) => match Handle::from_hex(&s) {
                Some(h) => TagValue::Handle(h),
                None => return Err(reject(&TagValue::String(s))),
            },
            (AttributeKind::Handle, TagValue::Int(v)) if v >= 0 => TagValue::Handle(Handle::new(v as u64)),

            (AttributeKind::Binary, TagValue::Binary(data)) => TagValue::Binary(data),
            (AttributeKind::Binary, TagValue::String(s)) => TagValue::Binary(decode_hex(&s)?),

            (_, value) => return Err(reject(&value)),
        };

        // integers must fit the width of their group code
        if let TagValue::Int(v) = coerced {
            let range = GroupCodeValueType::from_code(code).integer_range();
            if range.is_some_and(|range| !range.contains(&v)) {
                return Err(reject(&coerced));
            }
        }
        Ok(coerced)
    }
}

/// Declaration of one named attribute
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeDefinition {
    name: String,
    code: i32,
    kind: AttributeKind,
    default: Option<TagValue>,
    optional: bool,
    min_version: DxfVersion,
}

impl AttributeDefinition {
    /// Mandatory attribute without default, exported for every version
    pub fn new(name: impl Into<String>, code: i32, kind: AttributeKind) -> Self {
        Self {
            name: name.into(),
            code,
            kind,
            default: None,
            optional: false,
            min_version: DxfVersion::AC1009,
        }
    }

    pub fn text(name: impl Into<String>, code: i32) -> Self {
        Self::new(name, code, AttributeKind::Text)
    }

    pub fn integer(name: impl Into<String>, code: i32) -> Self {
        Self::new(name, code, AttributeKind::Integer)
    }

    pub fn real(name: impl Into<String>, code: i32) -> Self {
        Self::new(name, code, AttributeKind::Real)
    }

    pub fn point3d(name: impl Into<String>, code: i32) -> Self {
        Self::new(name, code, AttributeKind::Point3D)
    }

    pub fn handle(name: impl Into<String>, code: i32) -> Self {
        Self::new(name, code, AttributeKind::Handle)
    }

    /// Set the default value
    pub fn with_default(mut self, default: impl Into<TagValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Mark as optional
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Set the minimum version the attribute is exported for
    pub fn min_version(mut self, version: DxfVersion) -> Self {
        self.min_version = version;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn kind(&self) -> AttributeKind {
        self.kind
    }

    pub fn default_value(&self) -> Option<&TagValue> {
        self.default.as_ref()
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn required_version(&self) -> DxfVersion {
        self.min_version
    }

    /// Coerce a value to this attribute's kind
    pub fn coerce(&self, value: TagValue) -> Result<TagValue> {
        self.kind.coerce(&self.name, self.code, value)
    }

    /// Coerce the default in place; run once when the schema is built
    pub(crate) fn normalize_default(&mut self) -> Result<()> {
        if let Some(default) = self.default.take() {
            self.default = Some(self.coerce(default)?);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Vector2, Vector3};

    #[test]
    fn test_widening() {
        let attr = AttributeDefinition::real("thickness", 39);
        assert_eq!(attr.coerce(TagValue::Int(2)).unwrap(), TagValue::Double(2.0));
        assert_eq!(attr.coerce(TagValue::from("0.5")).unwrap(), TagValue::Double(0.5));

        let attr = AttributeDefinition::point3d("start", 10);
        assert_eq!(
            attr.coerce(TagValue::Point2D(Vector2::new(1.0, 2.0))).unwrap(),
            TagValue::Point3D(Vector3::new(1.0, 2.0, 0.0))
        );

        let attr = AttributeDefinition::handle("owner", 330);
        assert_eq!(attr.coerce(TagValue::from("1F")).unwrap(), TagValue::Handle(Handle::new(0x1F)));
    }

    #[test]
    fn test_rejects_mismatched_kind() {
        let attr = AttributeDefinition::real("thickness", 39);
        let err = attr.coerce(TagValue::from("thick")).unwrap_err();
        assert!(matches!(err, DxfError::InvalidValue { code: 39, expected: "float", .. }));

        let attr = AttributeDefinition::integer("color", 62);
        assert!(attr.coerce(TagValue::Double(1.5)).is_err());
        assert!(attr.coerce(TagValue::Point3D(Vector3::ZERO)).is_err());
    }

    #[test]
    fn test_rejects_integer_wider_than_code() {
        let attr = AttributeDefinition::integer("color", 62);
        assert_eq!(attr.coerce(TagValue::Int(256)).unwrap(), TagValue::Int(256));
        assert!(matches!(
            attr.coerce(TagValue::Int(70000)),
            Err(DxfError::InvalidValue { code: 62, .. })
        ));
        assert!(attr.coerce(TagValue::from("-40000")).is_err());

        let attr = AttributeDefinition::integer("true_color", 420);
        assert!(attr.coerce(TagValue::Int(70000)).is_ok());
    }

    #[test]
    fn test_builder() {
        let attr = AttributeDefinition::integer("lineweight", 370)
            .with_default(-1)
            .optional()
            .min_version(DxfVersion::AC1015);
        assert_eq!(attr.code(), 370);
        assert!(attr.is_optional());
        assert_eq!(attr.default_value(), Some(&TagValue::Int(-1)));
        assert_eq!(attr.required_version(), DxfVersion::AC1015);
    }
}
