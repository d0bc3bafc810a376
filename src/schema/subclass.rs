//! Subclass schema: the attributes of one subclass marker section

use super::attribute::AttributeDefinition;
use crate::error::{DxfError, Result};
use ahash::AHashMap;

/// Display name of the unnamed base subclass
pub const BASE_CLASS_NAME: &str = "<base>";

/// Attributes of one subclass, in export order
#[derive(Debug, Clone)]
pub struct SubclassSchema {
    name: Option<String>,
    attributes: Vec<AttributeDefinition>,
    by_code: AHashMap<i32, usize>,
    by_name: AHashMap<String, usize>,
}

impl SubclassSchema {
    /// Create a subclass schema
    ///
    /// `name` is the subclass marker; `None` for the base class that holds
    /// the tags before the first marker. Attribute names must be unique.
    pub fn new(name: Option<&str>, attributes: Vec<AttributeDefinition>) -> Result<Self> {
        let display = name.unwrap_or(BASE_CLASS_NAME);
        let mut by_code = AHashMap::with_capacity(attributes.len());
        let mut by_name = AHashMap::with_capacity(attributes.len());
        let mut attributes = attributes;

        for (index, attr) in attributes.iter_mut().enumerate() {
            attr.normalize_default()?;
            if by_name.insert(attr.name().to_string(), index).is_some() {
                return Err(DxfError::SchemaConflict {
                    name: attr.name().to_string(),
                    first: display.to_string(),
                    second: display.to_string(),
                });
            }
            // first declaration of a code claims it on load
            by_code.entry(attr.code()).or_insert(index);
        }

        Ok(Self {
            name: name.map(str::to_string),
            attributes,
            by_code,
            by_name,
        })
    }

    /// The unnamed base subclass
    pub fn base(attributes: Vec<AttributeDefinition>) -> Result<Self> {
        Self::new(None, attributes)
    }

    /// A subclass with a marker name
    pub fn named(name: &str, attributes: Vec<AttributeDefinition>) -> Result<Self> {
        Self::new(Some(name), attributes)
    }

    /// Subclass marker name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Marker name, or `<base>` for the base class
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(BASE_CLASS_NAME)
    }

    /// Attributes in declaration order
    pub fn attributes(&self) -> &[AttributeDefinition] {
        &self.attributes
    }

    /// Attribute declared for a group code
    pub fn attribute_for_code(&self, code: i32) -> Option<&AttributeDefinition> {
        self.by_code.get(&code).map(|&i| &self.attributes[i])
    }

    /// Attribute by name
    pub fn get(&self, name: &str) -> Option<&AttributeDefinition> {
        self.by_name.get(name).map(|&i| &self.attributes[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::AttributeKind;
    use crate::tags::TagValue;

    #[test]
    fn test_lookup_by_code_and_name() {
        let subclass = SubclassSchema::named(
            "AcDbLine",
            vec![
                AttributeDefinition::point3d("start", 10),
                AttributeDefinition::real("thickness", 39).with_default(0).optional(),
            ],
        )
        .unwrap();

        assert_eq!(subclass.display_name(), "AcDbLine");
        assert_eq!(subclass.attribute_for_code(39).unwrap().name(), "thickness");
        assert_eq!(subclass.get("start").unwrap().code(), 10);
        assert!(subclass.attribute_for_code(11).is_none());
        // integer default widened to the declared kind
        assert_eq!(
            subclass.get("thickness").unwrap().default_value(),
            Some(&TagValue::Double(0.0))
        );
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let result = SubclassSchema::base(vec![
            AttributeDefinition::handle("handle", 5),
            AttributeDefinition::new("handle", 105, AttributeKind::Handle),
        ]);
        assert!(matches!(result, Err(DxfError::SchemaConflict { .. })));
    }

    #[test]
    fn test_invalid_default_rejected() {
        let result = SubclassSchema::base(vec![AttributeDefinition::real("x", 40).with_default("abc")]);
        assert!(matches!(result, Err(DxfError::InvalidValue { .. })));
    }
}
