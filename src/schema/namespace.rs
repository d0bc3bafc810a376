//! Attribute namespace of one entity

use super::attribute::AttributeDefinition;
use super::entity_schema::EntitySchema;
use crate::error::{DxfError, Result};
use crate::tags::TagValue;
use crate::types::{Handle, Vector3};
use indexmap::IndexMap;
use std::sync::Arc;

/// Explicitly set attribute values, validated against an [`EntitySchema`]
///
/// Reading an unset attribute yields its declared default. Only explicit
/// values are stored, so "set to the default" and "unset" stay distinct.
#[derive(Debug, Clone)]
pub struct Namespace {
    schema: Arc<EntitySchema>,
    values: IndexMap<String, TagValue>,
}

impl Namespace {
    /// Empty namespace for a schema
    pub fn new(schema: Arc<EntitySchema>) -> Self {
        Self {
            schema,
            values: IndexMap::new(),
        }
    }

    pub fn schema(&self) -> &Arc<EntitySchema> {
        &self.schema
    }

    /// Definition of a declared attribute
    pub fn definition(&self, name: &str) -> Result<&AttributeDefinition> {
        self.schema
            .get(name)
            .ok_or_else(|| DxfError::UnknownAttribute(name.to_string()))
    }

    /// Explicit value, else the default; `None` if neither exists
    pub fn get(&self, name: &str) -> Result<Option<&TagValue>> {
        let definition = self.definition(name)?;
        Ok(self.values.get(name).or(definition.default_value()))
    }

    /// Explicit value only
    pub fn get_explicit(&self, name: &str) -> Result<Option<&TagValue>> {
        self.definition(name)?;
        Ok(self.values.get(name))
    }

    /// Set a value, coerced to the declared kind
    pub fn set(&mut self, name: &str, value: impl Into<TagValue>) -> Result<()> {
        let value = self.definition(name)?.coerce(value.into())?;
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    /// True if the attribute has an explicit value
    pub fn is_explicit(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Remove an explicit value, returning it
    pub fn unset(&mut self, name: &str) -> Result<Option<TagValue>> {
        self.definition(name)?;
        Ok(self.values.shift_remove(name))
    }

    /// Explicit values in the order they were set
    pub fn explicit_values(&self) -> impl Iterator<Item = (&str, &TagValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of explicit values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get_str(&self, name: &str) -> Result<Option<&str>> {
        self.typed(name, "string", TagValue::as_str)
    }

    pub fn get_i64(&self, name: &str) -> Result<Option<i64>> {
        self.typed(name, "integer", TagValue::as_i64)
    }

    pub fn get_f64(&self, name: &str) -> Result<Option<f64>> {
        self.typed(name, "float", TagValue::as_f64)
    }

    /// Point value; 2D points get z = 0
    pub fn get_point(&self, name: &str) -> Result<Option<Vector3>> {
        self.typed(name, "point", TagValue::as_point)
    }

    pub fn get_handle(&self, name: &str) -> Result<Option<Handle>> {
        self.typed(name, "handle", TagValue::as_handle)
    }

    fn typed<'a, T>(
        &'a self,
        name: &str,
        expected: &'static str,
        convert: impl FnOnce(&'a TagValue) -> Option<T>,
    ) -> Result<Option<T>> {
        match self.get(name)? {
            None => Ok(None),
            Some(value) => convert(value).map(Some).ok_or_else(|| {
                let code = self.schema.get(name).map_or(0, |d| d.code());
                DxfError::invalid_value(name, code, expected, value.kind_name())
            }),
        }
    }
}

impl PartialEq for Namespace {
    /// Namespaces are equal if they hold the same explicit values
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AttributeDefinition, SubclassSchema};

    fn schema() -> Arc<EntitySchema> {
        Arc::new(
            EntitySchema::new(vec![SubclassSchema::named(
                "AcDbTest",
                vec![
                    AttributeDefinition::text("layer", 8).with_default("0"),
                    AttributeDefinition::real("thickness", 39).with_default(0.0).optional(),
                    AttributeDefinition::point3d("start", 10),
                    AttributeDefinition::handle("owner", 330),
                ],
            )
            .unwrap()])
            .unwrap(),
        )
    }

    #[test]
    fn test_defaults_and_explicit_values() {
        let mut ns = Namespace::new(schema());
        assert_eq!(ns.get_str("layer").unwrap(), Some("0"));
        assert!(!ns.is_explicit("layer"));
        assert_eq!(ns.get("start").unwrap(), None);

        ns.set("layer", "0").unwrap();
        assert!(ns.is_explicit("layer"));
        assert_eq!(ns.unset("layer").unwrap(), Some(TagValue::from("0")));
        assert!(!ns.is_explicit("layer"));
    }

    #[test]
    fn test_set_coerces() {
        let mut ns = Namespace::new(schema());
        ns.set("thickness", 2).unwrap();
        assert_eq!(ns.get_f64("thickness").unwrap(), Some(2.0));
        ns.set("owner", "1F").unwrap();
        assert_eq!(ns.get_handle("owner").unwrap(), Some(Handle::new(0x1F)));
    }

    #[test]
    fn test_unknown_attribute() {
        let mut ns = Namespace::new(schema());
        assert!(matches!(ns.get("color"), Err(DxfError::UnknownAttribute(_))));
        assert!(matches!(ns.set("color", 1), Err(DxfError::UnknownAttribute(_))));
        assert!(ns.unset("color").is_err());
    }

    #[test]
    fn test_invalid_value_leaves_namespace_unchanged() {
        let mut ns = Namespace::new(schema());
        ns.set("thickness", 1.5).unwrap();
        assert!(ns.set("thickness", "thick").is_err());
        assert_eq!(ns.get_f64("thickness").unwrap(), Some(1.5));
    }

    #[test]
    fn test_typed_getter_mismatch() {
        let ns = Namespace::new(schema());
        assert!(ns.get_f64("layer").is_err());
    }
}
