//! Entity schema: the ordered subclasses of one entity type

use super::attribute::AttributeDefinition;
use super::subclass::SubclassSchema;
use crate::error::{DxfError, Result};
use indexmap::IndexMap;

/// Ordered list of subclass schemas with a unique attribute name index
#[derive(Debug, Clone)]
pub struct EntitySchema {
    subclasses: Vec<SubclassSchema>,
    /// attribute name -> (subclass index, attribute index)
    index: IndexMap<String, (usize, usize)>,
}

impl EntitySchema {
    /// Combine subclass schemas
    ///
    /// Fails with [`DxfError::SchemaConflict`] if two subclasses declare the
    /// same attribute name.
    pub fn new(subclasses: Vec<SubclassSchema>) -> Result<Self> {
        let mut index: IndexMap<String, (usize, usize)> = IndexMap::new();
        for (sc_index, subclass) in subclasses.iter().enumerate() {
            for (attr_index, attr) in subclass.attributes().iter().enumerate() {
                if let Some(&(first, _)) = index.get(attr.name()) {
                    return Err(DxfError::SchemaConflict {
                        name: attr.name().to_string(),
                        first: subclasses[first].display_name().to_string(),
                        second: subclass.display_name().to_string(),
                    });
                }
                index.insert(attr.name().to_string(), (sc_index, attr_index));
            }
        }
        Ok(Self { subclasses, index })
    }

    /// Subclasses in export order
    pub fn subclasses(&self) -> &[SubclassSchema] {
        &self.subclasses
    }

    /// Subclass by marker name
    pub fn subclass(&self, name: &str) -> Option<&SubclassSchema> {
        self.subclasses.iter().find(|sc| sc.name() == Some(name))
    }

    /// Attribute definition by name
    pub fn get(&self, name: &str) -> Option<&AttributeDefinition> {
        self.index
            .get(name)
            .map(|&(sc, attr)| &self.subclasses[sc].attributes()[attr])
    }

    /// Name of the subclass declaring an attribute
    pub fn subclass_of(&self, name: &str) -> Option<&SubclassSchema> {
        self.index.get(name).map(|&(sc, _)| &self.subclasses[sc])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All attribute names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }

    /// Number of declared attributes
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subclass(name: &str, attrs: &[(&str, i32)]) -> SubclassSchema {
        SubclassSchema::named(
            name,
            attrs
                .iter()
                .map(|(n, c)| AttributeDefinition::text(*n, *c))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_name_index() {
        let schema = EntitySchema::new(vec![
            subclass("AcDbEntity", &[("layer", 8), ("linetype", 6)]),
            subclass("AcDbText", &[("text", 1)]),
        ])
        .unwrap();

        assert_eq!(schema.len(), 3);
        assert_eq!(schema.get("text").unwrap().code(), 1);
        assert_eq!(schema.subclass_of("layer").unwrap().display_name(), "AcDbEntity");
        assert_eq!(schema.names().collect::<Vec<_>>(), vec!["layer", "linetype", "text"]);
        assert!(schema.subclass("AcDbText").is_some());
    }

    #[test]
    fn test_conflicting_names() {
        let err = EntitySchema::new(vec![
            subclass("AcDbEntity", &[("layer", 8)]),
            subclass("AcDbCustom", &[("layer", 300)]),
        ])
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Attribute 'layer' declared by both AcDbEntity and AcDbCustom"
        );
    }
}
