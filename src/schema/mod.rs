//! Declarative attribute schemas
//!
//! An entity type is described by an [`EntitySchema`]: an ordered list of
//! [`SubclassSchema`]s, each mapping attribute names to group codes. The
//! same schema drives loading ([`load_entity`]) and export
//! ([`export_entity`]), so an entity round-trips through its schema.

mod attribute;
mod entity_schema;
mod export;
mod namespace;
mod processor;
mod subclass;

pub use attribute::{AttributeDefinition, AttributeKind};
pub use entity_schema::EntitySchema;
pub use export::{
    attribute_tag, export_attributes, export_entity, export_subclass_attributes, export_tags,
    ExportOptions,
};
pub use namespace::Namespace;
pub use processor::{
    is_legacy_layout, load_entity, load_tags_into_namespace, LoadOptions, LoadReport,
    SubclassProcessor,
};
pub use subclass::{SubclassSchema, BASE_CLASS_NAME};
