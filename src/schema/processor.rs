//! Load pipeline: distribute an entity's tags over its subclasses

use super::subclass::SubclassSchema;
use super::Namespace;
use crate::entities::common::ACDB_ENTITY;
use crate::entities::SchemaEntity;
use crate::error::Result;
use crate::notification::{NotificationCollection, NotificationType};
use crate::tags::{DxfTag, TagValue, Tags, SUBCLASS_MARKER};
use crate::types::DxfVersion;
use std::sync::Arc;

/// Options for loading one entity
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Format version of the source; `None` if unknown
    pub version: Option<DxfVersion>,
    /// Report tags no subclass consumed
    pub log_unprocessed_tags: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            version: None,
            log_unprocessed_tags: true,
        }
    }
}

impl LoadOptions {
    pub fn for_version(version: DxfVersion) -> Self {
        Self {
            version: Some(version),
            ..Self::default()
        }
    }
}

/// Result of loading one entity
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Tags no subclass consumed, in stream order
    pub unprocessed: Tags,
    /// Diagnostics, scoped to the entity
    pub notifications: NotificationCollection,
    /// True if the tags were read in the legacy layout
    pub legacy: bool,
}

#[derive(Debug)]
struct TagGroup {
    marker: Option<DxfTag>,
    tags: Option<Tags>,
    leftovers: Option<(String, Tags)>,
}

impl TagGroup {
    fn name(&self) -> Option<&str> {
        self.marker.as_ref().and_then(|m| m.value.as_str())
    }
}

/// True if `tags` must be read without subclass grouping: the source is
/// R12 or older, or no subclass marker is present
pub fn is_legacy_layout(tags: &Tags, version: Option<DxfVersion>) -> bool {
    version.is_some_and(|v| v != DxfVersion::Unknown && !v.supports_subclass_markers())
        || !tags.has_code(SUBCLASS_MARKER)
}

/// Splits entity tags into subclass groups and hands them out
///
/// Modern layout: tags are grouped at each subclass marker, the base
/// group holds the tags before the first marker. Legacy layout (R12 or
/// no markers): all tags form one pool and each subclass takes the tags
/// it declares.
#[derive(Debug)]
pub struct SubclassProcessor {
    dxftype: String,
    legacy: bool,
    groups: Vec<TagGroup>,
    pool: Tags,
    last_taken: Option<usize>,
}

impl SubclassProcessor {
    /// Prepare the tags of one entity; a leading structure tag is removed
    pub fn new(mut tags: Tags, version: Option<DxfVersion>) -> Self {
        let dxftype = tags.dxftype().unwrap_or_default().to_string();
        if tags.first().is_some_and(DxfTag::is_structure) {
            tags.remove(0);
        }

        let legacy = is_legacy_layout(&tags, version);

        if legacy {
            return Self {
                dxftype,
                legacy,
                groups: Vec::new(),
                pool: tags,
                last_taken: None,
            };
        }

        let mut groups = vec![TagGroup {
            marker: None,
            tags: Some(Tags::new()),
            leftovers: None,
        }];
        for tag in tags {
            if tag.is_subclass_marker() && matches!(tag.value, TagValue::String(_)) {
                groups.push(TagGroup {
                    marker: Some(tag),
                    tags: Some(Tags::new()),
                    leftovers: None,
                });
            } else if let Some(Some(current)) = groups.last_mut().map(|g| g.tags.as_mut()) {
                current.push(tag);
            }
        }

        Self {
            dxftype,
            legacy,
            groups,
            pool: Tags::new(),
            last_taken: None,
        }
    }

    /// Entity type from the structure tag, empty if there was none
    pub fn dxftype(&self) -> &str {
        &self.dxftype
    }

    pub fn is_legacy(&self) -> bool {
        self.legacy
    }

    /// Tags for `subclass`: its marker group, or the whole pool in legacy mode
    pub fn take(&mut self, subclass: &SubclassSchema) -> Tags {
        if self.legacy {
            return std::mem::take(&mut self.pool);
        }
        let index = self
            .groups
            .iter()
            .position(|g| g.tags.is_some() && g.name() == subclass.name());
        self.last_taken = index;
        index
            .and_then(|i| self.groups[i].tags.take())
            .unwrap_or_default()
    }

    /// Return what a subclass left over from its last [`take`](Self::take)
    pub fn give_back(&mut self, subclass: &SubclassSchema, tags: Tags) {
        if self.legacy {
            self.pool = tags;
        } else if let Some(index) = self.last_taken.take() {
            self.groups[index].leftovers = Some((subclass.display_name().to_string(), tags));
        }
    }

    /// Collect unprocessed tags in stream order
    ///
    /// Groups no subclass claimed are returned whole, marker included.
    pub fn finish(self, log_unprocessed: bool, notifications: &mut NotificationCollection) -> Tags {
        if self.legacy {
            return self.pool;
        }

        let mut unprocessed = Tags::new();
        for group in self.groups {
            match (group.leftovers, group.tags) {
                (Some((subclass, leftovers)), _) => {
                    if log_unprocessed && !leftovers.is_empty() {
                        log_unprocessed_tags(&self.dxftype, &subclass, &leftovers, notifications);
                    }
                    unprocessed.extend(leftovers);
                }
                (None, Some(tags)) => {
                    let name = group
                        .marker
                        .as_ref()
                        .and_then(|m| m.value.as_str())
                        .unwrap_or("<base>")
                        .to_string();
                    if let Some(marker) = group.marker {
                        unprocessed.push(marker);
                    }
                    if log_unprocessed && !tags.is_empty() {
                        log_unprocessed_tags(&self.dxftype, &name, &tags, notifications);
                    }
                    unprocessed.extend(tags);
                }
                (None, None) => {}
            }
        }
        unprocessed
    }
}

fn log_unprocessed_tags(
    dxftype: &str,
    subclass: &str,
    tags: &Tags,
    notifications: &mut NotificationCollection,
) {
    let codes = tags.codes();
    tracing::debug!(dxftype, subclass, ?codes, "unprocessed tags");
    notifications.notify(
        NotificationType::Warning,
        format!("unprocessed tags in {}: group codes {:?}", subclass, codes),
    );
}

/// Store every tag `subclass` declares in `ns`; return the others
///
/// Repeated codes overwrite earlier ones.
pub fn load_tags_into_namespace(ns: &mut Namespace, subclass: &SubclassSchema, tags: Tags) -> Result<Tags> {
    let mut rest = Tags::new();
    for tag in tags {
        match subclass.attribute_for_code(tag.code) {
            Some(definition) => {
                let value = definition.coerce(tag.value)?;
                ns.set(definition.name(), value)?;
            }
            None => rest.push(tag),
        }
    }
    Ok(rest)
}

/// Load `tags` into `entity` subclass by subclass
///
/// Each subclass first takes the tags its schema declares, then the
/// entity's [`SchemaEntity::load_subclass`] hook sees the rest.
pub fn load_entity<E: SchemaEntity + ?Sized>(
    entity: &mut E,
    tags: Tags,
    options: &LoadOptions,
) -> Result<LoadReport> {
    let schema = Arc::clone(entity.schema());
    let mut processor = SubclassProcessor::new(tags, options.version);
    let mut notifications = NotificationCollection::new();

    for subclass in schema.subclasses() {
        let tags = processor.take(subclass);
        let mut rest = load_tags_into_namespace(&mut entity.common_mut().dxf, subclass, tags)?;
        if subclass.name() == Some(ACDB_ENTITY) {
            entity
                .common_mut()
                .load_proxy_graphic(&mut rest, &mut notifications);
        }
        let rest = entity.load_subclass(subclass, rest, &mut notifications)?;
        processor.give_back(subclass, rest);
    }

    let legacy = processor.is_legacy();
    let mut scoped = NotificationCollection::new();
    let unprocessed = processor.finish(options.log_unprocessed_tags, &mut notifications);
    scoped.absorb(notifications, &entity.label());

    Ok(LoadReport {
        unprocessed,
        notifications: scoped,
        legacy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::AttributeDefinition;

    fn subclass(name: Option<&str>, codes: &[(&str, i32)]) -> SubclassSchema {
        SubclassSchema::new(
            name,
            codes.iter().map(|(n, c)| AttributeDefinition::integer(*n, *c)).collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_modern_grouping() {
        let tags = Tags::from_text("0\nTEST\n5\nA\n100\nAcDbEntity\n62\n1\n100\nAcDbTest\n70\n3\n").unwrap();
        let mut processor = SubclassProcessor::new(tags, None);
        assert!(!processor.is_legacy());
        assert_eq!(processor.dxftype(), "TEST");

        let base = processor.take(&subclass(None, &[]));
        assert_eq!(base.codes(), vec![5]);
        let test = processor.take(&subclass(Some("AcDbTest"), &[]));
        assert_eq!(test.codes(), vec![70]);
        let missing = processor.take(&subclass(Some("AcDbOther"), &[]));
        assert!(missing.is_empty());
    }

    #[test]
    fn test_unclaimed_group_returned_with_marker() {
        let tags = Tags::from_text("0\nTEST\n100\nAcDbEntity\n62\n1\n100\nAcDbExtra\n70\n3\n").unwrap();
        let mut processor = SubclassProcessor::new(tags, None);
        let entity = subclass(Some("AcDbEntity"), &[("color", 62)]);
        let taken = processor.take(&entity);
        processor.give_back(&entity, taken);

        let mut notifications = NotificationCollection::new();
        let unprocessed = processor.finish(true, &mut notifications);
        assert_eq!(unprocessed.codes(), vec![62, 100, 70]);
        assert_eq!(notifications.len(), 2);
    }

    #[test]
    fn test_legacy_pool() {
        let tags = Tags::from_text("0\nTEST\n8\n0\n62\n1\n70\n3\n").unwrap();
        let mut processor = SubclassProcessor::new(tags, Some(DxfVersion::AC1009));
        assert!(processor.is_legacy());

        let first = subclass(Some("AcDbEntity"), &[]);
        let mut pool = processor.take(&first);
        assert_eq!(pool.codes(), vec![8, 62, 70]);
        pool.remove_codes(&[62]);
        processor.give_back(&first, pool);

        let second = subclass(Some("AcDbTest"), &[]);
        assert_eq!(processor.take(&second).codes(), vec![8, 70]);
    }

    #[test]
    fn test_markers_in_r12_stream_are_not_grouped() {
        let tags = Tags::from_text("0\nTEST\n100\nAcDbEntity\n62\n1\n").unwrap();
        let processor = SubclassProcessor::new(tags, Some(DxfVersion::AC1009));
        assert!(processor.is_legacy());
    }
}
