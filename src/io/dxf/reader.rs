//! DXF entity stream reader

mod stream_reader;
mod text_reader;

pub use stream_reader::{DxfCodePair, DxfStreamReader, PointReader};
pub use text_reader::DxfTextReader;

use super::code_page::{encoding_for_code_page, DEFAULT_CODE_PAGE};
use crate::entities::{EntityCollection, EntityType};
use crate::error::Result;
use crate::notification::{Notification, NotificationCollection, NotificationType};
use crate::schema::{LoadOptions, LoadReport};
use crate::tags::Tags;
use crate::types::DxfVersion;
use encoding_rs::Encoding;
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

/// Configuration for the DXF reader.
#[derive(Debug, Clone)]
pub struct DxfReaderConfiguration {
    /// When `true`, an entity that fails to load is dropped and reported as
    /// an error notification instead of aborting the read.
    ///
    /// Default: `false` (strict mode, errors propagate).
    pub failsafe: bool,
    /// Report tags no subclass consumed as warnings.
    ///
    /// Default: `true`.
    pub log_unprocessed_tags: bool,
}

impl Default for DxfReaderConfiguration {
    fn default() -> Self {
        Self {
            failsafe: false,
            log_unprocessed_tags: true,
        }
    }
}

/// Entities read from a tag stream
#[derive(Debug)]
pub struct EntityReadResult {
    /// `$ACADVER` of the stream, `Unknown` if it has no header
    pub version: DxfVersion,
    /// Encoding of 8-bit strings, from `$DWGCODEPAGE`
    pub encoding: &'static Encoding,
    pub entities: EntityCollection,
    pub notifications: NotificationCollection,
}

/// Raw pairs of one entity, before tag conversion
struct EntityPairs {
    index: usize,
    dxftype: String,
    pairs: Vec<DxfCodePair>,
}

/// Reads the entities of a DXF tag stream
///
/// Loads the ENTITIES section of a complete file, or every entity of a
/// bare entity stream without sections.
pub struct DxfEntityReader {
    reader: Box<dyn DxfStreamReader>,
    version: Option<DxfVersion>,
    encoding: &'static Encoding,
    config: DxfReaderConfiguration,
}

impl DxfEntityReader {
    /// Create a new reader from any seekable source
    pub fn from_reader<R: Read + Seek + Send + 'static>(reader: R) -> Self {
        Self {
            reader: Box::new(DxfTextReader::new(BufReader::new(reader))),
            version: None,
            encoding: encoding_for_code_page(DEFAULT_CODE_PAGE),
            config: DxfReaderConfiguration::default(),
        }
    }

    /// Create a new reader from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::from_reader(file))
    }

    /// Create a new reader over DXF text
    pub fn from_text(text: &str) -> Self {
        Self::from_reader(Cursor::new(text.as_bytes().to_vec()))
    }

    /// Set the reader configuration.
    pub fn with_configuration(mut self, config: DxfReaderConfiguration) -> Self {
        self.config = config;
        self
    }

    /// Use `version` instead of the `$ACADVER` header variable
    pub fn with_version(mut self, version: DxfVersion) -> Self {
        self.version = Some(version);
        self
    }

    /// Read and load all entities in stream order
    pub fn read(mut self) -> Result<EntityReadResult> {
        let (version, groups) = self.prepare()?;
        let options = self.load_options(version);
        let loaded = groups
            .into_iter()
            .map(|group| load_entity(group, &options))
            .collect();
        self.finish(version, loaded)
    }

    /// Like [`read`](Self::read), loading entities on the rayon thread pool
    ///
    /// The result is identical to a sequential read.
    pub fn read_parallel(mut self) -> Result<EntityReadResult> {
        let (version, groups) = self.prepare()?;
        let options = self.load_options(version);
        let loaded = groups
            .into_par_iter()
            .map(|group| load_entity(group, &options))
            .collect();
        self.finish(version, loaded)
    }

    fn load_options(&self, version: DxfVersion) -> LoadOptions {
        LoadOptions {
            version: (version != DxfVersion::Unknown).then_some(version),
            log_unprocessed_tags: self.config.log_unprocessed_tags,
        }
    }

    fn prepare(&mut self) -> Result<(DxfVersion, Vec<EntityPairs>)> {
        let version = match self.version {
            Some(version) => version,
            None => self.read_version()?,
        };
        let groups = self.read_entity_pairs()?;
        tracing::debug!(version = version.as_str(), entities = groups.len(), "entity stream scanned");
        Ok((version, groups))
    }

    fn finish(
        self,
        version: DxfVersion,
        loaded: Vec<(usize, String, Result<(EntityType, LoadReport)>)>,
    ) -> Result<EntityReadResult> {
        let mut entities = EntityCollection::new();
        let mut notifications = NotificationCollection::new();

        for (index, dxftype, result) in loaded {
            match result {
                Ok((entity, report)) => {
                    notifications.absorb(report.notifications, &entity.label());
                    entities.push(entity);
                }
                Err(err) if self.config.failsafe => {
                    tracing::warn!(index, dxftype = %dxftype, error = %err, "entity dropped");
                    notifications.push(
                        Notification::new(
                            NotificationType::Error,
                            format!("entity #{} dropped: {}", index, err),
                        )
                        .with_source(dxftype),
                    );
                }
                Err(err) => return Err(err),
            }
        }

        Ok(EntityReadResult {
            version,
            encoding: self.encoding,
            entities,
            notifications,
        })
    }

    /// Pre-scan the HEADER section for $ACADVER and $DWGCODEPAGE.
    ///
    /// The reader is reset to the beginning afterwards. If the version is
    /// older than AC1021 (AutoCAD 2007) and a code page is found, the stream
    /// reader's encoding is set accordingly.
    fn read_version(&mut self) -> Result<DxfVersion> {
        let mut version = DxfVersion::Unknown;
        let mut code_page: Option<String> = None;

        while let Some(pair) = self.reader.read_pair()? {
            if pair.is_structure("SECTION") {
                let Some(section) = self.reader.read_pair()? else {
                    break;
                };
                if section.code != 2 || section.value_string != "HEADER" {
                    continue;
                }
                while let Some(header_pair) = self.reader.read_pair()? {
                    if header_pair.is_structure("ENDSEC") {
                        break;
                    }
                    if header_pair.code != 9 {
                        continue;
                    }
                    match header_pair.value_string.as_str() {
                        "$ACADVER" => {
                            if let Some(vp) = self.reader.read_pair()? {
                                if vp.code == 1 {
                                    version = DxfVersion::from_version_string(&vp.value_string);
                                }
                            }
                        }
                        "$DWGCODEPAGE" => {
                            if let Some(cp) = self.reader.read_pair()? {
                                if cp.code == 3 {
                                    code_page = Some(cp.value_string);
                                }
                            }
                        }
                        _ => {}
                    }
                }
                break;
            } else if pair.code == 0 {
                // no header: a bare entity stream
                break;
            }
        }

        if let Some(cp) = code_page {
            self.encoding = encoding_for_code_page(&cp);
            if version < DxfVersion::AC1021 {
                self.reader.set_encoding(self.encoding);
            }
        }

        self.reader.reset()?;
        Ok(version)
    }

    /// Collect the pairs of each entity
    fn read_entity_pairs(&mut self) -> Result<Vec<EntityPairs>> {
        let mut groups: Vec<EntityPairs> = Vec::new();
        let mut in_entities = false;
        let mut has_sections = false;

        while let Some(pair) = self.reader.read_pair()? {
            if pair.code == 0 {
                match pair.value_string.as_str() {
                    "SECTION" => {
                        has_sections = true;
                        let section = self.reader.read_pair()?;
                        in_entities = section.is_some_and(|s| s.code == 2 && s.value_string == "ENTITIES");
                        continue;
                    }
                    "ENDSEC" => {
                        in_entities = false;
                        continue;
                    }
                    "EOF" => break,
                    _ => {}
                }
            }

            if has_sections && !in_entities {
                continue;
            }
            if pair.code == 0 {
                groups.push(EntityPairs {
                    index: groups.len(),
                    dxftype: pair.value_string.clone(),
                    pairs: vec![pair],
                });
            } else if let Some(group) = groups.last_mut() {
                group.pairs.push(pair);
            } else {
                tracing::debug!(code = pair.code, line = pair.line, "tag before the first entity ignored");
            }
        }
        Ok(groups)
    }
}

fn load_entity(
    group: EntityPairs,
    options: &LoadOptions,
) -> (usize, String, Result<(EntityType, LoadReport)>) {
    let result = Tags::from_pairs(group.pairs).and_then(|tags| EntityType::from_tags(tags, options));
    (group.index, group.dxftype, result)
}
