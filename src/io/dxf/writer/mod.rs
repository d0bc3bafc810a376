//! DXF writer module

mod stream_writer;
mod tag_collector;
mod text_writer;

pub use stream_writer::{DxfStreamWriter, DxfStreamWriterExt};
pub use tag_collector::TagCollector;
pub use text_writer::{format_double, DxfTextWriter};

use crate::entities::EntityCollection;
use crate::error::Result;
use crate::notification::{Notification, NotificationCollection, NotificationType};
use crate::schema::ExportOptions;
use crate::types::DxfVersion;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes an entity collection as an ENTITIES section
pub struct DxfEntityWriter<'a> {
    entities: &'a EntityCollection,
    options: ExportOptions,
    notifications: NotificationCollection,
}

impl<'a> DxfEntityWriter<'a> {
    /// Create a writer targeting the latest version
    pub fn new(entities: &'a EntityCollection) -> Self {
        Self {
            entities,
            options: ExportOptions::default(),
            notifications: NotificationCollection::new(),
        }
    }

    /// Set the export options
    pub fn with_options(mut self, options: ExportOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the target version
    pub fn with_version(mut self, version: DxfVersion) -> Self {
        self.options.version = version;
        self
    }

    /// Notifications of the last write (skipped entities)
    pub fn notifications(&self) -> &NotificationCollection {
        &self.notifications
    }

    /// Write to a file
    pub fn write_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.write_to_writer(BufWriter::new(file))
    }

    /// Write to any writer
    pub fn write_to_writer<W: Write>(&mut self, writer: W) -> Result<()> {
        let mut stream_writer = DxfTextWriter::new(writer);
        self.write_section(&mut stream_writer)?;
        stream_writer.flush()
    }

    /// Write to a byte vector
    pub fn write_to_vec(&mut self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write_to_writer(&mut buffer)?;
        Ok(buffer)
    }

    /// Write the ENTITIES section to a stream writer
    ///
    /// Entities that cannot be represented in the target version are skipped
    /// with a notification.
    pub fn write_section(&mut self, writer: &mut dyn DxfStreamWriter) -> Result<()> {
        self.notifications = NotificationCollection::new();
        writer.write_section_start("ENTITIES")?;
        for entity in self.entities.iter() {
            if entity.min_export_version() > self.options.version {
                tracing::debug!(
                    entity = entity.dxftype(),
                    version = %self.options.version,
                    "entity skipped on export"
                );
                self.notifications.notify(
                    NotificationType::NotSupported,
                    format!(
                        "{} requires {} or later, skipped for {}",
                        entity.dxftype(),
                        entity.min_export_version(),
                        self.options.version
                    ),
                );
                continue;
            }
            if !entity.is_exportable() {
                tracing::debug!(entity = %entity.label(), "invalid entity skipped on export");
                self.notifications.push(
                    Notification::new(NotificationType::Error, "invalid entity skipped on export")
                        .with_source(entity.label()),
                );
                continue;
            }
            entity.export_dxf(writer, &self.options)?;
        }
        writer.write_section_end()?;
        writer.write_eof()
    }
}
