//! # acadtags
//!
//! Schema-driven DXF entity tags and proxy graphic decoding.
//!
//! ## Features
//!
//! - Typed tag model with DXF text reading and writing
//! - Declarative attribute schemas: one table drives both loading and export
//! - Legacy (R12) and modern (subclass marker) tag layouts
//! - Chunked binary transport for proxy graphics (group codes 92/160 + 310)
//! - Proxy graphic record decoder, byte-exact encoder and virtual entities
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use acadtags::io::dxf::DxfEntityReader;
//!
//! let result = DxfEntityReader::from_file("drawing.dxf")?.read()?;
//! for entity in result.entities.iter() {
//!     for virtual_entity in entity.common().proxy_graphic_entities()? {
//!         println!("{} on layer {}", virtual_entity.dxftype(), virtual_entity.attributes.layer);
//!     }
//! }
//! # Ok::<(), acadtags::DxfError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`tags`] - `DxfTag`, `TagValue`, `Tags`
//! - [`schema`] - attribute definitions, namespaces, load and export pipelines
//! - [`entities`] - `SchemaEntity` implementations (`Line`, `Leader`, `UnknownEntity`)
//! - [`proxy`] - proxy graphic records and virtual entities
//! - [`io::dxf`] - text reader/writer, binary chunks, entity stream reader

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod audit;
pub mod entities;
pub mod error;
pub mod io;
pub mod notification;
pub mod proxy;
pub mod schema;
pub mod tags;
pub mod types;

// Re-export commonly used types
pub use error::{DxfError, Result};
pub use types::{Color, DxfVersion, Handle, LineWeight, Vector2, Vector3};

pub use entities::{EntityCollection, EntityType, Leader, Line, SchemaEntity, UnknownEntity};
pub use proxy::{ProxyGraphic, ProxyRecord, VirtualEntity};
pub use schema::{EntitySchema, ExportOptions, LoadOptions, Namespace};
pub use tags::{DxfTag, TagValue, Tags};

pub use io::dxf::{DxfEntityReader, DxfEntityWriter};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
