//! Proxy graphic codec
//!
//! Entities an application cannot interpret carry a *proxy graphic*: a
//! little-endian binary blob of typed records describing how to draw them.
//! A blob starts with a `u32` total size and a `u32` record count; each
//! record has a `u32` size (header included), a `u32` opcode and a payload.
//!
//! [`ProxyGraphic`] splits a blob into [`ProxyRecord`]s, lists them with
//! [`ProxyGraphic::info`], writes them back byte-exactly with
//! [`ProxyGraphic::to_bytes`] and rebuilds display-only entities with
//! [`ProxyGraphic::virtual_entities`].

mod byte_stream;
mod decoder;
mod encoder;
mod materializer;
mod record;
mod state;
mod virtual_entity;

pub use decoder::ProxyDecodeError;
pub use encoder::encode;
pub use materializer::VirtualEntities;
pub use record::{ProxyGraphicType, ProxyRecord, RecordCategory, RECORD_HEADER_SIZE};
pub use state::ProxyDecoderState;
pub use virtual_entity::{
    ArcGeometry, ArcType, CircleGeometry, DisplayAttributes, FontInfo, LineGeometry,
    PolylineGeometry, TextGenerationFlags, TextGeometry, VirtualEntity, VirtualGeometry,
};

use crate::error::Result;
use crate::io::dxf::{export_binary_data, load_binary_data, BinaryCodes, DxfStreamWriter};
use crate::tags::Tags;
use crate::types::DxfVersion;
use encoding_rs::{Encoding, WINDOWS_1252};
use std::borrow::Cow;

/// Position, size and name of one record in a blob
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordInfo {
    /// Byte offset of the record header in the blob
    pub offset: usize,
    /// Record size including its header
    pub size: usize,
    pub name: Cow<'static, str>,
}

/// A decoded proxy graphic
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyGraphic {
    records: Vec<ProxyRecord>,
    /// Header record count of a decoded blob, written back unchanged
    count: Option<u32>,
    trailing: Vec<u8>,
    encoding: &'static Encoding,
}

impl ProxyGraphic {
    /// Decode a blob
    ///
    /// On a corrupt record the error carries the records decoded before it.
    pub fn decode(data: &[u8]) -> std::result::Result<Self, ProxyDecodeError> {
        let blob = decoder::decode_records(data)?;
        Ok(Self {
            records: blob.records,
            count: Some(blob.count),
            trailing: blob.trailing,
            encoding: WINDOWS_1252,
        })
    }

    /// Build a proxy graphic from records
    pub fn from_records(records: Vec<ProxyRecord>) -> Self {
        Self {
            records,
            count: None,
            trailing: Vec::new(),
            encoding: WINDOWS_1252,
        }
    }

    /// Code page of the single-byte strings in TEXT and TEXT2 records
    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn records(&self) -> &[ProxyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `(offset, size, name)` of every record, unknown ones included
    pub fn info(&self) -> impl Iterator<Item = RecordInfo> + '_ {
        let mut offset = RECORD_HEADER_SIZE;
        self.records.iter().map(move |record| {
            let info = RecordInfo {
                offset,
                size: record.size(),
                name: record.type_name(),
            };
            offset += record.size();
            info
        })
    }

    /// Virtual entities in record order
    ///
    /// Each call starts from a fresh attribute state.
    pub fn virtual_entities(&self) -> VirtualEntities<'_> {
        VirtualEntities::new(&self.records, self.encoding)
    }

    /// Encode the records back into a blob
    pub fn to_bytes(&self) -> Vec<u8> {
        encoder::encode_with_trailing(&self.records, self.count, &self.trailing)
    }
}

/// Remove the proxy graphic from `tags`, accepting both length codes
pub fn load_proxy_graphic(tags: &mut Tags) -> Result<Option<Vec<u8>>> {
    for codes in [BinaryCodes::PROXY_GRAPHIC_R2010, BinaryCodes::PROXY_GRAPHIC_R2000] {
        if let Some(data) = load_binary_data(tags, codes)? {
            return Ok(Some(data));
        }
    }
    Ok(None)
}

/// Write a proxy graphic with the length code of `version`
pub fn export_proxy_graphic(writer: &mut dyn DxfStreamWriter, data: &[u8], version: DxfVersion) -> Result<()> {
    export_binary_data(writer, data, BinaryCodes::proxy_graphic(version))
}
