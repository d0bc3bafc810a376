//! Binary data carried as hex-encoded tag chunks
//!
//! Large binary values (proxy graphics, thumbnails) are written as a length
//! tag followed by data tags of at most [`BINARY_CHUNK_SIZE`] bytes each.

use crate::error::{DxfError, Result};
use crate::io::dxf::{DxfStreamWriter, DxfStreamWriterExt};
use crate::tags::{TagValue, Tags};
use crate::types::DxfVersion;

/// Maximum number of bytes per data tag
pub const BINARY_CHUNK_SIZE: usize = 127;

/// Group codes of a chunked binary value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryCodes {
    /// Code of the byte-count tag
    pub length_code: i32,
    /// Code of the hex data tags
    pub data_code: i32,
}

impl BinaryCodes {
    /// Proxy graphic codes before R2010 (32-bit length)
    pub const PROXY_GRAPHIC_R2000: BinaryCodes = BinaryCodes::new(92, 310);

    /// Proxy graphic codes from R2010 on (64-bit length)
    pub const PROXY_GRAPHIC_R2010: BinaryCodes = BinaryCodes::new(160, 310);

    pub const fn new(length_code: i32, data_code: i32) -> Self {
        Self {
            length_code,
            data_code,
        }
    }

    /// Proxy graphic codes for a target version
    pub fn proxy_graphic(version: DxfVersion) -> Self {
        BinaryCodes::new(version.proxy_graphic_length_code(), 310)
    }
}

/// Decode an upper- or lower-case hex string
pub fn decode_hex(text: &str) -> Result<Vec<u8>> {
    let text = text.trim();
    if text.len() % 2 != 0 {
        return Err(DxfError::InvalidHex(format!("odd number of digits: '{}'", text)));
    }
    text.as_bytes()
        .chunks(2)
        .map(|pair| {
            std::str::from_utf8(pair)
                .ok()
                .and_then(|digits| u8::from_str_radix(digits, 16).ok())
                .ok_or_else(|| {
                    DxfError::InvalidHex(format!("invalid digits '{}'", String::from_utf8_lossy(pair)))
                })
        })
        .collect()
}

/// Encode bytes as upper-case hex
pub fn encode_hex(data: &[u8]) -> String {
    data.iter().map(|b| format!("{:02X}", b)).collect()
}

/// Remove a chunked binary value from `tags` and reassemble it
///
/// Returns `Ok(None)` if `tags` has no length tag. The length tag and the
/// data tags directly following it are always removed from `tags`, even if
/// the reassembled data turns out to be invalid.
pub fn load_binary_data(tags: &mut Tags, codes: BinaryCodes) -> Result<Option<Vec<u8>>> {
    let Some(start) = tags.iter().position(|tag| tag.code == codes.length_code) else {
        return Ok(None);
    };
    let end = tags[start + 1..]
        .iter()
        .position(|tag| tag.code != codes.data_code)
        .map_or(tags.len(), |offset| start + 1 + offset);

    let rest = tags.split_off(end);
    let mut chunks = tags.split_off(start);
    tags.extend(rest);

    let length_tag = chunks.remove(0);
    let declared = length_tag
        .value
        .as_i64()
        .and_then(|v| usize::try_from(v).ok())
        .ok_or_else(|| {
            DxfError::invalid_value(
                "binary length",
                codes.length_code,
                "non-negative integer",
                length_tag.value.to_string(),
            )
        })?;

    // the length tag is untrusted input; the chunks bound the real size
    let mut data = Vec::with_capacity(declared.min(chunks.len() * BINARY_CHUNK_SIZE));
    for chunk in chunks {
        match chunk.value {
            TagValue::Binary(bytes) => data.extend_from_slice(&bytes),
            TagValue::String(text) => data.extend(decode_hex(&text)?),
            other => {
                return Err(DxfError::invalid_value(
                    "binary data",
                    codes.data_code,
                    "hex data",
                    other.kind_name(),
                ))
            }
        }
    }

    if data.len() != declared {
        return Err(DxfError::BinaryLength {
            declared,
            actual: data.len(),
        });
    }
    Ok(Some(data))
}

/// Write `data` as a length tag followed by data tags
///
/// Empty data writes nothing.
pub fn export_binary_data(
    writer: &mut dyn DxfStreamWriter,
    data: &[u8],
    codes: BinaryCodes,
) -> Result<()> {
    if data.is_empty() {
        return Ok(());
    }
    writer.write_int(codes.length_code, data.len() as i64)?;
    for chunk in data.chunks(BINARY_CHUNK_SIZE) {
        writer.write_binary(codes.data_code, chunk)?;
    }
    Ok(())
}
