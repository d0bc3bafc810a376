//! Little-endian reader for record payloads

use crate::error::{DxfError, Result};
use crate::types::Vector3;
use byteorder::{LittleEndian, ReadBytesExt};
use encoding_rs::{Encoding, UTF_16LE};
use std::io::Cursor;

/// Cursor over one record payload
///
/// Error offsets are absolute positions in the blob.
pub(crate) struct ByteStream<'a> {
    cursor: Cursor<&'a [u8]>,
    base: usize,
}

impl<'a> ByteStream<'a> {
    /// `base` is the blob offset of the first payload byte
    pub fn new(data: &'a [u8], base: usize) -> Self {
        Self {
            cursor: Cursor::new(data),
            base,
        }
    }

    fn position(&self) -> usize {
        self.cursor.position() as usize
    }

    fn data(&self) -> &'a [u8] {
        self.cursor.get_ref()
    }

    pub fn remaining(&self) -> usize {
        self.data().len().saturating_sub(self.position())
    }

    fn error(&self, message: impl Into<String>) -> DxfError {
        DxfError::ProxyGraphic {
            offset: self.base + self.position(),
            message: message.into(),
        }
    }

    fn eof(&self, what: &str) -> DxfError {
        self.error(format!("unexpected end of record reading {}", what))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.cursor
            .read_u32::<LittleEndian>()
            .map_err(|_| self.eof("u32"))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        self.cursor
            .read_i32::<LittleEndian>()
            .map_err(|_| self.eof("i32"))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        self.cursor
            .read_f64::<LittleEndian>()
            .map_err(|_| self.eof("f64"))
    }

    pub fn read_vertex(&mut self) -> Result<Vector3> {
        Ok(Vector3::new(self.read_f64()?, self.read_f64()?, self.read_f64()?))
    }

    /// `u32` count followed by that many vertices
    pub fn read_vertices(&mut self) -> Result<Vec<Vector3>> {
        let count = self.read_u32()? as usize;
        if count.saturating_mul(24) > self.remaining() {
            return Err(self.error(format!("vertex count {} exceeds record size", count)));
        }
        (0..count).map(|_| self.read_vertex()).collect()
    }

    /// Zero-terminated single-byte string, then aligned to 4 bytes
    pub fn read_padded_string(&mut self, encoding: &'static Encoding) -> Result<String> {
        let start = self.position();
        let end = self.data()[start..]
            .iter()
            .position(|&b| b == 0)
            .map(|n| start + n)
            .ok_or_else(|| self.error("unterminated string"))?;
        let (text, _, _) = encoding.decode(&self.data()[start..end]);
        let text = text.into_owned();
        self.seek_aligned(end + 1);
        Ok(text)
    }

    /// Zero-terminated UTF-16LE string, then aligned to 4 bytes
    pub fn read_padded_unicode_string(&mut self) -> Result<String> {
        let start = self.position();
        let end = self.data()[start..]
            .chunks_exact(2)
            .position(|pair| pair == [0, 0])
            .map(|n| start + 2 * n)
            .ok_or_else(|| self.error("unterminated unicode string"))?;
        let (text, _) = UTF_16LE.decode_without_bom_handling(&self.data()[start..end]);
        let text = text.into_owned();
        self.seek_aligned(end + 2);
        Ok(text)
    }

    fn seek_aligned(&mut self, index: usize) {
        let aligned = index.next_multiple_of(4).min(self.data().len());
        self.cursor.set_position(aligned as u64);
    }
}
