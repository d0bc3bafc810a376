//! Typed DXF tags
//!
//! A [`DxfTag`] is one group code with a typed value. Point coordinates,
//! which the stream spreads over up to three pairs, are merged into a
//! single point tag while reading and split again on output.

mod value;

pub use value::TagValue;

use crate::error::{DxfError, Result};
use crate::io::dxf::{
    decode_hex, DxfCodePair, DxfStreamReader, DxfStreamWriter, DxfStreamWriterExt, DxfTextReader,
    DxfTextWriter, GroupCodeValueType, PointReader,
};
use crate::types::Handle;
use std::io::{BufReader, Cursor};
use std::ops::Deref;

/// Group code of the structure tag starting an entity
pub const STRUCTURE_CODE: i32 = 0;

/// Group code of subclass markers
pub const SUBCLASS_MARKER: i32 = 100;

/// A single DXF tag
#[derive(Debug, Clone, PartialEq)]
pub struct DxfTag {
    /// Group code (for points: the x code)
    pub code: i32,
    /// Typed value
    pub value: TagValue,
}

impl DxfTag {
    /// Create a new tag
    pub fn new(code: i32, value: impl Into<TagValue>) -> Self {
        Self {
            code,
            value: value.into(),
        }
    }

    /// Convert a raw non-point pair into a typed tag
    pub fn from_pair(pair: &DxfCodePair) -> Result<Self> {
        let value = match pair.value_type() {
            GroupCodeValueType::Double => TagValue::Double(pair.as_double()?),
            t if t.is_integer() => TagValue::Int(pair.as_i64()?),
            // malformed handles are kept verbatim
            GroupCodeValueType::Handle => match Handle::from_hex(&pair.value_string) {
                Some(handle) => TagValue::Handle(handle),
                None => TagValue::String(pair.value_string.clone()),
            },
            GroupCodeValueType::Binary => TagValue::Binary(decode_hex(&pair.value_string)?),
            _ => TagValue::String(pair.value_string.clone()),
        };
        Ok(Self::new(pair.code, value))
    }

    /// True if this is the subclass marker tag `(100, name)`
    pub fn is_subclass_marker(&self) -> bool {
        self.code == SUBCLASS_MARKER
    }

    /// True for the structure tag `(0, ...)`
    pub fn is_structure(&self) -> bool {
        self.code == STRUCTURE_CODE
    }
}

/// Ordered list of tags
///
/// The order of the tag stream is significant and preserved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tags {
    tags: Vec<DxfTag>,
}

impl Tags {
    /// Create an empty tag list
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a tag vector
    pub fn from_vec(tags: Vec<DxfTag>) -> Self {
        Self { tags }
    }

    /// Parse DXF text into tags
    pub fn from_text(text: &str) -> Result<Self> {
        let cursor = Cursor::new(text.as_bytes().to_vec());
        let mut reader = DxfTextReader::new(BufReader::new(cursor));
        let mut pairs = Vec::new();
        while let Some(pair) = reader.read_pair()? {
            pairs.push(pair);
        }
        Self::from_pairs(pairs)
    }

    /// Convert raw pairs into typed tags, merging point coordinates
    pub fn from_pairs(pairs: impl IntoIterator<Item = DxfCodePair>) -> Result<Self> {
        let mut tags = Vec::new();
        let mut pairs = pairs.into_iter().peekable();

        while let Some(pair) = pairs.next() {
            if !GroupCodeValueType::is_point_code(pair.code) {
                tags.push(DxfTag::from_pair(&pair)?);
                continue;
            }

            let mut point = PointReader::new();
            point.add_coordinate(&pair)?;
            while let Some(next) = pairs.peek() {
                if !point.add_coordinate(next)? {
                    break;
                }
                pairs.next();
            }

            let value = if point.has_z() {
                point.get_point().map(TagValue::Point3D)
            } else {
                point.get_point2d().map(TagValue::Point2D)
            };
            let value = value.ok_or_else(|| {
                DxfError::Parse(format!(
                    "missing y coordinate for group code {} at line {}",
                    pair.code, pair.line
                ))
            })?;
            tags.push(DxfTag::new(pair.code, value));
        }
        Ok(Self { tags })
    }

    /// Append a tag
    pub fn push(&mut self, tag: DxfTag) {
        self.tags.push(tag);
    }

    /// Append all tags of `other`
    pub fn extend(&mut self, other: Tags) {
        self.tags.extend(other.tags);
    }

    /// Name of the structure tag, if the list starts with one
    pub fn dxftype(&self) -> Option<&str> {
        self.tags
            .first()
            .filter(|tag| tag.is_structure())
            .and_then(|tag| tag.value.as_str())
    }

    /// True if any tag has this group code
    pub fn has_code(&self, code: i32) -> bool {
        self.tags.iter().any(|tag| tag.code == code)
    }

    /// First tag with this group code
    pub fn find_code(&self, code: i32) -> Option<&DxfTag> {
        self.tags.iter().find(|tag| tag.code == code)
    }

    /// All group codes in order
    pub fn codes(&self) -> Vec<i32> {
        self.tags.iter().map(|tag| tag.code).collect()
    }

    /// Remove all tags with one of the given codes, returning them in order
    pub fn remove_codes(&mut self, codes: &[i32]) -> Tags {
        let (removed, kept) = std::mem::take(&mut self.tags)
            .into_iter()
            .partition(|tag| codes.contains(&tag.code));
        self.tags = kept;
        Tags { tags: removed }
    }

    /// Split into (tags before `index`, tags from `index` on)
    pub fn split_off(&mut self, index: usize) -> Tags {
        Tags {
            tags: self.tags.split_off(index),
        }
    }

    /// Remove and return the tag at `index`
    pub fn remove(&mut self, index: usize) -> DxfTag {
        self.tags.remove(index)
    }

    /// Write all tags to a stream writer
    pub fn write_to(&self, writer: &mut dyn DxfStreamWriter) -> Result<()> {
        for tag in &self.tags {
            writer.write_tag(tag)?;
        }
        Ok(())
    }

    /// Render the tags as DXF text
    pub fn to_dxf_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        {
            let mut writer = DxfTextWriter::new(&mut buffer);
            self.write_to(&mut writer)?;
        }
        String::from_utf8(buffer).map_err(|e| DxfError::Parse(e.to_string()))
    }

    /// Consume into the tag vector
    pub fn into_vec(self) -> Vec<DxfTag> {
        self.tags
    }
}

impl Deref for Tags {
    type Target = [DxfTag];

    fn deref(&self) -> &[DxfTag] {
        &self.tags
    }
}

impl FromIterator<DxfTag> for Tags {
    fn from_iter<I: IntoIterator<Item = DxfTag>>(iter: I) -> Self {
        Self {
            tags: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Tags {
    type Item = DxfTag;
    type IntoIter = std::vec::IntoIter<DxfTag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.into_iter()
    }
}

impl<'a> IntoIterator for &'a Tags {
    type Item = &'a DxfTag;
    type IntoIter = std::slice::Iter<'a, DxfTag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Vector2, Vector3};

    const LINE: &str = "  0\nLINE\n  5\n1F\n100\nAcDbEntity\n  8\n0\n100\nAcDbLine\n 10\n1.0\n 20\n2.0\n 30\n3.0\n 11\n4.0\n 21\n5.0\n";

    #[test]
    fn test_from_text_merges_points() {
        let tags = Tags::from_text(LINE).unwrap();
        assert_eq!(tags.dxftype(), Some("LINE"));
        assert_eq!(tags.codes(), vec![0, 5, 100, 8, 100, 10, 11]);
        assert_eq!(tags[1].value, TagValue::Handle(Handle::new(0x1F)));
        assert_eq!(tags[5].value, TagValue::Point3D(Vector3::new(1.0, 2.0, 3.0)));
        assert_eq!(tags[6].value, TagValue::Point2D(Vector2::new(4.0, 5.0)));
    }

    #[test]
    fn test_text_roundtrip() {
        let tags = Tags::from_text(LINE).unwrap();
        assert_eq!(tags.to_dxf_string().unwrap(), LINE);
    }

    #[test]
    fn test_missing_y_coordinate() {
        let err = Tags::from_text(" 10\n1.0\n 40\n2.0\n").unwrap_err();
        assert!(matches!(err, DxfError::Parse(_)));
    }

    #[test]
    fn test_binary_tags_decode_hex() {
        let tags = Tags::from_text("310\n00FF10\n").unwrap();
        assert_eq!(tags[0].value, TagValue::Binary(vec![0x00, 0xFF, 0x10]));
        assert!(Tags::from_text("310\n0G\n").is_err());
    }

    #[test]
    fn test_remove_codes() {
        let mut tags = Tags::from_text(LINE).unwrap();
        let removed = tags.remove_codes(&[100]);
        assert_eq!(removed.len(), 2);
        assert!(!tags.has_code(100));
        assert_eq!(tags.find_code(8).unwrap().value, TagValue::from("0"));
    }
}
