//! Write records back into a proxy graphic blob

use super::record::{ProxyRecord, RECORD_HEADER_SIZE};
use byteorder::{LittleEndian, WriteBytesExt};

/// Encode records into a blob: header, then each record in order
pub fn encode(records: &[ProxyRecord]) -> Vec<u8> {
    encode_with_trailing(records, None, &[])
}

/// Like [`encode`], with a stored header count and extra bytes after the
/// declared blob size
pub(crate) fn encode_with_trailing(records: &[ProxyRecord], count: Option<u32>, trailing: &[u8]) -> Vec<u8> {
    let size = RECORD_HEADER_SIZE + records.iter().map(ProxyRecord::size).sum::<usize>();
    let mut data = Vec::with_capacity(size + trailing.len());
    // writing into a Vec cannot fail
    let _ = data.write_u32::<LittleEndian>(size as u32);
    let _ = data.write_u32::<LittleEndian>(count.unwrap_or(records.len() as u32));
    for record in records {
        let _ = data.write_u32::<LittleEndian>(record.size() as u32);
        let _ = data.write_u32::<LittleEndian>(record.opcode());
        data.extend_from_slice(record.payload());
    }
    data.extend_from_slice(trailing);
    data
}
