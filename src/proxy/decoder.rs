//! Split a proxy graphic blob into records

use super::record::{ProxyRecord, RECORD_HEADER_SIZE};
use crate::error::DxfError;
use byteorder::{ByteOrder, LittleEndian};
use thiserror::Error;

/// Decoding stopped at a corrupt record
///
/// `decoded` holds every record read before the failure.
#[derive(Debug, Error)]
#[error("{source} ({} records decoded)", .decoded.len())]
pub struct ProxyDecodeError {
    pub decoded: Vec<ProxyRecord>,
    #[source]
    pub source: DxfError,
}

impl From<ProxyDecodeError> for DxfError {
    fn from(err: ProxyDecodeError) -> Self {
        err.source
    }
}

/// Records plus bytes following the declared blob size
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct DecodedBlob {
    pub records: Vec<ProxyRecord>,
    /// Record count as stored in the header, not necessarily `records.len()`
    pub count: u32,
    pub trailing: Vec<u8>,
}

fn corrupt(offset: usize, message: impl Into<String>) -> DxfError {
    DxfError::ProxyGraphic {
        offset,
        message: message.into(),
    }
}

/// Decode records until the declared end of the blob
pub(crate) fn decode_records(data: &[u8]) -> Result<DecodedBlob, ProxyDecodeError> {
    let mut records = Vec::new();
    if data.len() < RECORD_HEADER_SIZE {
        return Err(ProxyDecodeError {
            decoded: records,
            source: corrupt(0, format!("blob of {} bytes has no header", data.len())),
        });
    }

    let declared = LittleEndian::read_u32(&data[0..4]) as usize;
    let count = LittleEndian::read_u32(&data[4..8]);
    if declared < RECORD_HEADER_SIZE {
        return Err(ProxyDecodeError {
            decoded: records,
            source: corrupt(0, format!("declared blob size {} is smaller than the header", declared)),
        });
    }

    let mut offset = RECORD_HEADER_SIZE;
    while offset < declared {
        let record_end = match record_bounds(data, offset, declared) {
            Ok(end) => end,
            Err(source) => {
                return Err(ProxyDecodeError {
                    decoded: records,
                    source,
                })
            }
        };
        let opcode = LittleEndian::read_u32(&data[offset + 4..offset + 8]);
        let payload = data[offset + RECORD_HEADER_SIZE..record_end].to_vec();
        records.push(ProxyRecord::new(opcode, payload));
        offset = record_end;
    }

    if records.len() != count as usize {
        tracing::debug!(declared = count, found = records.len(), "proxy graphic record count mismatch");
    }

    Ok(DecodedBlob {
        records,
        count,
        trailing: data[declared.min(data.len())..].to_vec(),
    })
}

/// End offset of the record at `offset`, checked against both limits
fn record_bounds(data: &[u8], offset: usize, declared: usize) -> Result<usize, DxfError> {
    if offset + RECORD_HEADER_SIZE > data.len() {
        return Err(corrupt(offset, "record header runs past the end of the data"));
    }
    let size = LittleEndian::read_u32(&data[offset..offset + 4]) as usize;
    if size < RECORD_HEADER_SIZE {
        return Err(corrupt(offset, format!("record size {} is smaller than its header", size)));
    }
    let end = offset + size;
    if end > declared || end > data.len() {
        return Err(corrupt(offset, format!("record of {} bytes runs past the end of the blob", size)));
    }
    Ok(end)
}
