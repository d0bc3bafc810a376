//! DXF tag stream reading and writing

mod binary_chunk;
mod code_page;
mod group_code_value;
mod reader;
mod writer;

pub use binary_chunk::{
    decode_hex, encode_hex, export_binary_data, load_binary_data, BinaryCodes, BINARY_CHUNK_SIZE,
};
pub use code_page::{encoding_for_code_page, DEFAULT_CODE_PAGE};
pub use group_code_value::GroupCodeValueType;
pub use reader::{
    DxfCodePair, DxfEntityReader, DxfReaderConfiguration, DxfStreamReader, DxfTextReader,
    EntityReadResult, PointReader,
};
pub use writer::{
    format_double, DxfEntityWriter, DxfStreamWriter, DxfStreamWriterExt, DxfTextWriter,
    TagCollector,
};
