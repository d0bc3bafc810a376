//! DXF ASCII text reader

use super::stream_reader::{DxfCodePair, DxfStreamReader};
use crate::error::{DxfError, Result};
use encoding_rs::Encoding;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};

/// DXF ASCII tag stream reader
pub struct DxfTextReader<R: Read + Seek> {
    reader: BufReader<R>,
    line_number: usize,
    peeked_pair: Option<DxfCodePair>,
    /// Non-UTF8 fallback encoding. `None` means Latin-1 (byte-to-char).
    encoding: Option<&'static Encoding>,
}

impl<R: Read + Seek> DxfTextReader<R> {
    /// Create a new DXF text reader
    pub fn new(reader: BufReader<R>) -> Self {
        Self {
            reader,
            line_number: 0,
            peeked_pair: None,
            encoding: None,
        }
    }

    /// Current line number
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Read a single line, decoding non-UTF8 bytes with the fallback encoding
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut bytes = Vec::new();
        if self.reader.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        while matches!(bytes.last(), Some(b'\n') | Some(b'\r')) {
            bytes.pop();
        }

        let line = match String::from_utf8(bytes) {
            Ok(s) => s,
            Err(err) => {
                let bytes = err.into_bytes();
                match self.encoding {
                    Some(enc) => enc.decode(&bytes).0.into_owned(),
                    None => bytes.iter().map(|&b| b as char).collect(),
                }
            }
        };
        Ok(Some(line))
    }

    fn read_pair_internal(&mut self) -> Result<Option<DxfCodePair>> {
        let code_line = loop {
            match self.read_line()? {
                // tolerate trailing blank lines
                Some(line) if line.trim().is_empty() => continue,
                Some(line) => break line,
                None => return Ok(None),
            }
        };
        let line = self.line_number;

        let code = code_line.trim().parse::<i32>().map_err(|_| {
            DxfError::Parse(format!("Invalid DXF code at line {}: '{}'", line, code_line))
        })?;

        let value_line = self.read_line()?.ok_or_else(|| {
            DxfError::Parse(format!("Unexpected EOF after code {} at line {}", code, line))
        })?;

        // leading spaces are significant for strings, trailing ones are not
        let value = value_line.trim_end().to_string();
        Ok(Some(DxfCodePair::new(code, value).at_line(line)))
    }
}

impl<R: Read + Seek + Send> DxfStreamReader for DxfTextReader<R> {
    fn read_pair(&mut self) -> Result<Option<DxfCodePair>> {
        if let Some(pair) = self.peeked_pair.take() {
            return Ok(Some(pair));
        }
        self.read_pair_internal()
    }

    fn peek_code(&mut self) -> Result<Option<i32>> {
        if let Some(ref pair) = self.peeked_pair {
            return Ok(Some(pair.code));
        }
        match self.read_pair_internal()? {
            Some(pair) => {
                let code = pair.code;
                self.peeked_pair = Some(pair);
                Ok(Some(code))
            }
            None => Ok(None),
        }
    }

    fn push_back(&mut self, pair: DxfCodePair) {
        self.peeked_pair = Some(pair);
    }

    fn reset(&mut self) -> Result<()> {
        self.reader.seek(SeekFrom::Start(0))?;
        self.line_number = 0;
        self.peeked_pair = None;
        Ok(())
    }

    fn set_encoding(&mut self, encoding: &'static Encoding) {
        self.encoding = Some(encoding);
    }
}
