//! ASCII DXF writer

use super::stream_writer::DxfStreamWriter;
use crate::error::Result;
use crate::types::Handle;
use std::io::Write;

/// ASCII DXF stream writer
pub struct DxfTextWriter<W: Write> {
    writer: W,
}

impl<W: Write> DxfTextWriter<W> {
    /// Create a new ASCII DXF writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write a DXF code right-aligned in a 3-character field
    fn write_code(&mut self, code: i32) -> Result<()> {
        if code < 10 {
            writeln!(self.writer, "  {}", code)?;
        } else if code < 100 {
            writeln!(self.writer, " {}", code)?;
        } else {
            writeln!(self.writer, "{}", code)?;
        }
        Ok(())
    }

    /// Get the inner writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Format a double the way the DXF writer does: integral values keep one
/// decimal place, others get up to 15 digits without trailing zeros.
pub fn format_double(value: f64) -> String {
    if value == value.trunc() && value.is_finite() {
        format!("{:.1}", value)
    } else {
        let formatted = format!("{:.15}", value);
        let trimmed = formatted.trim_end_matches('0');
        if trimmed.ends_with('.') {
            format!("{}0", trimmed)
        } else {
            trimmed.to_string()
        }
    }
}

impl<W: Write> DxfStreamWriter for DxfTextWriter<W> {
    fn write_string(&mut self, code: i32, value: &str) -> Result<()> {
        self.write_code(code)?;
        writeln!(self.writer, "{}", value)?;
        Ok(())
    }

    fn write_i16(&mut self, code: i32, value: i16) -> Result<()> {
        self.write_code(code)?;
        writeln!(self.writer, "{}", value)?;
        Ok(())
    }

    fn write_i32(&mut self, code: i32, value: i32) -> Result<()> {
        self.write_code(code)?;
        writeln!(self.writer, "{}", value)?;
        Ok(())
    }

    fn write_i64(&mut self, code: i32, value: i64) -> Result<()> {
        self.write_code(code)?;
        writeln!(self.writer, "{}", value)?;
        Ok(())
    }

    fn write_double(&mut self, code: i32, value: f64) -> Result<()> {
        self.write_code(code)?;
        writeln!(self.writer, "{}", format_double(value))?;
        Ok(())
    }

    fn write_handle(&mut self, code: i32, handle: Handle) -> Result<()> {
        self.write_code(code)?;
        writeln!(self.writer, "{:X}", handle.value())?;
        Ok(())
    }

    fn write_binary(&mut self, code: i32, data: &[u8]) -> Result<()> {
        self.write_code(code)?;
        for byte in data {
            write!(self.writer, "{:02X}", byte)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::dxf::DxfStreamWriterExt;
    use crate::types::Vector3;

    fn render(f: impl FnOnce(&mut DxfTextWriter<&mut Vec<u8>>)) -> String {
        let mut buf = Vec::new();
        {
            let mut writer = DxfTextWriter::new(&mut buf);
            f(&mut writer);
        }
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_write_string() {
        let output = render(|w| w.write_entity_type("LINE").unwrap());
        assert_eq!(output, "  0\nLINE\n");
    }

    #[test]
    fn test_write_code_formatting() {
        let output = render(|w| {
            w.write_i16(5, 100).unwrap();
            w.write_i16(62, 7).unwrap();
            w.write_i64(160, 968).unwrap();
        });
        assert_eq!(output, "  5\n100\n 62\n7\n160\n968\n");
    }

    #[test]
    fn test_write_point3d() {
        let output = render(|w| w.write_point3d(10, Vector3::new(1.0, 2.5, 3.0)).unwrap());
        assert_eq!(output, " 10\n1.0\n 20\n2.5\n 30\n3.0\n");
    }

    #[test]
    fn test_write_handle_and_binary() {
        let output = render(|w| {
            w.write_handle(5, Handle::new(255)).unwrap();
            w.write_binary(310, &[0x0A, 0xFF]).unwrap();
        });
        assert_eq!(output, "  5\nFF\n310\n0AFF\n");
    }

    #[test]
    fn test_format_double() {
        assert_eq!(format_double(0.0), "0.0");
        assert_eq!(format_double(-2.0), "-2.0");
        assert_eq!(format_double(0.25), "0.25");
        assert_eq!(format_double(1.0 / 3.0), "0.333333333333333");
    }
}
