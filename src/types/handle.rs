//! Handle type for DXF object references
//!
//! Handles are written to the tag stream as upper-case hex strings
//! (codes 5, 105, 320-369, 390, 480-481, 1005).

use std::fmt;
use std::str::FromStr;

use crate::error::DxfError;

/// A database handle as it appears in handle-typed tags
///
/// The core never allocates handles; it only parses and writes them.
/// Handle 0 is the null reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Handle(u64);

impl Handle {
    /// The null handle (0)
    pub const NULL: Handle = Handle(0);

    /// Create a new handle from a u64 value
    #[inline]
    pub const fn new(value: u64) -> Self {
        Handle(value)
    }

    /// Get the raw u64 value
    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Check if this is the null handle
    #[inline]
    pub const fn is_null(&self) -> bool {
        self.0 == 0
    }

    /// Parse a hex handle string as written in DXF tags
    pub fn from_hex(s: &str) -> Option<Self> {
        u64::from_str_radix(s.trim(), 16).ok().map(Handle)
    }

    /// Upper-case hex form used in DXF output
    pub fn to_hex(&self) -> String {
        format!("{:X}", self.0)
    }
}

impl From<u64> for Handle {
    fn from(value: u64) -> Self {
        Handle(value)
    }
}

impl From<Handle> for u64 {
    fn from(handle: Handle) -> Self {
        handle.0
    }
}

impl FromStr for Handle {
    type Err = DxfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Handle::from_hex(s).ok_or_else(|| DxfError::Parse(format!("invalid handle '{}'", s)))
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:X}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_hex_parse() {
        assert_eq!(Handle::from_hex("2F"), Some(Handle::new(0x2F)));
        assert_eq!(Handle::from_hex(" ff "), Some(Handle::new(0xFF)));
        assert_eq!(Handle::from_hex("xyz"), None);
    }

    #[test]
    fn test_handle_display_is_dxf_hex() {
        assert_eq!(Handle::new(0xABCD).to_string(), "ABCD");
        assert_eq!(Handle::new(0xABCD).to_hex(), "ABCD");
    }

    #[test]
    fn test_null_handle() {
        assert!(Handle::NULL.is_null());
        assert!("0".parse::<Handle>().unwrap().is_null());
        assert!("G1".parse::<Handle>().is_err());
    }
}
