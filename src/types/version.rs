//! DXF format versions

use std::fmt;

/// DXF file format version ($ACADVER)
///
/// Ordering follows release order, so version gates are plain comparisons:
/// `version >= DxfVersion::AC1015`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DxfVersion {
    /// Version could not be determined
    Unknown,
    /// AutoCAD R12 - legacy layout without subclass markers
    AC1009,
    /// AutoCAD R13
    AC1012,
    /// AutoCAD R14
    AC1014,
    /// AutoCAD 2000
    AC1015,
    /// AutoCAD 2004
    AC1018,
    /// AutoCAD 2007
    AC1021,
    /// AutoCAD 2010
    AC1024,
    /// AutoCAD 2013
    AC1027,
    /// AutoCAD 2018
    AC1032,
}

impl DxfVersion {
    /// Parse a `$ACADVER` string such as `"AC1015"`
    pub fn from_version_string(s: &str) -> Self {
        match s.trim() {
            "AC1009" => DxfVersion::AC1009,
            "AC1012" => DxfVersion::AC1012,
            "AC1014" => DxfVersion::AC1014,
            "AC1015" => DxfVersion::AC1015,
            "AC1018" => DxfVersion::AC1018,
            "AC1021" => DxfVersion::AC1021,
            "AC1024" => DxfVersion::AC1024,
            "AC1027" => DxfVersion::AC1027,
            "AC1032" => DxfVersion::AC1032,
            _ => DxfVersion::Unknown,
        }
    }

    /// The `$ACADVER` string
    pub fn as_str(&self) -> &'static str {
        match self {
            DxfVersion::Unknown => "UNKNOWN",
            DxfVersion::AC1009 => "AC1009",
            DxfVersion::AC1012 => "AC1012",
            DxfVersion::AC1014 => "AC1014",
            DxfVersion::AC1015 => "AC1015",
            DxfVersion::AC1018 => "AC1018",
            DxfVersion::AC1021 => "AC1021",
            DxfVersion::AC1024 => "AC1024",
            DxfVersion::AC1027 => "AC1027",
            DxfVersion::AC1032 => "AC1032",
        }
    }

    /// Subclass markers (group code 100) exist from R13 on.
    pub fn supports_subclass_markers(&self) -> bool {
        *self > DxfVersion::AC1009
    }

    /// Group code holding the proxy graphic byte count.
    ///
    /// R2010 switched from a 32-bit (92) to a 64-bit (160) length tag.
    pub fn proxy_graphic_length_code(&self) -> i32 {
        if *self >= DxfVersion::AC1024 {
            160
        } else {
            92
        }
    }
}

impl Default for DxfVersion {
    fn default() -> Self {
        DxfVersion::AC1032
    }
}

impl fmt::Display for DxfVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_string_roundtrip() {
        for v in [DxfVersion::AC1009, DxfVersion::AC1015, DxfVersion::AC1032] {
            assert_eq!(DxfVersion::from_version_string(v.as_str()), v);
        }
        assert_eq!(DxfVersion::from_version_string("AC9999"), DxfVersion::Unknown);
    }

    #[test]
    fn test_subclass_marker_support() {
        assert!(!DxfVersion::AC1009.supports_subclass_markers());
        assert!(DxfVersion::AC1012.supports_subclass_markers());
        assert!(DxfVersion::AC1032.supports_subclass_markers());
    }

    #[test]
    fn test_proxy_length_code() {
        assert_eq!(DxfVersion::AC1015.proxy_graphic_length_code(), 92);
        assert_eq!(DxfVersion::AC1021.proxy_graphic_length_code(), 92);
        assert_eq!(DxfVersion::AC1024.proxy_graphic_length_code(), 160);
    }
}
