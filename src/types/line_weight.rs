//! Line weight representation (group code 370, proxy ATTRIBUTE_LINEWEIGHT)

use std::fmt;

/// Largest valid explicit line weight, in 1/100 mm
pub const MAX_VALID_LINEWEIGHT: i32 = 211;

/// Represents line weight in AutoCAD
///
/// Line weights are specified in 1/100 mm or as one of the special values
/// ByLayer (-1), ByBlock (-2) or Default (-3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LineWeight {
    /// Use the layer's line weight
    #[default]
    ByLayer,
    /// Use the block's line weight
    ByBlock,
    /// Default line weight
    Default,
    /// Specific line weight in 1/100 mm (0-211)
    Value(i16),
}

impl LineWeight {
    /// Create a line weight from a raw value
    pub fn from_value(value: i32) -> Self {
        match value {
            -1 => LineWeight::ByLayer,
            -2 => LineWeight::ByBlock,
            0..=MAX_VALID_LINEWEIGHT => LineWeight::Value(value as i16),
            _ => LineWeight::Default,
        }
    }

    /// Get the raw value
    pub fn value(&self) -> i16 {
        match self {
            LineWeight::ByLayer => -1,
            LineWeight::ByBlock => -2,
            LineWeight::Default => -3,
            LineWeight::Value(v) => *v,
        }
    }

    /// Get the line weight in millimeters
    pub fn millimeters(&self) -> Option<f64> {
        match self {
            LineWeight::Value(v) => Some(*v as f64 / 100.0),
            _ => None,
        }
    }
}

impl fmt::Display for LineWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineWeight::ByLayer => write!(f, "ByLayer"),
            LineWeight::ByBlock => write!(f, "ByBlock"),
            LineWeight::Default => write!(f, "Default"),
            LineWeight::Value(v) => write!(f, "{:.2}mm", *v as f64 / 100.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_weight_from_value() {
        assert_eq!(LineWeight::from_value(-1), LineWeight::ByLayer);
        assert_eq!(LineWeight::from_value(-2), LineWeight::ByBlock);
        assert_eq!(LineWeight::from_value(-3), LineWeight::Default);
        assert_eq!(LineWeight::from_value(25), LineWeight::Value(25));
    }

    #[test]
    fn test_out_of_range_is_default() {
        assert_eq!(LineWeight::from_value(212), LineWeight::Default);
        assert_eq!(LineWeight::from_value(i32::MIN), LineWeight::Default);
    }

    #[test]
    fn test_line_weight_millimeters() {
        assert_eq!(LineWeight::Value(25).millimeters(), Some(0.25));
        assert_eq!(LineWeight::ByLayer.millimeters(), None);
        assert_eq!(LineWeight::Value(25).to_string(), "0.25mm");
    }
}
