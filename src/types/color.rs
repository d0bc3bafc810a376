//! Color representation for tags and proxy graphic attributes

use std::fmt;

/// Raw color type byte: by layer
pub const COLOR_TYPE_BY_LAYER: u8 = 0xC0;
/// Raw color type byte: by block
pub const COLOR_TYPE_BY_BLOCK: u8 = 0xC1;
/// Raw color type byte: 24-bit RGB value
pub const COLOR_TYPE_RGB: u8 = 0xC2;
/// Raw color type byte: AutoCAD color index
pub const COLOR_TYPE_ACI: u8 = 0xC3;
/// Raw color type byte: window background
pub const COLOR_TYPE_WINDOW_BG: u8 = 0xC8;

/// Represents a color in AutoCAD
///
/// - By index (1-255): AutoCAD Color Index (ACI)
/// - By RGB values: True color
/// - By layer (index 256) / by block (index 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    /// Color by layer (index 256)
    #[default]
    ByLayer,
    /// Color by block (index 0)
    ByBlock,
    /// AutoCAD Color Index (1-255)
    Index(u8),
    /// True color with RGB values
    Rgb { r: u8, g: u8, b: u8 },
}

impl Color {
    /// Create a color from an AutoCAD Color Index; out-of-range values map to BYLAYER
    pub fn from_index(index: i32) -> Self {
        match index {
            0 => Color::ByBlock,
            1..=255 => Color::Index(index as u8),
            _ => Color::ByLayer,
        }
    }

    /// Create a true color from RGB values
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb { r, g, b }
    }

    /// Create a true color from a packed `0x00RRGGBB` value (group code 420)
    pub const fn from_true_color(value: u32) -> Self {
        Color::Rgb {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        }
    }

    /// Decode a raw color value: the high byte holds the color type,
    /// the low bytes the index or RGB value.
    ///
    /// Returns `None` for unknown color types.
    pub fn from_raw(value: u32) -> Option<Self> {
        let flags = ((value >> 24) & 0xFF) as u8;
        match flags {
            COLOR_TYPE_BY_LAYER => Some(Color::ByLayer),
            COLOR_TYPE_BY_BLOCK => Some(Color::ByBlock),
            COLOR_TYPE_ACI => Some(Color::from_index((value & 0xFF) as i32)),
            COLOR_TYPE_RGB => Some(Color::from_true_color(value & 0x00FF_FFFF)),
            // window background has no drawing color
            COLOR_TYPE_WINDOW_BG => Some(Color::Index(0)),
            _ => None,
        }
    }

    /// Get the color index (if applicable)
    pub fn index(&self) -> Option<u16> {
        match self {
            Color::ByBlock => Some(0),
            Color::Index(i) => Some(*i as u16),
            Color::ByLayer => Some(256),
            Color::Rgb { .. } => None,
        }
    }

    /// Get RGB values (if applicable)
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        match self {
            Color::Rgb { r, g, b } => Some((*r, *g, *b)),
            _ => None,
        }
    }

    /// Packed `0x00RRGGBB` value (if applicable)
    pub fn true_color(&self) -> Option<u32> {
        self.rgb()
            .map(|(r, g, b)| ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::ByLayer => write!(f, "ByLayer"),
            Color::ByBlock => write!(f, "ByBlock"),
            Color::Index(i) => write!(f, "Index({})", i),
            Color::Rgb { r, g, b } => write!(f, "RGB({}, {}, {})", r, g, b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_index() {
        assert_eq!(Color::from_index(0), Color::ByBlock);
        assert_eq!(Color::from_index(256), Color::ByLayer);
        assert_eq!(Color::from_index(1), Color::Index(1));
        assert_eq!(Color::from_index(1000), Color::ByLayer);
        assert_eq!(Color::ByLayer.index(), Some(256));
    }

    #[test]
    fn test_color_from_raw() {
        assert_eq!(Color::from_raw(0xC000_0000), Some(Color::ByLayer));
        assert_eq!(Color::from_raw(0xC100_0000), Some(Color::ByBlock));
        assert_eq!(Color::from_raw(0xC300_0005), Some(Color::Index(5)));
        assert_eq!(Color::from_raw(0xC2FF_8040), Some(Color::from_rgb(0xFF, 0x80, 0x40)));
        assert_eq!(Color::from_raw(0x1234_5678), None);
    }

    #[test]
    fn test_true_color_packing() {
        let c = Color::from_true_color(0x00FF_8040);
        assert_eq!(c.rgb(), Some((255, 128, 64)));
        assert_eq!(c.true_color(), Some(0x00FF_8040));
        assert_eq!(Color::ByLayer.true_color(), None);
    }

    #[test]
    fn test_color_display() {
        assert_eq!(Color::ByLayer.to_string(), "ByLayer");
        assert_eq!(Color::from_rgb(255, 0, 0).to_string(), "RGB(255, 0, 0)");
    }
}
