//! Display attribute state threaded through one materialization pass

use super::byte_stream::ByteStream;
use super::record::ProxyGraphicType;
use super::virtual_entity::DisplayAttributes;
use crate::error::Result;
use crate::types::{Color, LineWeight};

/// Color indices above this value fall back to BYLAYER
const MAX_COLOR_INDEX: u32 = 256;

/// Current attribute values, mutated only by `ATTRIBUTE_*` records
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProxyDecoderState {
    attributes: DisplayAttributes,
}

impl ProxyDecoderState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an attribute record
    ///
    /// Returns `Ok(false)` for record types that do not change the state.
    pub fn apply(&mut self, record_type: ProxyGraphicType, payload: &[u8]) -> Result<bool> {
        let mut stream = ByteStream::new(payload, 0);
        let attributes = &mut self.attributes;
        match record_type {
            ProxyGraphicType::AttributeColor => {
                let index = stream.read_u32()?;
                attributes.color = if index > MAX_COLOR_INDEX {
                    Color::ByLayer
                } else {
                    Color::from_index(index as i32)
                };
            }
            ProxyGraphicType::AttributeTrueColor => {
                // only RGB values count as a true color
                attributes.true_color = Color::from_raw(stream.read_u32()?)
                    .filter(|color| matches!(color, Color::Rgb { .. }));
            }
            ProxyGraphicType::AttributeLayer => {
                attributes.layer_index = Some(stream.read_u32()?);
            }
            ProxyGraphicType::AttributeLinetype => {
                attributes.linetype_index = Some(stream.read_u32()?);
            }
            ProxyGraphicType::AttributeLineweight => {
                attributes.line_weight = LineWeight::from_value(stream.read_i32()?);
            }
            ProxyGraphicType::AttributeMarker => {
                attributes.marker = Some(stream.read_u32()?);
            }
            ProxyGraphicType::AttributeFill => {
                attributes.fill = stream.read_u32()? != 0;
            }
            ProxyGraphicType::AttributeLtscale => {
                attributes.ltscale = stream.read_f64()?;
            }
            ProxyGraphicType::AttributeThickness => {
                attributes.thickness = stream.read_f64()?;
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// Attributes for the next produced entity
    pub fn snapshot(&self) -> DisplayAttributes {
        self.attributes.clone()
    }

    /// Called after an entity was produced; fill applies to one entity only
    pub fn entity_produced(&mut self) {
        self.attributes.fill = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_out_of_range_is_bylayer() {
        let mut state = ProxyDecoderState::new();
        assert!(state.apply(ProxyGraphicType::AttributeColor, &3u32.to_le_bytes()).unwrap());
        assert_eq!(state.snapshot().color, Color::Index(3));
        state.apply(ProxyGraphicType::AttributeColor, &300u32.to_le_bytes()).unwrap();
        assert_eq!(state.snapshot().color, Color::ByLayer);
    }

    #[test]
    fn test_true_color() {
        let mut state = ProxyDecoderState::new();
        state
            .apply(ProxyGraphicType::AttributeTrueColor, &0xC2FF_8000u32.to_le_bytes())
            .unwrap();
        assert_eq!(state.snapshot().true_color, Some(Color::from_rgb(255, 128, 0)));
        state
            .apply(ProxyGraphicType::AttributeTrueColor, &0xC000_0000u32.to_le_bytes())
            .unwrap();
        assert_eq!(state.snapshot().true_color, None);
    }

    #[test]
    fn test_layer_index_keeps_name() {
        let mut state = ProxyDecoderState::new();
        state.apply(ProxyGraphicType::AttributeLayer, &5u32.to_le_bytes()).unwrap();
        let snapshot = state.snapshot();
        assert_eq!(snapshot.layer, "0");
        assert_eq!(snapshot.layer_index, Some(5));
    }

    #[test]
    fn test_lineweight() {
        let mut state = ProxyDecoderState::new();
        state.apply(ProxyGraphicType::AttributeLineweight, &25i32.to_le_bytes()).unwrap();
        assert_eq!(state.snapshot().line_weight, LineWeight::Value(25));
        state.apply(ProxyGraphicType::AttributeLineweight, &(-2i32).to_le_bytes()).unwrap();
        assert_eq!(state.snapshot().line_weight, LineWeight::ByBlock);
        state.apply(ProxyGraphicType::AttributeLineweight, &500i32.to_le_bytes()).unwrap();
        assert_eq!(state.snapshot().line_weight, LineWeight::Default);
    }

    #[test]
    fn test_fill_resets_after_entity() {
        let mut state = ProxyDecoderState::new();
        state.apply(ProxyGraphicType::AttributeFill, &1u32.to_le_bytes()).unwrap();
        assert!(state.snapshot().fill);
        state.entity_produced();
        assert!(!state.snapshot().fill);
    }

    #[test]
    fn test_non_attribute_record_is_ignored() {
        let mut state = ProxyDecoderState::new();
        assert!(!state.apply(ProxyGraphicType::PushClip, &[]).unwrap());
        assert!(!state.apply(ProxyGraphicType::AttributeMaterial, &[0; 4]).unwrap());
        assert_eq!(state, ProxyDecoderState::new());
    }

    #[test]
    fn test_short_payload_is_an_error() {
        let mut state = ProxyDecoderState::new();
        assert!(state.apply(ProxyGraphicType::AttributeLtscale, &[0; 4]).is_err());
    }
}
