//! Turn geometry records into virtual entities

use super::byte_stream::ByteStream;
use super::record::{ProxyGraphicType, ProxyRecord, RecordCategory};
use super::state::ProxyDecoderState;
use super::virtual_entity::{
    ArcGeometry, ArcType, CircleGeometry, FontInfo, LineGeometry, PolylineGeometry,
    TextGenerationFlags, TextGeometry, VirtualEntity, VirtualGeometry,
};
use crate::error::Result;
use encoding_rs::Encoding;
use std::slice::Iter;

/// Lazy iterator over the virtual entities of a record list
///
/// Records are processed strictly in order: attribute records update the
/// state, geometry records produce an entity with a snapshot of it.
/// Malformed and unsupported records are skipped.
pub struct VirtualEntities<'a> {
    records: Iter<'a, ProxyRecord>,
    offset: usize,
    state: ProxyDecoderState,
    encoding: &'static Encoding,
}

impl<'a> VirtualEntities<'a> {
    pub(crate) fn new(records: &'a [ProxyRecord], encoding: &'static Encoding) -> Self {
        Self {
            records: records.iter(),
            offset: super::record::RECORD_HEADER_SIZE,
            state: ProxyDecoderState::new(),
            encoding,
        }
    }

    fn process(&mut self, record: &ProxyRecord, offset: usize) -> Option<VirtualEntity> {
        let record_type = match record.record_type() {
            Some(record_type) => record_type,
            None => {
                tracing::debug!(offset, name = %record.type_name(), "skipped unknown proxy record");
                return None;
            }
        };

        let payload_offset = offset + super::record::RECORD_HEADER_SIZE;
        match record_type.category() {
            RecordCategory::Attribute => {
                if let Err(err) = self.state.apply(record_type, record.payload()) {
                    tracing::debug!(offset, record = %record_type, error = %err, "malformed attribute record");
                }
                None
            }
            RecordCategory::Geometry => {
                let stream = ByteStream::new(record.payload(), payload_offset);
                match build_geometry(record_type, stream, self.encoding) {
                    Ok(Some(geometry)) => {
                        let entity = VirtualEntity::new(geometry, self.state.snapshot());
                        self.state.entity_produced();
                        Some(entity)
                    }
                    Ok(None) => None,
                    Err(err) => {
                        tracing::debug!(offset, record = %record_type, error = %err, "malformed geometry record");
                        None
                    }
                }
            }
            RecordCategory::Other => None,
        }
    }
}

impl Iterator for VirtualEntities<'_> {
    type Item = VirtualEntity;

    fn next(&mut self) -> Option<VirtualEntity> {
        while let Some(record) = self.records.next() {
            let offset = self.offset;
            self.offset += record.size();
            if let Some(entity) = self.process(record, offset) {
                return Some(entity);
            }
        }
        None
    }
}

/// Geometry of one record; `Ok(None)` for records without a virtual entity
fn build_geometry(
    record_type: ProxyGraphicType,
    mut stream: ByteStream<'_>,
    encoding: &'static Encoding,
) -> Result<Option<VirtualGeometry>> {
    let geometry = match record_type {
        ProxyGraphicType::Polyline => polyline(&mut stream, false, false)?,
        ProxyGraphicType::Polygon => polyline(&mut stream, true, false)?,
        ProxyGraphicType::PolylineWithNormals => polyline(&mut stream, false, true)?,
        ProxyGraphicType::Circle => Some(VirtualGeometry::Circle(CircleGeometry {
            center: stream.read_vertex()?,
            radius: stream.read_f64()?,
            normal: stream.read_vertex()?,
        })),
        ProxyGraphicType::CircularArc => Some(VirtualGeometry::Arc(ArcGeometry {
            center: stream.read_vertex()?,
            radius: stream.read_f64()?,
            normal: stream.read_vertex()?,
            start_vector: stream.read_vertex()?,
            sweep_angle: stream.read_f64()?,
            arc_type: ArcType::from_value(stream.read_u32()?),
        })),
        ProxyGraphicType::XLine => Some(VirtualGeometry::XLine(infinite_line(&mut stream)?)),
        ProxyGraphicType::Ray => Some(VirtualGeometry::Ray(infinite_line(&mut stream)?)),
        ProxyGraphicType::Text => Some(VirtualGeometry::Text(text(&mut stream, Some(encoding))?)),
        ProxyGraphicType::UnicodeText => Some(VirtualGeometry::Text(text(&mut stream, None)?)),
        ProxyGraphicType::Text2 => Some(VirtualGeometry::Text(text2(&mut stream, Some(encoding))?)),
        ProxyGraphicType::UnicodeText2 => Some(VirtualGeometry::Text(text2(&mut stream, None)?)),
        _ => {
            tracing::debug!(record = %record_type, "unsupported proxy geometry record");
            None
        }
    };
    Ok(geometry)
}

fn polyline(stream: &mut ByteStream<'_>, closed: bool, with_normal: bool) -> Result<Option<VirtualGeometry>> {
    let vertices = stream.read_vertices()?;
    let normal = if with_normal { Some(stream.read_vertex()?) } else { None };
    if vertices.len() < 2 {
        tracing::debug!(count = vertices.len(), "polyline record with less than 2 vertices");
        return Ok(None);
    }
    Ok(Some(VirtualGeometry::Polyline(PolylineGeometry {
        vertices,
        closed,
        normal,
    })))
}

fn infinite_line(stream: &mut ByteStream<'_>) -> Result<LineGeometry> {
    let start = stream.read_vertex()?;
    let other = stream.read_vertex()?;
    Ok(LineGeometry {
        start,
        direction: other - start,
    })
}

/// `None` reads UTF-16LE strings, `Some` single-byte strings
fn read_string(stream: &mut ByteStream<'_>, encoding: Option<&'static Encoding>) -> Result<String> {
    match encoding {
        Some(encoding) => stream.read_padded_string(encoding),
        None => stream.read_padded_unicode_string(),
    }
}

fn text(stream: &mut ByteStream<'_>, encoding: Option<&'static Encoding>) -> Result<TextGeometry> {
    let insert = stream.read_vertex()?;
    let normal = stream.read_vertex()?;
    let direction = stream.read_vertex()?;
    let height = stream.read_f64()?;
    let width_factor = stream.read_f64()?;
    let oblique = stream.read_f64()?.to_degrees();
    let text = read_string(stream, encoding)?;
    Ok(TextGeometry {
        text,
        insert,
        normal,
        direction,
        height,
        width_factor,
        oblique,
        generation_flags: TextGenerationFlags::empty(),
        font: None,
    })
}

fn text2(stream: &mut ByteStream<'_>, encoding: Option<&'static Encoding>) -> Result<TextGeometry> {
    let insert = stream.read_vertex()?;
    let normal = stream.read_vertex()?;
    let direction = stream.read_vertex()?;
    let text = read_string(stream, encoding)?;
    // string length and raw flag
    stream.read_i32()?;
    stream.read_i32()?;
    let height = stream.read_f64()?;
    let width_factor = stream.read_f64()?;
    let oblique = stream.read_f64()?.to_degrees();
    let tracking_percentage = stream.read_f64()?;

    let backwards = stream.read_u32()? != 0;
    let upside_down = stream.read_u32()? != 0;
    let vertical = stream.read_u32()? != 0;
    let underline = stream.read_u32()? != 0;
    let overline = stream.read_u32()? != 0;

    let mut font = FontInfo {
        tracking_percentage,
        vertical,
        underline,
        overline,
        ..FontInfo::default()
    };
    match encoding {
        Some(encoding) => {
            font.font_file = stream.read_padded_string(encoding)?;
            font.bigfont_file = stream.read_padded_string(encoding)?;
        }
        None => {
            font.bold = stream.read_u32()? != 0;
            font.italic = stream.read_u32()? != 0;
            font.charset = stream.read_u32()?;
            font.pitch_and_family = stream.read_u32()?;
            font.typeface = Some(stream.read_padded_unicode_string()?);
            font.font_file = stream.read_padded_unicode_string()?;
            font.bigfont_file = stream.read_padded_unicode_string()?;
        }
    }

    let mut generation_flags = TextGenerationFlags::empty();
    generation_flags.set(TextGenerationFlags::BACKWARD, backwards);
    generation_flags.set(TextGenerationFlags::UPSIDE_DOWN, upside_down);

    Ok(TextGeometry {
        text,
        insert,
        normal,
        direction,
        height,
        width_factor,
        oblique,
        generation_flags,
        font: Some(font),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Vector3;
    use encoding_rs::WINDOWS_1252;

    fn vertex(data: &mut Vec<u8>, v: [f64; 3]) {
        for c in v {
            data.extend_from_slice(&c.to_le_bytes());
        }
    }

    fn polyline_payload(points: &[[f64; 3]]) -> Vec<u8> {
        let mut data = (points.len() as u32).to_le_bytes().to_vec();
        for p in points {
            vertex(&mut data, *p);
        }
        data
    }

    fn entities(records: &[ProxyRecord]) -> Vec<VirtualEntity> {
        VirtualEntities::new(records, WINDOWS_1252).collect()
    }

    #[test]
    fn test_polygon_is_closed_polyline() {
        let records = vec![
            ProxyRecord::known(
                ProxyGraphicType::Polygon,
                polyline_payload(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]]),
            ),
            ProxyRecord::known(
                ProxyGraphicType::Polyline,
                polyline_payload(&[[0.0, 0.0, 0.0], [2.0, 0.0, 0.0]]),
            ),
        ];
        let result = entities(&records);
        assert_eq!(result.len(), 2);
        let polygon = result[0].as_polyline().unwrap();
        assert!(polygon.closed);
        assert_eq!(polygon.vertices.len(), 3);
        assert!(!result[1].as_polyline().unwrap().closed);
    }

    #[test]
    fn test_single_vertex_polyline_is_skipped() {
        let records = vec![ProxyRecord::known(
            ProxyGraphicType::Polygon,
            polyline_payload(&[[0.0, 0.0, 0.0]]),
        )];
        assert!(entities(&records).is_empty());
    }

    #[test]
    fn test_attributes_apply_to_following_geometry_only() {
        let line = polyline_payload(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);
        let records = vec![
            ProxyRecord::known(ProxyGraphicType::Polyline, line.clone()),
            ProxyRecord::known(ProxyGraphicType::AttributeColor, 1u32.to_le_bytes().to_vec()),
            ProxyRecord::known(ProxyGraphicType::AttributeFill, 1u32.to_le_bytes().to_vec()),
            ProxyRecord::known(ProxyGraphicType::Polyline, line.clone()),
            ProxyRecord::known(ProxyGraphicType::Polyline, line),
        ];
        let result = entities(&records);
        assert_eq!(result[0].attributes.color, crate::types::Color::ByLayer);
        assert_eq!(result[1].attributes.color, crate::types::Color::Index(1));
        assert!(result[1].attributes.fill);
        assert_eq!(result[2].attributes.color, crate::types::Color::Index(1));
        assert!(!result[2].attributes.fill);
    }

    #[test]
    fn test_malformed_record_does_not_stop_iteration() {
        let records = vec![
            ProxyRecord::known(ProxyGraphicType::Circle, vec![0; 10]),
            ProxyRecord::new(99, vec![]),
            ProxyRecord::known(
                ProxyGraphicType::Polyline,
                polyline_payload(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]),
            ),
        ];
        let result = entities(&records);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].dxftype(), "POLYLINE");
    }

    #[test]
    fn test_circle_and_arc() {
        let mut circle = Vec::new();
        vertex(&mut circle, [1.0, 2.0, 0.0]);
        circle.extend_from_slice(&3.0f64.to_le_bytes());
        vertex(&mut circle, [0.0, 0.0, 1.0]);

        let mut arc = circle.clone();
        vertex(&mut arc, [0.0, 1.0, 0.0]);
        arc.extend_from_slice(&std::f64::consts::FRAC_PI_2.to_le_bytes());
        arc.extend_from_slice(&1u32.to_le_bytes());

        let records = vec![
            ProxyRecord::known(ProxyGraphicType::Circle, circle),
            ProxyRecord::known(ProxyGraphicType::CircularArc, arc),
        ];
        let result = entities(&records);
        assert_eq!(result[0].dxftype(), "CIRCLE");
        match &result[1].geometry {
            VirtualGeometry::Arc(arc) => {
                assert_eq!(arc.radius, 3.0);
                assert_eq!(arc.arc_type, ArcType::Sector);
                assert!((arc.start_angle() - 90.0).abs() < 1e-9);
                assert!((arc.end_angle() - 180.0).abs() < 1e-9);
            }
            other => panic!("expected an arc, got {:?}", other),
        }
    }

    #[test]
    fn test_ray_direction() {
        let mut data = Vec::new();
        vertex(&mut data, [1.0, 1.0, 0.0]);
        vertex(&mut data, [2.0, 1.0, 0.0]);
        let result = entities(&[ProxyRecord::known(ProxyGraphicType::Ray, data)]);
        match &result[0].geometry {
            VirtualGeometry::Ray(ray) => {
                assert_eq!(ray.start, Vector3::new(1.0, 1.0, 0.0));
                assert_eq!(ray.direction, Vector3::new(1.0, 0.0, 0.0));
            }
            other => panic!("expected a ray, got {:?}", other),
        }
    }

    #[test]
    fn test_ansi_text() {
        let mut data = Vec::new();
        vertex(&mut data, [0.0, 0.0, 0.0]);
        vertex(&mut data, [0.0, 0.0, 1.0]);
        vertex(&mut data, [0.0, 1.0, 0.0]);
        data.extend_from_slice(&2.5f64.to_le_bytes());
        data.extend_from_slice(&1.0f64.to_le_bytes());
        data.extend_from_slice(&0.0f64.to_le_bytes());
        data.extend_from_slice(b"Caf\xe9\0\0\0\0");

        let result = entities(&[ProxyRecord::known(ProxyGraphicType::Text, data)]);
        let text = result[0].as_text().unwrap();
        assert_eq!(text.text, "Café");
        assert_eq!(text.height, 2.5);
        assert!((text.rotation() - 90.0).abs() < 1e-9);
        assert!(text.font.is_none());
    }
}
