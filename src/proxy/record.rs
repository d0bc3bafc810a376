//! Proxy graphic record types

use std::borrow::Cow;
use std::fmt;

/// Size of a record header: `u32` size and `u32` opcode
pub const RECORD_HEADER_SIZE: usize = 8;

/// How the materializer treats a record type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordCategory {
    /// Changes the display attributes of following geometry
    Attribute,
    /// Describes a geometric primitive
    Geometry,
    /// Extents, clipping and transformation records
    Other,
}

/// Known proxy graphic record opcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ProxyGraphicType {
    Extents = 1,
    Circle = 2,
    Circle3P = 3,
    CircularArc = 4,
    CircularArc3P = 5,
    Polyline = 6,
    Polygon = 7,
    Mesh = 8,
    Shell = 9,
    Text = 10,
    Text2 = 11,
    XLine = 12,
    Ray = 13,
    AttributeColor = 14,
    AttributeLayer = 16,
    AttributeLinetype = 18,
    AttributeMarker = 19,
    AttributeFill = 20,
    AttributeTrueColor = 22,
    AttributeLineweight = 23,
    AttributeLtscale = 24,
    AttributeThickness = 25,
    AttributePlotStyleName = 26,
    PushClip = 27,
    PopClip = 28,
    PushMatrix = 29,
    PushMatrix2 = 30,
    PopMatrix = 31,
    PolylineWithNormals = 32,
    LwPolyline = 33,
    AttributeMaterial = 34,
    AttributeMapper = 35,
    UnicodeText = 36,
    UnicodeText2 = 38,
}

impl ProxyGraphicType {
    /// Look up an opcode; `None` for opcodes outside the table
    pub fn from_opcode(opcode: u32) -> Option<Self> {
        use ProxyGraphicType::*;
        let record_type = match opcode {
            1 => Extents,
            2 => Circle,
            3 => Circle3P,
            4 => CircularArc,
            5 => CircularArc3P,
            6 => Polyline,
            7 => Polygon,
            8 => Mesh,
            9 => Shell,
            10 => Text,
            11 => Text2,
            12 => XLine,
            13 => Ray,
            14 => AttributeColor,
            16 => AttributeLayer,
            18 => AttributeLinetype,
            19 => AttributeMarker,
            20 => AttributeFill,
            22 => AttributeTrueColor,
            23 => AttributeLineweight,
            24 => AttributeLtscale,
            25 => AttributeThickness,
            26 => AttributePlotStyleName,
            27 => PushClip,
            28 => PopClip,
            29 => PushMatrix,
            30 => PushMatrix2,
            31 => PopMatrix,
            32 => PolylineWithNormals,
            33 => LwPolyline,
            34 => AttributeMaterial,
            35 => AttributeMapper,
            36 => UnicodeText,
            38 => UnicodeText2,
            _ => return None,
        };
        Some(record_type)
    }

    pub fn opcode(self) -> u32 {
        self as u32
    }

    /// Record name as listed by [`ProxyGraphic::info`](super::ProxyGraphic::info)
    pub fn name(self) -> &'static str {
        use ProxyGraphicType::*;
        match self {
            Extents => "EXTENTS",
            Circle => "CIRCLE",
            Circle3P => "CIRCLE_3P",
            CircularArc => "CIRCULAR_ARC",
            CircularArc3P => "CIRCULAR_ARC_3P",
            Polyline => "POLYLINE",
            Polygon => "POLYGON",
            Mesh => "MESH",
            Shell => "SHELL",
            Text => "TEXT",
            Text2 => "TEXT2",
            XLine => "XLINE",
            Ray => "RAY",
            AttributeColor => "ATTRIBUTE_COLOR",
            AttributeLayer => "ATTRIBUTE_LAYER",
            AttributeLinetype => "ATTRIBUTE_LINETYPE",
            AttributeMarker => "ATTRIBUTE_MARKER",
            AttributeFill => "ATTRIBUTE_FILL",
            AttributeTrueColor => "ATTRIBUTE_TRUE_COLOR",
            AttributeLineweight => "ATTRIBUTE_LINEWEIGHT",
            AttributeLtscale => "ATTRIBUTE_LTSCALE",
            AttributeThickness => "ATTRIBUTE_THICKNESS",
            AttributePlotStyleName => "ATTRIBUTE_PLOT_STYLE_NAME",
            PushClip => "PUSH_CLIP",
            PopClip => "POP_CLIP",
            PushMatrix => "PUSH_MATRIX",
            PushMatrix2 => "PUSH_MATRIX2",
            PopMatrix => "POP_MATRIX",
            PolylineWithNormals => "POLYLINE_WITH_NORMALS",
            LwPolyline => "LWPOLYLINE",
            AttributeMaterial => "ATTRIBUTE_MATERIAL",
            AttributeMapper => "ATTRIBUTE_MAPPER",
            UnicodeText => "UNICODE_TEXT",
            UnicodeText2 => "UNICODE_TEXT2",
        }
    }

    pub fn category(self) -> RecordCategory {
        use ProxyGraphicType::*;
        match self {
            AttributeColor | AttributeLayer | AttributeLinetype | AttributeMarker
            | AttributeFill | AttributeTrueColor | AttributeLineweight | AttributeLtscale
            | AttributeThickness | AttributePlotStyleName | AttributeMaterial
            | AttributeMapper => RecordCategory::Attribute,
            Extents | PushClip | PopClip | PushMatrix | PushMatrix2 | PopMatrix => {
                RecordCategory::Other
            }
            _ => RecordCategory::Geometry,
        }
    }
}

impl fmt::Display for ProxyGraphicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One record of a proxy graphic blob
///
/// Unknown opcodes keep their payload so the blob can be written back
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyRecord {
    Known {
        record_type: ProxyGraphicType,
        payload: Vec<u8>,
    },
    Unknown {
        opcode: u32,
        payload: Vec<u8>,
    },
}

impl ProxyRecord {
    /// Create a record, classifying the opcode
    pub fn new(opcode: u32, payload: Vec<u8>) -> Self {
        match ProxyGraphicType::from_opcode(opcode) {
            Some(record_type) => ProxyRecord::Known { record_type, payload },
            None => ProxyRecord::Unknown { opcode, payload },
        }
    }

    /// Create a record of a known type
    pub fn known(record_type: ProxyGraphicType, payload: Vec<u8>) -> Self {
        ProxyRecord::Known { record_type, payload }
    }

    pub fn opcode(&self) -> u32 {
        match self {
            ProxyRecord::Known { record_type, .. } => record_type.opcode(),
            ProxyRecord::Unknown { opcode, .. } => *opcode,
        }
    }

    pub fn record_type(&self) -> Option<ProxyGraphicType> {
        match self {
            ProxyRecord::Known { record_type, .. } => Some(*record_type),
            ProxyRecord::Unknown { .. } => None,
        }
    }

    pub fn payload(&self) -> &[u8] {
        match self {
            ProxyRecord::Known { payload, .. } | ProxyRecord::Unknown { payload, .. } => payload,
        }
    }

    /// Encoded size including the 8 header bytes
    pub fn size(&self) -> usize {
        RECORD_HEADER_SIZE + self.payload().len()
    }

    /// `"POLYLINE"`, or `"UNKNOWN_TYPE_<n>"` for unknown opcodes
    pub fn type_name(&self) -> Cow<'static, str> {
        match self {
            ProxyRecord::Known { record_type, .. } => Cow::Borrowed(record_type.name()),
            ProxyRecord::Unknown { opcode, .. } => Cow::Owned(format!("UNKNOWN_TYPE_{}", opcode)),
        }
    }
}
