//! Value type of a DXF group code
//!
//! The group code alone determines how the value line of a tag is parsed
//! and written. Point coordinates are spread over three codes
//! (x at `code`, y at `code + 10`, z at `code + 20`).

use std::ops::RangeInclusive;

/// Group code value type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupCodeValueType {
    /// Plain string (0-9, 100-102, 300-309, ...)
    String,
    /// Double precision float
    Double,
    /// 16-bit integer
    Int16,
    /// 32-bit integer
    Int32,
    /// 64-bit integer
    Int64,
    /// 8-bit integer (280-289)
    Byte,
    /// Boolean stored as integer (290-299)
    Bool,
    /// Hex handle string
    Handle,
    /// Hex-encoded binary chunk
    Binary,
    /// Comment (999)
    Comment,
}

impl GroupCodeValueType {
    /// Value type for a group code; unknown codes are read as strings
    pub fn from_code(code: i32) -> Self {
        match code {
            5 | 105 => GroupCodeValueType::Handle,
            0..=9 => GroupCodeValueType::String,
            10..=59 => GroupCodeValueType::Double,
            60..=79 => GroupCodeValueType::Int16,
            90..=99 => GroupCodeValueType::Int32,
            100..=102 => GroupCodeValueType::String,
            110..=149 => GroupCodeValueType::Double,
            160..=169 => GroupCodeValueType::Int64,
            170..=179 => GroupCodeValueType::Int16,
            210..=239 => GroupCodeValueType::Double,
            270..=279 => GroupCodeValueType::Int16,
            280..=289 => GroupCodeValueType::Byte,
            290..=299 => GroupCodeValueType::Bool,
            300..=309 => GroupCodeValueType::String,
            310..=319 => GroupCodeValueType::Binary,
            320..=369 => GroupCodeValueType::Handle,
            370..=389 => GroupCodeValueType::Int16,
            390..=399 => GroupCodeValueType::Handle,
            400..=409 => GroupCodeValueType::Int16,
            410..=419 => GroupCodeValueType::String,
            420..=429 => GroupCodeValueType::Int32,
            430..=439 => GroupCodeValueType::String,
            440..=459 => GroupCodeValueType::Int32,
            460..=469 => GroupCodeValueType::Double,
            470..=479 => GroupCodeValueType::String,
            480..=481 => GroupCodeValueType::Handle,
            999 => GroupCodeValueType::Comment,
            1004 => GroupCodeValueType::Binary,
            1005 => GroupCodeValueType::Handle,
            1000..=1009 => GroupCodeValueType::String,
            1010..=1059 => GroupCodeValueType::Double,
            1060..=1070 => GroupCodeValueType::Int16,
            1071 => GroupCodeValueType::Int32,
            _ => GroupCodeValueType::String,
        }
    }

    /// True for integer-like types (including bytes and booleans)
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            GroupCodeValueType::Int16
                | GroupCodeValueType::Int32
                | GroupCodeValueType::Int64
                | GroupCodeValueType::Byte
                | GroupCodeValueType::Bool
        )
    }

    /// Values an integer type can hold on the wire
    ///
    /// Bytes and booleans are written as 16-bit values. `None` for
    /// non-integer types.
    pub fn integer_range(&self) -> Option<RangeInclusive<i64>> {
        match self {
            GroupCodeValueType::Int16 | GroupCodeValueType::Byte | GroupCodeValueType::Bool => {
                Some(i16::MIN as i64..=i16::MAX as i64)
            }
            GroupCodeValueType::Int32 => Some(i32::MIN as i64..=i32::MAX as i64),
            GroupCodeValueType::Int64 => Some(i64::MIN..=i64::MAX),
            _ => None,
        }
    }

    /// True if `code` starts a point (its x coordinate)
    pub fn is_point_code(code: i32) -> bool {
        matches!(code, 10..=19 | 110..=112 | 210..=213 | 1010..=1019)
    }

    /// Axis of a coordinate code: 0 = x, 1 = y, 2 = z
    pub fn coordinate_axis(code: i32) -> Option<usize> {
        let base = Self::coordinate_group(code)?;
        Some(((code - base) / 10) as usize)
    }

    /// X code of the point a coordinate code belongs to
    pub fn coordinate_group(code: i32) -> Option<i32> {
        [0, 10, 20]
            .iter()
            .map(|offset| code - offset)
            .find(|&base| Self::is_point_code(base))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_types() {
        assert_eq!(GroupCodeValueType::from_code(0), GroupCodeValueType::String);
        assert_eq!(GroupCodeValueType::from_code(5), GroupCodeValueType::Handle);
        assert_eq!(GroupCodeValueType::from_code(10), GroupCodeValueType::Double);
        assert_eq!(GroupCodeValueType::from_code(62), GroupCodeValueType::Int16);
        assert_eq!(GroupCodeValueType::from_code(92), GroupCodeValueType::Int32);
        assert_eq!(GroupCodeValueType::from_code(160), GroupCodeValueType::Int64);
        assert_eq!(GroupCodeValueType::from_code(310), GroupCodeValueType::Binary);
        assert_eq!(GroupCodeValueType::from_code(330), GroupCodeValueType::Handle);
        assert_eq!(GroupCodeValueType::from_code(1071), GroupCodeValueType::Int32);
    }

    #[test]
    fn test_integer_range() {
        let int16 = GroupCodeValueType::from_code(62).integer_range().unwrap();
        assert!(int16.contains(&32767));
        assert!(!int16.contains(&70000));
        let int32 = GroupCodeValueType::from_code(420).integer_range().unwrap();
        assert!(int32.contains(&0xFFFFFF));
        assert!(GroupCodeValueType::from_code(8).integer_range().is_none());
    }

    #[test]
    fn test_coordinate_axis() {
        assert_eq!(GroupCodeValueType::coordinate_axis(10), Some(0));
        assert_eq!(GroupCodeValueType::coordinate_axis(21), Some(1));
        assert_eq!(GroupCodeValueType::coordinate_axis(230), Some(2));
        assert_eq!(GroupCodeValueType::coordinate_axis(1033), Some(2));
        assert_eq!(GroupCodeValueType::coordinate_axis(40), None);
        assert_eq!(GroupCodeValueType::coordinate_group(232), Some(212));
    }

    #[test]
    fn test_point_codes() {
        assert!(GroupCodeValueType::is_point_code(10));
        assert!(GroupCodeValueType::is_point_code(213));
        assert!(!GroupCodeValueType::is_point_code(20));
        assert!(!GroupCodeValueType::is_point_code(214));
    }
}
