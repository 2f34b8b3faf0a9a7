use crate::conversions::leading_bytes;
use crate::transcode_error::TranscodeError;

use std::fmt::Display;
use std::str::FromStr;

/// Byte order used to decode the numeric annotation of a row.
///
/// The hex rendering is never affected by it; hex digits always follow the file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endianness {
    /// Least significant byte first.
    #[default]
    Little,
    /// Most significant byte first.
    Big,
}

impl FromStr for Endianness {
    type Err = TranscodeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "l" | "little" => Ok(Endianness::Little),
            "b" | "big" => Ok(Endianness::Big),
            other => Err(TranscodeError::UnknownEndianness(other.to_string())),
        }
    }
}

impl Display for Endianness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endianness::Little => write!(f, "little"),
            Endianness::Big => write!(f, "big"),
        }
    }
}

/// Numeric types a row can be annotated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericFormat {
    /// Signed 16 bit integer.
    Int16,
    /// Unsigned 16 bit integer.
    UInt16,
    /// Signed 32 bit integer.
    Int32,
    /// Unsigned 32 bit integer.
    UInt32,
    /// Signed 64 bit integer.
    Int64,
    /// Unsigned 64 bit integer.
    UInt64,
    /// IEEE 754 single precision float.
    Float32,
    /// IEEE 754 double precision float.
    Float64,
}

/// A value decoded from the leading bytes of a row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericValue {
    /// See [NumericFormat::Int16].
    Int16(i16),
    /// See [NumericFormat::UInt16].
    UInt16(u16),
    /// See [NumericFormat::Int32].
    Int32(i32),
    /// See [NumericFormat::UInt32].
    UInt32(u32),
    /// See [NumericFormat::Int64].
    Int64(i64),
    /// See [NumericFormat::UInt64].
    UInt64(u64),
    /// See [NumericFormat::Float32].
    Float32(f32),
    /// See [NumericFormat::Float64].
    Float64(f64),
}

macro_rules! DecodeAs {
    ($bytes:ident, $endianness:ident, $ty:ty, $variant:ident) => {
        leading_bytes::<{ std::mem::size_of::<$ty>() }>($bytes).map(|raw| {
            NumericValue::$variant(match $endianness {
                Endianness::Little => <$ty>::from_le_bytes(raw),
                Endianness::Big => <$ty>::from_be_bytes(raw),
            })
        })
    };
}

impl NumericFormat {
    /// All the supported formats.
    pub const ALL: [NumericFormat; 8] = [
        NumericFormat::Int16,
        NumericFormat::UInt16,
        NumericFormat::Int32,
        NumericFormat::UInt32,
        NumericFormat::Int64,
        NumericFormat::UInt64,
        NumericFormat::Float32,
        NumericFormat::Float64,
    ];

    /// Number of bytes read to decode a value of this format.
    pub const fn width(&self) -> usize {
        match self {
            NumericFormat::Int16 | NumericFormat::UInt16 => 2,
            NumericFormat::Int32 | NumericFormat::UInt32 | NumericFormat::Float32 => 4,
            NumericFormat::Int64 | NumericFormat::UInt64 | NumericFormat::Float64 => 8,
        }
    }

    /// Number of bits read to decode a value of this format.
    pub const fn bits(&self) -> usize {
        self.width() * 8
    }

    /// Decodes the first [width](Self::width) bytes of `bytes`.
    ///
    /// Returns `None` when `bytes` is too short; any bit pattern of the right length is a valid
    /// value.
    pub fn decode(&self, bytes: &[u8], endianness: Endianness) -> Option<NumericValue> {
        match self {
            NumericFormat::Int16 => DecodeAs!(bytes, endianness, i16, Int16),
            NumericFormat::UInt16 => DecodeAs!(bytes, endianness, u16, UInt16),
            NumericFormat::Int32 => DecodeAs!(bytes, endianness, i32, Int32),
            NumericFormat::UInt32 => DecodeAs!(bytes, endianness, u32, UInt32),
            NumericFormat::Int64 => DecodeAs!(bytes, endianness, i64, Int64),
            NumericFormat::UInt64 => DecodeAs!(bytes, endianness, u64, UInt64),
            NumericFormat::Float32 => DecodeAs!(bytes, endianness, f32, Float32),
            NumericFormat::Float64 => DecodeAs!(bytes, endianness, f64, Float64),
        }
    }
}

impl FromStr for NumericFormat {
    type Err = TranscodeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Int16" => Ok(NumericFormat::Int16),
            "UInt16" => Ok(NumericFormat::UInt16),
            "Int32" => Ok(NumericFormat::Int32),
            "UInt32" => Ok(NumericFormat::UInt32),
            "Int64" | "BigInt64" => Ok(NumericFormat::Int64),
            "UInt64" | "BigUInt64" => Ok(NumericFormat::UInt64),
            "Float32" | "Float" => Ok(NumericFormat::Float32),
            "Float64" | "Double" => Ok(NumericFormat::Float64),
            other => Err(TranscodeError::UnknownNumericFormat(other.to_string())),
        }
    }
}

impl Display for NumericFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            NumericFormat::Int16 => "Int16",
            NumericFormat::UInt16 => "UInt16",
            NumericFormat::Int32 => "Int32",
            NumericFormat::UInt32 => "UInt32",
            NumericFormat::Int64 => "Int64",
            NumericFormat::UInt64 => "UInt64",
            NumericFormat::Float32 => "Float32",
            NumericFormat::Float64 => "Float64",
        };
        write!(f, "{}", name)
    }
}

impl Display for NumericValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumericValue::Int16(value) => write!(f, "{}", value),
            NumericValue::UInt16(value) => write!(f, "{}", value),
            NumericValue::Int32(value) => write!(f, "{}", value),
            NumericValue::UInt32(value) => write!(f, "{}", value),
            NumericValue::Int64(value) => write!(f, "{}", value),
            NumericValue::UInt64(value) => write!(f, "{}", value),
            NumericValue::Float32(value) => write_float(f, f64::from(*value)),
            NumericValue::Float64(value) => write_float(f, *value),
        }
    }
}

/// Magnitudes in `[PLAIN_FLOAT_MIN, PLAIN_FLOAT_MAX)` are written as plain decimals, the rest
/// in exponent notation, so a line never grows with the magnitude of the value.
const PLAIN_FLOAT_MIN: f64 = 1e-6;
const PLAIN_FLOAT_MAX: f64 = 1e21;

/// Writes the shortest text that reads back as `value`: `0`, `NaN`, `-Infinity`, `0.25`,
/// `1e+300`, `5e-324`.
fn write_float(f: &mut std::fmt::Formatter<'_>, value: f64) -> std::fmt::Result {
    if value.is_nan() {
        return write!(f, "NaN");
    }
    if value.is_infinite() {
        let sign = if value < 0.0 { "-" } else { "" };
        return write!(f, "{}Infinity", sign);
    }
    // Negative zero prints as `0`.
    if value == 0.0 {
        return write!(f, "0");
    }
    if (PLAIN_FLOAT_MIN..PLAIN_FLOAT_MAX).contains(&value.abs()) {
        return write!(f, "{}", value);
    }
    let scientific = format!("{:e}", value);
    match scientific.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            write!(f, "{}e+{}", mantissa, exponent)
        }
        _ => write!(f, "{}", scientific),
    }
}
