use crate::chunk::BytesPerRow;
use crate::numeric_format::{Endianness, NumericFormat};
use crate::transcode_error::TranscodeError;

/// Settings shared by every stream of a run.
///
/// Defaults to 8 bytes per row, no numeric annotation and little endian decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Configuration {
    bytes_per_row: BytesPerRow,
    numeric_format: Option<NumericFormat>,
    endianness: Endianness,
}

impl Configuration {
    /// Creates a configuration from its three fields.
    pub fn new(
        bytes_per_row: BytesPerRow,
        numeric_format: Option<NumericFormat>,
        endianness: Endianness,
    ) -> Self {
        Configuration {
            bytes_per_row,
            numeric_format,
            endianness,
        }
    }

    /// Replaces the row width.
    pub fn with_bytes_per_row(mut self, bytes_per_row: BytesPerRow) -> Self {
        self.bytes_per_row = bytes_per_row;
        self
    }

    /// Replaces the numeric annotation format; `None` disables annotations.
    pub fn with_numeric_format(mut self, numeric_format: Option<NumericFormat>) -> Self {
        self.numeric_format = numeric_format;
        self
    }

    /// Replaces the byte order used to decode annotations.
    pub fn with_endianness(mut self, endianness: Endianness) -> Self {
        self.endianness = endianness;
        self
    }

    /// The row width.
    pub fn bytes_per_row(&self) -> BytesPerRow {
        self.bytes_per_row
    }

    /// The numeric annotation format, if any.
    pub fn numeric_format(&self) -> Option<NumericFormat> {
        self.numeric_format
    }

    /// The byte order used to decode annotations.
    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// Checks that the numeric format fits in one row.
    ///
    /// # Errors
    ///
    /// [TranscodeError::FormatExceedsRow] if the format needs more bits than a row holds.
    pub fn validate(&self) -> Result<(), TranscodeError> {
        match self.numeric_format {
            Some(format) if format.bits() > self.bytes_per_row.bits() => {
                Err(TranscodeError::FormatExceedsRow {
                    format,
                    format_bits: format.bits(),
                    row_bits: self.bytes_per_row.bits(),
                })
            }
            _ => Ok(()),
        }
    }
}
