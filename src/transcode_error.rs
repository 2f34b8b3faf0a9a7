use crate::numeric_format::NumericFormat;
use thiserror::Error;

/// Errors raised while configuring or running a transcoding.
#[derive(Error, Debug)]
pub enum TranscodeError {
    /// The row width is not one of the supported powers of two.
    #[error("Invalid bytes per row: {0} (accepted: 1, 2, 4, 8, 16, 32, 64)")]
    InvalidBytesPerRow(String),
    /// The numeric format name is not recognized.
    #[error("Invalid numeric format: {0}")]
    UnknownNumericFormat(String),
    /// The endianness name is not recognized.
    #[error("Invalid endianness: {0} (accepted: l, little, b, big)")]
    UnknownEndianness(String),
    /// The numeric format does not fit in a single row.
    #[error("Format {format} ({format_bits} bits) exceeds {row_bits} bits per row")]
    FormatExceedsRow {
        /// The configured format.
        format: NumericFormat,
        /// Bits needed to decode the format.
        format_bits: usize,
        /// Bits available in one row.
        row_bits: usize,
    },
    /// Reading the source failed.
    #[error("Error reading input: {0}")]
    Read(std::io::Error),
    /// Writing the rendered lines failed.
    #[error("Error writing output: {0}")]
    Write(std::io::Error),
    /// The transcoding was interrupted through a [CancelToken](crate::CancelToken).
    #[error("Transcoding cancelled")]
    Cancelled,
}
