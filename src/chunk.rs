use crate::conversions::format_hex_pretty;
use crate::transcode_error::TranscodeError;

use std::fmt::Display;
use std::str::FromStr;

pub const MAX_BYTES_PER_ROW: usize = 64;

/// The width of a row, a power of two between 1 and 64 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BytesPerRow(usize);

impl BytesPerRow {
    /// Every accepted row width, smallest first.
    pub const ACCEPTED: [usize; 7] = [1, 2, 4, 8, 16, 32, 64];

    /// Number of bytes in a full row.
    pub const fn get(&self) -> usize {
        self.0
    }

    /// Number of bits in a full row.
    pub const fn bits(&self) -> usize {
        self.0 * 8
    }
}

impl Default for BytesPerRow {
    fn default() -> Self {
        BytesPerRow(8)
    }
}

impl TryFrom<usize> for BytesPerRow {
    type Error = TranscodeError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        if value > MAX_BYTES_PER_ROW || !value.is_power_of_two() {
            return Err(TranscodeError::InvalidBytesPerRow(value.to_string()));
        }
        Ok(BytesPerRow(value))
    }
}

impl FromStr for BytesPerRow {
    type Err = TranscodeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parsed = value
            .parse::<usize>()
            .map_err(|_| TranscodeError::InvalidBytesPerRow(value.to_string()))?;
        BytesPerRow::try_from(parsed)
    }
}

impl Display for BytesPerRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A contiguous slice of the input; every chunk but the last one is exactly one row wide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk(Vec<u8>);

impl Chunk {
    /// The raw bytes of the chunk.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Number of bytes in the chunk.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the chunk holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Uppercase hex pairs separated by single spaces, in file order.
    pub fn to_hex(&self) -> String {
        format_hex_pretty(&self.0)
    }
}

impl From<Vec<u8>> for Chunk {
    fn from(value: Vec<u8>) -> Self {
        Chunk(value)
    }
}

impl From<&[u8]> for Chunk {
    fn from(value: &[u8]) -> Self {
        Chunk(value.to_vec())
    }
}

impl Display for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(4)]
    #[case(8)]
    #[case(16)]
    #[case(32)]
    #[case(64)]
    fn test_bytes_per_row_accepted(#[case] value: usize) {
        let result = BytesPerRow::try_from(value).map(|row| row.get());
        assert_eq!(result.ok(), Some(value));
    }

    #[rstest]
    #[case(0)]
    #[case(3)]
    #[case(12)]
    #[case(128)]
    fn test_bytes_per_row_rejected(#[case] value: usize) {
        let result = BytesPerRow::try_from(value).map_err(|err| format!("{0}", err));
        assert_eq!(
            result,
            Err(format!(
                "Invalid bytes per row: {0} (accepted: 1, 2, 4, 8, 16, 32, 64)",
                value
            ))
        );
    }

    #[test]
    fn test_bytes_per_row_from_str() {
        assert_eq!("16".parse::<BytesPerRow>().ok(), BytesPerRow::try_from(16_usize).ok());
        let result = "sixteen".parse::<BytesPerRow>().map_err(|err| format!("{0}", err));
        assert_eq!(
            result,
            Err("Invalid bytes per row: sixteen (accepted: 1, 2, 4, 8, 16, 32, 64)".to_string())
        );
        assert!("-8".parse::<BytesPerRow>().is_err());
    }

    #[test]
    fn test_bytes_per_row_accepted_list() {
        let accepted: Vec<usize> = (0..=MAX_BYTES_PER_ROW * 2)
            .filter(|value| BytesPerRow::try_from(*value).is_ok())
            .collect();
        assert_eq!(accepted, BytesPerRow::ACCEPTED.to_vec());
    }

    #[test]
    fn test_bytes_per_row_default() {
        assert_eq!(BytesPerRow::default().get(), 8);
        assert_eq!(BytesPerRow::default().bits(), 64);
    }

    #[rstest]
    #[case(&[], "")]
    #[case(&[0x00], "00")]
    #[case(&[0x00, 0xff, 0x10, 0x02], "00 FF 10 02")]
    #[case(&[0xab, 0xcd, 0xef], "AB CD EF")]
    fn test_chunk_to_hex(#[case] input: &[u8], #[case] expected: &str) {
        let chunk = Chunk::from(input);
        assert_eq!(chunk.to_hex(), expected);
        assert_eq!(format!("{}", chunk), expected);
    }
}
