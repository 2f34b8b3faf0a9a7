use crate::numeric_format::NumericValue;

use std::fmt::Display;

/// Separator between the hex bytes and the decoded value of a line.
pub const ANNOTATION_SEPARATOR: &str = "   # ";

/// The text form of one chunk.
///
/// Its [Display] output is the line without the trailing line break, `"<hex>"` or
/// `"<hex>   # <value>"`.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedLine {
    hex: String,
    annotation: Option<NumericValue>,
}

impl RenderedLine {
    /// Builds a line from its hex text and optional value.
    pub fn new(hex: String, annotation: Option<NumericValue>) -> Self {
        RenderedLine { hex, annotation }
    }

    /// The hex bytes of the chunk.
    pub fn hex(&self) -> &str {
        &self.hex
    }

    /// The decoded value, if a format is configured and the chunk was wide enough.
    pub fn annotation(&self) -> Option<NumericValue> {
        self.annotation
    }
}

impl Display for RenderedLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.hex)?;
        if let Some(value) = &self.annotation {
            write!(f, "{}{}", ANNOTATION_SEPARATOR, value)?;
        }
        Ok(())
    }
}
