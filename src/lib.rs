#![warn(missing_docs)]

//! Renders binary data as text, one line per fixed size row, so two binary files can be
//! compared with any line based diff viewer.
//!
//! Each line holds the bytes of the row as uppercase hex pairs separated by a space. Optionally
//! the first bytes of the row are decoded as a number and appended after `   # `.
//!
//! ## Example
//! ```rust
//! use std::io::Cursor;
//! use oxdiff::{BytesPerRow, Configuration, Endianness, NumericFormat, Transcoder, TranscodeError};
//!
//! fn example() -> Result<(), TranscodeError> {
//!     let config = Configuration::default()
//!         .with_bytes_per_row(BytesPerRow::try_from(4_usize)?)
//!         .with_numeric_format(Some(NumericFormat::UInt16))
//!         .with_endianness(Endianness::Little);
//!     let transcoder = Transcoder::new(config)?;
//!     let mut output: Vec<u8> = Vec::new();
//!     transcoder.transcode(&mut Cursor::new([0x00_u8, 0xff, 0x10, 0x02]), &mut output)?;
//!     assert_eq!(output, b"00 FF 10 02   # 65280\n");
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! Two files are usually rendered together with [transcode_pair], which runs each side on its
//! own thread.

mod cancellation;
mod chunk;
mod chunk_reader;
mod configuration;
mod conversions;
mod numeric_format;
mod pair;
mod rendered_line;
mod transcode_error;
mod transcoder;

pub use crate::cancellation::CancelToken;
pub use crate::chunk::{BytesPerRow, Chunk};
pub use crate::configuration::Configuration;
pub use crate::numeric_format::{Endianness, NumericFormat, NumericValue};
pub use crate::pair::{transcode_pair, PairOutcome, Stream};
pub use crate::rendered_line::{RenderedLine, ANNOTATION_SEPARATOR};
pub use crate::transcode_error::TranscodeError;
pub use crate::transcoder::{render_chunk, Lines, TranscodeSummary, Transcoder};
