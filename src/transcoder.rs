use crate::cancellation::CancelToken;
use crate::chunk::Chunk;
use crate::chunk_reader::ChunkReader;
use crate::configuration::Configuration;
use crate::rendered_line::RenderedLine;
use crate::transcode_error::TranscodeError;

use std::io::{BufWriter, Read, Write};

/// Renders a single chunk.
///
/// The annotation is only present when a numeric format is configured and the chunk holds at
/// least as many bytes as the format needs; the value is read from the first bytes of the chunk.
pub fn render_chunk(chunk: &Chunk, config: &Configuration) -> RenderedLine {
    let annotation = config
        .numeric_format()
        .filter(|format| chunk.len() >= format.width())
        .and_then(|format| format.decode(chunk.as_bytes(), config.endianness()));
    RenderedLine::new(chunk.to_hex(), annotation)
}

/// Counters of a completed transcoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranscodeSummary {
    /// Number of lines written, one per chunk.
    pub lines: u64,
    /// Number of input bytes consumed.
    pub bytes: u64,
}

/// Lazy iterator over the lines of a source, in input order.
///
/// Yields a [TranscodeError::Read] and stops if the source fails.
pub struct Lines<R> {
    chunks: ChunkReader<R>,
    config: Configuration,
}

impl<R: Read> Lines<R> {
    /// Total number of input bytes rendered so far.
    pub fn consumed(&self) -> u64 {
        self.chunks.consumed()
    }
}

impl<R: Read> Iterator for Lines<R> {
    type Item = Result<RenderedLine, TranscodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        let chunk = self.chunks.next()?;
        Some(
            chunk
                .map(|chunk| render_chunk(&chunk, &self.config))
                .map_err(TranscodeError::Read),
        )
    }
}

/// Turns binary data into hex text, one line per row.
#[derive(Debug, Clone, Copy)]
pub struct Transcoder {
    config: Configuration,
}

impl Transcoder {
    /// Creates a transcoder for a validated configuration.
    ///
    /// # Errors
    ///
    /// [TranscodeError::FormatExceedsRow] if the numeric format does not fit in a row.
    pub fn new(config: Configuration) -> Result<Self, TranscodeError> {
        config.validate()?;
        Ok(Transcoder { config })
    }

    /// The configuration used by this transcoder.
    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// Returns the lines of `input` without their line breaks.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use oxdiff::{BytesPerRow, Configuration, Endianness, NumericFormat, Transcoder};
    ///
    /// let config = Configuration::default()
    ///     .with_bytes_per_row(BytesPerRow::try_from(4_usize)?)
    ///     .with_numeric_format(Some(NumericFormat::UInt16))
    ///     .with_endianness(Endianness::Big);
    /// let transcoder = Transcoder::new(config)?;
    /// let lines = transcoder
    ///     .lines(Cursor::new([0x00_u8, 0xff, 0x10, 0x02, 0x01]))
    ///     .map(|line| line.map(|line| line.to_string()))
    ///     .collect::<Result<Vec<_>, _>>()?;
    /// assert_eq!(lines, vec!["00 FF 10 02   # 255", "01"]);
    /// # Ok::<(), oxdiff::TranscodeError>(())
    /// ```
    pub fn lines<R: Read>(&self, input: R) -> Lines<R> {
        Lines {
            chunks: ChunkReader::new(input, self.config.bytes_per_row()),
            config: self.config,
        }
    }

    /// Writes every line of `input` into `output`, each one followed by `\n`.
    ///
    /// # Errors
    ///
    /// [TranscodeError::Read] or [TranscodeError::Write] on I/O failures. The lines written
    /// before the failure are flushed to `output`.
    pub fn transcode(
        &self,
        input: &mut dyn Read,
        output: &mut dyn Write,
    ) -> Result<TranscodeSummary, TranscodeError> {
        self.run(input, output, None)
    }

    /// Same as [transcode](Self::transcode) but stops with [TranscodeError::Cancelled] as soon as
    /// `cancel` is triggered.
    pub fn transcode_with_cancel(
        &self,
        input: &mut dyn Read,
        output: &mut dyn Write,
        cancel: &CancelToken,
    ) -> Result<TranscodeSummary, TranscodeError> {
        self.run(input, output, Some(cancel))
    }

    /// Renders the data in the slice.
    ///
    /// # Examples
    ///
    /// ```
    /// use oxdiff::{BytesPerRow, Configuration, Transcoder};
    ///
    /// let config = Configuration::default().with_bytes_per_row(BytesPerRow::try_from(2_usize)?);
    /// let transcoder = Transcoder::new(config)?;
    /// assert_eq!(transcoder.transcode_slice(&[0x00, 0xff, 0x10]), "00 FF\n10\n");
    /// # Ok::<(), oxdiff::TranscodeError>(())
    /// ```
    pub fn transcode_slice(&self, data: &[u8]) -> String {
        data.chunks(self.config.bytes_per_row().get())
            .map(|raw_chunk| format!("{}\n", render_chunk(&Chunk::from(raw_chunk), &self.config)))
            .collect()
    }

    /// Renders the data in the `Vec`.
    ///
    /// # Examples
    ///
    /// ```
    /// use oxdiff::{Configuration, NumericFormat, Transcoder};
    ///
    /// let config = Configuration::default().with_numeric_format(Some(NumericFormat::Int16));
    /// let transcoder = Transcoder::new(config)?;
    /// let data = vec![0xfe, 0xff, 0, 0, 0, 0, 0, 0];
    /// assert_eq!(transcoder.transcode_vec(&data), "FE FF 00 00 00 00 00 00   # -2\n");
    /// # Ok::<(), oxdiff::TranscodeError>(())
    /// ```
    pub fn transcode_vec(&self, data: &Vec<u8>) -> String {
        self.transcode_slice(data.as_slice())
    }

    /// Renders the bytes of the string slice.
    ///
    /// # Examples
    ///
    /// ```
    /// use oxdiff::{BytesPerRow, Configuration, Transcoder};
    ///
    /// let config = Configuration::default().with_bytes_per_row(BytesPerRow::try_from(4_usize)?);
    /// let transcoder = Transcoder::new(config)?;
    /// assert_eq!(transcoder.transcode_str("abcde"), "61 62 63 64\n65\n");
    /// # Ok::<(), oxdiff::TranscodeError>(())
    /// ```
    pub fn transcode_str(&self, data: &str) -> String {
        self.transcode_slice(data.as_bytes())
    }

    fn run(
        &self,
        input: &mut dyn Read,
        output: &mut dyn Write,
        cancel: Option<&CancelToken>,
    ) -> Result<TranscodeSummary, TranscodeError> {
        let mut writer = BufWriter::new(output);
        let mut lines = self.lines(input);
        let mut summary = TranscodeSummary::default();
        let result = loop {
            if cancel.map_or(false, CancelToken::is_cancelled) {
                break Err(TranscodeError::Cancelled);
            }
            let line = match lines.next() {
                None => break Ok(()),
                Some(Ok(line)) => line,
                Some(Err(err)) => break Err(err),
            };
            if let Err(err) = writeln!(writer, "{}", line) {
                break Err(TranscodeError::Write(err));
            }
            summary.lines += 1;
        };
        summary.bytes = lines.consumed();
        let flushed = writer.flush().map_err(TranscodeError::Write);
        match result {
            Ok(()) => {
                flushed?;
                log::debug!(
                    "Transcoding finished: lines={0}, bytes={1}",
                    summary.lines,
                    summary.bytes
                );
                Ok(summary)
            }
            Err(err) => {
                log::warn!(
                    "Transcoding stopped after {0} lines: {1}",
                    summary.lines,
                    err
                );
                if let Err(flush_err) = flushed {
                    log::warn!("Partial output not flushed: {0}", flush_err);
                }
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::chunk::BytesPerRow;
    use crate::numeric_format::{Endianness, NumericFormat, NumericValue};
    use rstest::rstest;
    use std::io::Cursor;

    #[ctor::ctor]
    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn transcoder(
        bytes_per_row: usize,
        format: Option<NumericFormat>,
        endianness: Endianness,
    ) -> Transcoder {
        let config = Configuration::new(
            BytesPerRow::try_from(bytes_per_row).unwrap(),
            format,
            endianness,
        );
        Transcoder::new(config).unwrap()
    }

    #[rustfmt::skip]
    #[rstest]
    #[case(&[0x00, 0xff, 0x10, 0x02], 2, None, Endianness::Little, "00 FF\n10 02\n")]
    #[case(&[0x00, 0xff, 0x10, 0x02], 4, Some(NumericFormat::UInt16), Endianness::Little, "00 FF 10 02   # 65280\n")]
    #[case(&[0x00, 0xff, 0x10, 0x02], 4, Some(NumericFormat::UInt16), Endianness::Big, "00 FF 10 02   # 255\n")]
    #[case(&[0x01, 0x02, 0x03], 4, Some(NumericFormat::UInt32), Endianness::Little, "01 02 03\n")]
    #[case(&[0x01, 0x00, 0x02, 0x00, 0x03], 2, Some(NumericFormat::Int16), Endianness::Little, "01 00   # 1\n02 00   # 2\n03\n")]
    #[case(&[0xff, 0xfe, 0xfd], 1, None, Endianness::Big, "FF\nFE\nFD\n")]
    #[case(&[], 8, Some(NumericFormat::Float64), Endianness::Little, "")]
    #[case(&[0x01, 0, 0, 0, 0, 0, 0, 0], 8, Some(NumericFormat::Float64), Endianness::Little, "01 00 00 00 00 00 00 00   # 5e-324\n")]
    #[case(&[0xcd, 0xcc, 0xcc, 0x3d], 4, Some(NumericFormat::Float32), Endianness::Little, "CD CC CC 3D   # 0.10000000149011612\n")]
    fn test_transcode_slice(
        #[case] data: &[u8],
        #[case] bytes_per_row: usize,
        #[case] format: Option<NumericFormat>,
        #[case] endianness: Endianness,
        #[case] expected: &str,
    ) {
        let result = transcoder(bytes_per_row, format, endianness).transcode_slice(data);
        assert_eq!(result, expected);
    }

    #[test]
    fn test_render_chunk_short_final_chunk() {
        let config = Configuration::default().with_numeric_format(Some(NumericFormat::Int32));
        let line = render_chunk(&Chunk::from(vec![0xaa_u8, 0xbb, 0xcc]), &config);
        assert_eq!(line.annotation(), None);
        assert_eq!(line.hex(), "AA BB CC");
    }

    #[test]
    fn test_render_chunk_reads_leading_bytes() {
        let config = Configuration::default()
            .with_numeric_format(Some(NumericFormat::UInt16))
            .with_endianness(Endianness::Big);
        let chunk = Chunk::from(vec![0x01_u8, 0x02, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]);
        let line = render_chunk(&chunk, &config);
        assert_eq!(line.annotation(), Some(NumericValue::UInt16(0x0102)));
    }

    #[test]
    fn test_new_rejects_oversized_format() {
        let config = Configuration::default()
            .with_bytes_per_row(BytesPerRow::try_from(4_usize).unwrap())
            .with_numeric_format(Some(NumericFormat::UInt64));
        assert!(matches!(
            Transcoder::new(config),
            Err(TranscodeError::FormatExceedsRow { row_bits: 32, format_bits: 64, .. })
        ));
    }

    #[test]
    fn test_transcode_matches_slice() {
        let data: Vec<u8> = (0..=255).collect();
        let instance = transcoder(16, Some(NumericFormat::Float32), Endianness::Big);
        let mut output: Vec<u8> = Vec::new();
        let summary = instance
            .transcode(&mut Cursor::new(data.clone()), &mut output)
            .unwrap();
        assert_eq!(summary, TranscodeSummary { lines: 16, bytes: 256 });
        assert_eq!(String::from_utf8(output).unwrap(), instance.transcode_vec(&data));
    }

    #[test]
    fn test_transcode_str() {
        let result = transcoder(4, None, Endianness::Little).transcode_str("abcde");
        assert_eq!(result, "61 62 63 64\n65\n");
    }

    #[test]
    fn test_lines_are_lazy() {
        let instance = transcoder(2, None, Endianness::Little);
        let mut lines = instance.lines(Cursor::new(vec![1_u8, 2, 3, 4, 5, 6]));
        let first = lines.next().map(|line| line.unwrap().to_string());
        assert_eq!(first, Some("01 02".to_string()));
        assert_eq!(lines.consumed(), 2);
    }

    #[test]
    fn test_transcode_with_cancelled_token() {
        let instance = transcoder(2, None, Endianness::Little);
        let cancel = CancelToken::new();
        cancel.cancel();
        let mut output: Vec<u8> = Vec::new();
        let mut input = Cursor::new(vec![1_u8, 2, 3]);
        let result = instance.transcode_with_cancel(&mut input, &mut output, &cancel);
        assert!(matches!(result, Err(TranscodeError::Cancelled)));
        assert!(output.is_empty());
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "no space left"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "no space left"))
        }
    }

    #[test]
    fn test_transcode_surfaces_write_errors() {
        let instance = transcoder(2, None, Endianness::Little);
        let result = instance
            .transcode(&mut Cursor::new(vec![1_u8, 2, 3]), &mut FailingWriter)
            .map_err(|err| err.to_string());
        assert_eq!(result, Err("Error writing output: no space left".to_string()));
    }
}
