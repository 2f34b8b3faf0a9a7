use crate::cancellation::CancelToken;
use crate::configuration::Configuration;
use crate::transcode_error::TranscodeError;
use crate::transcoder::{TranscodeSummary, Transcoder};

use std::io::{Read, Write};
use std::thread;

/// A source and the sink receiving its lines, owned by one side of a pair.
pub struct Stream<R, W> {
    /// The binary data to render.
    pub input: R,
    /// Where the lines are written.
    pub output: W,
}

impl<R, W> Stream<R, W> {
    /// Pairs a source with its sink.
    pub fn new(input: R, output: W) -> Self {
        Stream { input, output }
    }
}

/// Outcome of both sides of a pair; one side failing does not affect the other.
#[derive(Debug)]
pub struct PairOutcome {
    /// Result of the first stream.
    pub left: Result<TranscodeSummary, TranscodeError>,
    /// Result of the second stream.
    pub right: Result<TranscodeSummary, TranscodeError>,
}

impl PairOutcome {
    /// Whether both sides completed.
    pub fn is_ok(&self) -> bool {
        self.left.is_ok() && self.right.is_ok()
    }

    /// Returns both summaries, or the first error found looking at the left side first.
    pub fn into_result(self) -> Result<(TranscodeSummary, TranscodeSummary), TranscodeError> {
        Ok((self.left?, self.right?))
    }
}

/// Transcodes two streams with the same configuration, each one on its own thread.
///
/// The configuration is checked before any thread starts, so an invalid one leaves both
/// outputs untouched. Both threads are joined before returning; each one drops its stream when
/// done, cancelled or failed.
///
/// # Errors
///
/// [TranscodeError::FormatExceedsRow] if the configuration is invalid. Per stream failures are
/// reported inside the [PairOutcome].
pub fn transcode_pair<R1, W1, R2, W2>(
    config: Configuration,
    left: Stream<R1, W1>,
    right: Stream<R2, W2>,
    cancel: &CancelToken,
) -> Result<PairOutcome, TranscodeError>
where
    R1: Read + Send,
    W1: Write + Send,
    R2: Read + Send,
    W2: Write + Send,
{
    let transcoder = Transcoder::new(config)?;
    log::debug!(
        "Transcoding pair: bytes_per_row={0}, format={1:?}, endianness={2}",
        config.bytes_per_row(),
        config.numeric_format(),
        config.endianness()
    );
    let (left, right) = thread::scope(|scope| {
        let left_handle = scope.spawn(|| run_side(&transcoder, left, cancel));
        let right = run_side(&transcoder, right, cancel);
        (join(left_handle), right)
    });
    Ok(PairOutcome { left, right })
}

fn run_side<R: Read, W: Write>(
    transcoder: &Transcoder,
    stream: Stream<R, W>,
    cancel: &CancelToken,
) -> Result<TranscodeSummary, TranscodeError> {
    let Stream {
        mut input,
        mut output,
    } = stream;
    transcoder.transcode_with_cancel(&mut input, &mut output, cancel)
}

fn join(
    handle: thread::ScopedJoinHandle<'_, Result<TranscodeSummary, TranscodeError>>,
) -> Result<TranscodeSummary, TranscodeError> {
    match handle.join() {
        Ok(result) => result,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}
