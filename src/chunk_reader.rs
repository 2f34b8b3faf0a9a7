use crate::chunk::{BytesPerRow, Chunk};

use std::io::{ErrorKind, Read};

/// Splits a [Read] source into consecutive chunks of one row each.
///
/// Short reads are retried until the row is full or the source is exhausted, so the chunk
/// boundaries only depend on the row width. After an error or the end of input the iterator
/// is fused.
pub struct ChunkReader<R> {
    input: R,
    bytes_per_row: usize,
    finished: bool,
    consumed: u64,
}

impl<R: Read> ChunkReader<R> {
    pub fn new(input: R, bytes_per_row: BytesPerRow) -> Self {
        ChunkReader {
            input,
            bytes_per_row: bytes_per_row.get(),
            finished: false,
            consumed: 0,
        }
    }

    /// Total number of bytes returned in chunks so far.
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    fn fill(&mut self, buffer: &mut [u8]) -> std::io::Result<usize> {
        let mut filled = 0;
        while filled < buffer.len() {
            match self.input.read(&mut buffer[filled..]) {
                Ok(0) => break,
                Ok(readed) => filled += readed,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }
        Ok(filled)
    }
}

impl<R: Read> Iterator for ChunkReader<R> {
    type Item = std::io::Result<Chunk>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let mut buffer = vec![0_u8; self.bytes_per_row];
        let filled = match self.fill(&mut buffer) {
            Ok(filled) => filled,
            Err(err) => {
                self.finished = true;
                return Some(Err(err));
            }
        };
        if filled < self.bytes_per_row {
            self.finished = true;
            if filled == 0 {
                return None;
            }
            buffer.truncate(filled);
        }
        self.consumed += filled as u64;
        log::trace!("Chunk read: offset={0}, length={1}", self.consumed - filled as u64, filled);
        Some(Ok(Chunk::from(buffer)))
    }
}
