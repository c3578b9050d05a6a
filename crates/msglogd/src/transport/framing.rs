//! `\r\n` line framing over a byte stream.

use std::io::{self, Read};
use std::mem;

use super::FramingError;

/// Line terminator on the wire.
pub const DELIMITER: &[u8] = b"\r\n";

/// Longest accepted request line in bytes, excluding the delimiter.
pub const MAX_LINE_BYTES: usize = 64 * 1024;

const READ_CHUNK_BYTES: usize = 1024;

/// Splits a byte stream into request lines.
///
/// Bytes after a delimiter stay buffered for the next call, so clients may
/// pipeline several requests in one write. When the stream ends with an
/// unterminated line, that line is returned once before `None`. Lines are
/// decoded as UTF-8, with invalid sequences replaced.
#[derive(Debug)]
pub struct LineReader<R> {
    reader: R,
    buffer: Vec<u8>,
    scanned: usize,
    finished: bool,
}

impl<R: Read> LineReader<R> {
    /// Creates a line reader over `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
            scanned: 0,
            finished: false,
        }
    }

    /// Reads the next line without its delimiter.
    ///
    /// Returns `Ok(None)` once the stream is exhausted.
    ///
    /// # Errors
    ///
    /// Returns [`FramingError::Io`] if the stream fails and
    /// [`FramingError::LineTooLong`] if a line exceeds [`MAX_LINE_BYTES`].
    pub fn next_line(&mut self) -> Result<Option<String>, FramingError> {
        let mut chunk = [0_u8; READ_CHUNK_BYTES];
        loop {
            if let Some(line) = self.take_line()? {
                return Ok(Some(line));
            }
            if self.finished {
                return Ok(self.take_remainder());
            }
            enforce_line_limit(self.pending_len())?;

            let bytes_read = read_chunk_with_retry(&mut self.reader, &mut chunk)?;
            if bytes_read == 0 {
                self.finished = true;
            } else {
                self.buffer.extend_from_slice(&chunk[..bytes_read]);
            }
        }
    }

    fn take_line(&mut self) -> Result<Option<String>, FramingError> {
        // A delimiter may straddle the previous scan boundary.
        let start = self.scanned.saturating_sub(DELIMITER.len() - 1);
        let Some(offset) = find_delimiter(&self.buffer[start..]) else {
            self.scanned = self.buffer.len();
            return Ok(None);
        };
        let end = start + offset;
        enforce_line_limit(end)?;

        let line = decode(&self.buffer[..end]);
        self.buffer.drain(..end + DELIMITER.len());
        self.scanned = 0;
        Ok(Some(line))
    }

    fn take_remainder(&mut self) -> Option<String> {
        self.scanned = 0;
        if self.buffer.is_empty() {
            return None;
        }
        Some(decode(&mem::take(&mut self.buffer)))
    }

    // Buffered bytes that could still belong to the current line's content.
    fn pending_len(&self) -> usize {
        let partial_delimiter = usize::from(self.buffer.ends_with(&DELIMITER[..1]));
        self.buffer.len() - partial_delimiter
    }
}

impl<R: Read> Iterator for LineReader<R> {
    type Item = Result<String, FramingError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}

fn find_delimiter(bytes: &[u8]) -> Option<usize> {
    bytes
        .windows(DELIMITER.len())
        .position(|window| window == DELIMITER)
}

fn decode(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn read_chunk_with_retry<R: Read>(reader: &mut R, chunk: &mut [u8]) -> io::Result<usize> {
    loop {
        match reader.read(chunk) {
            Ok(read) => return Ok(read),
            Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
            Err(error) => return Err(error),
        }
    }
}

fn enforce_line_limit(size: usize) -> Result<(), FramingError> {
    if size > MAX_LINE_BYTES {
        return Err(FramingError::LineTooLong {
            limit: MAX_LINE_BYTES,
        });
    }
    Ok(())
}
