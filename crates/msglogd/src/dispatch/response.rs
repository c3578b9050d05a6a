//! Reply framing for the line protocol.
//!
//! Only `dump_all` produces a reply: one `\n`-terminated line per matching
//! message with no header or trailer. Error replies are opt-in and use a
//! single `error: <explanation>\n` line.

use std::io::{self, Write};

use super::errors::ParseError;

/// Writer that frames replies onto a connection.
pub struct ResponseWriter<W> {
    writer: W,
}

impl<W: Write> ResponseWriter<W> {
    /// Creates a response writer wrapping the given output stream.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes each rendered message as its own line and flushes.
    ///
    /// Returns the number of lines written.
    ///
    /// # Errors
    ///
    /// Returns an error if writing or flushing fails.
    pub fn write_dump<I>(&mut self, lines: I) -> io::Result<usize>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut written = 0;
        for line in lines {
            self.writer.write_all(line.as_ref().as_bytes())?;
            self.writer.write_all(b"\n")?;
            written += 1;
        }
        self.writer.flush()?;
        Ok(written)
    }

    /// Writes the explanation of a rejected request and flushes.
    ///
    /// # Errors
    ///
    /// Returns an error if writing or flushing fails.
    pub fn write_error(&mut self, error: &ParseError) -> io::Result<()> {
        writeln!(self.writer, "error: {error}")?;
        self.writer.flush()
    }
}
