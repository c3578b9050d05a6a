//! Line-protocol client used by socket-level scenarios.

use std::io::{self, BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpStream};
use std::time::Duration;

const REPLY_TIMEOUT: Duration = Duration::from_secs(2);
const SILENCE_WINDOW: Duration = Duration::from_millis(200);

/// Connected client speaking the collector protocol.
pub struct TestClient {
    writer: TcpStream,
    reader: BufReader<TcpStream>,
}

impl TestClient {
    /// Connects to `addr`.
    pub fn connect(addr: SocketAddr) -> io::Result<Self> {
        let writer = TcpStream::connect(addr)?;
        let reader = BufReader::new(writer.try_clone()?);
        Ok(Self { writer, reader })
    }

    /// Sends `line` followed by the `\r\n` delimiter.
    pub fn send(&mut self, line: &str) -> io::Result<()> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\r\n")?;
        self.writer.flush()
    }

    /// Reads one `\n`-terminated reply line without its terminator.
    pub fn receive(&mut self) -> io::Result<String> {
        self.reader.get_ref().set_read_timeout(Some(REPLY_TIMEOUT))?;
        let mut line = String::new();
        let read = self.reader.read_line(&mut line)?;
        if read == 0 {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof));
        }
        if line.ends_with('\n') {
            line.pop();
        }
        Ok(line)
    }

    /// Returns `true` if nothing arrives within a short window.
    pub fn is_silent(&mut self) -> io::Result<bool> {
        self.reader.get_ref().set_read_timeout(Some(SILENCE_WINDOW))?;
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(_) => Ok(false),
            Err(error)
                if matches!(
                    error.kind(),
                    io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
                ) =>
            {
                Ok(true)
            }
            Err(error) => Err(error),
        }
    }
}
