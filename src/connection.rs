//! Transport setup and newline-delimited message framing.

use crate::error::ClientError;
use crate::protocol::{ClientMessage, ServerMessage};
use log::trace;
use native_tls::{TlsConnector, TlsStream};
use std::io::{ErrorKind, Read, Write};
use std::net::TcpStream;

/// Default server port for plain TCP.
pub const DEFAULT_PORT: u16 = 27993;
/// Default server port when TLS is enabled.
pub const DEFAULT_TLS_PORT: u16 = 27994;

const READ_CHUNK: usize = 1024;

/// A byte stream to the server, plain or TLS-wrapped, so the rest of the
/// client does not care which transport is underneath.
pub enum Transport {
    Plain(TcpStream),
    Tls(Box<TlsStream<TcpStream>>),
}

impl Read for Transport {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            Transport::Plain(stream) => stream.read(buf),
            Transport::Tls(stream) => stream.read(buf),
        }
    }
}

impl Write for Transport {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            Transport::Plain(stream) => stream.write(buf),
            Transport::Tls(stream) => stream.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            Transport::Plain(stream) => stream.flush(),
            Transport::Tls(stream) => stream.flush(),
        }
    }
}

/// Open a connection to `host:port`, negotiating TLS before any protocol
/// bytes when requested. Connect failures are fatal and not retried.
pub fn connect(host: &str, port: u16, tls: bool) -> Result<Transport, ClientError> {
    let tcp = TcpStream::connect((host, port))?;
    if tls {
        let connector = TlsConnector::new().map_err(|e| ClientError::Tls(e.to_string()))?;
        let stream = connector
            .connect(host, tcp)
            .map_err(|e| ClientError::Tls(e.to_string()))?;
        Ok(Transport::Tls(Box::new(stream)))
    } else {
        Ok(Transport::Plain(tcp))
    }
}

/// Newline-framed JSON messaging over an arbitrary byte stream.
///
/// Incoming bytes accumulate in an internal buffer and are handed out one
/// line per call, so several messages arriving in a single read are never
/// dropped or reordered. Generic over the stream so tests can drive it
/// with in-memory fakes.
pub struct Connection<S> {
    stream: S,
    buffer: Vec<u8>,
}

impl<S: Read + Write> Connection<S> {
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            buffer: Vec::new(),
        }
    }

    /// Serialize `msg` compactly, append the terminating newline and write
    /// every byte, looping on partial writes.
    pub fn send(&mut self, msg: &ClientMessage) -> Result<(), ClientError> {
        let mut line = serde_json::to_vec(msg)
            .map_err(|e| ClientError::protocol(format!("failed to encode message: {e}")))?;
        line.push(b'\n');
        trace!("send: {}", String::from_utf8_lossy(&line).trim_end());

        let mut sent = 0;
        while sent < line.len() {
            let written = self.stream.write(&line[sent..])?;
            if written == 0 {
                // A successful zero-length write means the peer is gone.
                return Err(ClientError::Connection(std::io::Error::new(
                    ErrorKind::WriteZero,
                    "socket connection is broken",
                )));
            }
            sent += written;
        }
        self.stream.flush()?;
        Ok(())
    }

    /// Block until one complete line is available and parse it as a server
    /// message.
    pub fn receive(&mut self) -> Result<ServerMessage, ClientError> {
        let line = self.read_line()?;
        let text = std::str::from_utf8(&line)
            .map_err(|_| ClientError::protocol("server message is not valid UTF-8"))?;
        trace!("recv: {text}");
        serde_json::from_str(text)
            .map_err(|e| ClientError::protocol(format!("malformed server message: {e}")))
    }

    /// Extract exactly one newline-terminated line, reading more bytes
    /// only when the buffer holds no complete line yet. Bytes past the
    /// newline stay buffered for the next call.
    fn read_line(&mut self) -> Result<Vec<u8>, ClientError> {
        loop {
            if let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
                let mut line: Vec<u8> = self.buffer.drain(..=pos).collect();
                line.pop();
                return Ok(line);
            }

            let mut chunk = [0u8; READ_CHUNK];
            let count = self.stream.read(&mut chunk)?;
            if count == 0 {
                return Err(ClientError::Connection(std::io::Error::new(
                    ErrorKind::UnexpectedEof,
                    "connection closed before a complete message arrived",
                )));
            }
            self.buffer.extend_from_slice(&chunk[..count]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// In-memory stream: canned input on the read side, captured output on
    /// the write side, with a configurable per-call write cap.
    struct FakeStream {
        input: Cursor<Vec<u8>>,
        output: Vec<u8>,
        max_write: usize,
    }

    impl FakeStream {
        fn new(input: &str) -> Self {
            Self {
                input: Cursor::new(input.as_bytes().to_vec()),
                output: Vec::new(),
                max_write: usize::MAX,
            }
        }

        fn with_short_writes(input: &str, max_write: usize) -> Self {
            let mut stream = Self::new(input);
            stream.max_write = max_write;
            stream
        }
    }

    impl Read for FakeStream {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            self.input.read(buf)
        }
    }

    impl Write for FakeStream {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            let count = buf.len().min(self.max_write);
            self.output.extend_from_slice(&buf[..count]);
            Ok(count)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn send_writes_compact_json_line() {
        let mut conn = Connection::new(FakeStream::new(""));
        conn.send(&ClientMessage::Hello {
            northeastern_username: "player1".to_string(),
        })
        .unwrap();
        assert_eq!(
            conn.stream.output,
            b"{\"type\":\"hello\",\"northeastern_username\":\"player1\"}\n"
        );
    }

    #[test]
    fn send_loops_on_partial_writes() {
        let mut conn = Connection::new(FakeStream::with_short_writes("", 3));
        conn.send(&ClientMessage::Guess {
            id: "1".to_string(),
            word: "least".to_string(),
        })
        .unwrap();
        assert_eq!(
            conn.stream.output,
            b"{\"type\":\"guess\",\"id\":\"1\",\"word\":\"least\"}\n"
        );
    }

    #[test]
    fn receive_parses_one_message() {
        let mut conn = Connection::new(FakeStream::new(
            "{\"type\":\"start\",\"id\":\"9\"}\n",
        ));
        let msg = conn.receive().unwrap();
        assert!(matches!(msg, ServerMessage::Start { .. }));
    }

    #[test]
    fn two_messages_in_one_read_are_returned_in_order() {
        let input = "{\"type\":\"start\",\"id\":\"9\"}\n{\"type\":\"bye\",\"id\":\"9\",\"flag\":\"tok\"}\n";
        let mut conn = Connection::new(FakeStream::new(input));

        assert!(matches!(conn.receive().unwrap(), ServerMessage::Start { .. }));
        match conn.receive().unwrap() {
            ServerMessage::Bye { flag, .. } => assert_eq!(flag, "tok"),
            other => panic!("expected bye, got {other:?}"),
        }
    }

    #[test]
    fn eof_before_newline_is_a_connection_error() {
        let mut conn = Connection::new(FakeStream::new("{\"type\":\"start\""));
        let result = conn.receive();
        assert!(matches!(result, Err(ClientError::Connection(_))));
    }

    #[test]
    fn malformed_json_is_a_protocol_error() {
        let mut conn = Connection::new(FakeStream::new("not json at all\n"));
        let result = conn.receive();
        assert!(matches!(result, Err(ClientError::Protocol(_))));
    }

    #[test]
    fn invalid_utf8_is_a_protocol_error() {
        let mut conn = Connection::new(FakeStream {
            input: Cursor::new(vec![0xff, 0xfe, b'\n']),
            output: Vec::new(),
            max_write: usize::MAX,
        });
        let result = conn.receive();
        assert!(matches!(result, Err(ClientError::Protocol(_))));
    }
}
