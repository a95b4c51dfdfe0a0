use std::time::Duration;

use crate::transport::Transport;
use crate::util::log_data;
use crate::{Error, TransmitConfig};

/// Accumulating reader over a [`Transport`].
///
/// Requests bytes from the transport in blocks of the configured
/// `socket_read_chunk_size` instead of the small amount a parser happens
/// to need next. Whoever parses the buffered bytes drains them from the
/// front with [`consume`][BufferedReader::consume].
pub struct BufferedReader {
    buf: Vec<u8>,
    chunk_size: usize,
}

impl BufferedReader {
    /// Reader sized by the given config.
    ///
    /// The chunk size is snapshotted here. Later changes to the config do
    /// not affect this reader.
    pub fn new(config: &TransmitConfig) -> Self {
        BufferedReader {
            buf: Vec::new(),
            chunk_size: config.socket_read_chunk_size(),
        }
    }

    /// Read once from the transport, appending to the buffer.
    ///
    /// Issues a single `read_into` of up to the configured block size and
    /// returns how many bytes arrived. `Ok(0)` means the peer closed the
    /// connection. On [`Error::Timeout`] or any other failure the buffer
    /// keeps the bytes it already had.
    pub fn fill(
        &mut self,
        transport: &mut dyn Transport,
        timeout: Option<Duration>,
    ) -> Result<usize, Error> {
        let offset = self.buf.len();
        self.buf.resize(offset + self.chunk_size, 0);

        match transport.read_into(&mut self.buf[offset..], timeout) {
            Ok(n) => {
                self.buf.truncate(offset + n);
                log_data(&self.buf[offset..]);
                Ok(n)
            }
            Err(e) => {
                self.buf.truncate(offset);
                Err(e)
            }
        }
    }

    /// The bytes read so far and not yet consumed.
    pub fn buffer(&self) -> &[u8] {
        &self.buf
    }

    /// Discard `n` bytes from the front of the buffer.
    ///
    /// Consuming more than is buffered empties the buffer.
    pub fn consume(&mut self, n: usize) {
        let n = n.min(self.buf.len());
        self.buf.drain(..n);
    }

    /// Number of unconsumed bytes.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True when no unconsumed bytes remain.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}
