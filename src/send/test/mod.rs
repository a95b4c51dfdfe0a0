use std::collections::VecDeque;
use std::time::Duration;

use crate::transport::Transport;
use crate::Error;



/// Transport double recording every write and serving scripted reads.
pub(crate) struct MemTransport {
    pub written: Vec<u8>,
    pub write_sizes: Vec<usize>,
    pub reads: VecDeque<Vec<u8>>,
}

impl MemTransport {
    pub fn new() -> Self {
        MemTransport {
            written: Vec::new(),
            write_sizes: Vec::new(),
            reads: VecDeque::new(),
        }
    }

    /// The bytes written after the header block.
    pub fn body_bytes(&self) -> &[u8] {
        let prelude = self.write_sizes.first().copied().unwrap_or(0);
        &self.written[prelude..]
    }
}

impl Transport for MemTransport {
    fn write(&mut self, data: &[u8]) -> Result<(), Error> {
        self.written.extend_from_slice(data);
        self.write_sizes.push(data.len());
        Ok(())
    }

    fn read_into(&mut self, buf: &mut [u8], _timeout: Option<Duration>) -> Result<usize, Error> {
        let Some(data) = self.reads.pop_front() else {
            return Ok(0);
        };

        let n = data.len().min(buf.len());
        buf[..n].copy_from_slice(&data[..n]);

        if n < data.len() {
            self.reads.push_front(data[n..].to_vec());
        }

        Ok(n)
    }
}
