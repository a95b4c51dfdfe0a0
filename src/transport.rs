use std::io::{Read, Write};
use std::net::TcpStream;
use std::time::Duration;

use crate::Error;

/// Connection a transmission writes to and reads from.
///
/// The trait hides what kind of socket is underneath. An implementation
/// is expected to be buffer-free: `write` pushes the entire slice to the
/// peer and `read_into` surfaces whatever bytes are available, waiting at
/// most `timeout` for the first of them.
pub trait Transport {
    /// Write the entire buffer to the peer.
    fn write(&mut self, data: &[u8]) -> Result<(), Error>;

    /// Read available bytes into `buf`.
    ///
    /// Blocks until at least one byte arrives or `timeout` passes, in
    /// which case the error is [`Error::Timeout`]. `Ok(0)` means the
    /// peer closed the connection in an orderly way.
    fn read_into(&mut self, buf: &mut [u8], timeout: Option<Duration>) -> Result<usize, Error>;
}

impl Transport for TcpStream {
    fn write(&mut self, data: &[u8]) -> Result<(), Error> {
        Write::write_all(self, data)?;
        Ok(())
    }

    fn read_into(&mut self, buf: &mut [u8], timeout: Option<Duration>) -> Result<usize, Error> {
        self.set_read_timeout(timeout)?;
        let n = Read::read(self, buf)?;
        Ok(n)
    }
}
