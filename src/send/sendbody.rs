use std::io::{ErrorKind, Read, Write};

use crate::body::{Body, BodySource};
use crate::framing::FramingStrategy;
use crate::transport::Transport;
use crate::util::log_data;
use crate::Error;

use super::state::*;
use super::Transmitter;

impl<S: Read> Transmitter<S, SendBody> {
    /// Send the entire body.
    ///
    /// Blocks until every byte is handed to the transport. The source is
    /// read in blocks of the configured `source_read_chunk_size`, never
    /// more per read call. Source reads cut short by a signal
    /// ([`ErrorKind::Interrupted`]) are retried.
    ///
    /// With fixed length framing, reading stops exactly at the length
    /// put in `content-length`, even if the source could produce more.
    /// A source that ends early fails with [`Error::ShortBody`].
    ///
    /// A failed send cannot be resumed. The transport is in an undefined
    /// place mid-message and should be closed.
    pub fn send(&mut self, transport: &mut dyn Transport) -> Result<(), Error> {
        if self.inner.body_done {
            return Ok(());
        }

        match self.framing() {
            FramingStrategy::FixedLength(total) => self.send_fixed(transport, total)?,
            FramingStrategy::Chunked => self.send_chunked(transport)?,
            // Bodyless requests proceed from SendHeaders straight to Done.
            FramingStrategy::NoBody => unreachable!("SendBody without a body"),
        }

        self.inner.body_done = true;

        Ok(())
    }

    /// The framing decided when the headers went out.
    pub fn framing(&self) -> FramingStrategy {
        match self.inner.strategy {
            Some(v) => v,
            None => unreachable!("body send before headers"),
        }
    }

    /// Check whether the entire body has been sent.
    pub fn can_proceed(&self) -> bool {
        self.inner.body_done
    }

    /// Attempt to proceed from this state to the next.
    ///
    /// Returns `None` until the entire body has been sent.
    pub fn proceed(self) -> Option<Transmitter<S, Done>> {
        if !self.can_proceed() {
            return None;
        }

        Some(Transmitter::wrap(self.inner))
    }

    fn send_fixed(&mut self, transport: &mut dyn Transport, total: u64) -> Result<(), Error> {
        let chunk_size = self.inner.config.source_read_chunk_size();

        match &mut self.inner.body {
            Body::InMemory(data) => {
                if !data.is_empty() {
                    log_data(data);
                    transport.write(data)?;
                }
                self.inner.body_bytes_sent = data.len() as u64;
            }

            Body::Streaming(
                BodySource::Sized { source, .. } | BodySource::Unsized { source },
            ) => {
                let mut remaining = total;
                let mut buf = vec![0_u8; chunk_size];

                while remaining > 0 {
                    let want = (chunk_size as u64).min(remaining) as usize;

                    let n = match source.read(&mut buf[..want]) {
                        Ok(v) => v,
                        Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                        Err(e) => return Err(e.into()),
                    };
                    if n == 0 {
                        return Err(Error::ShortBody {
                            sent: total - remaining,
                            declared: total,
                        });
                    }

                    log_data(&buf[..n]);
                    transport.write(&buf[..n])?;

                    remaining -= n as u64;
                    self.inner.body_bytes_sent += n as u64;
                }
            }

            // decide_framing never picks a length without a body.
            Body::None => unreachable!("length framing without a body"),
        }

        Ok(())
    }

    fn send_chunked(&mut self, transport: &mut dyn Transport) -> Result<(), Error> {
        let chunk_size = self.inner.config.source_read_chunk_size();

        let source = match &mut self.inner.body {
            Body::Streaming(
                BodySource::Sized { source, .. } | BodySource::Unsized { source },
            ) => source,
            // decide_framing never picks chunked for these.
            Body::None | Body::InMemory(_) => unreachable!("chunked without a streaming body"),
        };

        let mut data = vec![0_u8; chunk_size];
        let mut record = Vec::with_capacity(chunk_size + 16);

        loop {
            let n = match source.read(&mut data) {
                Ok(v) => v,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            if n == 0 {
                break;
            }

            // One record per source read: <hex-length>\r\n<data>\r\n
            record.clear();
            write!(record, "{:x}\r\n", n)?;
            record.extend_from_slice(&data[..n]);
            record.extend_from_slice(b"\r\n");

            log_data(&record);
            transport.write(&record)?;

            self.inner.body_bytes_sent += n as u64;
        }

        transport.write(b"0\r\n\r\n")?;

        Ok(())
    }
}
