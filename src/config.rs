/// Default size of a single read, both from the socket and from a body source.
pub const DEFAULT_CHUNK_SIZE: usize = 16 * 1024;

/// Read sizing for a transmission.
///
/// Both the socket side ([`BufferedReader`][crate::BufferedReader]) and the
/// body-source side ([`Transmitter`][crate::Transmitter]) move data in large
/// blocks to keep the system-call count down on high-throughput links. The
/// two sizes are tuned independently.
///
/// Instances snapshot the config they are constructed with. Two concurrent
/// transmissions given different configs do not affect each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransmitConfig {
    socket_read_chunk_size: usize,
    source_read_chunk_size: usize,
}

impl Default for TransmitConfig {
    fn default() -> Self {
        TransmitConfig {
            socket_read_chunk_size: DEFAULT_CHUNK_SIZE,
            source_read_chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl TransmitConfig {
    /// Config with both chunk sizes at [`DEFAULT_CHUNK_SIZE`].
    pub fn new() -> Self {
        TransmitConfig::default()
    }

    /// Max number of bytes requested from the transport in a single read.
    pub fn socket_read_chunk_size(&self) -> usize {
        self.socket_read_chunk_size
    }

    /// Max number of bytes requested from a body source in a single read.
    pub fn source_read_chunk_size(&self) -> usize {
        self.source_read_chunk_size
    }

    /// Set the socket read size.
    ///
    /// A size of `0` is ignored and the previous value kept.
    pub fn set_socket_read_chunk_size(&mut self, size: usize) {
        if size == 0 {
            return;
        }
        self.socket_read_chunk_size = size;
    }

    /// Set the body source read size.
    ///
    /// A size of `0` is ignored and the previous value kept.
    pub fn set_source_read_chunk_size(&mut self, size: usize) {
        if size == 0 {
            return;
        }
        self.source_read_chunk_size = size;
    }
}
