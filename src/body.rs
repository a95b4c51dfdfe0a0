use std::fmt;
use std::io::Empty;

/// Request body handed to the transmitter.
///
/// Exactly one variant is active per request, and the variant determines
/// the framing strategy. See [`Transmitter`][crate::Transmitter] for how
/// each one is put on the wire.
pub enum Body<S = Empty> {
    /// No request body. Only the header block is written.
    None,

    /// Body fully available up front.
    ///
    /// Written with a `content-length` of the exact byte count.
    InMemory(Vec<u8>),

    /// Body streamed from a reader while transmitting.
    Streaming(BodySource<S>),
}

/// A streamed body provider.
///
/// Whether the provider knows its own extent is decided here, when the
/// source is constructed, not probed mid-transmission. A `Sized` source
/// can have its declared `content-length` clamped to what it can still
/// produce; an `Unsized` source cannot be length-framed at all.
pub enum BodySource<S> {
    /// Source with a known total size and current read position.
    Sized {
        /// Provider of the body bytes.
        source: S,
        /// Byte offset the next read starts from.
        position: u64,
        /// Total size of the underlying data.
        total: u64,
    },

    /// Source that can only be read until end-of-data.
    Unsized {
        /// Provider of the body bytes.
        source: S,
    },
}

impl Body<Empty> {
    /// Body of a request that has none.
    ///
    /// Pins the source type for requests where inference has nothing
    /// else to go on.
    pub fn empty() -> Body<Empty> {
        Body::None
    }

    /// In-memory body from any byte container.
    pub fn bytes(data: impl Into<Vec<u8>>) -> Body<Empty> {
        Body::InMemory(data.into())
    }
}

impl<S> Body<S> {
    pub(crate) fn has_body(&self) -> bool {
        !matches!(self, Body::None)
    }
}

impl<S> BodySource<S> {
    /// Source with known position and total size.
    pub fn new_sized(source: S, position: u64, total: u64) -> BodySource<S> {
        BodySource::Sized {
            source,
            position,
            total,
        }
    }

    /// Source without a known size.
    pub fn new_unsized(source: S) -> BodySource<S> {
        BodySource::Unsized { source }
    }

    /// Bytes the source can still produce, if it knows.
    ///
    /// A position past the total counts as exhausted, not negative.
    pub fn remaining(&self) -> Option<u64> {
        match self {
            BodySource::Sized {
                position, total, ..
            } => Some(total.saturating_sub(*position)),
            BodySource::Unsized { .. } => None,
        }
    }
}

impl<S> fmt::Debug for Body<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::None => write!(f, "Body::None"),
            Body::InMemory(v) => write!(f, "Body::InMemory({})", v.len()),
            Body::Streaming(s) => write!(f, "Body::Streaming({:?})", s),
        }
    }
}

impl<S> fmt::Debug for BodySource<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodySource::Sized {
                position, total, ..
            } => f
                .debug_struct("Sized")
                .field("position", position)
                .field("total", total)
                .finish(),
            BodySource::Unsized { .. } => f.debug_struct("Unsized").finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn remaining_is_total_minus_position() {
        let s = BodySource::new_sized(Cursor::new(b"hello"), 2, 5);
        assert_eq!(s.remaining(), Some(3));
    }

    #[test]
    fn remaining_saturates_at_zero() {
        let s = BodySource::new_sized(Cursor::new(b""), 10, 5);
        assert_eq!(s.remaining(), Some(0));
    }

    #[test]
    fn unsized_has_no_remaining() {
        let s = BodySource::new_unsized(Cursor::new(b"hello"));
        assert_eq!(s.remaining(), None);
    }
}
