use std::fmt;
use std::io;

/// Error type for h1send
#[derive(Debug)]
#[allow(missing_docs)]
#[non_exhaustive]
pub enum Error {
    Timeout,
    MissingLength,
    ShortBody { sent: u64, declared: u64 },
    BadHeader(String),
    UnsupportedVersion,
    TooManyHostHeaders,
    TooManyContentLengthHeaders,
    BadContentLengthHeader,
    Io(io::Error),
}

impl From<io::Error> for Error {
    fn from(value: io::Error) -> Self {
        // Both kinds are how read deadlines surface from std sockets.
        match value.kind() {
            io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => Error::Timeout,
            _ => Error::Io(value),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Timeout => write!(f, "no data arrived before the read timeout"),
            Error::MissingLength => {
                write!(f, "content-length not given and transfer-encoding is not chunked")
            }
            Error::ShortBody { sent, declared } => {
                write!(f, "body source ended after {} of {} declared bytes", sent, declared)
            }
            Error::BadHeader(v) => write!(f, "bad header: {}", v),
            Error::UnsupportedVersion => write!(f, "unsupported http version"),
            Error::TooManyHostHeaders => write!(f, "more than one host header"),
            Error::TooManyContentLengthHeaders => write!(f, "more than one content-length header"),
            Error::BadContentLengthHeader => write!(f, "content-length header not a number"),
            Error::Io(e) => write!(f, "io: {}", e),
        }
    }
}
