//! HTTP/1.1 request transmission.
//!
//! This crate turns an [`http::Request`] into bytes on a socket. It owns the
//! request line and header serialization, the framing decision for the body
//! and the pacing of reads from the body source. It does not own the socket:
//! anything implementing [`Transport`] carries the bytes, and a blanket impl
//! covers [`std::net::TcpStream`].
//!
//! Transmission is driven through a small set of typestates, see
//! [`Transmitter`]. The one-call [`transmit()`] front runs them in order for
//! the common case.
//!
//! ```
//! use h1send::http::Request;
//! use h1send::{transmit, Body, Error, Transport, TransmitConfig};
//! use std::time::Duration;
//!
//! // Stand-in for a connected TcpStream.
//! struct Sink(Vec<u8>);
//!
//! impl Transport for Sink {
//!     fn write(&mut self, data: &[u8]) -> Result<(), Error> {
//!         self.0.extend_from_slice(data);
//!         Ok(())
//!     }
//!     fn read_into(&mut self, _buf: &mut [u8], _timeout: Option<Duration>) -> Result<usize, Error> {
//!         Ok(0)
//!     }
//! }
//!
//! let request = Request::post("http://example.test/hello")
//!     .body(Body::bytes("hi there"))?;
//!
//! let mut transport = Sink(Vec::new());
//!
//! let done = transmit(request, TransmitConfig::default(), &mut transport)?;
//!
//! assert_eq!(done.body_bytes_sent(), 8);
//! assert!(transport.0.starts_with(b"POST /hello HTTP/1.1\r\n"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # In scope
//!
//! * Request line and header block serialized in one transport write
//! * `host`, `authorization` and `content-type` derived from the URI and
//!   body when the user has not set them
//! * Body framing: exact `content-length` or `transfer-encoding: chunked`
//! * A declared `content-length` clamped to what a sized source can still
//!   produce
//! * Read deadlines surfacing as [`Error::Timeout`]
//!
//! # Out of scope
//!
//! * Parsing response data (the [`BufferedReader`] hands back raw bytes)
//! * Connection handling, redirects and retries
//! * TLS
//! * Compression

#![forbid(unsafe_code)]
#![warn(clippy::all)]

#[macro_use]
extern crate log;

mod body;
mod config;
mod error;
mod ext;
mod framing;
mod reader;
pub mod send;
mod transport;
mod util;

pub use body::{Body, BodySource};
pub use config::{TransmitConfig, DEFAULT_CHUNK_SIZE};
pub use error::Error;
pub use framing::FramingStrategy;
pub use reader::BufferedReader;
pub use send::{transmit, SendHeadersResult, Transmitter};
pub use transport::Transport;

/// Re-exported http crate.
pub use http;
