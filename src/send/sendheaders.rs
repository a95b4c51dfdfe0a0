use std::io::Write;

use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use http::header::{AUTHORIZATION, HOST};
use http::uri::Scheme;
use http::{HeaderMap, HeaderValue, Method, Uri, Version};

use crate::ext::SchemeExt;
use crate::framing::{decide_framing, FramingStrategy};
use crate::transport::Transport;
use crate::util::{log_data, AuthorityExt};
use crate::Error;

use super::state::*;
use super::{SendHeadersResult, Transmitter};

impl<S> Transmitter<S, SendHeaders> {
    /// Write the request line and headers.
    ///
    /// The framing is decided on the first call, which can fail before
    /// anything is written: a streaming body with no usable length is
    /// [`Error::MissingLength`].
    ///
    /// The whole block is assembled in one buffer and handed to the
    /// transport as a single write.
    ///
    /// Example of what goes on the wire:
    ///
    /// ```text
    /// POST /bar HTTP/1.1\r\n
    /// host: my.server.test\r\n
    /// content-length: 5\r\n
    /// \r\n
    /// ```
    ///
    /// Repeated calls after a successful send do nothing.
    pub fn send(&mut self, transport: &mut dyn Transport) -> Result<(), Error> {
        if self.inner.headers_sent {
            return Ok(());
        }

        self.maybe_analyze()?;

        let prelude = self.assemble_prelude()?;

        log_data(&prelude);
        transport.write(&prelude)?;

        self.inner.headers_sent = true;

        Ok(())
    }

    /// The configured method.
    pub fn method(&self) -> &Method {
        &self.inner.parts.method
    }

    /// The uri being requested.
    pub fn uri(&self) -> &Uri {
        &self.inner.parts.uri
    }

    /// Version of the request.
    ///
    /// This can only be 1.0 or 1.1.
    pub fn version(&self) -> Version {
        self.inner.parts.version
    }

    /// The headers as they go on the wire, after amendments.
    pub fn headers_map(&mut self) -> Result<HeaderMap, Error> {
        self.maybe_analyze()?;
        Ok(self.inner.parts.headers.clone())
    }

    /// Check whether the header block has been sent.
    pub fn can_proceed(&self) -> bool {
        self.inner.headers_sent
    }

    /// Attempt to proceed from this state to the next.
    ///
    /// Returns `None` until the header block has been sent. It is
    /// guaranteed that if `can_proceed()` returns `true`, this returns
    /// `Some`.
    pub fn proceed(self) -> Option<SendHeadersResult<S>> {
        if !self.can_proceed() {
            return None;
        }

        let next = match self.inner.strategy {
            Some(FramingStrategy::NoBody) | None => {
                SendHeadersResult::Done(Transmitter::wrap(self.inner))
            }
            Some(_) => SendHeadersResult::SendBody(Transmitter::wrap(self.inner)),
        };

        Some(next)
    }

    pub(crate) fn maybe_analyze(&mut self) -> Result<(), Error> {
        if self.inner.analyzed {
            return Ok(());
        }

        let parts = &mut self.inner.parts;

        if !matches!(parts.version, Version::HTTP_10 | Version::HTTP_11) {
            return Err(Error::UnsupportedVersion);
        }

        let host_count = parts.headers.get_all(HOST).iter().count();
        if host_count > 1 {
            return Err(Error::TooManyHostHeaders);
        }

        if host_count == 0 {
            if let Some(host) = parts.uri.host() {
                // User did not set a host header, and there is one in uri, we set that.
                // This might append the port if it differs from the scheme default.
                let value = maybe_with_port(host, &parts.uri)?;

                parts.headers.insert(HOST, value);
            }
        }

        if let Some(auth) = parts.uri.authority() {
            if auth.userinfo().is_some() && !parts.headers.contains_key(AUTHORIZATION) {
                let user = auth.username().unwrap_or_default();
                let pass = auth.password().unwrap_or_default();
                let creds = BASE64_STANDARD.encode(format!("{}:{}", user, pass));
                let auth = format!("Basic {}", creds);

                let value =
                    HeaderValue::from_str(&auth).map_err(|e| Error::BadHeader(e.to_string()))?;
                parts.headers.insert(AUTHORIZATION, value);
            }
        }

        let (strategy, amended) = decide_framing(&parts.headers, &self.inner.body)?;
        parts.headers = amended;

        debug!("Framing strategy: {:?}", strategy);

        self.inner.strategy = Some(strategy);
        self.inner.analyzed = true;

        Ok(())
    }

    fn assemble_prelude(&self) -> Result<Vec<u8>, Error> {
        let parts = &self.inner.parts;

        let path = parts
            .uri
            .path_and_query()
            .map(|p| p.as_str())
            .filter(|p| !p.is_empty())
            .unwrap_or("/");

        let mut buf = Vec::with_capacity(256);

        write!(buf, "{} {} {:?}\r\n", parts.method, path, parts.version)?;

        for (name, value) in &parts.headers {
            write!(buf, "{}: ", name)?;
            buf.extend_from_slice(value.as_bytes());
            buf.extend_from_slice(b"\r\n");
        }

        buf.extend_from_slice(b"\r\n");

        Ok(buf)
    }
}

fn maybe_with_port(host: &str, uri: &Uri) -> Result<HeaderValue, Error> {
    fn from_str(src: &str) -> Result<HeaderValue, Error> {
        HeaderValue::from_str(src).map_err(|e| Error::BadHeader(e.to_string()))
    }

    if let Some(port) = uri.port_u16() {
        let scheme = uri.scheme().unwrap_or(&Scheme::HTTP);
        if let Some(scheme_default) = scheme.default_port() {
            if port != scheme_default {
                // This allocates, so we only do it if we absolutely have to.
                let host_port = format!("{}:{}", host, port);
                return from_str(&host_port);
            }
        }
    }

    // Fall back on no port (without allocating).
    from_str(host)
}
