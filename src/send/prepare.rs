use http::{HeaderMap, HeaderName, HeaderValue, Method, Request, Uri, Version};

use crate::body::Body;
use crate::{Error, TransmitConfig};

use super::state::*;
use super::{Inner, Transmitter};

impl<S> Transmitter<S, Prepare> {
    /// Create a new Transmitter.
    ///
    /// The request carries this crate's [`Body`] as its body type. The
    /// config starts at the defaults; see
    /// [`set_config`][Transmitter::set_config].
    pub fn new(request: Request<Body<S>>) -> Result<Self, Error> {
        let (parts, body) = request.into_parts();

        let inner = Inner {
            parts,
            body,
            config: TransmitConfig::default(),
            analyzed: false,
            strategy: None,
            headers_sent: false,
            body_done: false,
            body_bytes_sent: 0,
        };

        Ok(Transmitter::wrap(inner))
    }

    /// Inspect request method
    pub fn method(&self) -> &Method {
        &self.inner.parts.method
    }

    /// Inspect request URI
    pub fn uri(&self) -> &Uri {
        &self.inner.parts.uri
    }

    /// Inspect request HTTP version
    pub fn version(&self) -> Version {
        self.inner.parts.version
    }

    /// Inspect request headers
    pub fn headers(&self) -> &HeaderMap {
        &self.inner.parts.headers
    }

    /// Add more headers to the request
    pub fn header<K, V>(&mut self, key: K, value: V) -> Result<(), Error>
    where
        HeaderName: TryFrom<K>,
        <HeaderName as TryFrom<K>>::Error: Into<http::Error>,
        HeaderValue: TryFrom<V>,
        <HeaderValue as TryFrom<V>>::Error: Into<http::Error>,
    {
        let key = HeaderName::try_from(key).map_err(|e| Error::BadHeader(e.into().to_string()))?;
        let value =
            HeaderValue::try_from(value).map_err(|e| Error::BadHeader(e.into().to_string()))?;

        self.inner.parts.headers.append(key, value);

        Ok(())
    }

    /// Replace the chunk size config.
    ///
    /// The transmission snapshots the config here. Later changes to the
    /// caller's copy do not affect this transmitter.
    pub fn set_config(&mut self, config: TransmitConfig) {
        self.inner.config = config;
    }

    /// Continue to the next state.
    pub fn proceed(self) -> Transmitter<S, SendHeaders> {
        Transmitter::wrap(self.inner)
    }
}
