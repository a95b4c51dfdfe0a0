use http::uri::Scheme;
use http::{HeaderName, HeaderValue};

use crate::util::compare_lowercase_ascii;

pub(crate) trait HeaderIterExt {
    fn has(self, key: &str, value: &str) -> bool;
}

impl<'a, I: Iterator<Item = (&'a HeaderName, &'a HeaderValue)>> HeaderIterExt for I {
    fn has(self, key: &str, value: &str) -> bool {
        self.filter(|i| i.0 == key).any(|i| header_value_has(i.1, value))
    }
}

// Header values like "gzip, chunked" are lists. The sought value must match
// an entire comma separated element, ASCII case ignored.
fn header_value_has(header: &HeaderValue, value: &str) -> bool {
    let Ok(s) = header.to_str() else {
        return false;
    };

    s.split(',').any(|t| compare_lowercase_ascii(t.trim(), value))
}

pub(crate) trait SchemeExt {
    fn default_port(&self) -> Option<u16>;
}

impl SchemeExt for Scheme {
    fn default_port(&self) -> Option<u16> {
        if *self == Scheme::HTTPS {
            Some(443)
        } else if *self == Scheme::HTTP {
            Some(80)
        } else {
            debug!("Unknown scheme: {}", self);
            None
        }
    }
}
