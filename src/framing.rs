use http::header::{CONTENT_LENGTH, CONTENT_TYPE, TRANSFER_ENCODING};
use http::{HeaderMap, HeaderValue};

use crate::body::Body;
use crate::ext::HeaderIterExt;
use crate::Error;

const DEFAULT_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// How the extent of the body is communicated to the peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramingStrategy {
    /// Header block only, no body follows.
    NoBody,

    /// Exactly this many body bytes follow the header block.
    FixedLength(u64),

    /// Self-delimiting chunk records follow the header block.
    Chunked,
}

/// Decide the framing for a body and amend the headers to match.
///
/// This is the whole framing policy in one I/O-free function. The input
/// headers are not touched; the returned map is what goes on the wire.
///
/// * `Body::None` passes the headers through untouched.
/// * `Body::InMemory` sets `content-length` to the exact byte count and
///   drops any `transfer-encoding`. The true length is known, chunked
///   framing has nothing to offer.
/// * `Body::Streaming` with `transfer-encoding: chunked` among the
///   headers goes chunked, dropping any `content-length`. A message must
///   not carry both framings.
/// * Otherwise a streaming body needs a length. A sized source caps any
///   declared `content-length` at what it can still produce, so a stale
///   declared length cannot leave the peer waiting for bytes that never
///   come. With no usable length the decision fails with
///   [`Error::MissingLength`], before anything is written.
///
/// Requests with a body also get a default `content-type` if none is set.
pub(crate) fn decide_framing<S>(
    headers: &HeaderMap,
    body: &Body<S>,
) -> Result<(FramingStrategy, HeaderMap), Error> {
    let declared = declared_length(headers)?;
    let mut amended = headers.clone();

    let strategy = match body {
        Body::None => FramingStrategy::NoBody,

        Body::InMemory(data) => {
            let len = data.len() as u64;
            amended.insert(CONTENT_LENGTH, HeaderValue::from(len));
            amended.remove(TRANSFER_ENCODING);
            FramingStrategy::FixedLength(len)
        }

        Body::Streaming(source) => {
            if headers.iter().has("transfer-encoding", "chunked") {
                amended.remove(CONTENT_LENGTH);
                FramingStrategy::Chunked
            } else {
                let effective = match (source.remaining(), declared) {
                    (Some(remaining), Some(declared)) => remaining.min(declared),
                    (Some(remaining), None) => remaining,
                    (None, Some(declared)) => declared,
                    (None, None) => return Err(Error::MissingLength),
                };
                amended.insert(CONTENT_LENGTH, HeaderValue::from(effective));
                FramingStrategy::FixedLength(effective)
            }
        }
    };

    if body.has_body() && !amended.contains_key(CONTENT_TYPE) {
        amended.insert(CONTENT_TYPE, HeaderValue::from_static(DEFAULT_CONTENT_TYPE));
    }

    Ok((strategy, amended))
}

fn declared_length(headers: &HeaderMap) -> Result<Option<u64>, Error> {
    let mut values = headers.get_all(CONTENT_LENGTH).iter();

    let Some(first) = values.next() else {
        return Ok(None);
    };

    if values.next().is_some() {
        return Err(Error::TooManyContentLengthHeaders);
    }

    let len = first
        .to_str()
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .ok_or(Error::BadContentLengthHeader)?;

    Ok(Some(len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::BodySource;
    use std::io::Cursor;

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (k, v) in pairs {
            map.append(
                k.parse::<http::HeaderName>().unwrap(),
                v.parse::<HeaderValue>().unwrap(),
            );
        }
        map
    }

    fn sized(position: u64, total: u64) -> Body<Cursor<Vec<u8>>> {
        let data = vec![b'x'; total as usize];
        Body::Streaming(BodySource::new_sized(Cursor::new(data), position, total))
    }

    #[test]
    fn no_body_passes_headers_through() {
        let h = headers(&[("content-length", "9")]);
        let (strategy, amended) = decide_framing::<Cursor<Vec<u8>>>(&h, &Body::None).unwrap();

        assert_eq!(strategy, FramingStrategy::NoBody);
        assert_eq!(amended, h);
    }

    #[test]
    fn in_memory_sets_exact_length() {
        let h = headers(&[("content-length", "1000"), ("transfer-encoding", "chunked")]);
        let body = Body::bytes("hello");

        let (strategy, amended) = decide_framing(&h, &body).unwrap();

        assert_eq!(strategy, FramingStrategy::FixedLength(5));
        assert_eq!(amended.get(CONTENT_LENGTH).unwrap(), "5");
        assert!(amended.get(TRANSFER_ENCODING).is_none());
    }

    #[test]
    fn in_memory_empty_is_zero_length() {
        let body = Body::bytes("");
        let (strategy, amended) = decide_framing(&HeaderMap::new(), &body).unwrap();

        assert_eq!(strategy, FramingStrategy::FixedLength(0));
        assert_eq!(amended.get(CONTENT_LENGTH).unwrap(), "0");
    }

    #[test]
    fn declared_larger_than_remaining_is_clamped() {
        let h = headers(&[("content-length", "100")]);
        let (strategy, amended) = decide_framing(&h, &sized(0, 50)).unwrap();

        assert_eq!(strategy, FramingStrategy::FixedLength(50));
        assert_eq!(amended.get(CONTENT_LENGTH).unwrap(), "50");
    }

    #[test]
    fn declared_smaller_than_remaining_is_kept() {
        let h = headers(&[("content-length", "50")]);
        let (strategy, amended) = decide_framing(&h, &sized(0, 100)).unwrap();

        assert_eq!(strategy, FramingStrategy::FixedLength(50));
        assert_eq!(amended.get(CONTENT_LENGTH).unwrap(), "50");
    }

    #[test]
    fn zero_remaining_zero_declared() {
        let h = headers(&[("content-length", "0")]);
        let (strategy, _) = decide_framing(&h, &sized(0, 0)).unwrap();

        assert_eq!(strategy, FramingStrategy::FixedLength(0));
    }

    #[test]
    fn position_counts_against_total() {
        let (strategy, _) = decide_framing(&HeaderMap::new(), &sized(30, 100)).unwrap();

        assert_eq!(strategy, FramingStrategy::FixedLength(70));
    }

    #[test]
    fn unsized_with_declared_uses_declared() {
        let h = headers(&[("content-length", "17")]);
        let body = Body::Streaming(BodySource::new_unsized(Cursor::new(vec![0; 100])));

        let (strategy, _) = decide_framing(&h, &body).unwrap();

        assert_eq!(strategy, FramingStrategy::FixedLength(17));
    }

    #[test]
    fn no_length_at_all_is_an_error() {
        let body = Body::Streaming(BodySource::new_unsized(Cursor::new(vec![0; 100])));

        let err = decide_framing(&HeaderMap::new(), &body).unwrap_err();

        assert!(matches!(err, Error::MissingLength));
    }

    #[test]
    fn chunked_wins_and_drops_length() {
        let h = headers(&[("content-length", "50"), ("transfer-encoding", "chunked")]);

        let (strategy, amended) = decide_framing(&h, &sized(0, 100)).unwrap();

        assert_eq!(strategy, FramingStrategy::Chunked);
        assert!(amended.get(CONTENT_LENGTH).is_none());
        assert_eq!(amended.get(TRANSFER_ENCODING).unwrap(), "chunked");
    }

    #[test]
    fn chunked_detection_is_case_insensitive() {
        let h = headers(&[("transfer-encoding", "Chunked")]);
        let body = Body::Streaming(BodySource::new_unsized(Cursor::new(vec![0; 10])));

        let (strategy, _) = decide_framing(&h, &body).unwrap();

        assert_eq!(strategy, FramingStrategy::Chunked);
    }

    #[test]
    fn default_content_type_only_with_body() {
        let (_, amended) = decide_framing(&HeaderMap::new(), &Body::bytes("x")).unwrap();
        assert_eq!(
            amended.get(CONTENT_TYPE).unwrap(),
            "application/x-www-form-urlencoded"
        );

        let (_, amended) =
            decide_framing::<Cursor<Vec<u8>>>(&HeaderMap::new(), &Body::None).unwrap();
        assert!(amended.get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn existing_content_type_is_kept() {
        let h = headers(&[("content-type", "application/json")]);
        let (_, amended) = decide_framing(&h, &Body::bytes("{}")).unwrap();

        assert_eq!(amended.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn two_content_lengths_is_an_error() {
        let h = headers(&[("content-length", "10"), ("content-length", "20")]);

        let err = decide_framing(&h, &sized(0, 10)).unwrap_err();

        assert!(matches!(err, Error::TooManyContentLengthHeaders));
    }

    #[test]
    fn unparsable_content_length_is_an_error() {
        let h = headers(&[("content-length", "ten")]);

        let err = decide_framing(&h, &sized(0, 10)).unwrap_err();

        assert!(matches!(err, Error::BadContentLengthHeader));
    }
}
