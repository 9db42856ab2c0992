//! Bounded body reading and content decoding.
//!
//! The read is bounded by the declared content length — the input source
//! is never drained past it, and a source that runs dry early is a
//! truncated body. Decoding is permissive by design: a media type with no
//! registered decoder degrades to the raw text instead of erroring.

use serde_json::Value;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::debug;

use crate::error::Error;
use crate::registry::DecoderRegistry;
use crate::request::Request;

/// A decoded request body.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyValue {
    /// The registry had a decoder for the media type.
    Structured(Value),
    /// No decoder registered — the body as text, unchanged.
    Text(String),
}

impl<S: AsyncRead + Unpin> Request<S> {
    /// Reads and decodes the request body.
    ///
    /// Exactly [`content_length`](Request::content_length) bytes are read
    /// (a declared length of zero reads nothing). Bytes become text per
    /// the content type's `charset` parameter — UTF-8 (lossy) unless
    /// `iso-8859-1`/`latin-1` is declared. When the registry has a
    /// decoder for the full media type, its structured result is
    /// returned; otherwise the text passes through as-is.
    pub async fn read_body(&mut self, registry: &DecoderRegistry) -> Result<BodyValue, Error> {
        let content_type = self.content_type()?.clone();
        let declared = self.content_length();

        // `take` bounds the read; the buffer grows only with bytes that
        // actually arrive, never with the declared length.
        let mut buf = Vec::new();
        (&mut self.raw.input).take(declared).read_to_end(&mut buf).await?;
        if (buf.len() as u64) < declared {
            return Err(Error::Truncated { expected: declared, actual: buf.len() as u64 });
        }

        let text = decode_charset(&buf, content_type.charset());

        if content_type.is_empty() {
            return Ok(BodyValue::Text(text));
        }
        match find_decoder(registry, content_type.media_type()) {
            Some(decoder) => {
                debug!(media_type = content_type.media_type(), bytes = declared, "decoding body");
                decoder(&text).map(BodyValue::Structured)
            }
            None => {
                debug!(media_type = content_type.media_type(), "no decoder, passing body through");
                Ok(BodyValue::Text(text))
            }
        }
    }
}

/// Media-type lookup, falling back to any file extension known to map to
/// that media type — so a decoder registered under `.json` alone still
/// serves `application/json` bodies.
fn find_decoder(registry: &DecoderRegistry, media_type: &str) -> Option<crate::registry::Decoder> {
    if let Ok(decoder) = registry.lookup(media_type) {
        return Some(decoder);
    }
    for ext in crate::mime::extensions_for(media_type)? {
        if let Ok(decoder) = registry.lookup(ext) {
            return Some(decoder);
        }
    }
    None
}

fn decode_charset(bytes: &[u8], charset: Option<&str>) -> String {
    let charset = charset.unwrap_or("utf-8").to_ascii_lowercase();
    match charset.as_str() {
        "iso-8859-1" | "latin-1" | "latin1" => bytes.iter().map(|&b| char::from(b)).collect(),
        // utf-8 and anything unrecognized: lossy UTF-8.
        _ => String::from_utf8_lossy(bytes).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RawFields;
    use http::HeaderMap;
    use serde_json::json;
    use std::io::Cursor;

    fn post(body: &[u8], declared: Option<u64>, content_type: &str) -> Request<Cursor<Vec<u8>>> {
        let mut headers = HeaderMap::new();
        if !content_type.is_empty() {
            headers.insert("content-type", content_type.parse().unwrap());
        }
        Request::new(RawFields {
            method: "POST".to_owned(),
            path: "/items".to_owned(),
            query: String::new(),
            headers,
            content_length: declared,
            scheme: "http".to_owned(),
            server_name: "localhost".to_owned(),
            server_port: Some(80),
            input: Cursor::new(body.to_vec()),
        })
    }

    #[tokio::test]
    async fn json_body_decodes_to_structured() {
        let mut req = post(br#"{"a": 1}"#, Some(8), "application/json");
        let value = req.read_body(&DecoderRegistry::new()).await.unwrap();
        assert_eq!(value, BodyValue::Structured(json!({"a": 1})));
    }

    #[tokio::test]
    async fn unsupported_type_degrades_to_text() {
        let mut req = post(b"a,b,c", Some(5), "text/csv");
        let value = req.read_body(&DecoderRegistry::new()).await.unwrap();
        assert_eq!(value, BodyValue::Text("a,b,c".to_owned()));
    }

    #[tokio::test]
    async fn absent_length_reads_nothing() {
        let mut req = post(b"ignored", None, "application/json");
        // Zero declared bytes: the empty string is not valid strict JSON.
        assert!(matches!(
            req.read_body(&DecoderRegistry::new()).await,
            Err(Error::Decode(_))
        ));
    }

    #[tokio::test]
    async fn short_body_is_truncated() {
        let mut req = post(b"abc", Some(10), "text/plain");
        assert!(matches!(
            req.read_body(&DecoderRegistry::new()).await,
            Err(Error::Truncated { expected: 10, actual: 3 })
        ));
    }

    #[tokio::test]
    async fn reads_only_declared_bytes() {
        let mut req = post(b"{} trailing garbage", Some(2), "application/json");
        let value = req.read_body(&DecoderRegistry::new()).await.unwrap();
        assert_eq!(value, BodyValue::Structured(json!({})));
    }

    #[tokio::test]
    async fn latin1_charset() {
        let mut req = post(&[0x63, 0x61, 0x66, 0xE9], Some(4), "text/plain; charset=iso-8859-1");
        let value = req.read_body(&DecoderRegistry::new()).await.unwrap();
        assert_eq!(value, BodyValue::Text("café".to_owned()));
    }

    #[tokio::test]
    async fn hostile_declared_length_fails_without_allocating() {
        let mut req = post(b"abc", Some(u64::MAX), "text/plain");
        assert!(matches!(
            req.read_body(&DecoderRegistry::new()).await,
            Err(Error::Truncated { expected: u64::MAX, actual: 3 })
        ));
    }

    #[tokio::test]
    async fn extension_registration_serves_media_type() {
        use serde_json::Value;
        use std::sync::Arc;

        let registry = DecoderRegistry::empty();
        registry.register(".csv", Arc::new(|text: &str| {
            Ok(Value::Array(
                text.split(',').map(|f| Value::String(f.to_owned())).collect(),
            ))
        }));
        let mut req = post(b"a,b", Some(3), "text/csv");
        let value = req.read_body(&registry).await.unwrap();
        assert_eq!(value, BodyValue::Structured(json!(["a", "b"])));
    }

    #[tokio::test]
    async fn invalid_json_is_decode_error() {
        let mut req = post(b"{oops", Some(5), "application/json");
        assert!(matches!(
            req.read_body(&DecoderRegistry::new()).await,
            Err(Error::Decode(_))
        ));
    }
}
