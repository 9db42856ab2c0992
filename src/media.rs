//! Content-Type header parsing.
//!
//! A `media/subtype; param=value; ...` header becomes a canonical
//! lowercase media type plus a parameter map. Whether anything can
//! actually decode that media type is the registry's business
//! ([`crate::registry`]) — unknown types parse fine here and degrade to
//! opaque text downstream.

use std::collections::HashMap;

use crate::error::Error;

/// A parsed `Content-Type` value.
///
/// The media type is lowercased and trimmed; parameter keys and values
/// are trimmed with values left case-sensitive. An absent or empty
/// header parses to the empty content type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContentType {
    media_type: String,
    params: HashMap<String, String>,
}

impl ContentType {
    /// The empty content type: no media type, no parameters.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses a raw `Content-Type` header value.
    ///
    /// Segments are split on `;`. The first segment is the media type;
    /// every later segment must split into exactly one `key=value` pair
    /// or the whole parse fails with [`Error::HeaderSyntax`].
    pub fn parse(raw: &str) -> Result<Self, Error> {
        if raw.is_empty() {
            return Ok(Self::empty());
        }
        let mut segments = raw.split(';');
        let media_type = segments
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        let mut params = HashMap::new();
        for segment in segments {
            let pair: Vec<&str> = segment.split('=').collect();
            match pair.as_slice() {
                [key, value] => {
                    params.insert(key.trim().to_owned(), value.trim().to_owned());
                }
                _ => return Err(Error::HeaderSyntax(raw.to_owned())),
            }
        }
        Ok(Self { media_type, params })
    }

    /// The canonical lowercase media type, e.g. `application/json`.
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    /// A single parameter value, e.g. `param("charset")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// The declared character encoding, when present.
    pub fn charset(&self) -> Option<&str> {
        self.param("charset")
    }

    /// True for the empty content type (no header, or a read-only method).
    pub fn is_empty(&self) -> bool {
        self.media_type.is_empty() && self.params.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_with_charset() {
        let ct = ContentType::parse("application/json; charset=utf-8").unwrap();
        assert_eq!(ct.media_type(), "application/json");
        assert_eq!(ct.charset(), Some("utf-8"));
        assert_eq!(ct.params().len(), 1);
    }

    #[test]
    fn empty_header_is_empty_type() {
        let ct = ContentType::parse("").unwrap();
        assert_eq!(ct.media_type(), "");
        assert!(ct.params().is_empty());
        assert!(ct.is_empty());
    }

    #[test]
    fn media_type_is_lowercased_and_trimmed() {
        let ct = ContentType::parse("  Text/HTML ").unwrap();
        assert_eq!(ct.media_type(), "text/html");
    }

    #[test]
    fn param_values_keep_case() {
        let ct = ContentType::parse("multipart/form-data; boundary=AaB03x").unwrap();
        assert_eq!(ct.param("boundary"), Some("AaB03x"));
    }

    #[test]
    fn multiple_params() {
        let ct = ContentType::parse("text/plain; charset=utf-8; format=flowed").unwrap();
        assert_eq!(ct.charset(), Some("utf-8"));
        assert_eq!(ct.param("format"), Some("flowed"));
    }

    #[test]
    fn bad_param_fails() {
        assert!(matches!(
            ContentType::parse("text/plain; charset"),
            Err(Error::HeaderSyntax(_))
        ));
        assert!(matches!(
            ContentType::parse("text/plain; a=b=c"),
            Err(Error::HeaderSyntax(_))
        ));
    }
}
