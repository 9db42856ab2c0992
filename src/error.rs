//! Unified error type.
//!
//! Every failure here is scoped to a single request: the caller (the
//! transport adapter) maps it to a protocol response and moves on to the
//! next request. Nothing in this crate retries, and nothing is fatal to
//! the process.

use thiserror::Error;

/// The error type returned by portico's fallible operations.
///
/// Each variant corresponds to one malformed-input or resolution failure
/// on the request path. [`Error::status`] gives the conventional protocol
/// status code for each, so the transport adapter does not have to invent
/// its own mapping.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed percent escape: non-hex digits or a truncated `%XX` triplet.
    #[error("malformed percent escape: {0}")]
    Escape(String),

    /// Malformed query pair — more than one `=` in a single field.
    #[error("bad query field: {0}")]
    Query(String),

    /// Content-type parameter that does not split into exactly one `key=value`.
    #[error("malformed content-type header: {0}")]
    HeaderSyntax(String),

    /// A required header is absent and no default was supplied.
    #[error("missing required header: {0}")]
    MissingHeader(String),

    /// No decoder registered for the given media type or extension.
    #[error("no decoder registered for {0}")]
    UnsupportedType(String),

    /// The input source ran dry before the declared content length.
    #[error("request body truncated: expected {expected} bytes, read {actual}")]
    Truncated { expected: u64, actual: u64 },

    /// A registered decoder rejected the body text.
    #[error("body decode failed: {0}")]
    Decode(String),

    /// An interior path segment did not resolve to a named child resource.
    #[error("resource not found: {0}")]
    NotFound(String),

    /// The resolved endpoint has no handler for the request's verb.
    #[error("method not allowed: {0}")]
    MethodNotAllowed(String),

    /// The body input source failed below the protocol layer.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Suggested protocol status code for this failure.
    ///
    /// The transport collaborator owns the response; this is the
    /// conventional mapping (400 / 404 / 405 / 415 / 500).
    pub fn status(&self) -> u16 {
        match self {
            Self::Escape(_)
            | Self::Query(_)
            | Self::HeaderSyntax(_)
            | Self::MissingHeader(_)
            | Self::Truncated { .. }
            | Self::Decode(_) => 400,
            Self::NotFound(_) => 404,
            Self::MethodNotAllowed(_) => 405,
            Self::UnsupportedType(_) => 415,
            Self::Io(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(Error::Query("a=1=2".into()).status(), 400);
        assert_eq!(Error::NotFound("deep".into()).status(), 404);
        assert_eq!(Error::MethodNotAllowed("PATCH".into()).status(), 405);
        assert_eq!(Error::UnsupportedType("text/csv".into()).status(), 415);
    }
}
