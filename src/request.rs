//! Incoming request façade.
//!
//! [`RawFields`] is the consumed field set handed over by the transport
//! adapter, supplied once and immutable for the request's lifetime.
//! [`Request`] wraps it with lazily computed, cached accessors: each
//! derived value (path segments, query map, host/port, content type) is
//! parsed at most once per request. A request is owned exclusively by the
//! worker handling it, so the caches need no synchronization.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::io::Cursor;

use bytes::Bytes;
use http::HeaderMap;
use once_cell::unsync::OnceCell;

use crate::error::Error;
use crate::media::ContentType;
use crate::method::Method;
use crate::percent;
use crate::url::{self, HostPort, QueryMap};

/// The raw field set of one request, as demultiplexed by the transport.
pub struct RawFields<S> {
    pub method: String,
    /// Raw, still percent-encoded request path.
    pub path: String,
    /// Raw query string, without the leading `?`.
    pub query: String,
    pub headers: HeaderMap,
    /// Declared content length. Absent or unparseable declarations read
    /// as zero bytes available.
    pub content_length: Option<u64>,
    /// URL scheme, `"http"` or `"https"`.
    pub scheme: String,
    /// Fallback host when no `Host` header is present.
    pub server_name: String,
    /// Fallback port when no `Host` header is present.
    pub server_port: Option<u16>,
    /// Bounded byte source for the request body.
    pub input: S,
}

impl RawFields<Cursor<Bytes>> {
    /// Adapts decomposed `http` crate request parts plus an
    /// already-buffered body into the raw field set.
    ///
    /// This is the seam to the transport collaborator: anything that can
    /// produce `http::request::Parts` (hyper, axum extractors, test code)
    /// plugs in here.
    pub fn from_http(parts: http::request::Parts, body: Bytes) -> Self {
        let content_length = parts
            .headers
            .get(http::header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        let authority = parts.uri.authority();
        let server_name = authority.map(|a| a.host().to_owned()).unwrap_or_default();
        let server_port = authority.and_then(http::uri::Authority::port_u16);
        Self {
            method: parts.method.as_str().to_owned(),
            path: parts.uri.path().to_owned(),
            query: parts.uri.query().unwrap_or("").to_owned(),
            headers: parts.headers,
            content_length,
            scheme: parts.uri.scheme_str().unwrap_or("http").to_owned(),
            server_name,
            server_port,
            input: Cursor::new(body),
        }
    }
}

/// One incoming request: the raw fields plus per-request parse caches.
pub struct Request<S> {
    pub(crate) raw: RawFields<S>,
    path: OnceCell<Vec<String>>,
    query: OnceCell<QueryMap>,
    host_port: OnceCell<HostPort>,
    content_type: OnceCell<ContentType>,
}

impl<S> Request<S> {
    pub fn new(raw: RawFields<S>) -> Self {
        Self {
            raw,
            path: OnceCell::new(),
            query: OnceCell::new(),
            host_port: OnceCell::new(),
            content_type: OnceCell::new(),
        }
    }

    pub fn method(&self) -> &str {
        &self.raw.method
    }

    pub fn scheme(&self) -> &str {
        &self.raw.scheme
    }

    pub fn is_secure(&self) -> bool {
        self.raw.scheme == "https"
    }

    /// Decoded path segments, parsed once and cached.
    pub fn path(&self) -> Result<&[String], Error> {
        self.path
            .get_or_try_init(|| url::parse_path(&self.raw.path))
            .map(Vec::as_slice)
    }

    /// Decoded query parameters, parsed once and cached.
    pub fn query(&self) -> Result<&QueryMap, Error> {
        self.query.get_or_try_init(|| url::parse_query(&self.raw.query))
    }

    /// The request host. The `Host` header wins; absent that, the
    /// transport-supplied server name.
    pub fn host(&self) -> &str {
        &self.host_port().host
    }

    /// The request port. An explicit port in the `Host` header wins, then
    /// the transport-supplied server port, then the scheme default
    /// (443 for https, else 80).
    pub fn port(&self) -> u16 {
        self.host_port()
            .port
            .unwrap_or_else(|| self.default_port())
    }

    // Host and port come out of one parse, cached jointly.
    fn host_port(&self) -> &HostPort {
        self.host_port.get_or_init(|| match self.header_opt("host") {
            Some(raw) => {
                let HostPort { host, port } = url::parse_host(raw);
                HostPort { host, port: port.or_else(|| Some(self.default_port())) }
            }
            None => HostPort {
                host: self.raw.server_name.clone(),
                port: self.raw.server_port.or_else(|| Some(self.default_port())),
            },
        })
    }

    fn default_port(&self) -> u16 {
        if self.is_secure() { 443 } else { 80 }
    }

    /// The parsed content type, computed once and cached.
    ///
    /// Read-only methods (GET and friends) are defined to have no content
    /// type — the header is ignored and the empty type is reported.
    pub fn content_type(&self) -> Result<&ContentType, Error> {
        self.content_type.get_or_try_init(|| {
            if !self.body_supported() {
                return Ok(ContentType::empty());
            }
            let raw = self.header_opt("content-type").unwrap_or("");
            let decoded = percent::decode(raw, false)?;
            ContentType::parse(&decoded)
        })
    }

    pub fn content_type_params(&self) -> Result<&HashMap<String, String>, Error> {
        self.content_type().map(ContentType::params)
    }

    /// Declared body length; absent or malformed declarations read as zero.
    pub fn content_length(&self) -> u64 {
        self.raw.content_length.unwrap_or(0)
    }

    /// Whether the request's method expects a body at all.
    pub fn body_supported(&self) -> bool {
        self.raw
            .method
            .parse::<Method>()
            .map(|m| !m.is_read_only())
            .unwrap_or(true)
    }

    /// A required header value. Fails with [`Error::MissingHeader`] when
    /// absent and [`Error::HeaderSyntax`] when not representable as text.
    pub fn header(&self, name: &str) -> Result<&str, Error> {
        match self.raw.headers.get(name) {
            Some(value) => value
                .to_str()
                .map_err(|_| Error::HeaderSyntax(name.to_owned())),
            None => Err(Error::MissingHeader(name.to_owned())),
        }
    }

    /// An optional header value; `None` when absent or not text.
    pub fn header_opt(&self, name: &str) -> Option<&str> {
        self.raw.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.header_opt("user-agent")
    }

    pub fn accepted_languages(&self) -> Option<&str> {
        self.header_opt("accept-language")
    }

    pub fn accepted_encoding(&self) -> Option<&str> {
        self.header_opt("accept-encoding")
    }

    /// Reconstructs the full request URI, omitting the port when it is
    /// the scheme default.
    pub fn full_path(&self) -> String {
        let mut uri = format!("{}://{}", self.scheme(), self.host());
        if self.port() != self.default_port() {
            let _ = write!(uri, ":{}", self.port());
        }
        if !self.raw.path.starts_with('/') {
            uri.push('/');
        }
        uri.push_str(&self.raw.path);
        if !self.raw.query.is_empty() {
            uri.push('?');
            uri.push_str(&self.raw.query);
        }
        uri
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(method: &str, path: &str, query: &str) -> RawFields<()> {
        RawFields {
            method: method.to_owned(),
            path: path.to_owned(),
            query: query.to_owned(),
            headers: HeaderMap::new(),
            content_length: None,
            scheme: "http".to_owned(),
            server_name: "fallback.local".to_owned(),
            server_port: Some(8000),
            input: (),
        }
    }

    fn with_header(mut raw: RawFields<()>, name: &'static str, value: &str) -> RawFields<()> {
        raw.headers.insert(name, value.parse().unwrap());
        raw
    }

    #[test]
    fn accessors_parse_and_cache() {
        let req = Request::new(fields("GET", "/users/42", "a=1&b=2"));
        let first = req.path().unwrap().as_ptr();
        assert_eq!(req.path().unwrap(), ["users", "42"]);
        // Second call returns the same cached allocation.
        assert_eq!(req.path().unwrap().as_ptr(), first);
        assert_eq!(req.query().unwrap()["a"], "1");
    }

    #[test]
    fn host_header_preferred_over_server_fields() {
        let raw = with_header(fields("GET", "/", ""), "host", "example.com:8080");
        let req = Request::new(raw);
        assert_eq!(req.host(), "example.com");
        assert_eq!(req.port(), 8080);
    }

    #[test]
    fn host_falls_back_to_server_fields() {
        let req = Request::new(fields("GET", "/", ""));
        assert_eq!(req.host(), "fallback.local");
        assert_eq!(req.port(), 8000);
    }

    #[test]
    fn port_defaults_by_scheme() {
        let raw = with_header(fields("GET", "/", ""), "host", "example.com");
        let req = Request::new(raw);
        assert_eq!(req.port(), 80);

        let mut raw = with_header(fields("GET", "/", ""), "host", "example.com");
        raw.scheme = "https".to_owned();
        raw.server_port = None;
        let req = Request::new(raw);
        assert_eq!(req.port(), 443);
    }

    #[test]
    fn read_only_method_has_no_content_type() {
        let raw = with_header(fields("GET", "/", ""), "content-type", "application/json");
        let req = Request::new(raw);
        assert!(req.content_type().unwrap().is_empty());
        assert!(!req.body_supported());
    }

    #[test]
    fn post_content_type_is_parsed() {
        let raw = with_header(
            fields("POST", "/", ""),
            "content-type",
            "application/JSON; charset=utf-8",
        );
        let req = Request::new(raw);
        let ct = req.content_type().unwrap();
        assert_eq!(ct.media_type(), "application/json");
        assert_eq!(req.content_type_params().unwrap()["charset"], "utf-8");
        assert!(req.body_supported());
    }

    #[test]
    fn missing_header_errors_optional_does_not() {
        let req = Request::new(fields("GET", "/", ""));
        assert!(matches!(req.header("x-token"), Err(Error::MissingHeader(_))));
        assert_eq!(req.header_opt("x-token"), None);
    }

    #[test]
    fn content_length_defaults_to_zero() {
        let req = Request::new(fields("POST", "/", ""));
        assert_eq!(req.content_length(), 0);
    }

    #[test]
    fn full_path_reconstruction() {
        let raw = with_header(fields("GET", "/users/42", "a=1"), "host", "example.com:8080");
        let req = Request::new(raw);
        assert_eq!(req.full_path(), "http://example.com:8080/users/42?a=1");

        let raw = with_header(fields("GET", "/users", ""), "host", "example.com");
        let req = Request::new(raw);
        assert_eq!(req.full_path(), "http://example.com/users");
    }

    #[test]
    fn from_http_adapter() {
        let (parts, _) = http::Request::builder()
            .method("POST")
            .uri("http://example.com/items?x=1")
            .header("content-length", "7")
            .body(())
            .unwrap()
            .into_parts();
        let raw = RawFields::from_http(parts, Bytes::from_static(b"payload"));
        assert_eq!(raw.method, "POST");
        assert_eq!(raw.path, "/items");
        assert_eq!(raw.query, "x=1");
        assert_eq!(raw.content_length, Some(7));
        assert_eq!(raw.scheme, "http");
    }
}
