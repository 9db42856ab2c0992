//! # portico
//!
//! The request-parsing and resource-dispatch layer of a minimal HTTP
//! framework. Nothing more. Nothing less.
//!
//! ## The contract
//!
//! The gateway owns the wire: it accepts connections, demultiplexes
//! requests, and hands portico one raw field set per request — method,
//! path, query, headers, a bounded body source. portico owns everything
//! between those raw fields and a handler's return value:
//!
//! - **Percent codec** — RFC 3986 escaping over `const` lookup tables,
//!   no runtime cache on the hot decode path
//! - **Structural parsers** — query strings, `host:port`, path segments
//! - **Content types** — `media/subtype; param=value` parsing plus the
//!   static extension ↔ media-type tables
//! - **Decoder registry** — pluggable body decoders keyed by media type
//!   or extension; strict JSON out of the box, unknown types degrade to text
//! - **Request façade** — lazy, cached accessors over one request's
//!   immutable raw fields
//! - **Router** — resolves decoded path segments against an externally
//!   supplied resource graph and dispatches `do_<verb>` handlers
//!
//! What it deliberately does not own: TLS, timeouts, response
//! transmission, content negotiation, chunked bodies. Those belong to
//! the transport collaborator on either side.
//!
//! ## Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use portico::{BoxFuture, Call, DecoderRegistry, Error, RawFields, Request, Resource, Router};
//! use serde_json::{json, Value};
//!
//! struct Users;
//!
//! impl Resource for Users {
//!     fn is_endpoint(&self) -> bool { true }
//!
//!     fn invoke(&self, verb: &str, call: Call) -> Option<BoxFuture<Result<Value, Error>>> {
//!         if verb != "do_get" { return None; }
//!         Some(Box::pin(async move {
//!             Ok(match call {
//!                 // GET /users — the fully named endpoint.
//!                 Call::Named => json!(["ada", "grace"]),
//!                 // GET /users/42 — "42" rides along as a literal argument.
//!                 Call::Trailing { argument, .. } => json!({ "id": argument }),
//!             })
//!         }))
//!     }
//! }
//!
//! struct Root { users: Users }
//!
//! impl Resource for Root {
//!     fn child(&self, name: &str) -> Option<&dyn Resource> {
//!         (name == "users").then_some(&self.users as &dyn Resource)
//!     }
//!     fn invoke(&self, _: &str, _: Call) -> Option<BoxFuture<Result<Value, Error>>> { None }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Error> {
//! let router = Router::new(Arc::new(Root { users: Users }));
//! let (parts, _) = http::Request::builder()
//!     .method("GET")
//!     .uri("http://example.com/users/42?verbose=1")
//!     .body(())
//!     .unwrap()
//!     .into_parts();
//! let request = Request::new(RawFields::from_http(parts, bytes::Bytes::new()));
//!
//! let value = router.dispatch(&request).await?;
//! assert_eq!(value, json!({ "id": "42" }));
//! # Ok(())
//! # }
//! ```

mod body;
mod error;
mod media;
mod method;
mod registry;
mod request;
mod resource;
mod router;

pub mod mime;
pub mod percent;
pub mod url;

pub use body::BodyValue;
pub use error::Error;
pub use media::ContentType;
pub use method::Method;
pub use registry::{Decoder, DecoderRegistry};
pub use request::{RawFields, Request};
pub use resource::{BoxFuture, Call, Resource};
pub use router::{RouteResult, Router};
pub use url::{HostPort, QueryMap};
