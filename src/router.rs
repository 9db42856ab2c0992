//! Resource-graph request router.
//!
//! A state machine over the decoded path segments, starting at a
//! configured root node. Interior segments must resolve to named
//! children — there is no fallback for them. The last segment decides
//! the call shape: a resolved endpoint is invoked with no arguments, an
//! unresolved segment becomes a literal argument to its parent. That
//! two-shape rule is what lets one handler answer an open set of
//! identifiers without a child node per identifier.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::error::Error;
use crate::method::Method;
use crate::request::Request;
use crate::resource::{Call, Resource};

/// The application router. Build it once at startup around the root of
/// the handler graph; share it across workers behind an `Arc`.
pub struct Router {
    root: Arc<dyn Resource>,
}

/// A resolved route: the endpoint node, plus the trailing literal
/// argument when the last segment did not name a child.
pub struct RouteResult<'a> {
    pub endpoint: &'a dyn Resource,
    pub trailing: Option<String>,
}

impl RouteResult<'_> {
    /// Whether the last path segment was consumed as a literal argument.
    pub fn has_trailing_argument(&self) -> bool {
        self.trailing.is_some()
    }
}

impl Router {
    pub fn new(root: Arc<dyn Resource>) -> Self {
        Self { root }
    }

    /// Resolves decoded path segments against the resource graph.
    ///
    /// Every segment but the last must name a child of the current node;
    /// a miss there is [`Error::NotFound`]. The last segment either names
    /// an endpoint child, or — when unresolved — rides along as the
    /// trailing argument with the *current* node as the endpoint. A last
    /// segment that resolves to a non-endpoint node is also a miss.
    pub fn resolve<'a>(&'a self, segments: &[String]) -> Result<RouteResult<'a>, Error> {
        let mut current: &dyn Resource = self.root.as_ref();

        let Some((last, interior)) = segments.split_last() else {
            return Ok(RouteResult { endpoint: current, trailing: None });
        };
        for segment in interior {
            current = current
                .child(segment)
                .ok_or_else(|| Error::NotFound(segment.clone()))?;
        }
        match current.child(last) {
            Some(node) if node.is_endpoint() => {
                Ok(RouteResult { endpoint: node, trailing: None })
            }
            Some(_) => Err(Error::NotFound(last.clone())),
            None => Ok(RouteResult { endpoint: current, trailing: Some(last.clone()) }),
        }
    }

    /// Routes one request: resolve the path, pick the verb handler, call it.
    ///
    /// The handler is named by the `do_<verb>` convention and receives
    /// either no arguments (fully named endpoint) or the trailing literal
    /// segment plus the parsed query map.
    pub async fn dispatch<S>(&self, request: &Request<S>) -> Result<Value, Error> {
        let method: Method = request
            .method()
            .parse()
            .map_err(|()| Error::MethodNotAllowed(request.method().to_owned()))?;
        let segments = request.path()?;
        let route = self.resolve(segments)?;

        debug!(
            method = %method,
            path = ?segments,
            trailing = route.has_trailing_argument(),
            "dispatching"
        );

        let call = match route.trailing {
            Some(argument) => Call::Trailing { argument, query: request.query()?.clone() },
            None => Call::Named,
        };
        let handler = route
            .endpoint
            .invoke(method.handler_name(), call)
            .ok_or_else(|| Error::MethodNotAllowed(method.to_string()))?;
        handler.await
    }
}
