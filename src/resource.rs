//! The resource-node interface and handler type erasure.
//!
//! # How verb handlers are invoked
//!
//! The router walks an externally supplied graph of [`Resource`] nodes.
//! Nodes of *different* concrete types hang off one graph, so the router
//! talks to them through a trait object (`&dyn Resource`) and every verb
//! handler comes back type-erased as a [`BoxFuture`]:
//!
//! ```text
//! impl Resource for Users { … }                    ← collaborator writes this
//!        ↓ router.resolve(segments)
//! endpoint.invoke("do_get", call)                  ← one vtable dispatch
//!        ↓
//! Some(Box::pin(async move { … }))                 ← BoxFuture, awaited by dispatch
//! ```
//!
//! `invoke` answers `None` when the node has no handler for the verb —
//! that is how the router distinguishes "wrong method" (405) from
//! "wrong path" (404).

use std::future::Future;
use std::pin::Pin;

use serde_json::Value;

use crate::error::Error;
use crate::url::QueryMap;

/// A heap-allocated, type-erased future.
///
/// `Pin<Box<…>>` because the runtime must poll the future in-place;
/// `Send + 'static` so workers can move it across threads.
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

/// The two call shapes of verb dispatch.
///
/// A path whose last segment named the endpoint itself invokes the verb
/// handler with no arguments. A path whose last segment did *not*
/// resolve carries that segment as a literal argument — one handler
/// answering an open set of identifiers — together with the parsed
/// query map.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    /// The endpoint was fully named by the path.
    Named,
    /// The last segment is a literal argument to the parent endpoint.
    Trailing { argument: String, query: QueryMap },
}

/// One node in the externally supplied handler graph.
///
/// The router does not own the graph and never mutates it; it only asks
/// nodes for named children and invokes verb handlers on the resolved
/// endpoint. Handler names follow the `do_<verb>` convention —
/// lowercased HTTP method behind a fixed `do_` marker (`do_get`,
/// `do_post`, …); [`Method::handler_name`](crate::Method::handler_name)
/// produces them.
pub trait Resource: Send + Sync {
    /// Resolves a named child node, `None` when no such child exists.
    fn child(&self, name: &str) -> Option<&dyn Resource> {
        let _ = name;
        None
    }

    /// Whether this node can serve as an endpoint at all. A last path
    /// segment that resolves to a non-endpoint node is a routing miss.
    fn is_endpoint(&self) -> bool {
        false
    }

    /// Invokes the named verb handler, `None` when this node has no
    /// handler under that name.
    fn invoke(&self, verb: &str, call: Call) -> Option<BoxFuture<Result<Value, Error>>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Probe;

    impl Resource for Probe {
        fn is_endpoint(&self) -> bool {
            true
        }

        fn invoke(&self, verb: &str, call: Call) -> Option<BoxFuture<Result<Value, Error>>> {
            if verb != "do_get" {
                return None;
            }
            let echoed = match call {
                Call::Named => json!("named"),
                Call::Trailing { argument, .. } => json!({ "argument": argument }),
            };
            Some(Box::pin(async move { Ok(echoed) }))
        }
    }

    #[tokio::test]
    async fn invoke_dispatches_by_verb_name() {
        let node = Probe;
        let fut = node.invoke("do_get", Call::Named).unwrap();
        assert_eq!(fut.await.unwrap(), json!("named"));
        assert!(node.invoke("do_post", Call::Named).is_none());
    }

    #[test]
    fn defaults_are_leafless_non_endpoint() {
        struct Bare;
        impl Resource for Bare {
            fn invoke(&self, _: &str, _: Call) -> Option<BoxFuture<Result<Value, Error>>> {
                None
            }
        }
        assert!(Bare.child("anything").is_none());
        assert!(!Bare.is_endpoint());
    }
}
