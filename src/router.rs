//! `Router` maps a method and a request path to a registered handler.
//!
//! Routes are stored in a compressed prefix tree (radix tree). A route
//! pattern is made of `/`-separated segments, each either static text or a
//! named parameter:
//! ```ignore
//!  Syntax    Type
//!  :name     named parameter
//! ```
//!
//! Named parameters match exactly one path segment:
//! ```ignore
//!  Pattern: /blog/:category/:post
//!
//!  /blog/rust/request-routers            match: category="rust", post="request-routers"
//!  /blog/rust/request-routers/           match: trailing slashes are normalized away
//!  /blog/rust                            no match
//!  /blog/rust/request-routers/comments   no match
//! ```
//!
//! Static segments take precedence over parameters at every position, so
//! `/users/new` and `/users/:id` can be registered together.
//!
//! Here is a simple example:
//! ```rust
//! use radix_router::{Dispatch, Method, Router};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut router = Router::new();
//! router.get("/", |_| Ok(()))?;
//! router.get("/hello/:user", |req| {
//!     println!("Hello, {}", req.param_or("user", "stranger"));
//!     Ok(())
//! })?;
//!
//! assert_eq!(router.dispatch(Method::Get, "/hello/gordon"), Dispatch::Handled);
//! assert_eq!(router.dispatch(Method::Post, "/hello/gordon"), Dispatch::NotFound);
//! # Ok(())
//! # }
//! ```
use crate::error::{InsertError, MatchError};
use crate::handler::{BoxedHandler, Dispatch, HandlerResult};
use crate::method::Method;
use crate::request::HttpRequest;
use crate::tree::Node;

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

/// Router is a container which dispatches requests to the handler
/// registered for their method and path.
pub struct Router {
    tree: Node<BoxedHandler>,

    /// If enabled, a panicking handler is caught at the dispatch boundary and
    /// logged like a handler returning an error. Subsequent requests are
    /// served normally.
    ///
    /// Enabled by default.
    pub catch_panics: bool,
}

impl Default for Router {
    fn default() -> Self {
        Router {
            tree: Node::new(),
            catch_panics: true,
        }
    }
}

impl Router {
    /// Creates an empty router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for the given method and route pattern.
    ///
    /// The pattern must begin with '/'. Registering a pattern and method a
    /// second time replaces the first handler.
    /// ```rust
    /// use radix_router::{Method, Router};
    ///
    /// let mut router = Router::new();
    /// assert!(router.add_route(Method::Put, "/teapot", |_| Ok(())).is_ok());
    /// assert!(router.add_route(Method::Put, "teapot", |_| Ok(())).is_err());
    /// ```
    pub fn add_route<F>(&mut self, method: Method, pattern: &str, handler: F) -> Result<(), InsertError>
    where
        F: Fn(&HttpRequest) -> HandlerResult + Send + Sync + 'static,
    {
        self.tree.insert(method, pattern, Box::new(handler))?;
        debug!("registered route {} {}", method, pattern);
        Ok(())
    }

    /// get is a shortcut for `router.add_route(Method::Get, pattern, handler)`
    pub fn get<F>(&mut self, pattern: &str, handler: F) -> Result<(), InsertError>
    where
        F: Fn(&HttpRequest) -> HandlerResult + Send + Sync + 'static,
    {
        self.add_route(Method::Get, pattern, handler)
    }

    /// post is a shortcut for `router.add_route(Method::Post, pattern, handler)`
    pub fn post<F>(&mut self, pattern: &str, handler: F) -> Result<(), InsertError>
    where
        F: Fn(&HttpRequest) -> HandlerResult + Send + Sync + 'static,
    {
        self.add_route(Method::Post, pattern, handler)
    }

    /// put is a shortcut for `router.add_route(Method::Put, pattern, handler)`
    pub fn put<F>(&mut self, pattern: &str, handler: F) -> Result<(), InsertError>
    where
        F: Fn(&HttpRequest) -> HandlerResult + Send + Sync + 'static,
    {
        self.add_route(Method::Put, pattern, handler)
    }

    /// delete is a shortcut for `router.add_route(Method::Delete, pattern, handler)`
    pub fn delete<F>(&mut self, pattern: &str, handler: F) -> Result<(), InsertError>
    where
        F: Fn(&HttpRequest) -> HandlerResult + Send + Sync + 'static,
    {
        self.add_route(Method::Delete, pattern, handler)
    }

    /// Lookup allows the manual lookup of a method and path, without invoking
    /// the handler.
    ///
    /// This is e.g. useful to build a framework around this router.
    /// ```rust
    /// use radix_router::{Method, Router};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut router = Router::new();
    /// router.get("/users/:id", |_| Ok(()))?;
    ///
    /// let (_, request) = router.lookup(Method::Get, "/users/7?tab=posts")?;
    /// assert_eq!(request.param("id"), Some("7"));
    /// assert_eq!(request.query_param("tab"), Some("posts"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn lookup(&self, method: Method, raw_path: &str) -> Result<(&BoxedHandler, HttpRequest), MatchError> {
        self.tree.at(method, raw_path).into_result()
    }

    /// Finds the handler for the method and path and invokes it.
    ///
    /// Errors returned by the handler, and panics if `catch_panics` is set,
    /// are logged and do not reach the caller. The router stays usable
    /// afterwards.
    pub fn dispatch(&self, method: Method, raw_path: &str) -> Dispatch {
        let lookup = self.tree.at(method, raw_path);
        let Some(handler) = lookup.value else {
            debug!("no route for {} {}", method, raw_path);
            return Dispatch::NotFound;
        };

        let req = lookup.request;
        trace!("dispatching {} {} with params {:?}", method, req.path(), req.params());

        let result = if self.catch_panics {
            panic::catch_unwind(AssertUnwindSafe(|| handler(&req)))
        } else {
            Ok(handler(&req))
        };

        match result {
            Ok(Ok(())) => {}
            Ok(Err(err)) => error!("handler for {} {} failed: {}", method, req.path(), err),
            Err(payload) => error!(
                "handler for {} {} panicked: {}",
                method,
                req.path(),
                panic_message(payload.as_ref())
            ),
        }

        Dispatch::Handled
    }

    /// Returns the methods with a handler on the route `raw_path` resolves to.
    pub fn allowed(&self, raw_path: &str) -> Vec<Method> {
        self.tree.allowed(raw_path)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        *s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("catch_panics", &self.catch_panics)
            .finish_non_exhaustive()
    }
}
