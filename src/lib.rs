//! A request router built on a segment-compressed radix tree.
//!
//! ```rust
//! use radix_router::{Method, Router};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut router = Router::new();
//! router.get("/search", |req| {
//!     println!("searching for {}", req.query_param_or("q", ""));
//!     Ok(())
//! })?;
//! router.get("/users/:id/post/:post_id", |_| Ok(()))?;
//!
//! let (_, req) = router.lookup(Method::Get, "/users//123/post/456/?page=2")?;
//! assert_eq!(req.path(), "/users/123/post/456");
//! assert_eq!(req.param("id"), Some("123"));
//! assert_eq!(req.param("post_id"), Some("456"));
//! assert_eq!(req.query_param("page"), Some("2"));
//! # Ok(())
//! # }
//! ```
#![deny(clippy::all)]
#![forbid(unsafe_code)]

#[macro_use]
extern crate log;

mod error;
mod handler;
mod method;
mod params;
mod path;
mod query;
mod request;
mod router;
mod tree;

pub use error::{InsertError, MatchError, UnsupportedMethod};
pub use handler::{BoxError, BoxedHandler, Dispatch, HandlerResult};
pub use method::Method;
pub use params::{Params, ParamsIter};
pub use path::normalize;
pub use query::{decode, parse_query};
pub use request::HttpRequest;
pub use router::Router;
pub use tree::{Lookup, Node};
