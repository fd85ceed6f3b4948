use crate::request::HttpRequest;

use http::StatusCode;

/// The error type handlers may fail with.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// What a handler returns.
pub type HandlerResult = Result<(), BoxError>;

/// A type-erased request handler.
///
/// Handlers are `Send + Sync` so that a fully built router can be shared
/// read-only between threads.
pub type BoxedHandler = Box<dyn Fn(&HttpRequest) -> HandlerResult + Send + Sync>;

/// The outcome of [`Router::dispatch`](crate::Router::dispatch).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// A handler matched and was invoked. This is reported even when the
    /// handler itself failed.
    Handled,
    /// No route matched the path and method.
    NotFound,
}

impl Dispatch {
    /// The status code a transport layer would answer with.
    pub fn status(&self) -> StatusCode {
        match self {
            Dispatch::Handled => StatusCode::OK,
            Dispatch::NotFound => StatusCode::NOT_FOUND,
        }
    }

    pub fn is_handled(&self) -> bool {
        matches!(self, Dispatch::Handled)
    }
}
