use crate::method::Method;
use crate::params::Params;

/// A request as seen by a handler: the normalized path, the method it was
/// dispatched on, the captured path parameters and the parsed query string.
///
/// A new `HttpRequest` is built for every lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    path: String,
    method: Method,
    params: Params,
    query: Params,
}

impl HttpRequest {
    pub(crate) fn new(path: String, method: Method, params: Params, query: Params) -> Self {
        HttpRequest {
            path,
            method,
            params,
            query,
        }
    }

    /// The normalized request path, without the query string.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// Path parameters, keyed by the name used in the route pattern.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Decoded query parameters.
    pub fn query(&self) -> &Params {
        &self.query
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    /// Returns the path parameter `name`, or `default` if it was not captured.
    pub fn param_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.param(name).unwrap_or(default)
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name)
    }

    /// Returns the query parameter `name`, or `default` if it is absent.
    pub fn query_param_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.query_param(name).unwrap_or(default)
    }
}
