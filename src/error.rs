use std::fmt;

/// Represents errors that can occur when inserting a new route.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum InsertError {
    /// The route pattern is malformed.
    InvalidPattern {
        /// The pattern as passed to the router.
        pattern: String,
        /// What is wrong with it.
        reason: &'static str,
    },
    /// Attempted to register a parameter under a different name at a
    /// position that already has one.
    Conflict {
        /// The existing route that the insertion is conflicting with.
        with: String,
    },
}

impl fmt::Display for InsertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPattern { pattern, reason } => {
                write!(f, "invalid route pattern '{}': {}", pattern, reason)
            }
            Self::Conflict { with } => {
                write!(
                    f,
                    "insertion failed due to conflict with previously registered route: {}",
                    with
                )
            }
        }
    }
}

impl std::error::Error for InsertError {}

impl InsertError {
    pub(crate) fn invalid(pattern: &str, reason: &'static str) -> Self {
        InsertError::InvalidPattern {
            pattern: pattern.to_owned(),
            reason,
        }
    }
}

/// A failed match attempt.
///
/// A path that matches no route and a route without a handler for the
/// requested method are reported the same way.
///
/// ```
/// use radix_router::{MatchError, Method, Router};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut router = Router::new();
/// router.get("/home", |_| Ok(()))?;
///
/// // no routes match
/// if let Err(err) = router.lookup(Method::Get, "/foobar") {
///     assert_eq!(err, MatchError::NotFound);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum MatchError {
    /// No matching route was found.
    NotFound,
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "matching route not found")
    }
}

impl std::error::Error for MatchError {}

/// A method name outside the supported set.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct UnsupportedMethod(pub String);

impl fmt::Display for UnsupportedMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported method: {}", self.0)
    }
}

impl std::error::Error for UnsupportedMethod {}
