//! Request identity: the cache lookup key.

use fresh_http::{Method, Request};

/// Identifies one cacheable exchange: method plus path.
///
/// Two requests with the same identity hit the same partition slot, so a
/// partition can never hold more than one entry for them. The URL is
/// normalized to its path (scheme, authority and query stripped) so that a
/// worker fetching `http://origin:8787/api/data` and a page requesting
/// `/api/data` agree on the slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestIdentity {
    method: Method,
    path: String,
}

impl RequestIdentity {
    /// Create an identity from a method and path.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }

    /// Derive the identity of a request.
    pub fn of(req: &Request) -> Self {
        Self::new(req.method, req.path())
    }

    /// The request method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// The normalized path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Render the stable partition key.
    pub fn cache_key(&self) -> String {
        format!("{} {}", self.method.as_str(), self.path)
    }
}

impl std::fmt::Display for RequestIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.cache_key())
    }
}
