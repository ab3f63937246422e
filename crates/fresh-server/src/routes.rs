//! Route dispatch over the platform's HTTP model.

use fresh_cache::{header_names, CacheHeaders};
use fresh_core::RequestId;
use fresh_http::{Method, Response};
use fresh_origin::{OriginError, ResourceEndpoint};

/// The demo logo served with a long-lived immutable policy.
static LOGO_PNG: &[u8] = include_bytes!("../assets/logo.png");

/// Maps request lines onto origin handlers.
pub struct Router {
    endpoint: ResourceEndpoint,
}

impl Router {
    /// Create a router over an endpoint.
    pub fn new(endpoint: ResourceEndpoint) -> Self {
        Self { endpoint }
    }

    /// Dispatch one request.
    ///
    /// Handler errors never escape: they are logged and collapsed to a 500
    /// so a single bad exchange cannot take the process down.
    pub fn dispatch(&self, method: Method, path: &str, if_none_match: Option<&str>) -> Response {
        let id = RequestId::generate();
        let span = tracing::info_span!("request", %id, %method, path);
        let _guard = span.enter();

        let result = match (method, path) {
            (Method::Get, "/api/data") => self.endpoint.handle_resource(if_none_match),
            (Method::Post, "/api/data/refresh") => self.endpoint.handle_refresh(),
            (Method::Get, "/healthz") => self.endpoint.handle_health(),
            (Method::Get, "/cached-logo.png") => Ok(self.logo()),
            _ => Ok(not_found()),
        };

        match result {
            Ok(response) => {
                tracing::info!(status = response.status, "handled");
                response
            }
            Err(error) => {
                tracing::error!(%error, "handler failed");
                internal_error(&error)
            }
        }
    }

    fn logo(&self) -> Response {
        let headers = CacheHeaders::new()
            .policy(self.endpoint.static_policy())
            .content_type("image/png")
            .build();

        Response::with_status(200)
            .with_headers(headers)
            .with_body(LOGO_PNG.to_vec())
    }
}

fn not_found() -> Response {
    Response::with_status(404)
        .with_header(header_names::CONTENT_TYPE, "text/plain; charset=utf-8")
        .with_body(&b"not found"[..])
}

fn internal_error(error: &OriginError) -> Response {
    Response::with_status(500)
        .with_header(header_names::CONTENT_TYPE, "text/plain; charset=utf-8")
        .with_body(error.to_string().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fresh_core::OriginConfig;
    use fresh_origin::ManualVersion;
    use std::sync::Arc;

    fn router() -> Router {
        let endpoint = ResourceEndpoint::new(
            &OriginConfig::default(),
            Arc::new(ManualVersion::new()),
        )
        .unwrap();
        Router::new(endpoint)
    }

    #[test]
    fn test_resource_route_revalidates() {
        let router = router();

        let first = router.dispatch(Method::Get, "/api/data", None);
        assert_eq!(first.status, 200);
        let tag = first.header("ETag").unwrap().to_string();

        let second = router.dispatch(Method::Get, "/api/data", Some(&tag));
        assert_eq!(second.status, 304);
    }

    #[test]
    fn test_logo_route_policy() {
        let resp = router().dispatch(Method::Get, "/cached-logo.png", None);

        assert_eq!(resp.status, 200);
        assert_eq!(
            resp.header("Cache-Control"),
            Some("public, max-age=3600, immutable")
        );
        assert_eq!(resp.content_type(), Some("image/png"));
        // PNG signature.
        assert_eq!(&resp.body[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_health_route() {
        let resp = router().dispatch(Method::Get, "/healthz", None);
        assert_eq!(resp.status, 200);
    }

    #[test]
    fn test_refresh_route_changes_tag() {
        let router = router();
        let before = router.dispatch(Method::Get, "/api/data", None);
        let tag = before.header("ETag").unwrap().to_string();

        let refresh = router.dispatch(Method::Post, "/api/data/refresh", None);
        assert_eq!(refresh.status, 200);

        let after = router.dispatch(Method::Get, "/api/data", Some(&tag));
        assert_eq!(after.status, 200);
        assert_ne!(after.header("ETag"), Some(tag.as_str()));
    }

    #[test]
    fn test_unknown_route() {
        assert_eq!(router().dispatch(Method::Get, "/nope", None).status, 404);
    }

    #[test]
    fn test_method_mismatch_is_not_found() {
        assert_eq!(
            router().dispatch(Method::Get, "/api/data/refresh", None).status,
            404
        );
        assert_eq!(router().dispatch(Method::Post, "/api/data", None).status, 404);
    }
}
