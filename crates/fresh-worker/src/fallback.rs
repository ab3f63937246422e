//! Offline fallback response.

use fresh_cache::header_names;
use fresh_http::Response;

/// The fixed placeholder body served when the network is unreachable and the
/// cache has nothing.
pub const OFFLINE_FALLBACK_HTML: &str = "<!DOCTYPE html>\n\
<html lang=\"en\">\n\
<head><meta charset=\"utf-8\"><title>Offline</title></head>\n\
<body>\n\
<h1>You appear to be offline</h1>\n\
<p>The network is unreachable and nothing is cached for this page yet.</p>\n\
</body>\n\
</html>\n";

/// Synthesize the offline placeholder response.
pub fn offline_fallback() -> Response {
    Response::with_status(200)
        .with_header(header_names::CONTENT_TYPE, "text/html; charset=utf-8")
        .with_body(OFFLINE_FALLBACK_HTML)
}
