//! Permissive CORS header set.
//!
//! # Responsibilities
//! - Define the fixed four-header CORS set
//! - Overlay the set onto a response header map (set, not append)
//!
//! # Design Decisions
//! - The set is identical for every response the relay produces
//! - Overlay replaces any upstream-supplied CORS values, so browser
//!   clients always see the relay's policy

use axum::http::{HeaderMap, HeaderName, HeaderValue};

/// The CORS headers attached to every response.
pub const CORS_HEADERS: [(&str, &str); 4] = [
    ("access-control-allow-origin", "*"),
    ("access-control-allow-methods", "GET, POST, PUT, DELETE, OPTIONS"),
    (
        "access-control-allow-headers",
        "Content-Type, Authorization, X-Requested-With",
    ),
    ("access-control-max-age", "86400"),
];

/// Set each CORS header on `headers`, replacing any existing value.
pub fn overlay(headers: &mut HeaderMap) {
    for (name, value) in CORS_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
}

/// A header map containing exactly the CORS set.
pub fn cors_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    overlay(&mut headers);
    headers
}
