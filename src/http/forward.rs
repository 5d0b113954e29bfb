//! Upstream forwarding.
//!
//! # Responsibilities
//! - Build the outbound header set from the forwarded-header whitelist
//! - Pass the request body through to the upstream as a stream
//! - Relay the upstream response with the CORS set overlaid
//! - Map transport failures to a generic 500
//!
//! # Design Decisions
//! - Whitelist, not blacklist: anything not listed is dropped, which
//!   sheds host, cookie, and tracing headers in one place
//! - Bodies are never buffered in either direction
//! - Hop-by-hop headers from the upstream are stripped before relaying
//! - No retries; the first transport failure is final

use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderName, Method, StatusCode};
use axum::response::Response;

use crate::http::cors;

/// Request headers copied to the upstream request. Lower-case match;
/// everything else from the inbound request is dropped.
pub const FORWARDED_HEADERS: [&str; 7] = [
    "authorization",
    "content-type",
    "user-agent",
    "accept",
    "accept-encoding",
    "accept-language",
    "x-requested-with",
];

/// Connection-scoped headers that must not be relayed from the upstream
/// response (RFC 9110 §7.6.1).
const HOP_BY_HOP_HEADERS: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Forward a request to `target_url` and relay the upstream response.
///
/// The inbound body is streamed through unbuffered. Any transport-level
/// failure yields a 500 with the CORS set and a generic body; upstream
/// 4xx/5xx responses are relayed verbatim.
pub async fn proxy(
    client: &reqwest::Client,
    method: Method,
    inbound_headers: &HeaderMap,
    target_url: &str,
    body: Body,
) -> Response {
    let mut outbound = client
        .request(method, target_url)
        .headers(filter_request_headers(inbound_headers));

    if declares_body(inbound_headers) {
        outbound = outbound.body(reqwest::Body::wrap_stream(body.into_data_stream()));
    }

    match outbound.send().await {
        Ok(upstream) => relay_response(upstream),
        Err(error) => {
            tracing::error!(target = %target_url, error = %error, "Upstream request failed");
            internal_server_error()
        }
    }
}

/// Build a fresh header map containing only whitelisted inbound headers.
pub fn filter_request_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut outbound = HeaderMap::new();
    for name in FORWARDED_HEADERS {
        if let Some(value) = inbound.get(name) {
            outbound.insert(HeaderName::from_static(name), value.clone());
        }
    }
    outbound
}

/// Whether the inbound request carries a body worth streaming upstream.
fn declares_body(headers: &HeaderMap) -> bool {
    if let Some(length) = headers.get(header::CONTENT_LENGTH) {
        return length.to_str().map(|v| v != "0").unwrap_or(true);
    }
    headers.contains_key(header::TRANSFER_ENCODING)
}

/// Turn the upstream response into the client response: status preserved,
/// headers relayed minus hop-by-hop, CORS overlaid, body streamed.
fn relay_response(upstream: reqwest::Response) -> Response {
    let status = upstream.status();
    let mut headers = upstream.headers().clone();
    for name in HOP_BY_HOP_HEADERS {
        headers.remove(name);
    }
    cors::overlay(&mut headers);

    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}

/// The one failure response: generic body, exactly the CORS set.
fn internal_server_error() -> Response {
    let mut response = Response::new(Body::from("Internal Server Error"));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    *response.headers_mut() = cors::cors_headers();
    response
}
