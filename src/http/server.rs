//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum router with a single catch-all handler
//! - Wire up middleware (tracing, request ID)
//! - Classify each request and produce exactly one response
//! - Serve static responses (home page, robots.txt, preflight)
//! - Hand proxied requests to the forwarding layer
//!
//! # Design Decisions
//! - One handler for every method and path; the route decision lives in
//!   the routing subsystem, not in the Axum route tree
//! - All shared state is immutable, so concurrent requests need no locks
//! - The upstream client is built once and cloned per request (cheap
//!   handle around a shared connection pool)

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    response::Response,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::ProxyConfig;
use crate::http::request::request_id_layer;
use crate::http::{cors, forward, X_REQUEST_ID};
use crate::observability::metrics;
use crate::routing::{classify, RouteDecision, RouteTable};

/// Status banner served at `/` and `/index.html`.
const HOME_PAGE_BODY: &str =
    "API代理服务正常运行中，详细使用教程请查看：https://plusai.zhangsan.link";

/// Crawler policy served at `/robots.txt`.
const ROBOTS_TXT_BODY: &str = "User-agent: *\nDisallow: /";

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub client: reqwest::Client,
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a server over the compiled-in route table.
    pub fn new(config: ProxyConfig) -> Self {
        Self::with_routes(config, RouteTable::builtin())
    }

    /// Create a server over an explicit route table. Used by tests to
    /// point prefixes at local mock upstreams.
    pub fn with_routes(config: ProxyConfig, routes: RouteTable) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .pool_idle_timeout(Duration::from_secs(config.timeouts.pool_idle_secs))
            .build()
            .expect("Failed to create HTTP client");

        let state = AppState {
            routes: Arc::new(routes),
            client,
        };

        let router = Self::build_router(state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(relay_handler))
            .route("/", any(relay_handler))
            .with_state(state)
            .layer(request_id_layer())
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server on the given listener until shutdown is signalled.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}

/// Catch-all handler: classify, then answer or forward.
async fn relay_handler(State(state): State<AppState>, request: Request) -> Response {
    let start = Instant::now();
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let decision = classify(&state.routes, request.method(), request.uri());

    match decision {
        RouteDecision::Preflight => {
            metrics::record_request(request.method().as_str(), 204, "preflight", start);
            preflight()
        }
        RouteDecision::HomePage => {
            metrics::record_request(request.method().as_str(), 200, "home", start);
            static_response(StatusCode::OK, Some("text/html"), HOME_PAGE_BODY)
        }
        RouteDecision::RobotsTxt => {
            metrics::record_request(request.method().as_str(), 200, "robots", start);
            static_response(StatusCode::OK, Some("text/plain"), ROBOTS_TXT_BODY)
        }
        RouteDecision::NotFound => {
            tracing::debug!(
                request_id = %request_id,
                path = %request.uri().path(),
                "No route matched"
            );
            metrics::record_request(request.method().as_str(), 404, "none", start);
            static_response(StatusCode::NOT_FOUND, None, "Not Found")
        }
        RouteDecision::Proxy { prefix, target_url } => {
            tracing::debug!(
                request_id = %request_id,
                method = %request.method(),
                target = %target_url,
                "Forwarding to upstream"
            );

            let (parts, body) = request.into_parts();
            let response = forward::proxy(
                &state.client,
                parts.method.clone(),
                &parts.headers,
                &target_url,
                body,
            )
            .await;

            metrics::record_request(
                parts.method.as_str(),
                response.status().as_u16(),
                &prefix,
                start,
            );
            response
        }
    }
}

/// 204 preflight answer: empty body, exactly the CORS set.
fn preflight() -> Response {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::NO_CONTENT;
    *response.headers_mut() = cors::cors_headers();
    response
}

/// Fixed-body response carrying the CORS set.
fn static_response(
    status: StatusCode,
    content_type: Option<&'static str>,
    body: &'static str,
) -> Response {
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    *response.headers_mut() = cors::cors_headers();
    if let Some(value) = content_type {
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static(value));
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preflight_is_bare() {
        let response = preflight();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(response.headers().len(), 4);
        assert!(response.headers().get(header::CONTENT_TYPE).is_none());
    }

    #[test]
    fn static_responses_carry_cors_and_content_type() {
        let response = static_response(StatusCode::OK, Some("text/html"), HOME_PAGE_BODY);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/html");
        assert_eq!(response.headers()["access-control-allow-origin"], "*");

        let response = static_response(StatusCode::NOT_FOUND, None, "Not Found");
        assert!(response.headers().get(header::CONTENT_TYPE).is_none());
        assert_eq!(response.headers()["access-control-max-age"], "86400");
    }
}
