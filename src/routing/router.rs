//! Request classification.
//!
//! # Responsibilities
//! - Map an incoming request to exactly one terminal outcome
//! - Build the full upstream target URL for proxied requests
//!
//! # Design Decisions
//! - Precedence is fixed: preflight, home page, robots, proxy, not found
//! - `OPTIONS` short-circuits before any path inspection
//! - Target URL is built by literal concatenation; the query string is
//!   carried over unchanged

use axum::http::{Method, Uri};

use crate::routing::table::RouteTable;

/// Terminal outcome for a single request. Every request maps to exactly one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// CORS preflight: 204 with the CORS header set, any path.
    Preflight,
    /// Service status page at `/` or `/index.html`.
    HomePage,
    /// Crawler policy at `/robots.txt`.
    RobotsTxt,
    /// Forward to an upstream API.
    Proxy {
        /// Matched table prefix, used as the route label in logs and metrics.
        prefix: String,
        /// Fully-built upstream URL including the original query string.
        target_url: String,
    },
    /// No special path and no prefix matched.
    NotFound,
}

/// Classify a request into its terminal outcome.
pub fn classify(routes: &RouteTable, method: &Method, uri: &Uri) -> RouteDecision {
    if method == Method::OPTIONS {
        return RouteDecision::Preflight;
    }

    let path = uri.path();

    if path == "/" || path == "/index.html" {
        return RouteDecision::HomePage;
    }

    if path == "/robots.txt" {
        return RouteDecision::RobotsTxt;
    }

    if let Some(m) = routes.match_path(path) {
        let target_url = match uri.query() {
            Some(query) => format!("{}{}?{}", m.upstream, m.rest, query),
            None => format!("{}{}", m.upstream, m.rest),
        };
        return RouteDecision::Proxy {
            prefix: m.prefix.to_string(),
            target_url,
        };
    }

    RouteDecision::NotFound
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable {
        RouteTable::builtin()
    }

    #[test]
    fn options_short_circuits_everything() {
        let uri: Uri = "/openai/v1/models".parse().unwrap();
        assert_eq!(
            classify(&table(), &Method::OPTIONS, &uri),
            RouteDecision::Preflight
        );

        let uri: Uri = "/".parse().unwrap();
        assert_eq!(
            classify(&table(), &Method::OPTIONS, &uri),
            RouteDecision::Preflight
        );
    }

    #[test]
    fn home_page_aliases() {
        for path in ["/", "/index.html"] {
            let uri: Uri = path.parse().unwrap();
            assert_eq!(classify(&table(), &Method::GET, &uri), RouteDecision::HomePage);
        }
    }

    #[test]
    fn robots_txt() {
        let uri: Uri = "/robots.txt".parse().unwrap();
        assert_eq!(classify(&table(), &Method::GET, &uri), RouteDecision::RobotsTxt);
    }

    #[test]
    fn proxy_target_carries_query() {
        let uri: Uri = "/gemini/v1beta/models?key=abc".parse().unwrap();
        let decision = classify(&table(), &Method::POST, &uri);
        assert_eq!(
            decision,
            RouteDecision::Proxy {
                prefix: "/gemini".into(),
                target_url: "https://generativelanguage.googleapis.com/v1beta/models?key=abc"
                    .into(),
            }
        );
    }

    #[test]
    fn proxy_target_without_query() {
        let uri: Uri = "/telegram/bot123/sendMessage".parse().unwrap();
        let decision = classify(&table(), &Method::POST, &uri);
        assert_eq!(
            decision,
            RouteDecision::Proxy {
                prefix: "/telegram".into(),
                target_url: "https://api.telegram.org/bot123/sendMessage".into(),
            }
        );
    }

    #[test]
    fn unmatched_path_is_not_found() {
        let uri: Uri = "/nothing/here".parse().unwrap();
        assert_eq!(classify(&table(), &Method::GET, &uri), RouteDecision::NotFound);
    }

    #[test]
    fn home_takes_precedence_over_table() {
        // "/" is not routable even though every prefix would fail anyway;
        // the static checks run before the table scan.
        let routes = RouteTable::new(vec![("/".into(), "https://catchall.example".into())]);
        let uri: Uri = "/".parse().unwrap();
        assert_eq!(classify(&routes, &Method::GET, &uri), RouteDecision::HomePage);
    }
}
