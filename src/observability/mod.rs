//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handler produces per-request events:
//!     → tracing spans and events (structured fields, request ID)
//!     → metrics.rs (counter + latency histogram)
//!
//! Consumers:
//!     → Log output (stdout, filtered via RUST_LOG)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Metrics are cheap (atomic increments behind the metrics facade)
//! - Labels are bounded: method, status, and the matched route prefix
//! - Upstream failure causes are logged, never exposed to callers

pub mod metrics;
