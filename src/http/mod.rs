//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, classification, dispatch)
//!     → request.rs (add request ID)
//!     → cors.rs (CORS header set, applied to every response)
//!     → forward.rs (header whitelist, upstream call, response relay)
//!     → Send to client
//! ```

pub mod cors;
pub mod forward;
pub mod request;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::HttpServer;
