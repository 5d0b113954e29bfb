//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path, query)
//!     → router.rs (classify into one terminal outcome)
//!     → table.rs (literal prefix lookup against the compiled-in table)
//!     → Return: RouteDecision (preflight, static page, proxy target, or no match)
//! ```
//!
//! # Design Decisions
//! - Route table is compiled in, immutable for the process lifetime
//! - No regex in hot path (literal prefix matching only)
//! - Deterministic: same input always yields the same decision
//! - First match wins (table order)

pub mod router;
pub mod table;

pub use router::{classify, RouteDecision};
pub use table::{RouteMatch, RouteTable};
