//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Requested path (address bar, programmatic navigation)
//!     → path.rs (normalise: segments + query)
//!     → router.rs (depth-first walk of the table)
//!     → matcher.rs (match each pattern, bind parameters)
//!     → Return: RouteMatch (name, params, view chain)
//!
//! Route Compilation (at startup or reload):
//!     RouteConfig[]
//!     → Parse patterns, check names and wildcard placement
//!     → Freeze as immutable RouteTable
//!     → shared.rs publishes it to readers
//! ```
//!
//! # Design Decisions
//! - Tables compiled once, immutable afterwards
//! - No regex (segment-by-segment matching)
//! - Deterministic: same input always matches same route
//! - First match wins (declaration order)

pub mod matcher;
pub mod path;
pub mod router;
pub mod shared;

pub use matcher::{PathPattern, PatternError, Segment, CATCH_ALL_PARAM};
pub use path::RequestPath;
pub use router::{HrefError, RouteEntry, RouteMatch, RouteSummary, RouteTable, TableError, NOT_FOUND};
pub use shared::SharedRouteTable;
