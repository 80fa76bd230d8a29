//! Route table and resolver for the FHIR patient card application.
//!
//! # Architecture Overview
//!
//! ```text
//!   address bar / programmatic navigation
//!                 │
//!                 ▼
//!   ┌──────────────────────────┐      ┌──────────────────────────┐
//!   │        navigation        │─────▶│     views::loader        │
//!   │ resolve + deferred loads │      │  (host capability, async) │
//!   └────────────┬─────────────┘      └──────────────────────────┘
//!                │
//!                ▼
//!   ┌──────────────────────────┐      ┌──────────────────────────┐
//!   │   routing::shared        │◀─────│     config::watcher      │
//!   │  (live table handle)     │      │  (rebuild on change)     │
//!   └────────────┬─────────────┘      └──────────────────────────┘
//!                ▼
//!   ┌──────────────────────────┐
//!   │   routing::router        │  immutable RouteTable,
//!   │   routing::matcher       │  pure resolve(path)
//!   │   routing::path          │
//!   └──────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use patient_card_router::routes::patient_card_table;
//!
//! let table = patient_card_table().unwrap();
//! let found = table.resolve("/patients/42");
//! assert_eq!(found.name, "single-patient");
//! assert_eq!(found.param("patientID"), Some("42"));
//!
//! let missing = table.resolve("/nonexistent/path");
//! assert_eq!(missing.name, "not-found");
//! ```

pub mod config;
pub mod navigation;
pub mod observability;
pub mod routes;
pub mod routing;
pub mod views;

pub use config::schema::RouterConfig;
pub use navigation::{Navigation, Navigator};
pub use routing::{RouteMatch, RouteTable, SharedRouteTable};
