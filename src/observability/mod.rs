//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Routing, loading and reload paths produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stderr (pretty or JSON lines)
//!     → whatever metrics recorder the host installs
//! ```
//!
//! # Design Decisions
//! - Structured fields (route, path, view) on every event
//! - Metrics are cheap and optional

pub mod logging;
pub mod metrics;

use crate::config::schema::ObservabilityConfig;

pub use logging::{init_logging, LoggingError};

/// Initialise logging and metrics from configuration.
pub fn init(config: &ObservabilityConfig) -> Result<(), LoggingError> {
    init_logging(config)?;
    metrics::init_metrics(config.metrics_enabled);
    Ok(())
}
