//! Navigation metrics.
//!
//! # Metrics
//! - `router_navigations_total` (counter): navigations by route, fallback
//! - `router_view_loads_total` (counter): view loads by view, outcome
//! - `router_view_load_duration_seconds` (histogram): view load latency
//! - `router_table_reloads_total` (counter): reloads by outcome
//!
//! # Design Decisions
//! - Records through the `metrics` facade; the host installs the recorder
//! - Without a recorder every call is a no-op
//! - A process-wide switch mirrors `observability.metrics_enabled`

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

static ENABLED: AtomicBool = AtomicBool::new(true);

/// Register metric descriptions and set the recording switch.
pub fn init_metrics(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
    if !enabled {
        return;
    }

    ::metrics::describe_counter!("router_navigations_total", "Navigations resolved, by route");
    ::metrics::describe_counter!("router_view_loads_total", "Deferred view loads, by outcome");
    ::metrics::describe_histogram!(
        "router_view_load_duration_seconds",
        ::metrics::Unit::Seconds,
        "Time spent loading a view unit"
    );
    ::metrics::describe_counter!("router_table_reloads_total", "Route table reloads, by outcome");
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

pub fn record_navigation(route: &str, fallback: bool) {
    if !is_enabled() {
        return;
    }
    ::metrics::counter!(
        "router_navigations_total",
        "route" => route.to_string(),
        "fallback" => fallback.to_string()
    )
    .increment(1);
}

pub fn record_view_load(view: &str, ok: bool, elapsed: Duration) {
    if !is_enabled() {
        return;
    }
    let outcome = if ok { "ok" } else { "error" };
    ::metrics::counter!("router_view_loads_total", "view" => view.to_string(), "outcome" => outcome)
        .increment(1);
    ::metrics::histogram!("router_view_load_duration_seconds", "view" => view.to_string())
        .record(elapsed.as_secs_f64());
}

pub fn record_table_reload(ok: bool) {
    if !is_enabled() {
        return;
    }
    let outcome = if ok { "ok" } else { "rejected" };
    ::metrics::counter!("router_table_reloads_total", "outcome" => outcome).increment(1);
}
