//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::views::{ViewConfig, ViewRef};

/// Root configuration for the route table.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Path matching behaviour.
    pub matching: MatchingConfig,

    /// How view references map to source units.
    pub views: ViewConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Route definitions, in priority order.
    pub routes: Vec<RouteConfig>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            matching: MatchingConfig::default(),
            views: ViewConfig::default(),
            observability: ObservabilityConfig::default(),
            routes: crate::routes::patient_card_routes(),
        }
    }
}

/// Path matching configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Compare static segments case-sensitively (default: false).
    pub case_sensitive: bool,
}

/// One route and its nested children.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Path pattern relative to the parent, e.g. "patients/:patientID".
    pub path: String,

    /// Unique route name.
    pub name: String,

    /// View activated by this route.
    pub view: ViewRef,

    /// Nested routes sharing this route's path prefix.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteConfig>,
}

impl RouteConfig {
    pub fn new(path: impl Into<String>, name: impl Into<String>, view: impl Into<ViewRef>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            view: view.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<RouteConfig>) -> Self {
        self.children = children;
        self
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Filter directive used when `RUST_LOG` is not set.
    pub log_filter: String,

    /// Log line format.
    pub log_format: LogFormat,

    /// Record navigation metrics through the `metrics` facade.
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "patient_card_router=info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: true,
        }
    }
}
