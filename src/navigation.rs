//! Host-side navigation.
//!
//! # Responsibilities
//! - Resolve a requested path against the live table
//! - Request the deferred load of every view in the matched chain
//! - Report navigations and view loads to observability
//!
//! # Design Decisions
//! - The route table stays pure; loading happens here, on the host side
//! - Views of one chain load concurrently; the first failure aborts the navigation
//! - Unknown paths are not errors, they navigate to the fallback view

use std::sync::Arc;
use std::time::Instant;

use futures_util::future::try_join_all;

use crate::observability::metrics;
use crate::routing::{RouteMatch, SharedRouteTable};
use crate::views::{LoadedView, ViewError, ViewLoader, ViewRef};

/// A completed navigation: where it went and what to mount.
#[derive(Debug, Clone)]
pub struct Navigation {
    pub route: RouteMatch,
    /// Loaded units, outermost first, aligned with `route.matched`.
    pub views: Vec<Arc<LoadedView>>,
}

/// Couples a route table with a view loader.
pub struct Navigator<L> {
    routes: SharedRouteTable,
    loader: L,
}

impl<L: ViewLoader> Navigator<L> {
    pub fn new(routes: SharedRouteTable, loader: L) -> Self {
        Self { routes, loader }
    }

    pub fn routes(&self) -> &SharedRouteTable {
        &self.routes
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Resolve without loading anything.
    pub fn resolve(&self, path: &str) -> RouteMatch {
        let route = self.routes.resolve(path);
        if route.fallback {
            tracing::warn!(path = %route.path, route = %route.name, "No specific route matched, using fallback");
        }
        metrics::record_navigation(&route.name, route.fallback);
        route
    }

    /// Resolve `path` and load the views it activates.
    pub async fn navigate(&self, path: &str) -> Result<Navigation, ViewError> {
        let route = self.resolve(path);
        let views = try_join_all(route.matched.iter().map(|view| self.load_view(view))).await?;

        tracing::info!(
            path = %route.path,
            route = %route.name,
            views = views.len(),
            "Navigation complete"
        );
        Ok(Navigation { route, views })
    }

    async fn load_view(&self, view: &ViewRef) -> Result<Arc<LoadedView>, ViewError> {
        let started = Instant::now();
        let result = self.loader.load(view).await;
        metrics::record_view_load(view.as_str(), result.is_ok(), started.elapsed());

        if let Err(e) = &result {
            tracing::warn!(view = %view, error = %e, "View load failed");
        }
        result
    }
}
