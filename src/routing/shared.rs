//! Swappable handle to the live route table.
//!
//! Tables themselves never change. A reload builds a fresh table and
//! publishes it here; readers keep whatever snapshot they loaded.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::routing::router::{RouteMatch, RouteTable};

/// Cheaply cloneable handle shared between the watcher and resolvers.
#[derive(Debug, Clone)]
pub struct SharedRouteTable {
    inner: Arc<ArcSwap<RouteTable>>,
}

impl SharedRouteTable {
    pub fn new(table: RouteTable) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(table)),
        }
    }

    /// Snapshot of the current table.
    pub fn current(&self) -> Arc<RouteTable> {
        self.inner.load_full()
    }

    /// Resolve against the current table.
    pub fn resolve(&self, path: &str) -> RouteMatch {
        self.inner.load().resolve(path)
    }

    /// Publish a new table, returning the one it replaced.
    pub fn replace(&self, table: RouteTable) -> Arc<RouteTable> {
        let previous = self.inner.swap(Arc::new(table));
        tracing::info!(routes = self.inner.load().len(), "Route table replaced");
        previous
    }
}
