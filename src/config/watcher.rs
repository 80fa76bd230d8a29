//! Configuration file watcher for hot reload of the route table.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::config::loader::load_config;
use crate::observability::metrics;
use crate::routing::{RouteTable, SharedRouteTable};

/// Rebuilds the route table whenever the configuration file changes.
pub struct ConfigWatcher {
    path: PathBuf,
    routes: SharedRouteTable,
}

impl ConfigWatcher {
    pub fn new(path: &Path, routes: SharedRouteTable) -> Self {
        Self {
            path: path.to_path_buf(),
            routes,
        }
    }

    /// Load the file and, if it yields a valid table, publish it.
    ///
    /// Returns whether the table was replaced.
    pub fn reload(&self) -> bool {
        let table = load_config(&self.path)
            .map_err(|e| e.to_string())
            .and_then(|config| RouteTable::from_config(&config).map_err(|e| e.to_string()));

        match table {
            Ok(table) => {
                self.routes.replace(table);
                metrics::record_table_reload(true);
                true
            }
            Err(e) => {
                tracing::error!(path = ?self.path, error = %e, "Failed to reload routes, keeping current table");
                metrics::record_table_reload(false);
                false
            }
        }
    }

    /// Start watching the file. Dropping the returned watcher stops it.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    tracing::info!(path = ?self.path, "Config file change detected, reloading routes");
                    self.reload();
                }
                Ok(_) => {}
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?path, "Config watcher started");
        Ok(watcher)
    }
}
