//! Asynchronous view loading.
//!
//! # Responsibilities
//! - Define the "load by identifier" capability handed to the navigator
//! - Read view units from disk on first use
//! - Share loaded units across later navigations
//!
//! # Design Decisions
//! - Returns boxed futures so loaders can be used as trait objects
//! - Cache is a concurrent map; a unit is read at most once per loader
//! - A failed load is not cached, the next navigation retries

use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

use dashmap::DashMap;
use futures_util::future::BoxFuture;
use thiserror::Error;

use crate::views::{ViewConfig, ViewRef};

/// Errors raised while fetching a view unit.
#[derive(Debug, Error)]
pub enum ViewError {
    /// No unit exists for the reference.
    #[error("view `{view}` not found at {}", .path.display())]
    Missing { view: ViewRef, path: PathBuf },

    /// The unit exists but could not be read.
    #[error("failed to read view `{view}` from {}: {source}", .path.display())]
    Io {
        view: ViewRef,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A fetched view unit, ready for the host to mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedView {
    /// The reference that was requested.
    pub view: ViewRef,

    /// Import specifier of the unit (e.g. `@/views/Dash.vue`).
    pub module: String,

    /// Raw contents of the unit.
    pub source: String,
}

/// Capability to fetch the code unit behind a [`ViewRef`].
pub trait ViewLoader: Send + Sync {
    fn load<'a>(&'a self, view: &'a ViewRef) -> BoxFuture<'a, Result<Arc<LoadedView>, ViewError>>;
}

impl<L: ViewLoader + ?Sized> ViewLoader for Arc<L> {
    fn load<'a>(&'a self, view: &'a ViewRef) -> BoxFuture<'a, Result<Arc<LoadedView>, ViewError>> {
        (**self).load(view)
    }
}

/// Loads view units from the directory named by `ViewConfig::root`.
#[derive(Debug, Default)]
pub struct FsViewLoader {
    config: ViewConfig,
    cache: DashMap<ViewRef, Arc<LoadedView>>,
}

impl FsViewLoader {
    pub fn new(config: ViewConfig) -> Self {
        Self {
            config,
            cache: DashMap::new(),
        }
    }

    /// Number of units currently held in the cache.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    pub fn is_cached(&self, view: &ViewRef) -> bool {
        self.cache.contains_key(view)
    }

    async fn read(&self, view: &ViewRef) -> Result<LoadedView, ViewError> {
        let path = view.file_path(&self.config);
        let source = tokio::fs::read_to_string(&path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                ViewError::Missing {
                    view: view.clone(),
                    path: path.clone(),
                }
            } else {
                ViewError::Io {
                    view: view.clone(),
                    path: path.clone(),
                    source: e,
                }
            }
        })?;

        tracing::debug!(view = %view, path = %path.display(), bytes = source.len(), "View unit loaded");

        Ok(LoadedView {
            view: view.clone(),
            module: view.module_specifier(&self.config),
            source,
        })
    }
}

impl ViewLoader for FsViewLoader {
    fn load<'a>(&'a self, view: &'a ViewRef) -> BoxFuture<'a, Result<Arc<LoadedView>, ViewError>> {
        Box::pin(async move {
            let cached = self.cache.get(view).map(|hit| hit.value().clone());
            if let Some(hit) = cached {
                return Ok(hit);
            }

            let loaded = Arc::new(self.read(view).await?);
            // Concurrent first loads race; whichever lands first is shared.
            let shared = self
                .cache
                .entry(view.clone())
                .or_insert(loaded)
                .value()
                .clone();
            Ok(shared)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn view_root() -> (TempDir, FsViewLoader) {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(root.path().join("views")).unwrap();
        let loader = FsViewLoader::new(ViewConfig {
            root: root.path().to_path_buf(),
            ..ViewConfig::default()
        });
        (root, loader)
    }

    #[tokio::test]
    async fn test_load_and_cache() {
        let (root, loader) = view_root();
        std::fs::write(root.path().join("views/Dash.vue"), "<template>dash</template>").unwrap();
        let view = ViewRef::new("views/Dash");

        let first = loader.load(&view).await.unwrap();
        assert_eq!(first.module, "@/views/Dash.vue");
        assert_eq!(first.source, "<template>dash</template>");
        assert!(loader.is_cached(&view));

        // Served from cache even after the file is gone.
        std::fs::remove_file(root.path().join("views/Dash.vue")).unwrap();
        let second = loader.load(&view).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(loader.cached(), 1);
    }

    #[tokio::test]
    async fn test_missing_view_is_not_cached() {
        let (root, loader) = view_root();
        let view = ViewRef::new("views/Observations");

        let err = loader.load(&view).await.unwrap_err();
        assert!(matches!(err, ViewError::Missing { .. }));
        assert!(err.to_string().contains("views/Observations"));
        assert_eq!(loader.cached(), 0);

        std::fs::write(root.path().join("views/Observations.vue"), "obs").unwrap();
        let loaded = loader.load(&view).await.unwrap();
        assert_eq!(loaded.source, "obs");
    }
}
