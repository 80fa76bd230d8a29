//! Deferred view references.
//!
//! # Data Flow
//! ```text
//! RouteConfig.view ("views/Patients")
//!     → ViewRef (opaque, carried by the route table)
//!     → RouteMatch.matched (outermost → innermost)
//!     → loader.rs (host-side, asynchronous)
//!     → LoadedView (module specifier + source)
//! ```
//!
//! # Design Decisions
//! - The route table never loads a view; it only hands out references
//! - Module naming (`@/views/Dash.vue`) lives in `ViewConfig`, not in routes
//! - Loading is a capability passed in by the host (`ViewLoader`)

pub mod loader;

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub use loader::{FsViewLoader, LoadedView, ViewError, ViewLoader};

/// Opaque reference to a lazily loaded view unit, e.g. `views/Patients`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewRef(String);

impl ViewRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Import specifier as the bundler sees it, e.g. `@/views/Dash.vue`.
    pub fn module_specifier(&self, config: &ViewConfig) -> String {
        let id = self.0.trim_matches('/');
        if config.alias.is_empty() {
            format!("{}.{}", id, config.extension)
        } else {
            format!("{}/{}.{}", config.alias, id, config.extension)
        }
    }

    /// Location of the view's source unit on disk, e.g. `src/views/Dash.vue`.
    pub fn file_path(&self, config: &ViewConfig) -> PathBuf {
        let mut path = config.root.clone();
        let mut parts = self.0.split('/').filter(|p| !p.is_empty()).peekable();
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                path.push(part);
            } else {
                path.push(format!("{}.{}", part, config.extension));
            }
        }
        path
    }
}

impl fmt::Display for ViewRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ViewRef {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// How view references map onto source units.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Import alias standing for `root` (e.g. "@").
    pub alias: String,

    /// Directory the alias resolves to.
    pub root: PathBuf,

    /// File extension of view units, without the dot.
    pub extension: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            alias: "@".to_string(),
            root: PathBuf::from("src"),
            extension: "vue".to_string(),
        }
    }
}
