//! Shared utilities for integration tests.

use std::path::Path;

use tempfile::TempDir;

/// A fresh, empty directory removed when the handle is dropped.
pub fn scratch_dir() -> TempDir {
    tempfile::tempdir().expect("create temp dir")
}

/// Write a view unit under `root`, e.g. `views/Dash` → `root/views/Dash.vue`.
#[allow(dead_code)]
pub fn write_view(root: &Path, view: &str, body: &str) {
    let path = root.join(format!("{}.vue", view));
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, body).unwrap();
}
