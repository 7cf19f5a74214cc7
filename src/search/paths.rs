//! Search root resolution

use std::path::{Path, PathBuf};

use crate::core::diag;
use crate::core::model::PACKAGE_DESCRIPTOR;
use crate::core::paths::{find_up, resolve_against};

/// Resolve search roots.
///
/// Explicit paths are resolved against `cwd` and kept in order. With no
/// explicit paths, every `node_modules` next to a package.json found while
/// walking up from `cwd` is used, so workspaces work without any config.
pub fn resolve_search_paths(explicit: &[PathBuf], cwd: &Path) -> Vec<PathBuf> {
    if explicit.is_empty() {
        find_default_paths(cwd)
    } else {
        explicit
            .iter()
            .map(|path| resolve_against(cwd, path))
            .collect()
    }
}

/// Collect `node_modules` directories of every enclosing package, nearest first
pub fn find_default_paths(cwd: &Path) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    let mut dir = Some(cwd.to_path_buf());

    while let Some(current) = dir {
        let Some(descriptor) = find_up(PACKAGE_DESCRIPTOR, &current) else {
            break;
        };
        let Some(package_dir) = descriptor.parent() else {
            break;
        };

        diag::debug(format!("found workspace package at {}", package_dir.display()));
        paths.push(package_dir.join("node_modules"));
        dir = package_dir.parent().map(Path::to_path_buf);
    }

    paths
}
