//! Path normalization utilities
//!
//! Lexical resolution, relative rendering and upward lookup of files.

use std::path::{Component, Path, PathBuf};

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Resolve `path` against `base` and collapse `.` and `..` components.
///
/// Purely lexical: symlinks are not resolved and the path need not exist.
pub fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    let joined = base.join(path);
    let mut resolved = PathBuf::new();

    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root
                if !resolved.pop() && !resolved.has_root() {
                    resolved.push(component);
                }
            }
            other => resolved.push(other),
        }
    }

    resolved
}

/// Render `path` relative to `base`, using `..` to climb out of `base` when needed.
///
/// Falls back to the normalized absolute path when the two share no root.
pub fn relative_to(path: &Path, base: &Path) -> String {
    if let Ok(stripped) = path.strip_prefix(base) {
        return normalize_path(stripped);
    }

    let path_parts: Vec<Component> = path.components().collect();
    let base_parts: Vec<Component> = base.components().collect();

    let common = path_parts
        .iter()
        .zip(base_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    if common == 0 {
        return normalize_path(path);
    }

    let mut relative = PathBuf::new();
    for _ in common..base_parts.len() {
        relative.push("..");
    }
    for part in &path_parts[common..] {
        relative.push(part);
    }

    normalize_path(&relative)
}

/// Find the nearest file called `name` in `start` or any of its ancestors
pub fn find_up(name: &str, start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}
