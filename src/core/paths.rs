//! Path helpers for resolving sweep roots.

use std::env;
use std::path::{Component, Path, PathBuf};

/// Resolve a sweep root to an absolute, normalized path for reporting.
///
/// Existing paths go through `fs::canonicalize` (resolves symlinks). Missing
/// paths still get a stable answer: absolute against the working directory,
/// `.`/`..` resolved syntactically. The sweep itself keeps operating on the
/// path as given; this is only for diagnostics and JSON output.
pub fn resolve_absolute_path(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
    };

    if let Ok(canonical) = std::fs::canonicalize(&absolute) {
        return canonical;
    }

    normalize_syntactic(&absolute)
}

fn normalize_syntactic(path: &Path) -> PathBuf {
    let mut components = Vec::new();
    for component in path.components() {
        match component {
            Component::Prefix(..) | Component::RootDir | Component::Normal(_) => {
                components.push(component);
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if let Some(Component::Normal(_)) = components.last() {
                    components.pop();
                }
            }
        }
    }
    components.into_iter().collect()
}
