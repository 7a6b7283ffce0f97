//! Sequential directory walk: files first, then descent into subdirectories.

use std::fs;
use std::path::Path;

/// Visit every regular file under `root`, top down.
///
/// Each directory is listed in full before anything in it is visited, so
/// the visitor may delete the files it is handed. Files in a directory are
/// visited before its subdirectories are entered. Symlinks are not followed
/// and never reported as files. Unreadable or vanished directories are
/// skipped; traversal is best-effort.
pub(crate) fn walk_files<F>(root: &Path, mut visit: F)
where
    F: FnMut(&Path),
{
    walk_dir(root, &mut visit);
}

fn walk_dir<F>(dir: &Path, visit: &mut F)
where
    F: FnMut(&Path),
{
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    let mut files = Vec::new();
    let mut subdirs = Vec::new();
    for entry in entries.flatten() {
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        let path = entry.path();
        if file_type.is_file() {
            files.push(path);
        } else if file_type.is_dir() {
            subdirs.push(path);
        }
        // Symlinks and special files fall through untouched.
    }

    for file in &files {
        visit(file);
    }
    for subdir in &subdirs {
        walk_dir(subdir, visit);
    }
}
