//! Resolve command-line roots into the list of files to blame.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;

/// Make `path` absolute against `base` without touching the filesystem.
///
/// `.` components are dropped; `..` and symlinks are kept as written.
pub fn absolutize(path: &Path, base: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };
    joined
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Files with `extension` under `dir`, sorted by name at every level.
fn walk_sources(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                tracing::warn!("skipping unreadable entry: {}", e);
                continue;
            }
        };
        if entry.path().extension() != Some(OsStr::new(extension)) {
            continue;
        }
        if entry.path().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Expand `roots` into absolute file paths.
///
/// Directories are searched recursively for `extension` files; anything
/// else (including paths that do not exist) is taken as a file as-is.
/// Order follows `roots`, then sorted traversal within each directory.
pub fn resolve_paths(roots: &[PathBuf], extension: &str, base: &Path) -> Result<Vec<PathBuf>> {
    let mut result = Vec::new();
    for root in roots {
        let root = absolutize(root, base);
        if root.is_dir() {
            result.extend(walk_sources(&root, extension)?);
        } else {
            result.push(root);
        }
    }
    Ok(result)
}
