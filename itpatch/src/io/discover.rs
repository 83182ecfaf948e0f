//! Board directory enumeration and suffix-based file lookup.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::PatchError;

/// Names of the direct child directories of `root`, in filesystem order.
///
/// Symlinks to directories are included. Names that are not valid UTF-8 are
/// skipped.
pub fn list_subdirectories(root: &Path) -> Result<Vec<String>, PatchError> {
    let mut names = Vec::new();
    for entry in read_dir(root)? {
        let entry = entry.map_err(|err| PatchError::io("read entry in", root, err))?;
        if !entry.path().is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(name) => warn!(name = ?name, root = %root.display(), "skip non-utf8 directory"),
        }
    }
    debug!(root = %root.display(), count = names.len(), "listed subdirectories");
    Ok(names)
}

/// Path of the first regular file in `dir` whose name ends with `suffix`.
///
/// Entries are visited in filesystem order. When several files match, which
/// one is returned is unspecified; the others are logged and ignored.
pub fn find_file_with_suffix(dir: &Path, suffix: &str) -> Result<PathBuf, PatchError> {
    let mut found: Option<PathBuf> = None;
    for entry in read_dir(dir)? {
        let entry = entry.map_err(|err| PatchError::io("read entry in", dir, err))?;
        let path = entry.path();
        if !path.is_file() || !entry.file_name().to_string_lossy().ends_with(suffix) {
            continue;
        }
        match &found {
            None => found = Some(path),
            Some(first) => warn!(
                chosen = %first.display(),
                ignored = %path.display(),
                suffix,
                "several files match suffix"
            ),
        }
    }
    found.ok_or_else(|| PatchError::FileNotFound {
        dir: dir.to_path_buf(),
        suffix: suffix.to_string(),
    })
}

fn read_dir(path: &Path) -> Result<fs::ReadDir, PatchError> {
    if !path.exists() {
        return Err(PatchError::RootNotFound {
            path: path.to_path_buf(),
        });
    }
    if !path.is_dir() {
        return Err(PatchError::NotADirectory {
            path: path.to_path_buf(),
        });
    }
    fs::read_dir(path).map_err(|err| PatchError::io("read directory", path, err))
}
