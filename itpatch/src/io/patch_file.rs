//! Read-patch-write wrapper around the pure line patcher.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::core::patcher::patch_text;
use crate::core::types::{Block, PatchRule};
use crate::error::PatchError;

/// Result of patching one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePatch {
    pub path: PathBuf,
    pub blocks: Vec<Block>,
    /// Original lines commented out or deleted.
    pub affected_lines: usize,
    /// False for dry runs and for files without any marker.
    pub written: bool,
}

/// Patch `path` in place.
///
/// The file is read completely before anything is written and must be UTF-8.
/// Files without any marker are left untouched. The rewritten file keeps the
/// permissions of the original. With `dry_run` the blocks are computed and
/// reported but nothing is written.
pub fn patch_file(path: &Path, rule: &PatchRule<'_>, dry_run: bool) -> Result<FilePatch, PatchError> {
    let bytes = fs::read(path).map_err(|err| PatchError::io("read", path, err))?;
    let text = String::from_utf8(bytes).map_err(|err| PatchError::NotUtf8 {
        path: path.to_path_buf(),
        offset: err.utf8_error().valid_up_to(),
    })?;
    let patched = patch_text(&text, rule);
    for block in &patched.blocks {
        debug!(
            file = %path.display(),
            start = block.start + 1,
            len = block.len,
            marker = %block.marker,
            "block matched"
        );
    }

    let written = !dry_run && !patched.is_unchanged();
    if written {
        write_atomic(path, &patched.contents())?;
        info!(
            file = %path.display(),
            mode = rule.mode.as_str(),
            blocks = patched.blocks.len(),
            "patched file"
        );
    }

    let affected_lines = patched.affected_lines();
    Ok(FilePatch {
        path: path.to_path_buf(),
        blocks: patched.blocks,
        affected_lines,
        written,
    })
}

fn write_atomic(path: &Path, contents: &str) -> Result<(), PatchError> {
    let mut tmp_name = path.file_name().map(OsString::from).unwrap_or_default();
    tmp_name.push(".itpatch.tmp");
    let tmp_path = path.with_file_name(tmp_name);
    let permissions = fs::metadata(path)
        .map_err(|err| PatchError::io("read metadata of", path, err))?
        .permissions();
    fs::write(&tmp_path, contents).map_err(|err| PatchError::io("write temp file", &tmp_path, err))?;
    let replaced = fs::set_permissions(&tmp_path, permissions)
        .map_err(|err| PatchError::io("set permissions on", &tmp_path, err))
        .and_then(|()| fs::rename(&tmp_path, path).map_err(|err| PatchError::io("replace", path, err)));
    if replaced.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    replaced
}
