//! Orchestration for `itpatch patch`: pick a board, resolve its interrupt
//! files, and patch each one.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::core::types::{PatchMode, PatchRule};
use crate::error::PatchError;
use crate::io::config::{PatchConfig, TargetConfig};
use crate::io::discover::{find_file_with_suffix, list_subdirectories};
use crate::io::patch_file::{FilePatch, patch_file};
use crate::select::BoardSelector;

/// Per-run options layered over the config file.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatchOptions {
    /// Overrides `PatchConfig::mode` when set.
    pub mode: Option<PatchMode>,
    pub dry_run: bool,
}

/// Outcome of patching one board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardReport {
    pub board: String,
    pub mode: PatchMode,
    pub files: Vec<FilePatch>,
}

/// List the boards available under the configured root.
///
/// An empty root is an error: there is nothing to select.
pub fn list_boards(root: &Path) -> Result<Vec<String>, PatchError> {
    let boards = list_subdirectories(root)?;
    if boards.is_empty() {
        return Err(PatchError::NoBoards {
            root: root.to_path_buf(),
        });
    }
    Ok(boards)
}

/// Discover boards, let `selector` choose one, and patch it.
pub fn run_patch<S: BoardSelector>(
    config: &PatchConfig,
    selector: &mut S,
    options: &PatchOptions,
) -> Result<BoardReport> {
    let boards = list_boards(&config.root)?;
    debug!(root = %config.root.display(), ?boards, "boards discovered");
    let index = selector.select(&boards)?;
    let board = boards.get(index).ok_or(PatchError::SelectionOutOfRange {
        index,
        count: boards.len(),
    })?;
    patch_board(config, board, options).with_context(|| format!("patch board {board}"))
}

/// Patch every configured target file of one board.
///
/// All target files are located before any is written, so a missing file
/// fails the run without leaving the board half-patched.
pub fn patch_board(config: &PatchConfig, board: &str, options: &PatchOptions) -> Result<BoardReport> {
    let board_dir = config.root.join(board);
    let mode = options.mode.unwrap_or(config.mode);

    let resolved = config
        .targets
        .iter()
        .map(|target| resolve_target(&board_dir, target).map(|path| (target, path)))
        .collect::<Result<Vec<_>, _>>()?;

    let mut files = Vec::with_capacity(resolved.len());
    for (target, path) in resolved {
        let rule = PatchRule {
            markers: &config.markers,
            block_len: target.block_len,
            mode,
            comment_prefix: &config.comment_prefix,
        };
        files.push(patch_file(&path, &rule, options.dry_run)?);
    }

    Ok(BoardReport {
        board: board.to_string(),
        mode,
        files,
    })
}

fn resolve_target(board_dir: &Path, target: &TargetConfig) -> Result<PathBuf, PatchError> {
    let dir = board_dir.join(&target.dir);
    let path = find_file_with_suffix(&dir, &target.suffix)?;
    debug!(file = %path.display(), suffix = %target.suffix, "target resolved");
    Ok(path)
}
