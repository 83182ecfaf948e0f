//! Stable exit codes for itpatch CLI commands.

use crate::error::PatchError;

/// Command succeeded.
pub const OK: i32 = 0;
/// I/O or encoding failure, invalid config, or any other error.
pub const FAILED: i32 = 1;
/// Root, board directory, or target file missing.
pub const NOT_FOUND: i32 = 2;
/// Board selection was not a number, out of range, or an unknown name.
pub const BAD_SELECTION: i32 = 3;

/// Map an error chain to its exit code.
pub fn for_error(err: &anyhow::Error) -> i32 {
    let Some(patch_err) = err.chain().find_map(|cause| cause.downcast_ref::<PatchError>()) else {
        return FAILED;
    };
    match patch_err {
        PatchError::RootNotFound { .. }
        | PatchError::NotADirectory { .. }
        | PatchError::FileNotFound { .. }
        | PatchError::NoBoards { .. } => NOT_FOUND,
        PatchError::SelectionNotANumber { .. }
        | PatchError::SelectionOutOfRange { .. }
        | PatchError::UnknownBoard { .. } => BAD_SELECTION,
        PatchError::NotUtf8 { .. } | PatchError::Io { .. } => FAILED,
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use anyhow::Context;

    use super::*;

    #[test]
    fn wrapped_patch_errors_keep_their_code() {
        let err = Err::<(), _>(PatchError::FileNotFound {
            dir: PathBuf::from("MainMCU/Nucleo-F429ZI/Core/Src"),
            suffix: "xx_it.c".to_string(),
        })
        .context("patch board Nucleo-F429ZI")
        .expect_err("error");
        assert_eq!(for_error(&err), NOT_FOUND);
    }

    #[test]
    fn selection_errors_map_to_bad_selection() {
        let err = anyhow::Error::new(PatchError::SelectionOutOfRange { index: 4, count: 2 });
        assert_eq!(for_error(&err), BAD_SELECTION);
    }

    #[test]
    fn other_errors_map_to_failed() {
        assert_eq!(for_error(&anyhow::anyhow!("parse itpatch.toml")), FAILED);
    }
}
