//! Named failure conditions for board discovery, selection and file patching.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatchError {
    #[error("directory {} does not exist", path.display())]
    RootNotFound { path: PathBuf },

    #[error("{} is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    #[error("no file ending in '{suffix}' in {}", dir.display())]
    FileNotFound { dir: PathBuf, suffix: String },

    #[error("no board directories found in {}", root.display())]
    NoBoards { root: PathBuf },

    #[error("selection '{input}' is not a number")]
    SelectionNotANumber { input: String },

    #[error("selection {index} is out of range (expected 0..{count})")]
    SelectionOutOfRange { index: usize, count: usize },

    #[error("unknown board '{name}'")]
    UnknownBoard { name: String },

    #[error("{} is not valid UTF-8 (first invalid byte at offset {offset})", path.display())]
    NotUtf8 { path: PathBuf, offset: usize },

    #[error("{action} {}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PatchError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
