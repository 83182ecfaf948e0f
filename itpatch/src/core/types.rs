//! Shared deterministic types for the line patcher.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// What happens to the lines of a matched block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PatchMode {
    /// Prefix every block line with the comment marker.
    #[default]
    Comment,
    /// Drop block lines from the output.
    Delete,
}

impl PatchMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Comment => "comment",
            Self::Delete => "delete",
        }
    }
}

/// A run of lines that starts at a marker line.
///
/// `start` is an index into the original, unmodified line buffer. `len` is
/// clamped so that `start + len` never exceeds the buffer length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub start: usize,
    pub len: usize,
    /// First marker (in marker-set order) found on the start line.
    pub marker: String,
}

impl Block {
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Parameters for one patch pass over a file.
#[derive(Debug, Clone, Copy)]
pub struct PatchRule<'a> {
    pub markers: &'a [String],
    pub block_len: usize,
    pub mode: PatchMode,
    pub comment_prefix: &'a str,
}

/// Output of a patch pass: the new lines and the blocks that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patched {
    pub lines: Vec<String>,
    pub blocks: Vec<Block>,
}

impl Patched {
    /// Number of original lines commented out or deleted.
    pub fn affected_lines(&self) -> usize {
        self.blocks.iter().map(|block| block.len).sum()
    }

    pub fn is_unchanged(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Join lines back into file contents. Terminators are kept on each line.
    pub fn contents(&self) -> String {
        self.lines.concat()
    }
}
