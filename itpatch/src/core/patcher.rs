//! Marker scan and block rewrite over an immutable line snapshot.
//!
//! Scanning never mutates the buffer it reads. All block positions are
//! collected against the original line indices first, and the output is then
//! built in a single pass, so deletions cannot shift lines under the scanner.

use super::types::{Block, PatchMode, PatchRule, Patched};

/// Split file contents into lines, keeping each line's terminator.
///
/// Concatenating the result reproduces `text` exactly, including a missing
/// final newline or `\r\n` endings.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

/// Find every block that starts at a line containing one of `markers`.
///
/// Lines already covered by a block are not scanned again, so blocks never
/// overlap. A line matching several markers starts a single block tagged with
/// the first marker in `markers` order. Blocks near the end of the buffer are
/// clamped to the remaining lines.
pub fn find_blocks<S: AsRef<str>>(lines: &[&str], markers: &[S], block_len: usize) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut index = 0;
    while index < lines.len() {
        let line = lines[index];
        let Some(marker) = markers
            .iter()
            .map(|marker| marker.as_ref())
            .find(|marker| line.contains(*marker))
        else {
            index += 1;
            continue;
        };
        let len = block_len.min(lines.len() - index);
        blocks.push(Block {
            start: index,
            len,
            marker: marker.to_string(),
        });
        index += len.max(1);
    }
    blocks
}

/// Prefix every line inside `blocks` with `prefix`.
pub fn comment_blocks(lines: &[&str], blocks: &[Block], prefix: &str) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len());
    let mut blocks = blocks.iter().peekable();
    for (index, line) in lines.iter().enumerate() {
        while blocks.next_if(|block| block.end() <= index).is_some() {}
        let covered = blocks.peek().is_some_and(|block| block.start <= index);
        if covered {
            out.push(format!("{prefix}{line}"));
        } else {
            out.push((*line).to_string());
        }
    }
    out
}

/// Drop every line inside `blocks`.
pub fn delete_blocks(lines: &[&str], blocks: &[Block]) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len());
    let mut next = 0;
    for block in blocks {
        out.extend(lines[next..block.start].iter().map(|line| (*line).to_string()));
        next = block.end();
    }
    out.extend(lines[next..].iter().map(|line| (*line).to_string()));
    out
}

/// Run one full patch pass: find blocks, then comment or delete them.
pub fn patch_lines(lines: &[&str], rule: &PatchRule<'_>) -> Patched {
    let blocks = find_blocks(lines, rule.markers, rule.block_len);
    let lines = match rule.mode {
        PatchMode::Comment => comment_blocks(lines, &blocks, rule.comment_prefix),
        PatchMode::Delete => delete_blocks(lines, &blocks),
    };
    Patched { lines, blocks }
}

/// Patch whole file contents. See [`patch_lines`].
pub fn patch_text(text: &str, rule: &PatchRule<'_>) -> Patched {
    patch_lines(&split_lines(text), rule)
}
