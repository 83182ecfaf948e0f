//! Board selection for `itpatch patch` and `itpatch list`.

use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::{Context, Result, bail};

use crate::error::PatchError;

pub const MENU_PROMPT: &str = "Choose MCU/Nucleo (Select a number):";

/// Picks one board out of the discovered list.
pub trait BoardSelector {
    /// Return an index into `boards`.
    fn select(&mut self, boards: &[String]) -> Result<usize>;
}

/// Write the numbered board menu, one `<index>: <name>` line per board.
pub fn write_menu<W: Write>(out: &mut W, boards: &[String]) -> std::io::Result<()> {
    for (index, board) in boards.iter().enumerate() {
        writeln!(out, "{index}: {board}")?;
    }
    Ok(())
}

/// Parse a zero-based menu index and check it against `count`.
pub fn parse_index(input: &str, count: usize) -> Result<usize, PatchError> {
    let trimmed = input.trim();
    let index: usize = trimmed
        .parse()
        .map_err(|_| PatchError::SelectionNotANumber {
            input: trimmed.to_string(),
        })?;
    if index >= count {
        return Err(PatchError::SelectionOutOfRange { index, count });
    }
    Ok(index)
}

/// Interactive selector: prints the menu and reads one line.
pub struct PromptSelector<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptSelector<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> BoardSelector for PromptSelector<R, W> {
    fn select(&mut self, boards: &[String]) -> Result<usize> {
        writeln!(self.output, "{MENU_PROMPT}").context("write menu")?;
        write_menu(&mut self.output, boards).context("write menu")?;
        self.output.flush().context("flush menu")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("read board selection")?;
        if read == 0 {
            bail!("no board selection on stdin");
        }
        Ok(parse_index(&line, boards.len())?)
    }
}

/// Board named on the command line, either by menu index or by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardChoice {
    Index(usize),
    Name(String),
}

impl FromStr for BoardChoice {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().parse::<usize>() {
            Ok(index) => Self::Index(index),
            Err(_) => Self::Name(s.trim().to_string()),
        })
    }
}

impl BoardSelector for BoardChoice {
    fn select(&mut self, boards: &[String]) -> Result<usize> {
        let index = match &*self {
            Self::Index(index) => {
                if *index >= boards.len() {
                    return Err(PatchError::SelectionOutOfRange {
                        index: *index,
                        count: boards.len(),
                    }
                    .into());
                }
                *index
            }
            Self::Name(name) => boards
                .iter()
                .position(|board| board == name)
                .ok_or_else(|| PatchError::UnknownBoard { name: name.clone() })?,
        };
        Ok(index)
    }
}
