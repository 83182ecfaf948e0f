//! I/O helpers for itpatch commands.

pub mod config;
pub mod discover;
pub mod patch_file;
