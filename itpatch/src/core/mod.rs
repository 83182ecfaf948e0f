//! Deterministic, pure patch logic.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! line buffers and return deterministic outputs suitable for tests.

pub mod patcher;
pub mod types;
