//! Support library for the `graphtrace` binary.
//!
//! Exposes command execution, rendering and logging setup so tests and
//! doctests can drive the commands without spawning a process.

pub mod cli;
pub mod logging;
