//! Command-line interface for generating graphs and tracing algorithms.
//!
//! `generate` prints a graph of one of the twelve structural classes,
//! `trace` runs an algorithm over a generated graph or a JSON matrix file and
//! prints every recorded step, and `classes` shows which algorithms suit
//! which classes.

mod commands;
mod render;

pub use commands::{
    Cli, CliError, Command, CommandOutput, GenerateCommand, GeneratedArgs, GraphSource,
    MatrixArgs, OutputFormat, TraceCommand, run_cli,
};
pub use render::render_output;
