//! Command implementations and argument parsing for the graphtrace CLI.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use graphtrace_core::{
    AdjacencyMatrix, Algorithm, GeneratorBuilder, Graph, GraphClass, GraphTraceError, NO_EDGE,
    PropertyMode, Trace, run_algorithm,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument, warn};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "graphtrace",
    about = "Generate structured graphs and trace classic graph algorithms."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Generate a graph of a structural class.
    Generate(GenerateCommand),
    /// Run an algorithm and print its step trace.
    Trace(TraceCommand),
    /// Print which algorithms suit which graph classes.
    Classes,
}

/// Output encodings for graphs and traces.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Line-oriented human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON with missing edges as `null`.
    Json,
}

fn parse_graph_class(raw: &str) -> Result<GraphClass, GraphTraceError> {
    raw.parse()
}

fn parse_algorithm(raw: &str) -> Result<Algorithm, GraphTraceError> {
    raw.parse()
}

/// Options describing a graph to generate.
#[derive(Debug, Args, Clone)]
pub struct GeneratedArgs {
    /// Structural class tag, e.g. `tree` or `bipartite`.
    #[arg(long, value_parser = parse_graph_class)]
    pub class: GraphClass,

    /// Number of nodes.
    #[arg(long)]
    pub nodes: usize,

    /// Seed for reproducible output.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Options accepted by the `generate` command.
#[derive(Debug, Args, Clone)]
pub struct GenerateCommand {
    /// Class, size and seed of the graph.
    #[command(flatten)]
    pub graph: GeneratedArgs,

    /// Report the properties implied by the construction rule instead of
    /// recomputing them.
    #[arg(long)]
    pub declared_properties: bool,

    /// Output encoding.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Where the `trace` command gets its adjacency matrix.
#[derive(Debug, Subcommand, Clone)]
pub enum GraphSource {
    /// Generate a fresh graph.
    Generated(GeneratedArgs),
    /// Load a JSON array of rows; `null` marks a missing edge.
    Matrix(MatrixArgs),
}

/// Matrix file arguments.
#[derive(Debug, Args, Clone)]
pub struct MatrixArgs {
    /// Path to the JSON matrix.
    pub path: PathBuf,
}

/// Options accepted by the `trace` command.
#[derive(Debug, Args, Clone)]
pub struct TraceCommand {
    /// Algorithm tag: dfs, bfs, dijkstra, floydWarshall, prim or kruskal.
    #[arg(long, value_parser = parse_algorithm)]
    pub algorithm: Algorithm,

    /// Start node.
    #[arg(long, default_value_t = 0)]
    pub start: usize,

    /// Target node; defaults to the last node.
    #[arg(long)]
    pub end: Option<usize>,

    /// Output encoding.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Graph to trace.
    #[command(subcommand)]
    pub source: GraphSource,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// A matrix file could not be read.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A matrix file was not a JSON array of rows.
    #[error("`{path}` is not a JSON adjacency matrix: {source}")]
    MatrixFormat {
        /// Path that triggered the failure.
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Writing the rendered output failed.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
    /// Serialising the output as JSON failed.
    #[error("failed to encode output as JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Generation or tracing rejected the request.
    #[error(transparent)]
    Core(#[from] GraphTraceError),
}

/// Result of a CLI command, ready to render.
#[derive(Debug, Clone)]
pub enum CommandOutput {
    /// A generated graph.
    Graph {
        /// The generated graph.
        graph: Box<Graph>,
        /// Requested encoding.
        format: OutputFormat,
    },
    /// A recorded trace.
    Trace {
        /// The recorded steps.
        trace: Trace,
        /// Requested encoding.
        format: OutputFormat,
    },
    /// The class × algorithm compatibility table.
    Classes,
}

/// Executes the command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the request is invalid or an input cannot be
/// read.
///
/// # Examples
/// ```
/// use graphtrace_cli::cli::{Cli, Command, CommandOutput, GenerateCommand, GeneratedArgs, OutputFormat, run_cli};
/// use graphtrace_core::GraphClass;
///
/// let cli = Cli {
///     command: Command::Generate(GenerateCommand {
///         graph: GeneratedArgs { class: GraphClass::Tree, nodes: 4, seed: Some(1) },
///         declared_properties: false,
///         format: OutputFormat::Text,
///     }),
/// };
/// let CommandOutput::Graph { graph, .. } = run_cli(cli)? else {
///     panic!("generate yields a graph");
/// };
/// assert_eq!(graph.edges().len(), 3);
/// # Ok::<(), graphtrace_cli::cli::CliError>(())
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<CommandOutput, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Generate(command) => {
            span.record("command", field::display("generate"));
            run_generate(&command)
        }
        Command::Trace(command) => {
            span.record("command", field::display("trace"));
            run_trace(&command)
        }
        Command::Classes => {
            span.record("command", field::display("classes"));
            Ok(CommandOutput::Classes)
        }
    }
}

fn generate(args: &GeneratedArgs, mode: PropertyMode) -> Result<Graph, CliError> {
    let mut builder = GeneratorBuilder::new().with_property_mode(mode);
    if let Some(seed) = args.seed {
        builder = builder.with_seed(seed);
    }
    Ok(builder.build().generate(args.class, args.nodes)?)
}

#[instrument(
    name = "cli.generate",
    err,
    skip(command),
    fields(class = %command.graph.class, nodes = command.graph.nodes),
)]
pub(super) fn run_generate(command: &GenerateCommand) -> Result<CommandOutput, CliError> {
    let mode = if command.declared_properties {
        PropertyMode::Declared
    } else {
        PropertyMode::Verified
    };
    let graph = generate(&command.graph, mode)?;
    info!(edges = graph.edges().len(), "graph generated");
    Ok(CommandOutput::Graph {
        graph: Box::new(graph),
        format: command.format,
    })
}

#[instrument(
    name = "cli.trace",
    err,
    skip(command),
    fields(algorithm = %command.algorithm, source = field::Empty),
)]
pub(super) fn run_trace(command: &TraceCommand) -> Result<CommandOutput, CliError> {
    let span = Span::current();
    let matrix = match &command.source {
        GraphSource::Generated(args) => {
            span.record("source", field::display(args.class));
            if !command.algorithm.is_recommended_for(args.class) {
                warn!(
                    algorithm = %command.algorithm,
                    class = %args.class,
                    "algorithm is not recommended for this graph class"
                );
            }
            generate(args, PropertyMode::Verified)?
                .adjacency_matrix()
                .clone()
        }
        GraphSource::Matrix(args) => {
            span.record("source", field::display("matrix"));
            load_matrix(&args.path)?
        }
    };

    let end = command
        .end
        .unwrap_or_else(|| matrix.node_count().saturating_sub(1));
    let trace = run_algorithm(command.algorithm, &matrix, command.start, end)?;
    info!(steps = trace.len(), "trace completed");
    Ok(CommandOutput::Trace {
        trace,
        format: command.format,
    })
}

/// Reads a JSON matrix such as `[[0, 4, null], [4, 0, 1], [null, 1, 0]]`.
#[instrument(name = "cli.load_matrix", err, fields(path = %path.display()))]
pub(super) fn load_matrix(path: &Path) -> Result<AdjacencyMatrix, CliError> {
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let rows: Vec<Vec<Option<f64>>> = serde_json::from_reader(BufReader::new(file))
        .map_err(|source| CliError::MatrixFormat {
            path: path.to_path_buf(),
            source,
        })?;
    let rows = rows
        .into_iter()
        .map(|row| row.into_iter().map(|cell| cell.unwrap_or(NO_EDGE)).collect())
        .collect();
    Ok(AdjacencyMatrix::try_from_rows(rows)?)
}
