//! Text and JSON rendering of command output.

use std::io::Write;

use graphtrace_core::{Algorithm, Graph, GraphClass, Step, Trace};

use super::commands::{CliError, CommandOutput, OutputFormat};

/// Writes `output` to `writer` in the format requested by the command.
///
/// # Errors
/// Returns [`CliError::Output`] when writing fails and [`CliError::Json`]
/// when JSON encoding fails.
pub fn render_output(output: &CommandOutput, mut writer: impl Write) -> Result<(), CliError> {
    match output {
        CommandOutput::Graph {
            graph,
            format: OutputFormat::Json,
        } => write_json(graph, &mut writer),
        CommandOutput::Graph { graph, .. } => Ok(render_graph(graph, &mut writer)?),
        CommandOutput::Trace {
            trace,
            format: OutputFormat::Json,
        } => write_json(trace, &mut writer),
        CommandOutput::Trace { trace, .. } => Ok(render_trace(trace, &mut writer)?),
        CommandOutput::Classes => Ok(render_classes(&mut writer)?),
    }
}

fn write_json(value: &impl serde::Serialize, writer: &mut impl Write) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}

fn cell(value: f64) -> String {
    if value.is_infinite() {
        "∞".to_owned()
    } else {
        value.to_string()
    }
}

/// Human-readable graph summary followed by its edges and matrix.
pub(super) fn render_graph(graph: &Graph, writer: &mut impl Write) -> std::io::Result<()> {
    let properties = graph.properties();
    writeln!(writer, "class: {}", properties.class)?;
    writeln!(writer, "nodes: {}", graph.node_count())?;
    writeln!(writer, "directed: {}", graph.is_directed())?;
    writeln!(
        writer,
        "properties: connected={} cyclic={} dense={} tree={} complete={} bipartite={}",
        properties.is_connected,
        properties.is_cyclic,
        properties.is_dense,
        properties.is_tree,
        properties.is_complete,
        properties.is_bipartite,
    )?;
    writeln!(writer, "edges: {}", graph.edges().len())?;
    for edge in graph.edges() {
        let arrow = if edge.is_directed() { "->" } else { "--" };
        writeln!(
            writer,
            "  {} {arrow} {} (weight {})",
            edge.source, edge.target, edge.weight
        )?;
    }
    writeln!(writer, "matrix:")?;
    let matrix = graph.adjacency_matrix();
    for row in 0..matrix.node_count() {
        let cells: Vec<String> = matrix.row(row).iter().copied().map(cell).collect();
        writeln!(writer, "  {}", cells.join(" "))?;
    }
    Ok(())
}

fn step_state(step: &Step) -> String {
    match step {
        Step::Dfs { stack, .. } => format!("stack={stack:?}"),
        Step::Bfs { queue, .. } => format!("queue={queue:?}"),
        Step::Dijkstra { distances, .. } => {
            let cells: Vec<String> = distances.iter().copied().map(cell).collect();
            format!("distances=[{}]", cells.join(", "))
        }
        Step::FloydWarshall { k, i, j, .. } => match (k, i, j) {
            (Some(k), Some(i), Some(j)) => format!("k={k} i={i} j={j}"),
            _ => String::new(),
        },
        Step::Prim { mst, .. } | Step::Kruskal { mst, .. } => {
            let weight: f64 = mst.iter().map(|edge| edge.weight).sum();
            format!("mst={} weight={weight}", mst.len())
        }
    }
}

/// One line per step: index, message, then the algorithm's working state.
pub(super) fn render_trace(trace: &Trace, writer: &mut impl Write) -> std::io::Result<()> {
    writeln!(writer, "algorithm: {}", trace.algorithm())?;
    writeln!(writer, "steps: {}", trace.len())?;
    for (index, step) in trace.iter().enumerate() {
        let state = step_state(step);
        if state.is_empty() {
            writeln!(writer, "[{index}] {}", step.message())?;
        } else {
            writeln!(writer, "[{index}] {} | {state}", step.message())?;
        }
    }
    Ok(())
}

/// Compatibility table: one row per class, one column per algorithm.
pub(super) fn render_classes(writer: &mut impl Write) -> std::io::Result<()> {
    let width = GraphClass::ALL
        .iter()
        .map(|class| class.as_str().len())
        .max()
        .unwrap_or_default();
    write!(writer, "{:width$}", "class")?;
    for algorithm in Algorithm::ALL {
        write!(writer, "  {algorithm}")?;
    }
    writeln!(writer)?;
    for class in GraphClass::ALL {
        write!(writer, "{:width$}", class.as_str())?;
        for algorithm in Algorithm::ALL {
            let mark = if algorithm.is_recommended_for(class) { "yes" } else { "-" };
            write!(writer, "  {mark:<len$}", len = algorithm.as_str().len())?;
        }
        writeln!(writer)?;
    }
    Ok(())
}
