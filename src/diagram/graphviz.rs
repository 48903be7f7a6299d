//! Graphviz-backed flow diagrams.

use std::fmt::Write as _;
use std::io::Write as _;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use super::DiagramRenderer;
use crate::error::{Error, Result};
use crate::parser::flow_nodes;

/// Renders flows by piping DOT source through the Graphviz `dot` binary.
#[derive(Debug, Clone)]
pub struct GraphvizRenderer {
    program: PathBuf,
    rankdir: String,
}

impl Default for GraphvizRenderer {
    fn default() -> Self {
        Self {
            program: PathBuf::from("dot"),
            rankdir: "LR".to_string(),
        }
    }
}

impl GraphvizRenderer {
    /// Use `dot` from `PATH`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific `dot` executable.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Layout direction (`LR`, `TB`, ...).
    pub fn with_rankdir(mut self, rankdir: impl Into<String>) -> Self {
        self.rankdir = rankdir.into();
        self
    }
}

impl DiagramRenderer for GraphvizRenderer {
    fn render(&self, flow: &str) -> Result<Vec<u8>> {
        let source = flow_to_dot(flow, &self.rankdir);

        let mut child = Command::new(&self.program)
            .arg("-Tpng")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(source.as_bytes())?;
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(Error::Diagram(format!(
                "{} exited with {}: {}",
                self.program.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(output.stdout)
    }

    fn name(&self) -> &str {
        "graphviz"
    }
}

/// Build DOT source for a flow line.
///
/// Repeated step names refer to the same node, so `A -> B -> A` draws a cycle.
pub fn flow_to_dot(flow: &str, rankdir: &str) -> String {
    let steps = flow_nodes(flow);
    let mut nodes: Vec<&str> = Vec::new();
    let mut ids = Vec::with_capacity(steps.len());
    for step in &steps {
        let id = match nodes.iter().position(|n| n == step) {
            Some(i) => i,
            None => {
                nodes.push(step);
                nodes.len() - 1
            }
        };
        ids.push(id);
    }

    let mut dot = String::from("digraph flow {\n");
    let _ = writeln!(dot, "  rankdir={};", rankdir);
    dot.push_str(
        "  node [shape=box, style=\"rounded,filled\", fillcolor=\"#DCE6F2\", fontname=\"Helvetica\"];\n",
    );
    for (i, label) in nodes.iter().enumerate() {
        let _ = writeln!(dot, "  n{} [label=\"{}\"];", i, escape_label(label));
    }
    for pair in ids.windows(2) {
        let _ = writeln!(dot, "  n{} -> n{};", pair[0], pair[1]);
    }
    dot.push_str("}\n");
    dot
}

fn escape_label(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}
