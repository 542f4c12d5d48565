//! Graphviz DOT source for automaton diagrams.
//!
//! Image rendering is left to Graphviz; this only produces the `digraph` text.

use petgraph::visit::{EdgeRef, IntoEdgeReferences};

use crate::automaton::Automaton;

/// Visual options for [`render_dot`].
#[derive(Debug, Clone)]
pub struct DotStyle {
    pub graph_name: String,
    pub accent: String,
    pub background: String,
    pub font: String,
}

impl Default for DotStyle {
    fn default() -> Self {
        Self {
            graph_name: "pda_machine".to_string(),
            accent: "#ff9600".to_string(),
            background: "#222222".to_string(),
            font: "Arial".to_string(),
        }
    }
}

/// Render the automaton as a left-to-right `digraph`.
///
/// A plaintext `start` node points at the initial state, final states are double
/// circles, and edges carry `input,stackRead,stackWrite` labels.
pub fn render_dot(automaton: &Automaton, style: &DotStyle) -> String {
    let (graph, _) = automaton.to_petgraph();
    let mut out = format!("digraph {} {{\n", quote(&style.graph_name));

    out.push_str(&format!(
        "    graph [rankdir=LR, size=\"8,5\", bgcolor={}];\n",
        quote(&style.background)
    ));
    out.push_str(&format!(
        "    node [fontname={font}, style=filled, fillcolor={accent}, color={accent}, fontcolor=black];\n",
        font = quote(&style.font),
        accent = quote(&style.accent)
    ));
    out.push_str(&format!(
        "    edge [fontname={}, color={}, fontcolor=white];\n",
        quote(&style.font),
        quote(&style.accent)
    ));
    out.push_str("    start [shape=plaintext, style=\"\", fontcolor=white, label=\"start\"];\n");

    for idx in graph.node_indices() {
        let name = &graph[idx];
        let shape = if automaton.final_states().contains(name) {
            "doublecircle"
        } else {
            "circle"
        };
        out.push_str(&format!("    {} [shape={}];\n", quote(name), shape));
    }

    out.push_str(&format!(
        "    start -> {};\n",
        quote(automaton.initial_state())
    ));

    for edge in graph.edge_references() {
        out.push_str(&format!(
            "    {} -> {} [label={}];\n",
            quote(&graph[edge.source()]),
            quote(&graph[edge.target()]),
            quote(&edge.weight().label())
        ));
    }

    out.push_str("}\n");
    out
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}
