//! Graph command implementation.
//!
//! Emits Graphviz DOT source for an automaton diagram.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pda_cfg_core::{DotStyle, Session};
use tracing::info;

/// Load `file` and write its diagram to `output` or stdout.
pub fn execute(session: &mut Session, file: &Path, output: Option<PathBuf>) -> Result<()> {
    session
        .load(file)
        .with_context(|| format!("Failed to load automaton from {}", file.display()))?;

    let style = DotStyle::default();
    match output {
        Some(path) => {
            session
                .export_dot(&path, &style)
                .with_context(|| format!("Failed to write diagram to {}", path.display()))?;
            eprintln!("✅ Diagram written to {}", path.display());
        }
        None => {
            let dot = session.graph_dot(&style)?;
            info!(bytes = dot.len(), "Rendered automaton diagram");
            print!("{}", dot);
        }
    }

    Ok(())
}
