//! Convert command implementation.
//!
//! Loads an automaton, generates its grammar, and prints or writes the rules.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pda_cfg_core::{GrammarRule, Session};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Rule output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One rendered rule per line.
    #[default]
    Text,
    /// JSON array of structured rules.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => anyhow::bail!("Unknown format: {}. Use 'text' or 'json'", s),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// A rule as written in JSON output.
#[derive(Serialize)]
struct RenderedRule<'a> {
    #[serde(flatten)]
    rule: &'a GrammarRule,
    rendered: String,
}

/// Load `file`, convert it, and emit the rules to `output` or stdout.
pub fn execute(
    session: &mut Session,
    file: &Path,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let automaton = session
        .load(file)
        .with_context(|| format!("Failed to load automaton from {}", file.display()))?;

    let unresolved = automaton.unresolved_states();
    if !unresolved.is_empty() {
        warn!(states = ?unresolved, "Automaton references undeclared states");
    }

    let rules = session
        .generate()
        .with_context(|| format!("Failed to convert {} to a grammar", file.display()))?;

    let content = render(rules, format)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create output directory {}", parent.display())
                    })?;
                }
            }
            std::fs::write(&path, &content)
                .with_context(|| format!("Failed to write rules to {}", path.display()))?;
            info!(path = %path.display(), rules = rules.len(), "Wrote grammar rules");
            eprintln!("✅ {} rules written to {}", rules.len(), path.display());
        }
        None => print!("{}", content),
    }

    Ok(())
}

/// Render rules in the requested format, newline terminated.
pub fn render(rules: &[GrammarRule], format: OutputFormat) -> Result<String> {
    let mut content = match format {
        OutputFormat::Text => rules
            .iter()
            .map(|rule| rule.to_string())
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json => {
            let rendered: Vec<RenderedRule> = rules
                .iter()
                .map(|rule| RenderedRule {
                    rule,
                    rendered: rule.to_string(),
                })
                .collect();
            serde_json::to_string_pretty(&rendered)?
        }
    };
    if !content.is_empty() {
        content.push('\n');
    }
    Ok(content)
}
