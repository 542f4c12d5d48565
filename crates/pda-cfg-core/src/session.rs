//! Explicit conversion session.
//!
//! A [`Session`] owns the currently loaded automaton and its generated rules, and is
//! passed to every operation (load, generate, diagram, export) instead of living in
//! ambient globals.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::automaton::Automaton;
use crate::dot::{render_dot, DotStyle};
use crate::error::{PdaError, PdaResult};
use crate::grammar::{render_rules, GeneratorConfig, GrammarGenerator, GrammarRule};
use crate::loader::AutomatonLoader;

/// Holds one automaton and the rules derived from it.
#[derive(Debug, Clone, Default)]
pub struct Session {
    generator: GrammarGenerator,
    source: Option<PathBuf>,
    automaton: Option<Automaton>,
    rules: Option<Vec<GrammarRule>>,
}

impl Session {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            generator: GrammarGenerator::with_config(config),
            ..Default::default()
        }
    }

    /// Load an automaton from a file, replacing the current one.
    ///
    /// On failure the session keeps whatever it held before.
    pub fn load(&mut self, path: impl AsRef<Path>) -> PdaResult<&Automaton> {
        let path = path.as_ref();
        let automaton = AutomatonLoader::load(path)?;
        Ok(self.replace(automaton, Some(path.to_path_buf())))
    }

    /// Load an automaton from XML text, replacing the current one.
    pub fn load_str(&mut self, text: &str) -> PdaResult<&Automaton> {
        let automaton = AutomatonLoader::load_str(text)?;
        Ok(self.replace(automaton, None))
    }

    fn replace(&mut self, automaton: Automaton, source: Option<PathBuf>) -> &Automaton {
        self.rules = None;
        self.source = source;
        self.automaton.insert(automaton)
    }

    /// Path of the loaded document, if it came from a file.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn automaton(&self) -> Option<&Automaton> {
        self.automaton.as_ref()
    }

    /// Rules from the last successful [`generate`](Self::generate), if any.
    pub fn rules(&self) -> Option<&[GrammarRule]> {
        self.rules.as_deref()
    }

    /// Generate (or return the cached) rules for the loaded automaton.
    pub fn generate(&mut self) -> PdaResult<&[GrammarRule]> {
        let automaton = self.automaton.as_ref().ok_or(PdaError::NoAutomatonLoaded)?;
        if self.rules.is_none() {
            let rules = self.generator.generate(automaton)?;
            info!(rules = rules.len(), "Converted automaton to grammar");
            self.rules = Some(rules);
        } else {
            debug!("Reusing generated rules");
        }
        Ok(self.rules.as_deref().unwrap_or_default())
    }

    /// DOT source for the loaded automaton.
    pub fn graph_dot(&self, style: &DotStyle) -> PdaResult<String> {
        let automaton = self.automaton.as_ref().ok_or(PdaError::NoAutomatonLoaded)?;
        Ok(render_dot(automaton, style))
    }

    /// Write the DOT source to a file.
    pub fn export_dot(&self, path: impl AsRef<Path>, style: &DotStyle) -> PdaResult<()> {
        let path = path.as_ref();
        let dot = self.graph_dot(style)?;
        std::fs::write(path, dot).map_err(|e| PdaError::io(path, e))?;
        info!(path = %path.display(), "Exported automaton diagram");
        Ok(())
    }

    /// Write the rendered rules to a file, one per line, generating them if needed.
    pub fn export_rules(&mut self, path: impl AsRef<Path>) -> PdaResult<()> {
        let path = path.as_ref();
        let mut text = render_rules(self.generate()?).join("\n");
        text.push('\n');
        std::fs::write(path, text).map_err(|e| PdaError::io(path, e))?;
        info!(path = %path.display(), "Exported grammar rules");
        Ok(())
    }
}
