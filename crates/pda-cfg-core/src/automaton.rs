//! The pushdown automaton model.
//!
//! An [`Automaton`] is assembled once (by the loader or an [`AutomatonBuilder`])
//! and is read-only afterwards. States and alphabets are insertion-ordered sets so
//! every enumeration over them is reproducible.

use std::collections::HashMap;
use std::fmt;

use indexmap::IndexSet;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use serde::{Deserialize, Serialize};

use crate::error::{PdaError, PdaResult};
use crate::symbol::{Symbol, LAMBDA_GLYPH};

/// A single PDA move: `source --(input, stack_read / stack_write)--> destination`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transition {
    pub source: String,
    pub destination: String,
    /// Input consumed, or lambda for none.
    pub input: Symbol,
    /// Stack letter popped.
    pub stack_read: Symbol,
    /// Letters pushed, bottom-most first. Only lengths 0 and 2 convert.
    pub stack_write: Vec<String>,
}

impl Transition {
    /// Create a transition from raw document values.
    pub fn new(
        source: impl Into<String>,
        destination: impl Into<String>,
        input: impl Into<Symbol>,
        stack_read: impl Into<Symbol>,
        stack_write: &[&str],
    ) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            input: input.into(),
            stack_read: stack_read.into(),
            stack_write: stack_write.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// True if the transition only pops.
    pub fn is_pop_only(&self) -> bool {
        self.stack_write.is_empty()
    }

    /// True if the transition replaces the popped letter with two letters.
    pub fn is_push_two(&self) -> bool {
        self.stack_write.len() == 2
    }

    /// Pushed letters as one word, or the lambda glyph when nothing is pushed.
    pub fn stack_write_label(&self) -> String {
        if self.stack_write.is_empty() {
            LAMBDA_GLYPH.to_string()
        } else {
            self.stack_write.concat()
        }
    }

    /// Edge label used by diagrams: `input,stackRead,stackWrite`.
    pub fn label(&self) -> String {
        format!(
            "{},{},{}",
            self.input,
            self.stack_read,
            self.stack_write_label()
        )
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} →({}, {}/{})→ {}",
            self.source,
            self.input,
            self.stack_read,
            self.stack_write_label(),
            self.destination
        )
    }
}

/// A parsed pushdown automaton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Automaton {
    states: IndexSet<String>,
    input_alphabet: IndexSet<String>,
    stack_alphabet: IndexSet<String>,
    tail_symbol: String,
    initial_state: String,
    final_states: IndexSet<String>,
    transitions: Vec<Transition>,
}

impl Automaton {
    /// Start building an automaton with the given initial state.
    pub fn builder(initial_state: impl Into<String>) -> AutomatonBuilder {
        AutomatonBuilder::new(initial_state)
    }

    /// States in declaration order.
    pub fn states(&self) -> &IndexSet<String> {
        &self.states
    }

    pub fn input_alphabet(&self) -> &IndexSet<String> {
        &self.input_alphabet
    }

    pub fn stack_alphabet(&self) -> &IndexSet<String> {
        &self.stack_alphabet
    }

    /// The stack-bottom marker.
    pub fn tail_symbol(&self) -> &str {
        &self.tail_symbol
    }

    pub fn initial_state(&self) -> &str {
        &self.initial_state
    }

    pub fn final_states(&self) -> &IndexSet<String> {
        &self.final_states
    }

    /// Transitions in document order.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Number of rules a conversion yields, counting only convertible transitions.
    pub fn expected_rule_count(&self) -> usize {
        let squared = self.states.len() * self.states.len();
        self.transitions
            .iter()
            .map(|t| match t.stack_write.len() {
                0 => 1,
                2 => squared,
                _ => 0,
            })
            .sum()
    }

    /// State names referenced by the initial state, final states, or transitions
    /// that are not declared as states. First appearance order, no duplicates.
    pub fn unresolved_states(&self) -> Vec<&str> {
        let referenced = std::iter::once(self.initial_state.as_str())
            .chain(self.final_states.iter().map(String::as_str))
            .chain(
                self.transitions
                    .iter()
                    .flat_map(|t| [t.source.as_str(), t.destination.as_str()]),
            );

        let mut unresolved: IndexSet<&str> = IndexSet::new();
        for name in referenced {
            if !self.states.contains(name) {
                unresolved.insert(name);
            }
        }
        unresolved.into_iter().collect()
    }

    /// Convert to a petgraph StableDiGraph for visualization/analysis.
    /// Returns the graph and a mapping from state name to NodeIndex.
    ///
    /// Undeclared transition endpoints still get a node so every edge is kept.
    pub fn to_petgraph(
        &self,
    ) -> (
        StableDiGraph<String, Transition>,
        HashMap<String, NodeIndex>,
    ) {
        let mut graph = StableDiGraph::new();
        let mut name_to_index = HashMap::new();

        for state in &self.states {
            let idx = graph.add_node(state.clone());
            name_to_index.insert(state.clone(), idx);
        }

        for transition in &self.transitions {
            let from = *name_to_index
                .entry(transition.source.clone())
                .or_insert_with(|| graph.add_node(transition.source.clone()));
            let to = *name_to_index
                .entry(transition.destination.clone())
                .or_insert_with(|| graph.add_node(transition.destination.clone()));
            graph.add_edge(from, to, transition.clone());
        }

        (graph, name_to_index)
    }
}

/// Incremental constructor for [`Automaton`].
///
/// Repeated states and letters collapse into one set entry. Tail declarations are
/// counted so that [`build`](Self::build) can enforce exactly one.
#[derive(Debug, Clone, Default)]
pub struct AutomatonBuilder {
    states: IndexSet<String>,
    input_alphabet: IndexSet<String>,
    stack_alphabet: IndexSet<String>,
    tails: Vec<String>,
    initial_state: String,
    final_states: IndexSet<String>,
    transitions: Vec<Transition>,
}

impl AutomatonBuilder {
    pub fn new(initial_state: impl Into<String>) -> Self {
        Self {
            initial_state: initial_state.into(),
            ..Default::default()
        }
    }

    pub fn initial_state(mut self, state: impl Into<String>) -> Self {
        self.initial_state = state.into();
        self
    }

    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.states.insert(state.into());
        self
    }

    pub fn states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.states.extend(states.into_iter().map(Into::into));
        self
    }

    pub fn final_state(mut self, state: impl Into<String>) -> Self {
        self.final_states.insert(state.into());
        self
    }

    pub fn input_letter(mut self, letter: impl Into<String>) -> Self {
        self.input_alphabet.insert(letter.into());
        self
    }

    pub fn stack_letter(mut self, letter: impl Into<String>) -> Self {
        self.stack_alphabet.insert(letter.into());
        self
    }

    /// Declare a tail symbol. Declaring more than one fails at build time.
    pub fn tail(mut self, letter: impl Into<String>) -> Self {
        self.tails.push(letter.into());
        self
    }

    pub fn transition(mut self, transition: Transition) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Finish the automaton, enforcing the structural invariants.
    pub fn build(self) -> PdaResult<Automaton> {
        let tail_symbol = single_tail(self.tails)?;

        if self.states.is_empty() {
            return Err(PdaError::malformed("automaton declares no states"));
        }

        Ok(Automaton {
            states: self.states,
            input_alphabet: self.input_alphabet,
            stack_alphabet: self.stack_alphabet,
            tail_symbol,
            initial_state: self.initial_state,
            final_states: self.final_states,
            transitions: self.transitions,
        })
    }
}

/// Reduce the declared tail letters to the single one required.
pub(crate) fn single_tail(tails: Vec<String>) -> PdaResult<String> {
    let mut tails = tails.into_iter();
    let first = tails.next().ok_or(PdaError::MissingTailSymbol)?;
    match tails.next() {
        Some(second) => Err(PdaError::DuplicateTailSymbol { first, second }),
        None => Ok(first),
    }
}
