//! PDA → CFG rule generation.
//!
//! Every transition contributes rules in document order:
//!
//! - pop only, `p --(a, X/λ)--> q`: one rule `(pXq) → a`
//! - push two, `p --(a, X/YZ)--> q`: for every `(r, s)` over the states,
//!   `(pXr) → a(iYs)(sZr)` where `i` is the automaton's initial state
//!
//! Lambda input renders as `λ` in pop-only rules and as nothing in push-two rules.
//! In the push-two loop `r` is the outer (slower) state and `s` the inner one.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::automaton::{Automaton, Transition};
use crate::error::{PdaError, PdaResult};
use crate::symbol::Symbol;

/// A grammar variable standing for the triple `(state, stack letter, state)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Nonterminal {
    pub from: String,
    pub stack: String,
    pub to: String,
}

impl Nonterminal {
    pub fn new(from: impl Into<String>, stack: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            stack: stack.into(),
            to: to.into(),
        }
    }
}

impl fmt::Display for Nonterminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}{}{})", self.from, self.stack, self.to)
    }
}

/// Right-hand side of a production.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleBody {
    /// A lone terminal; lambda renders as `λ`.
    Terminal { terminal: Symbol },
    /// A terminal followed by two variables; lambda renders as nothing.
    Expand {
        terminal: Symbol,
        first: Nonterminal,
        second: Nonterminal,
    },
}

impl fmt::Display for RuleBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terminal { terminal } => f.write_str(terminal.render()),
            Self::Expand {
                terminal,
                first,
                second,
            } => write!(f, "{}{}{}", terminal.render_suppressed(), first, second),
        }
    }
}

/// A single production `head → body`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GrammarRule {
    pub head: Nonterminal,
    pub body: RuleBody,
}

impl fmt::Display for GrammarRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.head, self.body)
    }
}

/// Order in which states are enumerated by the push-two loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateOrder {
    /// Document declaration order.
    #[default]
    Declaration,
    /// Lexicographic by state name.
    Sorted,
}

impl fmt::Display for StateOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateOrder::Declaration => write!(f, "declaration"),
            StateOrder::Sorted => write!(f, "sorted"),
        }
    }
}

impl std::str::FromStr for StateOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "declaration" | "document" => Ok(StateOrder::Declaration),
            "sorted" | "lexicographic" => Ok(StateOrder::Sorted),
            _ => Err(format!(
                "Unknown state order: {}. Use 'declaration' or 'sorted'",
                s
            )),
        }
    }
}

/// Configuration for [`GrammarGenerator`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub state_order: StateOrder,
}

/// Converts an [`Automaton`] into grammar rules.
///
/// Holds no state between calls; one generator can serve any number of automata.
#[derive(Debug, Clone, Default)]
pub struct GrammarGenerator {
    config: GeneratorConfig,
}

impl GrammarGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Generate every rule for the automaton, or fail on the first transition whose
    /// stack write is neither 0 nor 2 letters. No partial result is returned.
    pub fn generate(&self, automaton: &Automaton) -> PdaResult<Vec<GrammarRule>> {
        let states = self.ordered_states(automaton);
        debug!(
            transitions = automaton.transitions().len(),
            states = states.len(),
            expected_rules = automaton.expected_rule_count(),
            order = %self.config.state_order,
            "Generating grammar rules"
        );

        validate_stack_writes(automaton)?;

        let mut rules = Vec::with_capacity(automaton.expected_rule_count());
        for transition in automaton.transitions() {
            match transition.stack_write.as_slice() {
                [bottom, top] => {
                    for &r in &states {
                        for &s in &states {
                            rules.push(push_rule(
                                transition,
                                automaton.initial_state(),
                                bottom,
                                top,
                                r,
                                s,
                            ));
                        }
                    }
                }
                _ => rules.push(pop_rule(transition)),
            }
        }

        debug!(rules = rules.len(), "Generated grammar rules");
        Ok(rules)
    }

    fn ordered_states<'a>(&self, automaton: &'a Automaton) -> Vec<&'a str> {
        let mut states: Vec<&str> = automaton.states().iter().map(String::as_str).collect();
        if self.config.state_order == StateOrder::Sorted {
            states.sort_unstable();
        }
        states
    }
}

/// First transition whose stack write is neither 0 nor 2 letters.
fn validate_stack_writes(automaton: &Automaton) -> PdaResult<()> {
    let invalid = automaton
        .transitions()
        .iter()
        .enumerate()
        .find(|(_, t)| !t.is_pop_only() && !t.is_push_two());
    match invalid {
        Some((index, transition)) => Err(PdaError::InvalidStackWrite {
            index,
            transition: transition.to_string(),
            length: transition.stack_write.len(),
        }),
        None => Ok(()),
    }
}

fn pop_rule(transition: &Transition) -> GrammarRule {
    GrammarRule {
        head: Nonterminal::new(
            &transition.source,
            transition.stack_read.render(),
            &transition.destination,
        ),
        body: RuleBody::Terminal {
            terminal: transition.input.clone(),
        },
    }
}

fn push_rule(
    transition: &Transition,
    initial: &str,
    bottom: &str,
    top: &str,
    r: &str,
    s: &str,
) -> GrammarRule {
    GrammarRule {
        head: Nonterminal::new(&transition.source, transition.stack_read.render(), r),
        body: RuleBody::Expand {
            terminal: transition.input.clone(),
            first: Nonterminal::new(initial, bottom, s),
            second: Nonterminal::new(s, top, r),
        },
    }
}

/// Render rules one per line.
pub fn render_rules(rules: &[GrammarRule]) -> Vec<String> {
    rules.iter().map(GrammarRule::to_string).collect()
}
