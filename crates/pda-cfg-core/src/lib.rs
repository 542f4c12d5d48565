//! Pushdown automaton to context-free grammar conversion.
//!
//! This crate loads a pushdown automaton (PDA) from an XML description and produces
//! the context-free grammar rules generating the language the automaton accepts.
//!
//! ## Core Concepts
//!
//! - **Automaton**: states, input/stack alphabets, a single tail (stack-bottom) symbol,
//!   an initial state, final states, and an ordered list of transitions
//! - **Transition**: `source --(input, stackRead / stackWrite)--> destination`, pushing
//!   either nothing or exactly two stack letters
//! - **Nonterminal**: the triple `(p, X, q)`, rendered `(pXq)`
//! - **GrammarRule**: `(pXq) → a` or `(pXr) → a(pYs)(sZr)`
//!
//! ## Pipeline
//!
//! ```text
//! XML document ──► AutomatonLoader ──► Automaton ──► GrammarGenerator ──► Vec<GrammarRule>
//!                                          │
//!                                          └──► dot::render_dot ──► Graphviz source
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pda_cfg_core::{AutomatonLoader, GrammarGenerator};
//!
//! fn main() -> Result<(), pda_cfg_core::PdaError> {
//!     let automaton = AutomatonLoader::load("machine.xml")?;
//!     for rule in GrammarGenerator::new().generate(&automaton)? {
//!         println!("{rule}");
//!     }
//!     Ok(())
//! }
//! ```

mod automaton;
pub mod dot;
mod error;
mod grammar;
mod loader;
mod session;
mod symbol;

pub use automaton::{Automaton, AutomatonBuilder, Transition};
pub use error::{PdaError, PdaResult};
pub use grammar::{
    render_rules, GeneratorConfig, GrammarGenerator, GrammarRule, Nonterminal, RuleBody,
    StateOrder,
};
pub use loader::AutomatonLoader;
pub use session::Session;
pub use symbol::{is_lambda, parse_stack_write, Symbol, LAMBDA_GLYPH, LAMBDA_TOKEN};

// Re-export diagram helpers at the top level
pub use dot::{render_dot, DotStyle};
