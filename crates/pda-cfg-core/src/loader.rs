//! XML loader for automaton descriptions.
//!
//! ## Document Layout
//!
//! ```text
//! <Automaton>
//! ├── Alphabets
//! │   ├── Input_alphabets   <alphabet letter=".."/>*
//! │   └── Stack_alphabets   <alphabet letter=".."/>* <tail letter=".."/>
//! ├── States                <state name=".."/>* <initialState name=".."/>
//! │   └── FinalStates       <state name=".."/>*
//! └── Transitions           <transition source destination input stackRead stackWrite/>*
//! ```
//!
//! The root element's own name is not checked.

use std::path::Path;

use roxmltree::{Document, Node};
use tracing::{debug, info};

use crate::automaton::{single_tail, Automaton, AutomatonBuilder, Transition};
use crate::error::{PdaError, PdaResult};
use crate::symbol::{parse_stack_write, Symbol};

const ALPHABETS: &str = "Alphabets";
const INPUT_ALPHABETS: &str = "Input_alphabets";
const STACK_ALPHABETS: &str = "Stack_alphabets";
const STATES: &str = "States";
const INITIAL_STATE: &str = "initialState";
const FINAL_STATES: &str = "FinalStates";
const TRANSITIONS: &str = "Transitions";

/// Parses automaton documents into [`Automaton`] values.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutomatonLoader;

impl AutomatonLoader {
    /// Load an automaton from an XML file.
    pub fn load(path: impl AsRef<Path>) -> PdaResult<Automaton> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| PdaError::io(path, e))?;
        debug!(path = %path.display(), bytes = text.len(), "Read automaton document");

        let automaton = Self::load_str(&text)?;
        info!(
            path = %path.display(),
            states = automaton.states().len(),
            transitions = automaton.transitions().len(),
            "Loaded automaton"
        );
        Ok(automaton)
    }

    /// Load an automaton from XML text.
    pub fn load_str(text: &str) -> PdaResult<Automaton> {
        let document = Document::parse(text)
            .map_err(|e| PdaError::malformed(format!("invalid XML: {e}")))?;
        let root = document.root_element();

        let builder = parse_alphabets(root, AutomatonBuilder::default())?;
        let builder = parse_states(root, builder)?;
        let builder = parse_transitions(root, builder)?;
        builder.build()
    }
}

fn parse_alphabets(root: Node, mut builder: AutomatonBuilder) -> PdaResult<AutomatonBuilder> {
    let alphabets = child(root, ALPHABETS)?;

    for letter in elements(child(alphabets, INPUT_ALPHABETS)?) {
        builder = builder.input_letter(attribute(letter, "letter")?);
    }

    let mut tails = Vec::new();
    for letter in elements(child(alphabets, STACK_ALPHABETS)?) {
        match letter.tag_name().name() {
            "alphabet" => builder = builder.stack_letter(attribute(letter, "letter")?),
            "tail" => tails.push(attribute(letter, "letter")?.to_string()),
            other => debug!(element = other, "Ignoring unknown stack alphabet entry"),
        }
    }

    // Tail errors surface before any later section is looked at.
    Ok(builder.tail(single_tail(tails)?))
}

fn parse_states(root: Node, mut builder: AutomatonBuilder) -> PdaResult<AutomatonBuilder> {
    let states = child(root, STATES)?;

    for state in elements(states).filter(|n| n.has_tag_name("state")) {
        builder = builder.state(attribute(state, "name")?);
    }

    for state in elements(child(states, FINAL_STATES)?) {
        builder = builder.final_state(attribute(state, "name")?);
    }

    let initial = child(states, INITIAL_STATE)?;
    Ok(builder.initial_state(attribute(initial, "name")?))
}

fn parse_transitions(root: Node, mut builder: AutomatonBuilder) -> PdaResult<AutomatonBuilder> {
    for transition in elements(child(root, TRANSITIONS)?) {
        builder = builder.transition(Transition {
            source: attribute(transition, "source")?.to_string(),
            destination: attribute(transition, "destination")?.to_string(),
            input: Symbol::parse(attribute(transition, "input")?),
            stack_read: Symbol::parse(attribute(transition, "stackRead")?),
            stack_write: parse_stack_write(attribute(transition, "stackWrite")?),
        });
    }
    Ok(builder)
}

/// First element child with the given tag.
fn child<'a, 'input>(parent: Node<'a, 'input>, tag: &str) -> PdaResult<Node<'a, 'input>> {
    parent
        .children()
        .find(|n| n.is_element() && n.has_tag_name(tag))
        .ok_or_else(|| {
            PdaError::malformed(format!(
                "missing <{tag}> inside <{}>",
                parent.tag_name().name()
            ))
        })
}

/// Element children, skipping text and comments.
fn elements<'a, 'input>(parent: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    parent.children().filter(|n| n.is_element())
}

fn attribute<'a>(node: Node<'a, '_>, name: &str) -> PdaResult<&'a str> {
    node.attribute(name).ok_or_else(|| {
        PdaError::malformed(format!(
            "<{}> is missing the `{name}` attribute",
            node.tag_name().name()
        ))
    })
}
