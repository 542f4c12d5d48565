//! Inspect command implementation.
//!
//! Prints a summary of a loaded automaton.

use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexSet;
use pda_cfg_core::{Automaton, Session};
use tracing::warn;

/// Load `file` and print its structure.
pub fn execute(session: &mut Session, file: &Path) -> Result<()> {
    let automaton = session
        .load(file)
        .with_context(|| format!("Failed to load automaton from {}", file.display()))?;

    print!("{}", summary(automaton));

    let unresolved = automaton.unresolved_states();
    if !unresolved.is_empty() {
        warn!(states = ?unresolved, "Automaton references undeclared states");
        println!();
        println!("⚠️  Undeclared states referenced: {}", unresolved.join(", "));
    }

    Ok(())
}

/// Human-readable description of an automaton.
pub fn summary(automaton: &Automaton) -> String {
    let mut lines = vec![
        "📊 Pushdown Automaton".to_string(),
        format!("{:─<50}", ""),
        format!("States:          {}", join(automaton.states())),
        format!("Initial state:   {}", automaton.initial_state()),
        format!("Final states:    {}", join(automaton.final_states())),
        format!("Input alphabet:  {}", join(automaton.input_alphabet())),
        format!("Stack alphabet:  {}", join(automaton.stack_alphabet())),
        format!("Tail symbol:     {}", automaton.tail_symbol()),
        String::new(),
        format!("Transitions ({}):", automaton.transitions().len()),
    ];

    for (index, transition) in automaton.transitions().iter().enumerate() {
        let marker = if transition.is_pop_only() || transition.is_push_two() {
            ""
        } else {
            "  ❌ stack write must be 0 or 2 symbols"
        };
        lines.push(format!("  #{:<3} {}{}", index, transition, marker));
    }

    lines.push(String::new());
    lines.push(format!(
        "Expected grammar rules: {}",
        automaton.expected_rule_count()
    ));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn join(set: &IndexSet<String>) -> String {
    if set.is_empty() {
        "(none)".to_string()
    } else {
        set.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}
