//! Integration tests for pda-cfg-core using in-memory automaton documents.

use pda_cfg_core::{
    render_rules, AutomatonLoader, DotStyle, GeneratorConfig, GrammarGenerator, PdaError,
    RuleBody, Session, StateOrder,
};
use tempfile::TempDir;

// ============================================================================
// Test Document Builder (isolated, no filesystem)
// ============================================================================

/// Builder for automaton XML documents.
#[derive(Default)]
struct TestDocumentBuilder {
    input: Vec<String>,
    stack: Vec<String>,
    tails: Vec<String>,
    states: Vec<String>,
    initial: String,
    finals: Vec<String>,
    transitions: Vec<[String; 5]>,
}

impl TestDocumentBuilder {
    fn new(initial: &str) -> Self {
        Self {
            initial: initial.to_string(),
            ..Default::default()
        }
    }

    fn input(mut self, letters: &[&str]) -> Self {
        self.input.extend(letters.iter().map(|s| s.to_string()));
        self
    }

    fn stack(mut self, letters: &[&str]) -> Self {
        self.stack.extend(letters.iter().map(|s| s.to_string()));
        self
    }

    fn tail(mut self, letter: &str) -> Self {
        self.tails.push(letter.to_string());
        self
    }

    fn states(mut self, names: &[&str]) -> Self {
        self.states.extend(names.iter().map(|s| s.to_string()));
        self
    }

    fn finals(mut self, names: &[&str]) -> Self {
        self.finals.extend(names.iter().map(|s| s.to_string()));
        self
    }

    fn transition(
        mut self,
        source: &str,
        destination: &str,
        input: &str,
        read: &str,
        write: &str,
    ) -> Self {
        self.transitions.push([
            source.to_string(),
            destination.to_string(),
            input.to_string(),
            read.to_string(),
            write.to_string(),
        ]);
        self
    }

    fn build(self) -> String {
        let mut xml = String::from("<?xml version=\"1.0\"?>\n<Automaton>\n  <Alphabets>\n");
        xml.push_str("    <Input_alphabets>\n");
        for letter in &self.input {
            xml.push_str(&format!("      <alphabet letter=\"{letter}\"/>\n"));
        }
        xml.push_str("    </Input_alphabets>\n    <Stack_alphabets>\n");
        for letter in &self.stack {
            xml.push_str(&format!("      <alphabet letter=\"{letter}\"/>\n"));
        }
        for letter in &self.tails {
            xml.push_str(&format!("      <tail letter=\"{letter}\"/>\n"));
        }
        xml.push_str("    </Stack_alphabets>\n  </Alphabets>\n  <States>\n");
        for name in &self.states {
            xml.push_str(&format!("    <state name=\"{name}\"/>\n"));
        }
        xml.push_str(&format!("    <initialState name=\"{}\"/>\n", self.initial));
        xml.push_str("    <FinalStates>\n");
        for name in &self.finals {
            xml.push_str(&format!("      <state name=\"{name}\"/>\n"));
        }
        xml.push_str("    </FinalStates>\n  </States>\n  <Transitions>\n");
        for [source, destination, input, read, write] in &self.transitions {
            xml.push_str(&format!(
                "    <transition source=\"{source}\" destination=\"{destination}\" input=\"{input}\" stackRead=\"{read}\" stackWrite=\"{write}\"/>\n"
            ));
        }
        xml.push_str("  </Transitions>\n</Automaton>\n");
        xml
    }
}

// ============================================================================
// Pre-built documents
// ============================================================================

fn pq(initial: &str) -> TestDocumentBuilder {
    TestDocumentBuilder::new(initial)
        .input(&["a", "b"])
        .stack(&["X", "Y"])
        .tail("Z")
        .states(&["p", "q"])
        .finals(&["q"])
}

/// Accepts a^n b^n by empty stack over three states.
fn anbn() -> String {
    TestDocumentBuilder::new("s")
        .input(&["a", "b"])
        .stack(&["A"])
        .tail("Z")
        .states(&["s", "t", "f"])
        .finals(&["f"])
        .transition("s", "s", "a", "Z", "AZ")
        .transition("s", "s", "a", "A", "AA")
        .transition("s", "t", "b", "A", "")
        .transition("t", "t", "b", "A", "")
        .transition("t", "f", "lambda", "Z", "")
        .build()
}

// ============================================================================
// Conversion scenarios
// ============================================================================

#[test]
fn test_single_pop_transition() {
    let doc = pq("p").transition("p", "q", "a", "X", "").build();
    let automaton = AutomatonLoader::load_str(&doc).unwrap();

    let rules = GrammarGenerator::new().generate(&automaton).unwrap();
    assert_eq!(render_rules(&rules), vec!["(pXq) → a"]);
}

#[test]
fn test_single_push_two_transition() {
    let doc = pq("p").transition("p", "q", "a", "X", "YZ").build();
    let automaton = AutomatonLoader::load_str(&doc).unwrap();

    let rendered = render_rules(&GrammarGenerator::new().generate(&automaton).unwrap());
    assert_eq!(rendered.len(), 4);
    for r in ["p", "q"] {
        for s in ["p", "q"] {
            let expected = format!("(pX{r}) → a(pY{s})({s}Z{r})");
            assert!(rendered.contains(&expected), "missing {expected}");
        }
    }
}

#[test]
fn test_rule_count_formula() {
    let automaton = AutomatonLoader::load_str(&anbn()).unwrap();
    let rules = GrammarGenerator::new().generate(&automaton).unwrap();

    // 3 pop-only + 2 push-two over 3 states
    assert_eq!(rules.len(), 3 + 2 * 9);
    assert_eq!(rules.len(), automaton.expected_rule_count());
}

#[test]
fn test_rules_grouped_by_transition_order() {
    let automaton = AutomatonLoader::load_str(&anbn()).unwrap();
    let rules = GrammarGenerator::new().generate(&automaton).unwrap();

    assert!(rules[..9].iter().all(|r| r.head.stack == "Z" && r.head.from == "s"));
    assert!(rules[9..18].iter().all(|r| r.head.stack == "A" && r.head.from == "s"));

    let tail: Vec<String> = rules[18..].iter().map(|r| r.to_string()).collect();
    assert_eq!(tail, vec!["(sAt) → b", "(tAt) → b", "(tZf) → λ"]);
}

#[test]
fn test_generate_is_idempotent() {
    let automaton = AutomatonLoader::load_str(&anbn()).unwrap();
    let generator = GrammarGenerator::new();

    let first = generator.generate(&automaton).unwrap();
    let second = generator.generate(&automaton).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_duplicates_are_kept() {
    let doc = pq("p")
        .transition("p", "q", "a", "X", "")
        .transition("p", "q", "a", "X", "")
        .build();
    let automaton = AutomatonLoader::load_str(&doc).unwrap();

    let rendered = render_rules(&GrammarGenerator::new().generate(&automaton).unwrap());
    assert_eq!(rendered, vec!["(pXq) → a", "(pXq) → a"]);
}

#[test]
fn test_lambda_rendering_per_case() {
    let doc = pq("p")
        .transition("p", "q", "", "X", "")
        .transition("p", "q", "lambda", "X", "YZ")
        .build();
    let automaton = AutomatonLoader::load_str(&doc).unwrap();
    let rendered = render_rules(&GrammarGenerator::new().generate(&automaton).unwrap());

    assert_eq!(rendered[0], "(pXq) → λ");
    assert_eq!(rendered[1], "(pXp) → (pYp)(pZp)");
}

#[test]
fn test_invalid_stack_write_yields_no_rules() {
    for write in ["Y", "XYZ"] {
        let doc = pq("p")
            .transition("p", "q", "a", "X", "")
            .transition("q", "q", "b", "X", write)
            .build();
        let automaton = AutomatonLoader::load_str(&doc).unwrap();

        match GrammarGenerator::new().generate(&automaton) {
            Err(PdaError::InvalidStackWrite {
                index,
                length,
                transition,
            }) => {
                assert_eq!(index, 1);
                assert_eq!(length, write.len());
                assert!(transition.starts_with("q →"));
            }
            other => panic!("expected invalid stack write, got {other:?}"),
        }
    }
}

#[test]
fn test_push_two_uses_initial_state_not_destination() {
    let doc = pq("q").transition("p", "p", "a", "X", "YY").build();
    let automaton = AutomatonLoader::load_str(&doc).unwrap();

    let rules = GrammarGenerator::new().generate(&automaton).unwrap();
    for rule in &rules {
        let RuleBody::Expand { first, .. } = &rule.body else {
            panic!("expected expansion, got {:?}", rule.body);
        };
        assert_eq!(first.from, "q");
    }
}

#[test]
fn test_sorted_state_order_changes_sequence_not_set() {
    let doc = TestDocumentBuilder::new("q")
        .tail("Z")
        .states(&["q", "p"])
        .transition("q", "p", "a", "Z", "ZZ")
        .build();
    let automaton = AutomatonLoader::load_str(&doc).unwrap();

    let declared = GrammarGenerator::new().generate(&automaton).unwrap();
    let sorted = GrammarGenerator::with_config(GeneratorConfig {
        state_order: StateOrder::Sorted,
    })
    .generate(&automaton)
    .unwrap();

    assert_ne!(declared, sorted);
    let mut a = render_rules(&declared);
    let mut b = render_rules(&sorted);
    a.sort();
    b.sort();
    assert_eq!(a, b);
}

// ============================================================================
// Loader invariants
// ============================================================================

#[test]
fn test_tail_symbol_count() {
    let none = TestDocumentBuilder::new("p").states(&["p"]).build();
    assert!(matches!(
        AutomatonLoader::load_str(&none),
        Err(PdaError::MissingTailSymbol)
    ));

    let two = TestDocumentBuilder::new("p")
        .states(&["p"])
        .tail("Z")
        .tail("W")
        .build();
    assert!(matches!(
        AutomatonLoader::load_str(&two),
        Err(PdaError::DuplicateTailSymbol { .. })
    ));

    let one = TestDocumentBuilder::new("p").states(&["p"]).tail("Z").build();
    assert!(AutomatonLoader::load_str(&one).is_ok());
}

#[test]
fn test_no_states_is_malformed() {
    let doc = TestDocumentBuilder::new("p").tail("Z").build();
    assert!(matches!(
        AutomatonLoader::load_str(&doc),
        Err(PdaError::MalformedInput { .. })
    ));
}

#[test]
fn test_unresolved_states_are_loaded_but_reported() {
    let doc = pq("start").transition("p", "nowhere", "a", "X", "").build();
    let automaton = AutomatonLoader::load_str(&doc).unwrap();

    assert_eq!(automaton.unresolved_states(), vec!["start", "nowhere"]);
}

#[test]
fn test_load_from_file() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let path = temp.path().join("anbn.xml");
    std::fs::write(&path, anbn())?;

    let automaton = AutomatonLoader::load(&path)?;
    assert_eq!(automaton.states().len(), 3);
    assert_eq!(automaton.transitions().len(), 5);
    Ok(())
}

// ============================================================================
// Session
// ============================================================================

#[test]
fn test_session_requires_loaded_automaton() {
    let mut session = Session::default();
    assert!(matches!(session.generate(), Err(PdaError::NoAutomatonLoaded)));
    assert!(matches!(
        session.graph_dot(&DotStyle::default()),
        Err(PdaError::NoAutomatonLoaded)
    ));
}

#[test]
fn test_session_load_generate_and_reload() {
    let mut session = Session::default();
    session.load_str(&anbn()).unwrap();
    assert_eq!(session.generate().unwrap().len(), 21);
    assert!(session.rules().is_some());

    let doc = pq("p").transition("p", "q", "a", "X", "").build();
    session.load_str(&doc).unwrap();
    assert!(session.rules().is_none(), "reload must drop stale rules");
    assert_eq!(session.generate().unwrap().len(), 1);
}

#[test]
fn test_session_failed_load_keeps_previous_automaton() {
    let mut session = Session::default();
    session.load_str(&anbn()).unwrap();

    let broken = TestDocumentBuilder::new("p").states(&["p"]).build();
    assert!(session.load_str(&broken).is_err());
    assert_eq!(session.automaton().unwrap().initial_state(), "s");
}

#[test]
fn test_session_exports() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let source = temp.path().join("machine.xml");
    let doc = pq("p").transition("p", "q", "a", "X", "").build();
    std::fs::write(&source, doc)?;

    let mut session = Session::new(GeneratorConfig::default());
    session.load(&source)?;
    assert_eq!(session.source(), Some(source.as_path()));

    let rules_path = temp.path().join("rules.txt");
    session.export_rules(&rules_path)?;
    assert_eq!(std::fs::read_to_string(&rules_path)?, "(pXq) → a\n");

    let dot_path = temp.path().join("machine.dot");
    session.export_dot(&dot_path, &DotStyle::default())?;
    let dot = std::fs::read_to_string(&dot_path)?;
    assert!(dot.contains("\"p\" -> \"q\" [label=\"a,X,λ\"];"));
    Ok(())
}

#[test]
fn test_rules_serialize_to_json() {
    let doc = pq("p").transition("p", "q", "lambda", "X", "").build();
    let automaton = AutomatonLoader::load_str(&doc).unwrap();
    let rules = GrammarGenerator::new().generate(&automaton).unwrap();

    let json = serde_json::to_value(&rules).unwrap();
    assert_eq!(json[0]["head"]["from"], "p");
    assert_eq!(json[0]["body"]["kind"], "terminal");
    assert_eq!(json[0]["body"]["terminal"], "lambda");
}
