use nfa::{
	automaton,
	description::{self, Error},
	Automaton, Symbol,
};
use source_span::DefaultMetrics;

const ENDS_WITH_AB: &str = "
# words over {a, b} ending with `ab`
automaton ends_with_ab;
start q0;
state q1, q2;
end q2;
q0 -a-> q0;
q0 -b-> q0;
q0 -a-> q1;
q1 -b-> q2;
";

fn load(input: &str) -> description::Result<Automaton<String, Symbol>> {
	description::load(input.chars().map(Ok), DefaultMetrics::with_tab_stop(4))
}

fn symbols(word: &str) -> Vec<Symbol> {
	word.chars().map(Symbol).collect()
}

#[test]
fn ends_with_ab() {
	let automaton = match load(ENDS_WITH_AB) {
		Ok(automaton) => automaton,
		Err(e) => panic!("invalid description: {}", e),
	};

	assert_eq!(automaton.symbolic_name(), Some("ends_with_ab"));
	assert_eq!(automaton.start_state(), "q0");
	assert_eq!(automaton.states().count(), 3);
	assert!(automaton.is_end_state(&"q2".to_string()));
	assert_eq!(automaton.transitions().len(), 4);

	assert!(automaton.accept(symbols("ab")));
	assert!(automaton.accept(symbols("babab")));
	assert!(!automaton.accept(symbols("")));
	assert!(!automaton.accept(symbols("aba")));
	assert!(!automaton.accept(symbols("abc")));
}

#[test]
fn escaped_symbols() {
	let automaton = match load("start a; state b; end b; a -\\s-> a; a -\\x41-> b; a ---> b;") {
		Ok(automaton) => automaton,
		Err(e) => panic!("invalid description: {}", e),
	};

	assert!(automaton.accept(symbols("  A")));
	assert!(automaton.accept(symbols("-")));
	assert!(!automaton.accept(symbols("a")));

	let labels: Vec<String> = automaton
		.transitions()
		.iter()
		.map(|t| t.to_string())
		.collect();
	assert_eq!(labels, vec!["δ(a, \\s) = a", "δ(a, A) = b", "δ(a, -) = b"]);
}

#[test]
fn missing_start_state() {
	match load("state q1;") {
		Err(e) => match e.as_ref() {
			Error::Automaton(automaton::Error::InvalidArgument(_)) => (),
			other => panic!("unexpected error: {}", other),
		},
		Ok(_) => panic!("description without start state"),
	}
}

#[test]
fn duplicate_start_state() {
	match load("start q0; start q1;") {
		Err(e) => match e.as_ref() {
			Error::DuplicateStart(_) => (),
			other => panic!("unexpected error: {}", other),
		},
		Ok(_) => panic!("description with two start states"),
	}
}

#[test]
fn states_must_be_declared_before_use() {
	match load("start q0; q0 -a-> q1; state q1;") {
		Err(e) => match e.as_ref() {
			Error::Automaton(automaton::Error::UnknownState(q)) => assert_eq!(q, "q1"),
			other => panic!("unexpected error: {}", other),
		},
		Ok(_) => panic!("transition to an undeclared state"),
	}

	match load("start q0; end q1;") {
		Err(e) => match e.as_ref() {
			Error::Automaton(automaton::Error::UnknownState(q)) => assert_eq!(q, "q1"),
			other => panic!("unexpected error: {}", other),
		},
		Ok(_) => panic!("undeclared end state"),
	}
}

#[test]
fn duplicate_state() {
	match load("start q0; state q1, q0;") {
		Err(e) => match e.as_ref() {
			Error::Automaton(automaton::Error::DuplicateState(q)) => assert_eq!(q, "q0"),
			other => panic!("unexpected error: {}", other),
		},
		Ok(_) => panic!("state declared twice"),
	}
}

#[test]
fn syntax_errors() {
	match load("start q0") {
		Err(e) => match e.as_ref() {
			Error::UnexpectedEos => (),
			other => panic!("unexpected error: {}", other),
		},
		Ok(_) => panic!("missing terminator"),
	}

	match load("start q0; q0 q0;") {
		Err(e) => match e.as_ref() {
			Error::UnexpectedToken(_) => (),
			other => panic!("unexpected error: {}", other),
		},
		Ok(_) => panic!("missing edge"),
	}

	match load("start q0; q0 -a- q0;") {
		Err(e) => match e.as_ref() {
			Error::Lexer(description::lexer::Error::IncompleteEdge) => (),
			other => panic!("unexpected error: {}", other),
		},
		Ok(_) => panic!("malformed edge"),
	}
}

#[test]
fn symbol_display() {
	assert_eq!(Symbol('a').to_string(), "a");
	assert_eq!(Symbol(' ').to_string(), "\\s");
	assert_eq!(Symbol('\n').to_string(), "\\n");
	assert_eq!(Symbol('"').to_string(), "\\\"");
	assert_eq!(Symbol('\u{7f}').to_string(), "\\x7f");
}

#[test]
fn duplicate_name() {
	match load("automaton a; automaton b; start q;") {
		Err(e) => match e.as_ref() {
			Error::DuplicateName(first) => {
				assert!(!first.is_empty());
				assert_ne!(*first, e.span());

				let mut fmt = source_span::fmt::Formatter::new();
				e.format_notes(&mut fmt, source_span::fmt::Style::Note);
			}
			other => panic!("unexpected error: {}", other),
		},
		Ok(_) => panic!("automaton named twice"),
	}
}

#[test]
fn invalid_escapes() {
	for input in &["start q; q -\\xZZ-> q;", "start q; q -\\uD800-> q;"] {
		match load(input) {
			Err(e) => match e.as_ref() {
				Error::Lexer(description::lexer::Error::InvalidChar) => (),
				other => panic!("unexpected error for `{}`: {}", input, other),
			},
			Ok(_) => panic!("invalid escape accepted in `{}`", input),
		}
	}
}

#[test]
fn edges_without_surrounding_spaces() {
	let automaton = match load("start q0; state q1; end q1; q0-a->q1;") {
		Ok(automaton) => automaton,
		Err(e) => panic!("invalid description: {}", e),
	};

	assert_eq!(automaton.transitions().len(), 1);
	assert!(automaton.accept(symbols("a")));
}
