use nfa::{Automaton, Transition};

fn automaton() -> Automaton<u32, char> {
	let mut automaton = Automaton::new(0);
	for q in 1..4 {
		automaton.add_state(q).unwrap();
	}

	automaton.add_transition(0, 'a', 1).unwrap();
	automaton.add_transition(1, 'a', 2).unwrap();
	automaton.add_transition(0, 'b', 2).unwrap();
	automaton.add_transition(0, 'a', 3).unwrap();
	automaton.add_transition(2, 'c', 0).unwrap();
	automaton
}

fn edges<'a, I: Iterator<Item = &'a Transition<u32, char>>>(transitions: I) -> Vec<(u32, char, u32)> {
	transitions
		.map(|t| (*t.source(), *t.symbol(), *t.target()))
		.collect()
}

#[test]
fn transitions_from_keep_insertion_order() {
	let automaton = automaton();

	assert_eq!(
		edges(automaton.transitions_from(&0)),
		vec![(0, 'a', 1), (0, 'b', 2), (0, 'a', 3)]
	);
	assert_eq!(edges(automaton.transitions_from(&2)), vec![(2, 'c', 0)]);
}

#[test]
fn transitions_on_filter_by_symbol() {
	let automaton = automaton();

	assert_eq!(
		edges(automaton.transitions_on(&0, &'a')),
		vec![(0, 'a', 1), (0, 'a', 3)]
	);
	assert_eq!(edges(automaton.transitions_on(&0, &'b')), vec![(0, 'b', 2)]);
}

#[test]
fn missing_transitions_are_empty() {
	let automaton = automaton();

	assert_eq!(automaton.transitions_from(&3).count(), 0);
	assert_eq!(automaton.transitions_from(&42).count(), 0);
	assert_eq!(automaton.transitions_on(&1, &'z').count(), 0);
}

#[test]
fn lookups_are_repeatable() {
	let automaton = automaton();

	let first = edges(automaton.transitions_on(&0, &'a'));
	let second = edges(automaton.transitions_on(&0, &'a'));
	assert_eq!(first, second);

	let first = edges(automaton.transitions_from(&0));
	let second = edges(automaton.transitions_from(&0));
	assert_eq!(first, second);
}

#[test]
fn added_transitions_are_visible() {
	let mut automaton = automaton();
	assert_eq!(automaton.transitions_from(&3).count(), 0);

	automaton.add_transition(3, 'd', 3).unwrap();
	assert_eq!(edges(automaton.transitions_from(&3)), vec![(3, 'd', 3)]);
}

#[test]
fn alphabet_in_order_of_first_use() {
	let automaton = automaton();

	assert_eq!(automaton.alphabet().copied().collect::<Vec<_>>(), vec!['a', 'b', 'c']);
}

#[test]
fn transition_display() {
	let automaton = automaton();
	let t = automaton.transitions_from(&2).next().unwrap();

	assert_eq!(t.to_string(), "δ(2, c) = 0");
}
