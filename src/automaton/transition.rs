use std::fmt;

/// Labeled edge of an automaton.
///
/// Transitions are created and owned by their [`Automaton`](super::Automaton)
/// and only handed out by reference.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Transition<S, A> {
	source: S,
	symbol: A,
	target: S,
}

impl<S, A> Transition<S, A> {
	pub(super) fn new(source: S, symbol: A, target: S) -> Self {
		Self {
			source,
			symbol,
			target,
		}
	}

	pub fn source(&self) -> &S {
		&self.source
	}

	pub fn symbol(&self) -> &A {
		&self.symbol
	}

	pub fn target(&self) -> &S {
		&self.target
	}
}

impl<S: fmt::Display, A: fmt::Display> fmt::Display for Transition<S, A> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "δ({}, {}) = {}", self.source, self.symbol, self.target)
	}
}
