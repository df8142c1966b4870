use super::{Automaton, Transition};
use std::{borrow::Borrow, collections::HashSet, hash::Hash};

/// Simulation of an automaton over an input sequence.
///
/// The run keeps track of the frontier: the set of every state reachable
/// from the start state by consuming the symbols fed so far.
/// Once the frontier is empty the run is stuck and stays stuck.
pub struct Run<'a, S, A> {
	automaton: &'a Automaton<S, A>,
	frontier: HashSet<&'a S>,
	consumed: usize,
}

impl<'a, S: Eq + Hash, A: PartialEq> Run<'a, S, A> {
	pub(super) fn new(automaton: &'a Automaton<S, A>) -> Self {
		let mut frontier = HashSet::new();
		frontier.insert(automaton.start_state());

		Self {
			automaton,
			frontier,
			consumed: 0,
		}
	}

	/// Consumes the given symbol.
	///
	/// Returns `false` if the run is stuck afterward.
	pub fn feed(&mut self, symbol: &A) -> bool {
		self.consumed += 1;

		if !self.frontier.is_empty() {
			let frontier = &self.frontier;
			let next: HashSet<&'a S> = self
				.automaton
				.transitions
				.iter()
				.filter(|t| t.symbol() == symbol && frontier.contains(t.source()))
				.map(Transition::target)
				.collect();

			log::trace!(
				"frontier of {} state(s) after {} symbol(s)",
				next.len(),
				self.consumed
			);

			self.frontier = next;
		}

		!self.is_stuck()
	}

	/// Consumes every symbol of the input, stopping early when stuck.
	///
	/// Returns `false` if the run is stuck afterward.
	pub fn feed_all<I>(&mut self, input: I) -> bool
	where
		I: IntoIterator,
		I::Item: Borrow<A>,
	{
		for symbol in input {
			if !self.feed(symbol.borrow()) {
				log::debug!("automaton stuck after {} symbol(s)", self.consumed);
				return false;
			}
		}

		true
	}

	/// Number of symbols fed to this run.
	pub fn consumed(&self) -> usize {
		self.consumed
	}

	pub fn frontier(&self) -> impl Iterator<Item = &'a S> + '_ {
		self.frontier.iter().copied()
	}

	pub fn is_stuck(&self) -> bool {
		self.frontier.is_empty()
	}

	/// Checks if some state of the frontier is an end state.
	pub fn is_accepting(&self) -> bool {
		self.frontier
			.iter()
			.any(|q| self.automaton.is_end_state(q))
	}

	pub fn into_frontier(self) -> HashSet<&'a S> {
		self.frontier
	}
}
