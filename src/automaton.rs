use itertools::Itertools;
use std::{
	borrow::Borrow,
	collections::HashSet,
	fmt,
	hash::Hash,
	io,
};

mod error;
mod run;
mod transition;

pub use error::Error;
pub use run::Run;
pub use transition::Transition;

/// Non deterministic finite automaton.
///
/// States are identified by values of type `S` and input symbols by values
/// of type `A`. The automaton only grows: states, transitions and end state
/// markings are never removed.
#[derive(Clone, Debug)]
pub struct Automaton<S, A> {
	/// Start state, always a member of `states`.
	start_state: S,

	/// States.
	states: HashSet<S>,

	/// Accepting states, subset of `states`.
	end_states: HashSet<S>,

	/// Transitions, in insertion order.
	transitions: Vec<Transition<S, A>>,

	/// Display label.
	symbolic_name: Option<String>,
}

impl<S: Clone + Eq + Hash, A> Automaton<S, A> {
	/// Create a new automaton with the given start state as its only state.
	pub fn new(start_state: S) -> Self {
		let mut states = HashSet::new();
		states.insert(start_state.clone());

		Self {
			start_state,
			states,
			end_states: HashSet::new(),
			transitions: Vec::new(),
			symbolic_name: None,
		}
	}

	/// Create a new automaton from an optional start state.
	///
	/// Fails with [`Error::InvalidArgument`] if no start state is given.
	pub fn try_new(start_state: Option<S>) -> Result<Self, Error<S>> {
		match start_state {
			Some(q) => Ok(Self::new(q)),
			None => Err(Error::InvalidArgument("start state cannot be absent")),
		}
	}
}

impl<S: Eq + Hash, A> Automaton<S, A> {
	pub fn start_state(&self) -> &S {
		&self.start_state
	}

	pub fn symbolic_name(&self) -> Option<&str> {
		self.symbolic_name.as_deref()
	}

	pub fn set_symbolic_name<N: Into<String>>(&mut self, name: N) {
		self.symbolic_name = Some(name.into())
	}

	pub fn states(&self) -> impl Iterator<Item = &S> {
		self.states.iter()
	}

	pub fn end_states(&self) -> impl Iterator<Item = &S> {
		self.end_states.iter()
	}

	/// Transitions, in insertion order.
	pub fn transitions(&self) -> &[Transition<S, A>] {
		&self.transitions
	}

	pub fn contains_state(&self, q: &S) -> bool {
		self.states.contains(q)
	}

	pub fn is_end_state(&self, q: &S) -> bool {
		self.end_states.contains(q)
	}

	/// Add a new state.
	///
	/// Fails with [`Error::DuplicateState`] if the state already exists.
	pub fn add_state(&mut self, q: S) -> Result<(), Error<S>> {
		if self.states.contains(&q) {
			return Err(Error::DuplicateState(q));
		}

		self.states.insert(q);
		log::trace!("added state #{}", self.states.len());
		Ok(())
	}

	/// Mark an existing state as accepting.
	///
	/// Marking a state twice has no effect.
	/// Fails with [`Error::UnknownState`] if the state does not exist.
	pub fn set_end_state(&mut self, q: S) -> Result<(), Error<S>> {
		if !self.states.contains(&q) {
			return Err(Error::UnknownState(q));
		}

		self.end_states.insert(q);
		Ok(())
	}

	/// Add a transition between two existing states.
	///
	/// Any number of transitions may leave the same state on the same symbol.
	/// Fails with [`Error::UnknownState`] on the first endpoint (source, then
	/// target) that does not exist.
	pub fn add_transition(&mut self, source: S, symbol: A, target: S) -> Result<(), Error<S>> {
		if !self.states.contains(&source) {
			return Err(Error::UnknownState(source));
		}

		if !self.states.contains(&target) {
			return Err(Error::UnknownState(target));
		}

		self.transitions.push(Transition::new(source, symbol, target));
		log::trace!("added transition #{}", self.transitions.len());
		Ok(())
	}

	/// Transitions leaving the given state, in insertion order.
	pub fn transitions_from<'a, 'q>(&'a self, q: &'q S) -> TransitionsFrom<'a, 'q, S, A> {
		TransitionsFrom::new(&self.transitions, q)
	}

	/// Transitions leaving the given state on the given symbol, in insertion
	/// order.
	pub fn transitions_on<'a, 'q>(&'a self, q: &'q S, symbol: &'q A) -> TransitionsOn<'a, 'q, S, A>
	where
		A: PartialEq,
	{
		TransitionsOn::new(&self.transitions, q, symbol)
	}

	/// Distinct symbols labeling the transitions, in order of first use.
	pub fn alphabet(&self) -> impl Iterator<Item = &A>
	where
		A: Eq + Hash,
	{
		self.transitions.iter().map(Transition::symbol).unique()
	}

	/// Start a new run from the start state.
	pub fn run(&self) -> Run<'_, S, A>
	where
		A: PartialEq,
	{
		Run::new(self)
	}

	/// Returns the set of states reached after consuming the whole input.
	pub fn simulate<I>(&self, input: I) -> HashSet<&S>
	where
		A: PartialEq,
		I: IntoIterator,
		I::Item: Borrow<A>,
	{
		let mut run = self.run();
		run.feed_all(input);
		run.into_frontier()
	}

	/// Checks if the automaton accepts the given input sequence.
	///
	/// The input is accepted if some end state is reachable from the start
	/// state by consuming every symbol of the input.
	pub fn accept<I>(&self, input: I) -> bool
	where
		A: PartialEq,
		I: IntoIterator,
		I::Item: Borrow<A>,
	{
		let mut run = self.run();
		run.feed_all(input) && run.is_accepting()
	}

	/// Writes the automaton in the Graphviz dot format.
	///
	/// States are written sorted by their display text.
	pub fn dot_write<W: io::Write>(&self, f: &mut W) -> io::Result<()>
	where
		S: fmt::Display,
		A: fmt::Display,
	{
		write!(f, "digraph {{\n")?;

		if let Some(name) = &self.symbolic_name {
			write!(f, "\tlabel=\"{}\"\n", name)?;
		}

		write!(f, "\t__start [ shape=point ]\n")?;
		write!(f, "\t__start -> \"{}\"\n", self.start_state)?;

		for (name, is_end) in self.states.iter().map(|q| (q.to_string(), self.is_end_state(q))).sorted() {
			if is_end {
				write!(f, "\t\"{}\" [ shape=doublecircle ]\n", name)?
			} else {
				write!(f, "\t\"{}\" [ shape=circle ]\n", name)?
			}
		}

		for t in &self.transitions {
			write!(
				f,
				"\t\"{}\" -> \"{}\" [ label=\"{}\" ]\n",
				t.source(),
				t.target(),
				t.symbol()
			)?
		}

		write!(f, "}}")
	}
}

/// End states are listed sorted by their display text.
impl<S: fmt::Display, A: fmt::Display> fmt::Display for Automaton<S, A> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		if let Some(name) = &self.symbolic_name {
			writeln!(f, "automaton {}", name)?;
		}

		writeln!(f, "start: {}", self.start_state)?;
		writeln!(f, "end: {}", self.end_states.iter().map(ToString::to_string).sorted().format(", "))?;

		for t in &self.transitions {
			writeln!(f, "{}", t)?;
		}

		Ok(())
	}
}

pub struct TransitionsFrom<'a, 'q, S, A> {
	inner: std::slice::Iter<'a, Transition<S, A>>,
	source: &'q S,
}

impl<'a, 'q, S, A> TransitionsFrom<'a, 'q, S, A> {
	fn new(transitions: &'a [Transition<S, A>], source: &'q S) -> Self {
		Self {
			inner: transitions.iter(),
			source,
		}
	}
}

impl<'a, 'q, S: PartialEq, A> Iterator for TransitionsFrom<'a, 'q, S, A> {
	type Item = &'a Transition<S, A>;

	fn next(&mut self) -> Option<Self::Item> {
		let source = self.source;
		self.inner.find(|t| t.source() == source)
	}
}

pub struct TransitionsOn<'a, 'q, S, A> {
	inner: TransitionsFrom<'a, 'q, S, A>,
	symbol: &'q A,
}

impl<'a, 'q, S, A> TransitionsOn<'a, 'q, S, A> {
	fn new(transitions: &'a [Transition<S, A>], source: &'q S, symbol: &'q A) -> Self {
		Self {
			inner: TransitionsFrom::new(transitions, source),
			symbol,
		}
	}
}

impl<'a, 'q, S: PartialEq, A: PartialEq> Iterator for TransitionsOn<'a, 'q, S, A> {
	type Item = &'a Transition<S, A>;

	fn next(&mut self) -> Option<Self::Item> {
		let symbol = self.symbol;
		self.inner.find(|t| t.symbol() == symbol)
	}
}
