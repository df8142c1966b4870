//! Non deterministic finite automata.
//!
//! An [`Automaton`] is built by adding states and labeled transitions to a
//! start state, then queried with [`Automaton::accept`].
//! The [`description`] module reads automata from a small textual format.
extern crate source_span;

pub mod automaton;
pub mod description;

pub use automaton::{Automaton, Error, Run, Transition};
pub use description::Symbol;
