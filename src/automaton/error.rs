use std::fmt;

/// Automaton construction error.
///
/// Every error is raised before the automaton is modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error<S> {
	/// A required argument is absent.
	InvalidArgument(&'static str),

	/// The state is already part of the automaton.
	DuplicateState(S),

	/// The state is not part of the automaton.
	UnknownState(S),
}

impl<S> Error<S> {
	/// Returns the state involved in the error, if any.
	pub fn state(&self) -> Option<&S> {
		match self {
			Error::InvalidArgument(_) => None,
			Error::DuplicateState(q) | Error::UnknownState(q) => Some(q),
		}
	}
}

impl<S: fmt::Display> fmt::Display for Error<S> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Error::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
			Error::DuplicateState(q) => write!(f, "state `{}` is already defined", q),
			Error::UnknownState(q) => write!(f, "unknown state `{}`", q),
		}
	}
}

impl<S: fmt::Debug + fmt::Display> std::error::Error for Error<S> {}
