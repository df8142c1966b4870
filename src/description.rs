//! Textual automaton descriptions.
//!
//! ```text
//! # words over {a, b} ending with `ab`
//! automaton ends_with_ab;
//! start q0;
//! state q1, q2;
//! end q2;
//! q0 -a-> q0;
//! q0 -b-> q0;
//! q0 -a-> q1;
//! q1 -b-> q2;
//! ```
//!
//! Statements are applied in order, so a state must be declared before it
//! is used. The start state is declared by the `start` statement.
//! Identifiers end at the first `-`, so `q0-a->q1;` is a valid transition.
use crate::automaton::{self, Automaton};
pub use source_span::{Loc, Span};
use source_span::Metrics;
use std::{fmt, io, iter::Peekable};

pub mod lexer;

pub use lexer::Lexer;
use lexer::{Keyword, Token};

/// Input symbol of a described automaton.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(pub char);

impl From<char> for Symbol {
	fn from(c: char) -> Symbol {
		Symbol(c)
	}
}

/// Writes the symbol the way it is written in a description.
impl fmt::Display for Symbol {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let c = self.0;
		match c {
			'\\' => write!(f, "\\\\"),
			'"' => write!(f, "\\\""),
			'\r' => write!(f, "\\r"),
			'\n' => write!(f, "\\n"),
			' ' => write!(f, "\\s"),
			'\t' => write!(f, "\\t"),
			_ if c.is_control() => {
				let d = c as u32;
				if d <= 0xff {
					write!(f, "\\x{:02x}", d)
				} else if d <= 0xffff {
					write!(f, "\\u{:04x}", d)
				} else {
					write!(f, "\\U{:08x}", d)
				}
			}
			_ => c.fmt(f),
		}
	}
}

pub enum Error {
	Lexer(lexer::Error),
	UnexpectedEos,
	UnexpectedToken(Token),

	/// The automaton is named twice. Holds the span of the first name.
	DuplicateName(Span),

	/// The start state is declared twice. Holds the span of the first
	/// declaration.
	DuplicateStart(Span),

	Automaton(automaton::Error<String>),
}

impl Error {
	pub fn format_notes(&self, fmt: &mut source_span::fmt::Formatter, style: source_span::fmt::Style) {
		match self {
			Error::DuplicateName(span) => fmt.add(*span, Some("first definition".to_string()), style),
			Error::DuplicateStart(span) => {
				fmt.add(*span, Some("first definition".to_string()), style)
			}
			_ => (),
		}
	}
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Error::Lexer(e) => write!(f, "{}", e),
			Error::UnexpectedEos => write!(f, "unexpected end of stream"),
			Error::UnexpectedToken(t) => write!(f, "unexpected token `{}`", t),
			Error::DuplicateName(_) => write!(f, "automaton is already named"),
			Error::DuplicateStart(_) => write!(f, "start state is already defined"),
			Error::Automaton(e) => e.fmt(f),
		}
	}
}

impl From<lexer::Error> for Error {
	fn from(e: lexer::Error) -> Error {
		Error::Lexer(e)
	}
}

pub type Result<T> = std::result::Result<T, Loc<Error>>;

pub enum Statement {
	/// `automaton NAME;`
	Name(Loc<String>),

	/// `start Q;`
	Start(Loc<String>),

	/// `state Q, ...;`
	States(Vec<Loc<String>>),

	/// `end Q, ...;`
	Ends(Vec<Loc<String>>),

	/// `SOURCE -c-> TARGET;`
	Transition(Loc<String>, Loc<Symbol>, Loc<String>),
}

/// Parsed automaton description.
pub struct Description {
	statements: Vec<Loc<Statement>>,
	span: Span,
}

fn append(span: &mut Span, other: Span) {
	if span.is_empty() {
		*span = other
	} else {
		span.append(other)
	}
}

fn consume<L: Iterator<Item = lexer::Result<Loc<Token>>>>(
	lexer: &mut Peekable<L>,
	span: &mut Span,
) -> Result<Option<Loc<Token>>> {
	match lexer.next() {
		Some(Ok(token)) => {
			append(span, token.span());
			Ok(Some(token))
		}
		Some(Err(e)) => Err(e.inner_into()),
		None => Ok(None),
	}
}

fn expect<L: Iterator<Item = lexer::Result<Loc<Token>>>>(
	lexer: &mut Peekable<L>,
	span: &mut Span,
) -> Result<Loc<Token>> {
	if let Some(token) = consume(lexer, span)? {
		Ok(token)
	} else {
		Err(Loc::new(Error::UnexpectedEos, span.end().into()))
	}
}

fn expect_ident<L: Iterator<Item = lexer::Result<Loc<Token>>>>(
	lexer: &mut Peekable<L>,
	span: &mut Span,
) -> Result<Loc<String>> {
	let (token, token_span) = expect(lexer, span)?.into_raw_parts();

	match token {
		Token::Ident(id) => Ok(Loc::new(id, token_span)),
		unexpected => Err(Loc::new(Error::UnexpectedToken(unexpected), token_span)),
	}
}

fn expect_edge<L: Iterator<Item = lexer::Result<Loc<Token>>>>(
	lexer: &mut Peekable<L>,
	span: &mut Span,
) -> Result<Loc<Symbol>> {
	let (token, token_span) = expect(lexer, span)?.into_raw_parts();

	match token {
		Token::Edge(symbol) => Ok(Loc::new(symbol, token_span)),
		unexpected => Err(Loc::new(Error::UnexpectedToken(unexpected), token_span)),
	}
}

/// Consumes one of the expected punctuation characters.
fn expect_punct<L: Iterator<Item = lexer::Result<Loc<Token>>>>(
	lexer: &mut Peekable<L>,
	span: &mut Span,
	expected: &[char],
) -> Result<char> {
	let (token, token_span) = expect(lexer, span)?.into_raw_parts();

	match token {
		Token::Punct(p) if expected.contains(&p) => Ok(p),
		unexpected => Err(Loc::new(Error::UnexpectedToken(unexpected), token_span)),
	}
}

/// Parses `Q, ...;`.
fn expect_ident_list<L: Iterator<Item = lexer::Result<Loc<Token>>>>(
	lexer: &mut Peekable<L>,
	span: &mut Span,
) -> Result<Vec<Loc<String>>> {
	let mut ids = Vec::new();

	loop {
		ids.push(expect_ident(lexer, span)?);

		if expect_punct(lexer, span, &[',', ';'])? == ';' {
			break Ok(ids);
		}
	}
}

impl Description {
	pub fn parse<L: Iterator<Item = lexer::Result<Loc<Token>>>>(
		lexer: &mut Peekable<L>,
	) -> Result<Self> {
		let mut span = Span::default();
		let mut statements = Vec::new();

		loop {
			let mut statement_span = Span::default();
			let (token, token_span) = match consume(lexer, &mut statement_span)? {
				Some(token) => token.into_raw_parts(),
				None => break,
			};

			let statement = match token {
				Token::Keyword(Keyword::Automaton) => {
					let id = expect_ident(lexer, &mut statement_span)?;
					expect_punct(lexer, &mut statement_span, &[';'])?;
					Statement::Name(id)
				}
				Token::Keyword(Keyword::Start) => {
					let id = expect_ident(lexer, &mut statement_span)?;
					expect_punct(lexer, &mut statement_span, &[';'])?;
					Statement::Start(id)
				}
				Token::Keyword(Keyword::State) => {
					Statement::States(expect_ident_list(lexer, &mut statement_span)?)
				}
				Token::Keyword(Keyword::End) => {
					Statement::Ends(expect_ident_list(lexer, &mut statement_span)?)
				}
				Token::Ident(source) => {
					let source = Loc::new(source, token_span);
					let symbol = expect_edge(lexer, &mut statement_span)?;
					let target = expect_ident(lexer, &mut statement_span)?;
					expect_punct(lexer, &mut statement_span, &[';'])?;
					Statement::Transition(source, symbol, target)
				}
				unexpected => return Err(Loc::new(Error::UnexpectedToken(unexpected), token_span)),
			};

			append(&mut span, statement_span);
			statements.push(Loc::new(statement, statement_span));
		}

		Ok(Description { statements, span })
	}

	pub fn statements(&self) -> &[Loc<Statement>] {
		&self.statements
	}

	pub fn span(&self) -> Span {
		self.span
	}

	/// Builds the described automaton.
	pub fn compile(&self) -> Result<Automaton<String, Symbol>> {
		let mut name: Option<&Loc<String>> = None;
		let mut start: Option<&Loc<String>> = None;

		for statement in &self.statements {
			match statement.as_ref() {
				Statement::Name(id) => match name {
					Some(first) => return Err(Loc::new(Error::DuplicateName(first.span()), id.span())),
					None => name = Some(id),
				},
				Statement::Start(id) => match start {
					Some(first) => return Err(Loc::new(Error::DuplicateStart(first.span()), id.span())),
					None => start = Some(id),
				},
				_ => (),
			}
		}

		let start_state = start.map(|id| id.as_ref().clone());
		let mut automaton = Automaton::try_new(start_state)
			.map_err(|e| Loc::new(Error::Automaton(e), self.span.end().into()))?;

		if let Some(name) = name {
			automaton.set_symbolic_name(name.as_ref().clone())
		}

		for statement in &self.statements {
			match statement.as_ref() {
				Statement::Name(_) | Statement::Start(_) => (),
				Statement::States(ids) => {
					for id in ids {
						automaton
							.add_state(id.as_ref().clone())
							.map_err(|e| Loc::new(Error::Automaton(e), id.span()))?
					}
				}
				Statement::Ends(ids) => {
					for id in ids {
						automaton
							.set_end_state(id.as_ref().clone())
							.map_err(|e| Loc::new(Error::Automaton(e), id.span()))?
					}
				}
				Statement::Transition(source, symbol, target) => automaton
					.add_transition(
						source.as_ref().clone(),
						*symbol.as_ref(),
						target.as_ref().clone(),
					)
					.map_err(|e| {
						let span = if e.state() == Some(source.as_ref()) {
							source.span()
						} else {
							target.span()
						};

						Loc::new(Error::Automaton(e), span)
					})?,
			}
		}

		log::debug!(
			"compiled automaton with {} states and {} transitions",
			automaton.states().count(),
			automaton.transitions().len()
		);

		Ok(automaton)
	}
}

/// Parses and compiles an automaton description.
pub fn load<I: Iterator<Item = io::Result<char>>, M: Metrics>(
	input: I,
	metrics: M,
) -> Result<Automaton<String, Symbol>> {
	let mut lexer = Lexer::new(input, metrics).peekable();
	Description::parse(&mut lexer)?.compile()
}
