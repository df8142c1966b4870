use super::Symbol;
use source_span::{Loc, Metrics, Span};
use std::convert::TryFrom;
use std::fmt;
use std::io;
use std::iter::Peekable;

pub enum Error {
	IO(std::io::Error),
	InvalidChar,
	IncompleteEdge,
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		use self::Error::*;
		match self {
			IO(e) => write!(f, "I/O: {}", e),
			InvalidChar => write!(f, "invalid char"),
			IncompleteEdge => write!(f, "incomplete edge, expected `-c->`"),
		}
	}
}

pub type Result<T> = std::result::Result<T, Loc<Error>>;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
	Automaton,
	Start,
	State,
	End,
}

impl fmt::Display for Keyword {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		use self::Keyword::*;
		match self {
			Automaton => write!(f, "automaton"),
			Start => write!(f, "start"),
			State => write!(f, "state"),
			End => write!(f, "end"),
		}
	}
}

#[derive(Clone, PartialEq, Eq)]
pub enum Token {
	Keyword(Keyword),
	Punct(char),
	Ident(String),

	/// Labeled edge `-c->`.
	Edge(Symbol),
}

impl fmt::Display for Token {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		use self::Token::*;
		match self {
			Keyword(k) => k.fmt(f),
			Punct(p) => p.fmt(f),
			Ident(s) => s.fmt(f),
			Edge(symbol) => write!(f, "-{}->", symbol),
		}
	}
}

fn is_space(c: char) -> bool {
	c.is_whitespace() || c.is_control()
}

fn is_punct(c: char) -> bool {
	c == ';' || c == ','
}

fn is_separator(c: char) -> bool {
	is_space(c) || is_punct(c) || c == '#' || c == '-'
}

pub struct Lexer<I: Iterator<Item = io::Result<char>>, M: Metrics> {
	input: Peekable<I>,
	metrics: M,
	span: Span,
}

impl<I: Iterator<Item = io::Result<char>>, M: Metrics> Lexer<I, M> {
	pub fn new(input: I, metrics: M) -> Lexer<I, M> {
		Lexer {
			input: input.peekable(),
			metrics,
			span: Span::default(),
		}
	}

	fn peek(&mut self) -> Result<Option<char>> {
		match self.input.peek() {
			Some(Ok(c)) => Ok(Some(*c)),
			Some(Err(_)) => self.consume(),
			None => Ok(None),
		}
	}

	fn consume(&mut self) -> Result<Option<char>> {
		match self.input.next() {
			Some(Ok(c)) => {
				self.span.push(c, &self.metrics);
				Ok(Some(c))
			}
			Some(Err(e)) => Err(Loc::new(Error::IO(e), self.span.end().into())),
			None => Ok(None),
		}
	}

	fn expect(&mut self) -> Result<char> {
		match self.consume()? {
			Some(c) => Ok(c),
			None => Err(Loc::new(Error::IncompleteEdge, self.span)),
		}
	}

	fn parse_hex_char(&mut self, n: usize) -> Result<char> {
		let mut codepoint = 0;

		for _ in 0..n {
			let c = self.expect()?;
			if let Some(d) = c.to_digit(16) {
				codepoint = (codepoint << 4) | d
			} else {
				return Err(Loc::new(Error::InvalidChar, self.span));
			}
		}

		match char::try_from(codepoint) {
			Ok(c) => Ok(c),
			Err(_) => Err(Loc::new(Error::InvalidChar, self.span)),
		}
	}

	fn parse_symbol(&mut self) -> Result<char> {
		match self.expect()? {
			'\\' => match self.expect()? {
				'r' => Ok('\r'),
				'n' => Ok('\n'),
				's' => Ok(' '),
				't' => Ok('\t'),
				'x' => self.parse_hex_char(2),
				'u' => self.parse_hex_char(4),
				'U' => self.parse_hex_char(8),
				c => Ok(c),
			},
			c => Ok(c),
		}
	}

	fn parse_edge(&mut self) -> Result<Loc<Token>> {
		self.consume()?;
		let symbol = self.parse_symbol()?;

		if self.expect()? != '-' || self.expect()? != '>' {
			return Err(Loc::new(Error::IncompleteEdge, self.span));
		}

		Ok(Loc::new(Token::Edge(Symbol(symbol)), self.span))
	}

	fn parse_ident(&mut self) -> Result<Loc<Token>> {
		let mut id = String::new();

		while let Some(c) = self.peek()? {
			if is_separator(c) {
				break;
			}

			self.consume()?;
			id.push(c);
		}

		match id.as_ref() {
			"automaton" => Ok(Loc::new(Token::Keyword(Keyword::Automaton), self.span)),
			"start" => Ok(Loc::new(Token::Keyword(Keyword::Start), self.span)),
			"state" => Ok(Loc::new(Token::Keyword(Keyword::State), self.span)),
			"end" => Ok(Loc::new(Token::Keyword(Keyword::End), self.span)),
			_ => Ok(Loc::new(Token::Ident(id), self.span)),
		}
	}

	fn skip_whitespaces(&mut self) -> Result<()> {
		loop {
			match self.peek()? {
				Some(c) if is_space(c) => {
					self.consume()?;
				}
				Some('#') => loop {
					match self.consume()? {
						Some('\n') => break,
						None => break,
						_ => (),
					}
				},
				_ => break,
			}
		}

		Ok(())
	}

	fn parse_token(&mut self) -> Result<Option<Loc<Token>>> {
		self.skip_whitespaces()?;
		self.span.clear();

		match self.peek()? {
			Some('-') => Ok(Some(self.parse_edge()?)),
			Some(c) if is_punct(c) => {
				self.consume()?;
				Ok(Some(Loc::new(Token::Punct(c), self.span)))
			}
			Some(_) => Ok(Some(self.parse_ident()?)),
			None => Ok(None),
		}
	}
}

impl<I: Iterator<Item = io::Result<char>>, M: Metrics> Iterator for Lexer<I, M> {
	type Item = Result<Loc<Token>>;

	fn next(&mut self) -> Option<Result<Loc<Token>>> {
		self.parse_token().transpose()
	}
}
