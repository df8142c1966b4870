#[macro_use]
extern crate clap;

use source_span::{
	fmt::{Formatter, Style},
	Position,
};
use std::{
	fs::File,
	io::{self, BufReader, Read, Write},
};
use utf8_decode::UnsafeDecoder;
use yansi::Paint;

use nfa::{description, Automaton, Symbol};

enum Error {
	UnknownCommand(String),
	IO(io::Error),
	InvalidSymbol(String),
	Rejected(usize),
}

impl From<io::Error> for Error {
	fn from(e: io::Error) -> Self {
		Self::IO(e)
	}
}

fn main() -> io::Result<()> {
	// Parse options.
	let yaml = load_yaml!("nfa.yml");
	let matches = clap::App::from_yaml(yaml).get_matches();

	// Init logger.
	let verbosity = matches.occurrences_of("verbose") as usize;
	stderrlog::new().verbosity(verbosity).init().unwrap();

	let filename = matches.value_of("FILE").unwrap();

	let file = File::open(filename)?;
	let input = BufReader::new(file);

	let metrics = source_span::DefaultMetrics::with_tab_stop(4);
	let utf8_input = UnsafeDecoder::new(input.bytes());
	let buffer = source_span::SourceBuffer::new(utf8_input, Position::default(), metrics);

	log::info!("reading automaton description...");
	match description::load(buffer.iter(), metrics) {
		Ok(automaton) => {
			log::info!(
				"automaton `{}` is ready.",
				automaton.symbolic_name().unwrap_or(filename)
			);

			if let Err(e) = run_subcommand(&matches, &automaton) {
				match e {
					Error::UnknownCommand(name) => eprintln!("unknown command `{}`", name),
					Error::IO(e) => eprintln!("{}", e),
					Error::InvalidSymbol(s) => eprintln!("invalid symbol `{}`, expected a single character", s),
					Error::Rejected(count) => log::info!("{} word(s) rejected", count),
				}

				std::process::exit(1)
			}
		}
		Err(e) => {
			let mut fmt = Formatter::new();
			fmt.add(e.span(), Some(format!("{}", e)), Style::Error);
			e.format_notes(&mut fmt, Style::Note);
			let formatted = fmt.render(buffer.iter(), buffer.span(), &metrics)?;
			eprintln!("{}", formatted);
			std::process::exit(1)
		}
	}

	Ok(())
}

fn run_subcommand(matches: &clap::ArgMatches, automaton: &Automaton<String, Symbol>) -> Result<(), Error> {
	let stdout = io::stdout();
	let mut out = stdout.lock();

	match matches.subcommand() {
		("accept", Some(m)) => {
			let mut rejected = 0;

			for word in m.values_of("WORD").into_iter().flatten() {
				if automaton.accept(word.chars().map(Symbol)) {
					write!(out, "{} {}\n", Paint::green("accepted").bold(), word)?
				} else {
					rejected += 1;
					write!(out, "{} {}\n", Paint::red("rejected").bold(), word)?
				}
			}

			if rejected > 0 {
				Err(Error::Rejected(rejected))
			} else {
				Ok(())
			}
		}
		("dot", Some(_m)) => {
			automaton.dot_write(&mut out)?;
			write!(out, "\n")?;
			Ok(())
		}
		("show", Some(_m)) => {
			write!(out, "{}", automaton)?;
			Ok(())
		}
		("transitions", Some(m)) => {
			let state = m.value_of("STATE").unwrap().to_string();

			if !automaton.contains_state(&state) {
				log::warn!("no state `{}` found!", state)
			}

			match m.value_of("SYMBOL") {
				Some(s) => {
					let symbol = parse_symbol(s)?;
					for t in automaton.transitions_on(&state, &symbol) {
						write!(out, "{}\n", t)?
					}
				}
				None => {
					for t in automaton.transitions_from(&state) {
						write!(out, "{}\n", t)?
					}
				}
			}

			Ok(())
		}
		(name, _) => Err(Error::UnknownCommand(name.to_string())),
	}
}

fn parse_symbol(s: &str) -> Result<Symbol, Error> {
	let mut chars = s.chars();
	match (chars.next(), chars.next()) {
		(Some(c), None) => Ok(Symbol(c)),
		_ => Err(Error::InvalidSymbol(s.to_string())),
	}
}
