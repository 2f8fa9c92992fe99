//! Program Parser
//!
//! Turns a line-oriented machine-control program into a [`Program`] of typed
//! line records. Each line is classified on its own; no state carries over
//! from one line to the next.

pub mod ast;
pub mod dialect;
pub mod error;
pub mod lexer;
pub mod number;
pub mod options;

use std::io::BufRead;

pub use ast::{Code, CodeLine, ControlLine, Directive, Line, LineKind, Parameter};
pub use dialect::{Dialect, GenericDialect};
pub use error::{FieldError, ParseError};
pub use lexer::tokenize_line;
pub use number::{NumberType, classify_number};
pub use options::{MalformedNumberPolicy, ParseOptions};

use crate::program::Program;

/// Line-by-line driver around a [`Dialect`]
#[derive(Debug, Clone, Default)]
pub struct Parser<D = GenericDialect> {
    dialect: D,
    options: ParseOptions,
}

impl Parser<GenericDialect> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<D: Dialect> Parser<D> {
    pub fn with_dialect(dialect: D) -> Self {
        Self {
            dialect,
            options: ParseOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn dialect(&self) -> &D {
        &self.dialect
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }

    /// Parse a single line that sits at position `index` in its program
    pub fn parse_line(&self, line: &str, index: usize) -> Result<Line, ParseError> {
        let kind = match self.dialect.classify_line(line) {
            Ok(kind) => kind,
            Err(source) => match self.options.malformed_numbers {
                MalformedNumberPolicy::Abort => {
                    return Err(ParseError::Malformed {
                        line: index,
                        source,
                    });
                }
                MalformedNumberPolicy::Demote => {
                    log::warn!("line {}: {}; keeping it as unrecognized text", index, source);
                    self.dialect.make_unrecognized(line)
                }
            },
        };

        log::trace!("line {}: {:?}", index, kind);
        Ok(Line::new(index, line, kind))
    }

    /// Read `reader` to the end and collect every line
    ///
    /// The reader is only borrowed for the duration of the call; pass
    /// `&mut reader` to keep using it afterwards. The first fatal error
    /// aborts the parse and no partial program is returned.
    pub fn parse<R: BufRead>(&self, reader: R) -> Result<Program, ParseError> {
        let program = self.lines(reader).collect::<Result<Program, _>>()?;
        log::debug!("parsed {} lines", program.len());
        Ok(program)
    }

    /// Parse an in-memory program text
    pub fn parse_str(&self, text: &str) -> Result<Program, ParseError> {
        let program = text
            .lines()
            .enumerate()
            .map(|(index, line)| self.parse_line(line, index))
            .collect::<Result<Program, _>>()?;
        log::debug!("parsed {} lines", program.len());
        Ok(program)
    }

    /// Lazily parse `reader`, one line per pull
    pub fn lines<R: BufRead>(&self, reader: R) -> Lines<'_, D, R> {
        Lines {
            parser: self,
            reader,
            buffer: String::new(),
            next_index: 0,
            finished: false,
        }
    }
}

/// Streaming iterator over the parsed lines of a [`BufRead`] source
///
/// Stops after the first error.
pub struct Lines<'p, D, R> {
    parser: &'p Parser<D>,
    reader: R,
    buffer: String,
    next_index: usize,
    finished: bool,
}

impl<D: Dialect, R: BufRead> Iterator for Lines<'_, D, R> {
    type Item = Result<Line, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        self.buffer.clear();
        match self.reader.read_line(&mut self.buffer) {
            Ok(0) => {
                self.finished = true;
                None
            }
            Ok(_) => {
                let line = self
                    .buffer
                    .strip_suffix('\n')
                    .map(|l| l.strip_suffix('\r').unwrap_or(l))
                    .unwrap_or(self.buffer.as_str());

                let index = self.next_index;
                self.next_index += 1;

                let result = self.parser.parse_line(line, index);
                if result.is_err() {
                    self.finished = true;
                }
                Some(result)
            }
            Err(e) => {
                self.finished = true;
                Some(Err(ParseError::Io(e)))
            }
        }
    }
}

impl<D: Dialect, R: BufRead> std::iter::FusedIterator for Lines<'_, D, R> {}

/// Parse a whole program from `reader` with the generic dialect
pub fn parse<R: BufRead>(reader: R) -> Result<Program, ParseError> {
    Parser::new().parse(reader)
}

/// Parse a whole in-memory program with the generic dialect
pub fn parse_str(text: &str) -> Result<Program, ParseError> {
    Parser::new().parse_str(text)
}

/// Parse one line with the generic dialect
pub fn parse_line(line: &str, index: usize) -> Result<Line, ParseError> {
    Parser::new().parse_line(line, index)
}
