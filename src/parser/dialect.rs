//! Line classification rules
//!
//! A [`Dialect`] decides what each raw line is and how its tokens become
//! parameters. Every rule is a default trait method backed by a free function
//! of the same name, so a dialect can override one rule and still fall back
//! to the generic behaviour for the rest:
//!
//! ```
//! use gcode_program_parser::parser::dialect::{self, Dialect};
//! use gcode_program_parser::parser::{FieldError, LineKind};
//!
//! struct PercentComments;
//!
//! impl Dialect for PercentComments {
//!     fn classify_line(&self, line: &str) -> Result<LineKind, FieldError> {
//!         if line.starts_with('%') {
//!             return Ok(LineKind::Comment { text: line.to_string() });
//!         }
//!         dialect::classify_line(self, line)
//!     }
//! }
//! ```
//!
//! Rules only produce the [`LineKind`] payload; the driver owns the line index
//! and raw text, so an override cannot disturb them.

use crate::parser::ast::{Code, CodeLine, ControlLine, Directive, LineKind, Parameter};
use crate::parser::error::FieldError;
use crate::parser::lexer::{leading_char, starts_with_char, tokenize_line};
use crate::parser::number::{self, NumberType};

/// Overridable set of classification and parameter rules
pub trait Dialect {
    /// Decide the kind of a raw line and build its payload
    fn classify_line(&self, line: &str) -> Result<LineKind, FieldError> {
        classify_line(self, line)
    }

    /// `N`-numbered lines; `tokens[0]` is the `N` field
    fn make_code_line(&self, line: &str, tokens: &[&str]) -> Result<LineKind, FieldError> {
        make_code_line(self, line, tokens)
    }

    /// `:`-prefixed directive lines; `tokens[0]` is the directive
    fn make_control_line(&self, line: &str, tokens: &[&str]) -> LineKind {
        make_control_line(self, line, tokens)
    }

    /// Comment lines
    fn make_comment(&self, line: &str) -> LineKind {
        make_comment(line)
    }

    /// Empty and whitespace-only lines
    fn make_blank(&self, line: &str) -> LineKind {
        make_blank(line)
    }

    /// Lines no other rule claims
    fn make_unrecognized(&self, line: &str) -> LineKind {
        make_unrecognized(line)
    }

    /// Turn each token into a parameter, preserving order
    fn parse_parameters(&self, tokens: &[&str]) -> Vec<Parameter> {
        parse_parameters(self, tokens)
    }

    /// `name=value` tokens
    fn parse_value_parameter(&self, token: &str) -> Parameter {
        parse_value_parameter(token)
    }

    /// Bare G/M words
    fn parse_code_parameter(&self, token: &str) -> Parameter {
        parse_code_parameter(token)
    }
}

/// Dialect with no overrides
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericDialect;

impl Dialect for GenericDialect {}

pub fn classify_line<D: Dialect + ?Sized>(dialect: &D, line: &str) -> Result<LineKind, FieldError> {
    if line.is_empty() {
        return Ok(dialect.make_blank(line));
    }
    if line.starts_with(';') {
        return Ok(dialect.make_comment(line));
    }

    let tokens = tokenize_line(line);
    let Some(first) = tokens.first() else {
        return Ok(dialect.make_blank(line));
    };

    match leading_char(first) {
        Some(';') => Ok(dialect.make_comment(line)),
        Some('N') => dialect.make_code_line(line, &tokens),
        Some(':') => Ok(dialect.make_control_line(line, &tokens)),
        _ => Ok(dialect.make_unrecognized(line)),
    }
}

pub fn make_code_line<D: Dialect + ?Sized>(
    dialect: &D,
    _line: &str,
    tokens: &[&str],
) -> Result<LineKind, FieldError> {
    let Some(field) = tokens.first() else {
        return Err(FieldError::InvalidLineNumber(String::new()));
    };
    let line_number = field
        .strip_prefix('N')
        .and_then(|digits| digits.parse::<i32>().ok())
        .ok_or_else(|| FieldError::InvalidLineNumber(field.to_string()))?;

    let (code, rest) = match tokens.get(1) {
        Some(word) if starts_with_char(word, 'G') => (Code::G(code_number(word)?), &tokens[2..]),
        Some(word) if starts_with_char(word, 'M') => (Code::M(code_number(word)?), &tokens[2..]),
        _ => (Code::Unknown, &tokens[1..]),
    };

    Ok(LineKind::Code(CodeLine {
        line_number,
        code,
        parameters: dialect.parse_parameters(rest),
    }))
}

/// Digits after the G/M letter of a code word
fn code_number(word: &str) -> Result<i32, FieldError> {
    word.get(1..)
        .and_then(|digits| digits.parse::<i32>().ok())
        .ok_or_else(|| FieldError::InvalidCodeNumber(word.to_string()))
}

pub fn make_control_line<D: Dialect + ?Sized>(
    dialect: &D,
    _line: &str,
    tokens: &[&str],
) -> LineKind {
    let keyword = tokens
        .first()
        .copied()
        .map(|token| token.strip_prefix(':').unwrap_or(token))
        .unwrap_or_default();

    let directive = if keyword.eq_ignore_ascii_case("if") {
        Directive::If
    } else if keyword.eq_ignore_ascii_case("else") {
        Directive::Else
    } else if keyword.eq_ignore_ascii_case("endif") {
        Directive::EndIf
    } else {
        Directive::Unknown
    };

    let rest = tokens.get(1..).unwrap_or_default();
    LineKind::Control(ControlLine {
        directive,
        parameters: dialect.parse_parameters(rest),
    })
}

pub fn make_comment(line: &str) -> LineKind {
    let text = match line.find(';') {
        Some(start) => &line[start..],
        None => line,
    };
    LineKind::Comment {
        text: text.to_string(),
    }
}

pub fn make_blank(_line: &str) -> LineKind {
    LineKind::Blank
}

pub fn make_unrecognized(_line: &str) -> LineKind {
    LineKind::Unrecognized
}

/// `=` takes precedence over the G/M check, so "G1=5" is a value parameter
pub fn parse_parameters<D: Dialect + ?Sized>(dialect: &D, tokens: &[&str]) -> Vec<Parameter> {
    tokens
        .iter()
        .map(|token| {
            if token.contains('=') {
                dialect.parse_value_parameter(token)
            } else if matches!(leading_char(token), Some('G' | 'M')) {
                dialect.parse_code_parameter(token)
            } else {
                Parameter::Unknown {
                    identifier: token.to_string(),
                }
            }
        })
        .collect()
}

pub fn parse_value_parameter(token: &str) -> Parameter {
    let (name, value) = token.split_once('=').unwrap_or((token, ""));
    let identifier = name.to_string();

    match number::classify_number(value) {
        NumberType::Decimal => {
            if let Ok(value) = value.parse::<f64>()
                && value.is_finite()
            {
                return Parameter::Double { identifier, value };
            }
        }
        NumberType::Integer => {
            if let Ok(value) = value.parse::<i32>() {
                return Parameter::Integer { identifier, value };
            }
        }
        NumberType::Neither => {}
    }

    Parameter::Text {
        identifier,
        value: value.to_string(),
    }
}

pub fn parse_code_parameter(token: &str) -> Parameter {
    Parameter::Code {
        identifier: token.to_string(),
        value: token.get(1..).and_then(number::parse_integer),
    }
}
