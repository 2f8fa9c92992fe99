//! G-code Program Parser
//!
//! Converts a line-oriented machine-control program into an ordered sequence
//! of typed line records.
//!
//! This library provides:
//! - Line classification (blank, comment, numbered code, control, text)
//! - Typed parameter parsing (`name=value`, bare G/M words, unknown tokens)
//! - Overridable dialect rules
//! - A small CLI with file-based configuration

pub mod cli;
pub mod config;
pub mod parser;
pub mod program;
pub mod report;

// Re-exports for clean public API
pub use config::Config;
pub use parser::{
    Dialect, GenericDialect, Line, LineKind, Parameter, ParseError, ParseOptions, Parser, parse,
    parse_line, parse_str,
};
pub use program::{Program, ProgramSummary};
