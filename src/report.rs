//! Program Output
//!
//! Renders a parsed program in one of the CLI output formats.

use anyhow::{Context, Result};
use std::fmt::Write;

use crate::config::OutputFormat;
use crate::parser::{Code, Line, LineKind, Parameter};
use crate::program::Program;

/// Render `program` as text in the requested format
pub fn render(program: &Program, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Summary => Ok(program.summary().to_string()),
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(program).context("Failed to serialize program")?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Debug => {
            let mut out = String::new();
            for line in program {
                writeln!(out, "{}", describe_line(line))?;
            }
            Ok(out)
        }
    }
}

/// One-line description like "2: gcode N10 G1 [X=5, F=100.5]"
pub fn describe_line(line: &Line) -> String {
    let mut out = format!("{}: {}", line.index, line.kind_name());

    match &line.kind {
        LineKind::Comment { text } => {
            out.push(' ');
            out.push_str(text);
        }
        LineKind::Code(code) => {
            out.push_str(&format!(" N{}", code.line_number));
            match code.code {
                Code::G(number) => out.push_str(&format!(" G{}", number)),
                Code::M(number) => out.push_str(&format!(" M{}", number)),
                Code::Unknown => {}
            }
        }
        LineKind::Unrecognized => {
            out.push(' ');
            out.push_str(&line.raw);
        }
        LineKind::Blank | LineKind::Control(_) => {}
    }

    let params = line.parameters();
    if !params.is_empty() {
        let rendered: Vec<String> = params.iter().map(describe_parameter).collect();
        out.push_str(&format!(" [{}]", rendered.join(", ")));
    }

    out
}

fn describe_parameter(param: &Parameter) -> String {
    match param {
        Parameter::Code { identifier, .. } | Parameter::Unknown { identifier } => {
            identifier.clone()
        }
        Parameter::Integer { identifier, value } => format!("{}={}", identifier, value),
        Parameter::Double { identifier, value } => format!("{}={}", identifier, value),
        Parameter::Text { identifier, value } => format!("{}={:?}", identifier, value),
    }
}
