//! Parsed Program
//!
//! Ordered, read-only collection of [`Line`] records in input order.

use std::fmt;
use std::ops::Index;

use serde::Serialize;

use crate::parser::ast::{Code, CodeLine, Directive, Line, LineKind};

/// Every line of a parsed program, in input order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Program {
    lines: Vec<Line>,
}

impl Program {
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Line> {
        self.lines.iter()
    }

    /// `N`-numbered lines together with their payload
    pub fn code_lines(&self) -> impl Iterator<Item = (&Line, &CodeLine)> {
        self.lines.iter().filter_map(|line| match &line.kind {
            LineKind::Code(code) => Some((line, code)),
            _ => None,
        })
    }

    /// Count lines by kind
    pub fn summary(&self) -> ProgramSummary {
        let mut summary = ProgramSummary {
            total_lines: self.lines.len(),
            ..ProgramSummary::default()
        };

        for line in &self.lines {
            match &line.kind {
                LineKind::Blank => summary.blank += 1,
                LineKind::Comment { .. } => summary.comments += 1,
                LineKind::Code(code) => match code.code {
                    Code::G(_) => summary.gcodes += 1,
                    Code::M(_) => summary.mcodes += 1,
                    Code::Unknown => summary.unknown_codes += 1,
                },
                LineKind::Control(control) => {
                    if control.directive == Directive::Unknown {
                        summary.unknown_controls += 1;
                    } else {
                        summary.controls += 1;
                    }
                }
                LineKind::Unrecognized => summary.unrecognized += 1,
            }
            summary.parameters += line.parameters().len();
        }

        summary
    }
}

impl FromIterator<Line> for Program {
    fn from_iter<I: IntoIterator<Item = Line>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Program {
    type Item = Line;
    type IntoIter = std::vec::IntoIter<Line>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.into_iter()
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Line;
    type IntoIter = std::slice::Iter<'a, Line>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

impl Index<usize> for Program {
    type Output = Line;

    fn index(&self, index: usize) -> &Line {
        &self.lines[index]
    }
}

/// Per-kind line counts of a program
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProgramSummary {
    pub total_lines: usize,
    pub blank: usize,
    pub comments: usize,
    pub gcodes: usize,
    pub mcodes: usize,
    pub unknown_codes: usize,
    pub controls: usize,
    pub unknown_controls: usize,
    pub unrecognized: usize,
    pub parameters: usize,
}

impl fmt::Display for ProgramSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = [
            ("blank", self.blank),
            ("comment", self.comments),
            ("gcode", self.gcodes),
            ("mcode", self.mcodes),
            ("unknown code", self.unknown_codes),
            ("control", self.controls),
            ("unknown control", self.unknown_controls),
            ("unrecognized", self.unrecognized),
        ];

        writeln!(f, "{:<18} {}", "lines", self.total_lines)?;
        for (label, count) in rows {
            writeln!(f, "  {:<16} {}", label, count)?;
        }
        writeln!(f, "{:<18} {}", "parameters", self.parameters)
    }
}
