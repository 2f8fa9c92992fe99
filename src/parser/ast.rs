//! Line records produced by the parser
//!
//! Pure data representation: every input line becomes one [`Line`], an
//! envelope (index + raw text) around a kind-specific [`LineKind`] payload.

use serde::Serialize;

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    /// 0-based position in the input
    pub index: usize,
    /// Original text, verbatim and without its line terminator
    pub raw: String,
    /// Classification and payload
    #[serde(flatten)]
    pub kind: LineKind,
}

/// What a line turned out to be
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LineKind {
    /// Empty or whitespace-only line
    Blank,
    /// Comment line; `text` starts at the first `;`
    Comment { text: String },
    /// `N`-numbered line, optionally with a G or M code
    Code(CodeLine),
    /// `:`-prefixed directive such as `:IF`
    Control(ControlLine),
    /// Anything the classifier does not recognize
    Unrecognized,
}

/// Payload of an `N`-numbered line like "N10 G1 X=5"
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeLine {
    /// Value of the `N` field
    pub line_number: i32,
    pub code: Code,
    pub parameters: Vec<Parameter>,
}

/// The code word following the line number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "number", rename_all = "snake_case")]
pub enum Code {
    G(i32),
    M(i32),
    /// Missing, or not a G/M word
    Unknown,
}

impl Code {
    /// Code number for G and M codes
    pub fn number(&self) -> Option<i32> {
        match self {
            Code::G(n) | Code::M(n) => Some(*n),
            Code::Unknown => None,
        }
    }
}

/// Payload of a `:`-prefixed control line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlLine {
    pub directive: Directive,
    pub parameters: Vec<Parameter>,
}

/// Control-flow directive keyword (matched case-insensitively)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Directive {
    If,
    Else,
    EndIf,
    Unknown,
}

/// A typed parameter taken from one token
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Parameter {
    /// Bare G/M word like "G90"; `value` is set when the suffix is an integer
    Code {
        identifier: String,
        value: Option<i32>,
    },
    /// `name=<integer>`
    Integer { identifier: String, value: i32 },
    /// `name=<decimal>`
    Double { identifier: String, value: f64 },
    /// `name=<anything else>`
    Text { identifier: String, value: String },
    /// Any other bare token
    Unknown { identifier: String },
}

impl Parameter {
    /// Left-hand name of the parameter (the whole token for bare words)
    pub fn identifier(&self) -> &str {
        match self {
            Parameter::Code { identifier, .. }
            | Parameter::Integer { identifier, .. }
            | Parameter::Double { identifier, .. }
            | Parameter::Text { identifier, .. }
            | Parameter::Unknown { identifier } => identifier,
        }
    }
}

impl Line {
    pub fn new(index: usize, raw: impl Into<String>, kind: LineKind) -> Self {
        Self {
            index,
            raw: raw.into(),
            kind,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Parameters of code and control lines; empty for every other kind
    pub fn parameters(&self) -> &[Parameter] {
        match &self.kind {
            LineKind::Code(code) => &code.parameters,
            LineKind::Control(control) => &control.parameters,
            _ => &[],
        }
    }

    /// Short, stable name of the line kind
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            LineKind::Blank => "blank",
            LineKind::Comment { .. } => "comment",
            LineKind::Code(code) => match code.code {
                Code::G(_) => "gcode",
                Code::M(_) => "mcode",
                Code::Unknown => "unknown_code",
            },
            LineKind::Control(control) => match control.directive {
                Directive::If => "if",
                Directive::Else => "else",
                Directive::EndIf => "endif",
                Directive::Unknown => "unknown_control",
            },
            LineKind::Unrecognized => "unrecognized",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameters_only_on_code_and_control() {
        let params = vec![Parameter::Unknown {
            identifier: "X5".to_string(),
        }];
        let code = Line::new(
            0,
            "N1 G1 X5",
            LineKind::Code(CodeLine {
                line_number: 1,
                code: Code::G(1),
                parameters: params.clone(),
            }),
        );
        assert_eq!(code.parameters(), params.as_slice());

        let comment = Line::new(
            1,
            "; x",
            LineKind::Comment {
                text: "; x".to_string(),
            },
        );
        assert!(comment.parameters().is_empty());
    }

    #[test]
    fn test_kind_names() {
        let control = Line::new(
            0,
            ":ENDIF",
            LineKind::Control(ControlLine {
                directive: Directive::EndIf,
                parameters: Vec::new(),
            }),
        );
        assert_eq!(control.kind_name(), "endif");
        assert_eq!(Line::new(1, "", LineKind::Blank).kind_name(), "blank");
        assert_eq!(
            Line::new(2, "hello", LineKind::Unrecognized).kind_name(),
            "unrecognized"
        );
    }

    #[test]
    fn test_parameter_identifier() {
        let param = Parameter::Double {
            identifier: "F".to_string(),
            value: 100.5,
        };
        assert_eq!(param.identifier(), "F");
        assert_eq!(Code::M(104).number(), Some(104));
        assert_eq!(Code::Unknown.number(), None);
    }

    #[test]
    fn test_serialize_code_line() {
        let line = Line::new(
            3,
            "N10 G1 X=5",
            LineKind::Code(CodeLine {
                line_number: 10,
                code: Code::G(1),
                parameters: vec![Parameter::Integer {
                    identifier: "X".to_string(),
                    value: 5,
                }],
            }),
        );
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["index"], 3);
        assert_eq!(json["kind"], "code");
        assert_eq!(json["line_number"], 10);
        assert_eq!(json["code"]["type"], "g");
        assert_eq!(json["code"]["number"], 1);
        assert_eq!(json["parameters"][0]["type"], "integer");
        assert_eq!(json["parameters"][0]["identifier"], "X");
    }
}
