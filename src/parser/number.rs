//! Numeric literal classification
//!
//! Decides whether a piece of parameter text looks like an integer, a decimal
//! number, or neither. Classification is purely lexical: a literal can look
//! like an integer and still overflow when converted.

use std::sync::LazyLock;

use regex::Regex;

static INTEGER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?[0-9]+$").expect("integer pattern is valid")
});

static DECIMAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+\.[0-9]*(?:[eE][+-]?[0-9]+)?|\.[0-9]+(?:[eE][+-]?[0-9]+)?|[0-9]+[eE][+-]?[0-9]+)$")
        .expect("decimal pattern is valid")
});

/// Lexical category of a numeric literal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberType {
    /// Optional sign followed by digits only (e.g. "42", "-7")
    Integer,
    /// Digits with a decimal point and/or exponent (e.g. "1.5", ".5", "2e3")
    Decimal,
    /// Anything else, including the empty string
    Neither,
}

/// Classify `text` as an integer, a decimal, or neither
pub fn classify_number(text: &str) -> NumberType {
    if INTEGER_RE.is_match(text) {
        NumberType::Integer
    } else if DECIMAL_RE.is_match(text) {
        NumberType::Decimal
    } else {
        NumberType::Neither
    }
}

/// Parse `text` as an integer if it classifies as one and fits in an `i32`
pub fn parse_integer(text: &str) -> Option<i32> {
    match classify_number(text) {
        NumberType::Integer => text.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_integers() {
        assert_eq!(classify_number("0"), NumberType::Integer);
        assert_eq!(classify_number("104"), NumberType::Integer);
        assert_eq!(classify_number("-12"), NumberType::Integer);
        assert_eq!(classify_number("+3"), NumberType::Integer);
    }

    #[test]
    fn test_classify_decimals() {
        assert_eq!(classify_number("100.5"), NumberType::Decimal);
        assert_eq!(classify_number("-0.25"), NumberType::Decimal);
        assert_eq!(classify_number(".5"), NumberType::Decimal);
        assert_eq!(classify_number("5."), NumberType::Decimal);
        assert_eq!(classify_number("1e3"), NumberType::Decimal);
        assert_eq!(classify_number("2.5E-2"), NumberType::Decimal);
    }

    #[test]
    fn test_classify_neither() {
        assert_eq!(classify_number(""), NumberType::Neither);
        assert_eq!(classify_number("abc"), NumberType::Neither);
        assert_eq!(classify_number("1.2.3"), NumberType::Neither);
        assert_eq!(classify_number("[#1+2]"), NumberType::Neither);
        assert_eq!(classify_number("-"), NumberType::Neither);
        assert_eq!(classify_number("."), NumberType::Neither);
        assert_eq!(classify_number(" 1"), NumberType::Neither);
    }

    #[test]
    fn test_parse_integer_overflow() {
        assert_eq!(parse_integer("2147483647"), Some(i32::MAX));
        // Looks like an integer but does not fit
        assert_eq!(parse_integer("99999999999"), None);
        assert_eq!(parse_integer("1.5"), None);
    }
}
