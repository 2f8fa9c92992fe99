//! Line Tokenizer
//!
//! Splits a raw program line into whitespace-delimited tokens.
//! Tokens borrow from the line; nothing is allocated per token.

/// Split `line` on whitespace, discarding empty tokens
pub fn tokenize_line(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// First character of a token, if any
pub fn leading_char(token: &str) -> Option<char> {
    token.chars().next()
}

/// True when `token` begins with `prefix`
pub fn starts_with_char(token: &str, prefix: char) -> bool {
    leading_char(token) == Some(prefix)
}
