//! Parser options

use serde::{Deserialize, Serialize};

/// What to do with a line whose `N` field or G/M code number is not an integer
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum MalformedNumberPolicy {
    /// Fail the whole parse
    #[default]
    Abort,
    /// Record the line as unrecognized text and keep going
    Demote,
}

/// Knobs for a parse run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub malformed_numbers: MalformedNumberPolicy,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn malformed_numbers(mut self, policy: MalformedNumberPolicy) -> Self {
        self.malformed_numbers = policy;
        self
    }
}
