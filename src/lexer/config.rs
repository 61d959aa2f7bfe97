//! Scanner configuration

use serde::{Deserialize, Serialize};

/// Which character finalizes a pending `int` as the keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordBoundary {
    /// Only a blank (space, tab, newline) right after `int` makes it the
    /// keyword. `int;` and a trailing `int` at end of input stay identifiers.
    #[default]
    Whitespace,
    /// Any character that cannot continue an identifier, or end of input,
    /// makes `int` the keyword.
    NonIdentifier,
}

/// Options for [`DfaScanner`](super::DfaScanner)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LexerConfig {
    /// Rule used to end the speculative `int` keyword states
    pub keyword_boundary: KeywordBoundary,
}

impl LexerConfig {
    /// Sets the keyword boundary rule
    pub fn with_keyword_boundary(mut self, boundary: KeywordBoundary) -> Self {
        self.keyword_boundary = boundary;
        self
    }
}
