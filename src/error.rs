//! Error types for PlayScript

use thiserror::Error;

/// What the parser expected but did not find
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxErrorKind {
    /// `int` not followed by a variable name
    MissingIdentifier,
    /// `=` or `(` not followed by an expression
    MissingExpression,
    /// Statement not terminated by `;`
    MissingSemicolon,
    /// Binary operator without a right-hand operand
    MissingRightOperand,
    /// Parenthesized expression not closed by `)`
    MissingRightParen,
    /// No statement form matches at this position
    UnknownStatement,
    /// Tokens left over after a standalone expression
    TrailingInput,
    /// Parentheses nested deeper than the parser allows
    NestingTooDeep,
}

impl std::fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            SyntaxErrorKind::MissingIdentifier => "missing identifier",
            SyntaxErrorKind::MissingExpression => "missing expression",
            SyntaxErrorKind::MissingSemicolon => "missing semicolon",
            SyntaxErrorKind::MissingRightOperand => "missing right operand",
            SyntaxErrorKind::MissingRightParen => "missing right parenthesis",
            SyntaxErrorKind::UnknownStatement => "unknown statement",
            SyntaxErrorKind::TrailingInput => "trailing input",
            SyntaxErrorKind::NestingTooDeep => "nesting too deep",
        };
        f.write_str(name)
    }
}

/// PlayScript front-end errors
///
/// Scanning never fails, so every variant comes from the token stream or the
/// parser.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Syntax error encountered during parsing
    ///
    /// **Triggered by:** the first unmet grammar expectation
    /// **Example:** `2+3+;` (no right operand after the second `+`)
    #[error("Syntax error at line {line}, column {col}: {message}")]
    SyntaxError {
        /// Which expectation failed
        kind: SyntaxErrorKind,
        /// Line number where error occurred
        line: usize,
        /// Column number where error occurred
        col: usize,
        /// Error description
        message: String,
    },

    /// A token was read after the stream was exhausted
    #[error("Token stream exhausted: position {position} of {length}")]
    StreamExhausted {
        /// Cursor position at the time of the read
        position: usize,
        /// Number of tokens in the stream
        length: usize,
    },
}

impl Error {
    /// Create a syntax error at a source location
    pub fn syntax(
        kind: SyntaxErrorKind,
        line: usize,
        col: usize,
        message: impl Into<String>,
    ) -> Self {
        Error::SyntaxError {
            kind,
            line,
            col,
            message: message.into(),
        }
    }

    /// The syntax error kind, if this is a syntax error
    pub fn syntax_kind(&self) -> Option<SyntaxErrorKind> {
        match self {
            Error::SyntaxError { kind, .. } => Some(*kind),
            Error::StreamExhausted { .. } => None,
        }
    }

    /// Line and column of a syntax error
    pub fn location(&self) -> Option<(usize, usize)> {
        match self {
            Error::SyntaxError { line, col, .. } => Some((*line, *col)),
            Error::StreamExhausted { .. } => None,
        }
    }
}

/// Result type for PlayScript operations
pub type Result<T> = std::result::Result<T, Error>;
