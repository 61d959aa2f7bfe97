use serde::{Deserialize, Serialize};

/// A single token from the source code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The type of token
    pub kind: TokenKind,
    /// Characters matched by the scanner
    pub text: String,
    /// Line number where token appears (1-indexed)
    pub line: usize,
    /// Column number where token starts (1-indexed)
    pub column: usize,
}

impl Token {
    /// Creates a new token with the given properties
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, column: usize) -> Self {
        Token {
            kind,
            text: text.into(),
            line,
            column,
        }
    }
}

/// All token types recognized by PlayScript
///
/// The comparison, `if`/`else` and string-literal kinds are reserved: the
/// grammar does not use them yet and the scanner only produces `>`, `>=`,
/// `<` and `<=` among them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    // Arithmetic operators
    /// Plus operator (+)
    Plus,
    /// Minus operator (-)
    Minus,
    /// Star operator (*)
    Star,
    /// Slash operator (/)
    Slash,

    // Comparison operators
    /// Greater than or equal operator (>=)
    Ge,
    /// Greater than operator (>)
    Gt,
    /// Equality operator (==)
    Eq,
    /// Less than or equal operator (<=)
    Le,
    /// Less than operator (<)
    Lt,

    // Punctuation
    /// Statement terminator (;)
    SemiColon,
    /// Left parenthesis (
    LeftParen,
    /// Right parenthesis )
    RightParen,
    /// Assignment operator (=)
    Assignment,

    // Keywords
    /// IF keyword
    If,
    /// ELSE keyword
    Else,
    /// INT keyword
    Int,

    // Classes
    /// Identifier: a letter followed by letters or digits
    Identifier,
    /// Base-10 integer literal
    IntLiteral,
    /// String literal
    StringLiteral,
}

impl TokenKind {
    /// Check if token is a keyword
    pub fn is_keyword(&self) -> bool {
        matches!(self, TokenKind::If | TokenKind::Else | TokenKind::Int)
    }

    /// Check if token is one of the additive operators (`+`, `-`)
    pub fn is_additive_op(&self) -> bool {
        matches!(self, TokenKind::Plus | TokenKind::Minus)
    }

    /// Check if token is one of the multiplicative operators (`*`, `/`)
    pub fn is_multiplicative_op(&self) -> bool {
        matches!(self, TokenKind::Star | TokenKind::Slash)
    }

    /// Check if token is a comparison operator
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            TokenKind::Ge | TokenKind::Gt | TokenKind::Eq | TokenKind::Le | TokenKind::Lt
        )
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            TokenKind::Plus => write!(f, "`+`"),
            TokenKind::Minus => write!(f, "`-`"),
            TokenKind::Star => write!(f, "`*`"),
            TokenKind::Slash => write!(f, "`/`"),
            TokenKind::Ge => write!(f, "`>=`"),
            TokenKind::Gt => write!(f, "`>`"),
            TokenKind::Eq => write!(f, "`==`"),
            TokenKind::Le => write!(f, "`<=`"),
            TokenKind::Lt => write!(f, "`<`"),
            TokenKind::SemiColon => write!(f, "`;`"),
            TokenKind::LeftParen => write!(f, "`(`"),
            TokenKind::RightParen => write!(f, "`)`"),
            TokenKind::Assignment => write!(f, "`=`"),
            TokenKind::If => write!(f, "`if`"),
            TokenKind::Else => write!(f, "`else`"),
            TokenKind::Int => write!(f, "`int`"),
            TokenKind::Identifier => write!(f, "identifier"),
            TokenKind::IntLiteral => write!(f, "integer literal"),
            TokenKind::StringLiteral => write!(f, "string literal"),
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.kind {
            TokenKind::Identifier | TokenKind::IntLiteral | TokenKind::StringLiteral => {
                write!(f, "{} `{}`", self.kind, self.text)
            }
            _ => write!(f, "{}", self.kind),
        }
    }
}
