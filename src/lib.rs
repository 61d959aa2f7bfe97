//! # PlayScript
//!
//! The front end of a minimal statement language: a DFA lexer that turns
//! source text into tokens, and a backtracking recursive-descent parser that
//! turns tokens into an abstract syntax tree.
//!
//! ## Quick Start
//!
//! ```rust
//! use playscript::{NodeKind, Parser, Scanner};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let code = "int age = 45+2; age = 20; age + 10*2;";
//!
//! // Tokenize (scan)
//! let mut scanner = Scanner::new(code);
//! let tokens = scanner.scan_tokens();
//!
//! // Parse into AST
//! let mut parser = Parser::new(tokens);
//! let ast = parser.parse()?;
//!
//! let kinds: Vec<NodeKind> = ast.root().children().map(|n| n.kind()).collect();
//! assert_eq!(
//!     kinds,
//!     vec![NodeKind::IntDeclaration, NodeKind::AssignmentStatement, NodeKind::Additive]
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Language Overview
//!
//! ```text
//! program             -> statement*
//! statement           -> intDeclaration | expressionStatement | assignmentStatement
//! intDeclaration      -> "int" Identifier ("=" additive)? ";"
//! assignmentStatement -> Identifier "=" additive ";"
//! expressionStatement -> additive ";"
//! additive            -> multiplicative (("+" | "-") multiplicative)*
//! multiplicative      -> primary (("*" | "/") primary)*
//! primary             -> IntLiteral | Identifier | "(" additive ")"
//! ```
//!
//! Binary operators are left-associative: `a - b - c` parses as `(a - b) - c`.
//!
//! ## Architecture
//!
//! ```text
//! Source Code → Scanner → Tokens → TokenStream → Parser → Ast
//! ```
//!
//! - [`Scanner`] - Tokenizes source code; never fails
//! - [`TokenStream`] - Cursor with lookahead, `unread` and `mark`/`reset`
//! - [`Parser`] - Builds the [`Ast`]; the first syntax error aborts the parse
//! - [`Ast`] - Arena of nodes with parent back-references
//!
//! ## Error Handling
//!
//! ```rust
//! use playscript::SyntaxErrorKind;
//!
//! let err = playscript::parse("2+3+;").unwrap_err();
//! assert_eq!(err.syntax_kind(), Some(SyntaxErrorKind::MissingRightOperand));
//! assert!(err.to_string().contains("line 1, column 5"));
//! ```
//!
//! ## Lexer quirk
//!
//! `int` only becomes the keyword when a blank follows it, so `int;` is the
//! identifier `int` followed by `;`. Use
//! [`KeywordBoundary::NonIdentifier`] to accept any non-identifier character.

pub mod error;
pub mod lexer;
pub mod parser;

// Re-export main types
pub use error::{Error, Result, SyntaxErrorKind};
pub use lexer::{DfaScanner, KeywordBoundary, LexerConfig, Token, TokenKind, TokenStream};
pub use parser::{
    Ast, AstBuilder, Node, NodeId, NodeKind, NodeRef, ScriptParser, MAX_NESTING_DEPTH,
};

/// Type alias for the DFA scanner (lexer).
/// Converts raw source text into tokens for the parser.
pub type Scanner = DfaScanner;

/// Type alias for the recursive-descent parser.
/// Converts tokens into an abstract syntax tree (AST).
pub type Parser = ScriptParser;

/// Scans `source` with the default configuration
pub fn tokenize(source: &str) -> Vec<Token> {
    DfaScanner::new(source).scan_tokens()
}

/// Scans and parses `source` as a program
pub fn parse(source: &str) -> Result<Ast> {
    ScriptParser::new(tokenize(source)).parse()
}

/// Scans and parses `source` as a single expression without a terminator
///
/// ```rust
/// let ast = playscript::parse_expression("(1 + 2) * 3").unwrap();
/// assert_eq!(ast.root().text(), "*");
/// ```
pub fn parse_expression(source: &str) -> Result<Ast> {
    ScriptParser::new(tokenize(source)).parse_expression()
}
