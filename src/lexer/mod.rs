//! Lexical analysis for PlayScript
//!
//! A character-level DFA turns source text into tokens, and a
//! [`TokenStream`] hands them to the parser with lookahead and rewind.

mod config;
mod dfa_scanner;
mod token;
mod token_stream;

pub use config::{KeywordBoundary, LexerConfig};
pub use dfa_scanner::DfaScanner;
pub use token::{Token, TokenKind};
pub use token_stream::TokenStream;
