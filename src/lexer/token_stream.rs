use super::token::{Token, TokenKind};
use crate::error::{Error, Result};

/// Seekable cursor over a scanned token sequence
///
/// The cursor is a plain index: `mark` saves it and `reset` restores it,
/// which is all the parser needs to undo a speculative branch.
#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    tokens: Vec<Token>,
    position: usize,
}

impl TokenStream {
    /// Creates a stream positioned at the first token
    pub fn new(tokens: Vec<Token>) -> Self {
        TokenStream {
            tokens,
            position: 0,
        }
    }

    /// Returns the token at the cursor without consuming it
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    /// Kind of the token at the cursor
    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|token| token.kind)
    }

    /// Returns the token at the cursor and advances past it
    pub fn read(&mut self) -> Result<Token> {
        match self.tokens.get(self.position) {
            Some(token) => {
                self.position += 1;
                Ok(token.clone())
            }
            None => Err(Error::StreamExhausted {
                position: self.position,
                length: self.tokens.len(),
            }),
        }
    }

    /// Moves the cursor back by one token
    pub fn unread(&mut self) {
        debug_assert!(self.position > 0, "unread at start of stream");
        self.position = self.position.saturating_sub(1);
    }

    /// Saves the cursor position
    pub fn mark(&self) -> usize {
        self.position
    }

    /// Restores a position previously returned by [`mark`](Self::mark)
    pub fn reset(&mut self, position: usize) {
        debug_assert!(position <= self.tokens.len(), "reset past end of stream");
        self.position = position.min(self.tokens.len());
    }

    /// Current cursor position
    pub fn position(&self) -> usize {
        self.position
    }

    /// Total number of tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// True once every token has been read
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Line and column just past the last token
    ///
    /// Used to locate errors raised at end of input.
    pub fn end_location(&self) -> (usize, usize) {
        match self.tokens.last() {
            Some(last) => (last.line, last.column + last.text.chars().count()),
            None => (1, 1),
        }
    }

    /// Tokens that have not been read yet
    pub fn remaining(&self) -> &[Token] {
        &self.tokens[self.position.min(self.tokens.len())..]
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }
}

impl From<Vec<Token>> for TokenStream {
    fn from(tokens: Vec<Token>) -> Self {
        TokenStream::new(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::DfaScanner;

    fn stream(source: &str) -> TokenStream {
        TokenStream::new(DfaScanner::new(source).scan_tokens())
    }

    #[test]
    fn test_peek_is_idempotent() {
        let tokens = stream("a = 1;");
        let first = tokens.peek().cloned();
        let second = tokens.peek().cloned();
        assert_eq!(first, second);
        assert_eq!(tokens.position(), 0);
    }

    #[test]
    fn test_read_advances_and_fails_past_end() {
        let mut tokens = stream("a;");
        assert_eq!(tokens.read().unwrap().text, "a");
        assert_eq!(tokens.read().unwrap().kind, TokenKind::SemiColon);
        assert!(tokens.is_exhausted());
        assert!(tokens.peek().is_none());
        assert_eq!(
            tokens.read(),
            Err(Error::StreamExhausted {
                position: 2,
                length: 2
            })
        );
        assert_eq!(tokens.position(), 2);
    }

    #[test]
    fn test_unread_restores_previous_token() {
        let mut tokens = stream("age + 1");
        let age = tokens.read().unwrap();
        tokens.unread();
        assert_eq!(tokens.peek(), Some(&age));
    }

    #[test]
    fn test_mark_and_reset() {
        let mut tokens = stream("1 + 2 * 3;");
        tokens.read().unwrap();
        let mark = tokens.mark();
        tokens.read().unwrap();
        tokens.read().unwrap();
        tokens.read().unwrap();
        tokens.reset(mark);
        assert_eq!(tokens.peek_kind(), Some(TokenKind::Plus));
        assert_eq!(tokens.remaining().len(), 5);
    }

    #[test]
    fn test_end_location() {
        assert_eq!(stream("").end_location(), (1, 1));
        assert_eq!(stream("a = 45").end_location(), (1, 7));
    }
}
