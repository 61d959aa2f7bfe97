use super::config::{KeywordBoundary, LexerConfig};
use super::token::{Token, TokenKind};

/// States of the scanner's finite automaton
///
/// `KeywordInt1..3` are the speculative states entered after `i`, `in` and
/// `int`; they fall back to `Identifier` as soon as the text stops matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DfaState {
    Initial,
    Identifier,
    IntLiteral,
    KeywordInt1,
    KeywordInt2,
    KeywordInt3,
    Gt,
    Ge,
    Lt,
    Le,
    Assignment,
    Plus,
    Minus,
    Star,
    Slash,
    SemiColon,
    LeftParen,
    RightParen,
}

/// Character-driven DFA scanner for PlayScript source
///
/// The scanner never fails: blanks and unrecognized characters end the
/// pending token and are dropped.
pub struct DfaScanner {
    /// Source code as character vector
    source: Vec<char>,
    config: LexerConfig,
    /// Accumulated tokens
    tokens: Vec<Token>,
    /// Text of the pending token
    text: String,
    /// Kind of the pending token, refined as more characters arrive
    kind: TokenKind,
    start_line: usize,
    start_column: usize,
    /// Current line number (1-indexed)
    line: usize,
    /// Current column number (1-indexed)
    column: usize,
}

impl DfaScanner {
    /// Creates a scanner with the default configuration
    pub fn new(source: &str) -> Self {
        Self::with_config(source, LexerConfig::default())
    }

    /// Creates a scanner with an explicit configuration
    pub fn with_config(source: &str, config: LexerConfig) -> Self {
        DfaScanner {
            source: source.chars().collect(),
            config,
            tokens: Vec::new(),
            text: String::new(),
            kind: TokenKind::Identifier,
            start_line: 1,
            start_column: 1,
            line: 1,
            column: 1,
        }
    }

    /// Runs the automaton over the whole source and returns the tokens in order
    pub fn scan_tokens(&mut self) -> Vec<Token> {
        self.tokens.clear();
        self.text.clear();
        self.line = 1;
        self.column = 1;

        let mut state = DfaState::Initial;
        for index in 0..self.source.len() {
            let ch = self.source[index];
            state = self.step(state, ch);
            self.bump_position(ch);
        }
        self.finish(state);

        tracing::debug!(
            chars = self.source.len(),
            tokens = self.tokens.len(),
            "scanned source"
        );
        std::mem::take(&mut self.tokens)
    }

    fn step(&mut self, state: DfaState, ch: char) -> DfaState {
        match state {
            DfaState::Initial => self.init_token(ch),
            DfaState::Identifier => {
                if is_identifier_char(ch) {
                    self.text.push(ch);
                    state
                } else {
                    self.init_token(ch)
                }
            }
            DfaState::IntLiteral => {
                if ch.is_ascii_digit() {
                    self.text.push(ch);
                    state
                } else {
                    self.init_token(ch)
                }
            }
            DfaState::Gt => self.extend_with_eq(ch, TokenKind::Ge, DfaState::Ge),
            DfaState::Lt => self.extend_with_eq(ch, TokenKind::Le, DfaState::Le),
            DfaState::KeywordInt1 => self.keyword_prefix(ch, 'n', DfaState::KeywordInt2),
            DfaState::KeywordInt2 => self.keyword_prefix(ch, 't', DfaState::KeywordInt3),
            DfaState::KeywordInt3 => {
                if is_identifier_char(ch) {
                    self.text.push(ch);
                    DfaState::Identifier
                } else {
                    if self.ends_keyword(ch) {
                        self.kind = TokenKind::Int;
                    }
                    self.init_token(ch)
                }
            }
            DfaState::Ge
            | DfaState::Le
            | DfaState::Assignment
            | DfaState::Plus
            | DfaState::Minus
            | DfaState::Star
            | DfaState::Slash
            | DfaState::SemiColon
            | DfaState::LeftParen
            | DfaState::RightParen => self.init_token(ch),
        }
    }

    /// Emits the pending token (if any) and dispatches on `ch` from the
    /// initial state.
    fn init_token(&mut self, ch: char) -> DfaState {
        self.emit();
        self.start_line = self.line;
        self.start_column = self.column;

        let (state, kind) = match ch {
            'i' => (DfaState::KeywordInt1, TokenKind::Identifier),
            c if c.is_ascii_alphabetic() => (DfaState::Identifier, TokenKind::Identifier),
            c if c.is_ascii_digit() => (DfaState::IntLiteral, TokenKind::IntLiteral),
            '>' => (DfaState::Gt, TokenKind::Gt),
            '<' => (DfaState::Lt, TokenKind::Lt),
            '+' => (DfaState::Plus, TokenKind::Plus),
            '-' => (DfaState::Minus, TokenKind::Minus),
            '*' => (DfaState::Star, TokenKind::Star),
            '/' => (DfaState::Slash, TokenKind::Slash),
            ';' => (DfaState::SemiColon, TokenKind::SemiColon),
            '(' => (DfaState::LeftParen, TokenKind::LeftParen),
            ')' => (DfaState::RightParen, TokenKind::RightParen),
            '=' => (DfaState::Assignment, TokenKind::Assignment),
            _ => {
                if !is_blank(ch) {
                    tracing::trace!(
                        line = self.line,
                        column = self.column,
                        "skipping unrecognized character {:?}",
                        ch
                    );
                }
                return DfaState::Initial;
            }
        };

        self.kind = kind;
        self.text.push(ch);
        state
    }

    fn extend_with_eq(&mut self, ch: char, kind: TokenKind, next: DfaState) -> DfaState {
        if ch == '=' {
            self.kind = kind;
            self.text.push(ch);
            next
        } else {
            self.init_token(ch)
        }
    }

    fn keyword_prefix(&mut self, ch: char, expected: char, next: DfaState) -> DfaState {
        if ch == expected {
            self.text.push(ch);
            next
        } else if is_identifier_char(ch) {
            self.text.push(ch);
            DfaState::Identifier
        } else {
            self.init_token(ch)
        }
    }

    /// Whether a non-identifier character right after `int` finalizes the keyword
    fn ends_keyword(&self, ch: char) -> bool {
        match self.config.keyword_boundary {
            KeywordBoundary::Whitespace => is_blank(ch),
            KeywordBoundary::NonIdentifier => true,
        }
    }

    fn finish(&mut self, state: DfaState) {
        if state == DfaState::KeywordInt3
            && self.config.keyword_boundary == KeywordBoundary::NonIdentifier
        {
            self.kind = TokenKind::Int;
        }
        self.emit();
    }

    fn emit(&mut self) {
        if self.text.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.text);
        self.tokens.push(Token::new(
            self.kind,
            text,
            self.start_line,
            self.start_column,
        ));
    }

    fn bump_position(&mut self, ch: char) {
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

fn is_blank(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n')
}

fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
}
