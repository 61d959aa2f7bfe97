use super::ast::{Ast, AstBuilder, NodeId, NodeKind};
use crate::error::{Error, Result, SyntaxErrorKind};
use crate::lexer::{Token, TokenKind, TokenStream};

/// Deepest parenthesis nesting accepted by [`ScriptParser`]
///
/// Each level costs a few stack frames of recursion; deeper input is
/// rejected with [`SyntaxErrorKind::NestingTooDeep`].
pub const MAX_NESTING_DEPTH: usize = 256;

/// Token position plus arena size, enough to undo a speculative branch
#[derive(Debug, Clone, Copy)]
struct Checkpoint {
    position: usize,
    nodes: usize,
}

/// Backtracking recursive-descent parser for PlayScript
///
/// Grammar:
///
/// ```text
/// program             -> statement*
/// statement           -> intDeclaration | expressionStatement | assignmentStatement
/// intDeclaration      -> "int" Identifier ("=" additive)? ";"
/// assignmentStatement -> Identifier "=" additive ";"
/// expressionStatement -> additive ";"
/// additive            -> multiplicative (("+" | "-") multiplicative)*
/// multiplicative      -> primary (("*" | "/") primary)*
/// primary             -> IntLiteral | Identifier | "(" additive ")"
/// ```
///
/// Rule functions return `Ok(None)` when their first token does not match and
/// nothing was consumed; any error is fatal for the whole parse. A failed
/// parse rewinds the cursor to where it started, so calling `parse` again
/// reports the same error.
pub struct ScriptParser {
    tokens: TokenStream,
    builder: AstBuilder,
    depth: usize,
}

impl ScriptParser {
    /// Creates a parser over scanned tokens
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::from_stream(TokenStream::new(tokens))
    }

    /// Creates a parser over an existing stream, starting at its cursor
    pub fn from_stream(tokens: TokenStream) -> Self {
        ScriptParser {
            tokens,
            builder: AstBuilder::new(),
            depth: 0,
        }
    }

    /// Parses the remaining tokens as a program
    ///
    /// The root of the returned tree is a [`NodeKind::Program`] node whose
    /// children are the statements in source order.
    pub fn parse(&mut self) -> Result<Ast> {
        let start = self.tokens.mark();
        let result = self.program();
        self.finish_attempt(start, &result);
        result
    }

    /// Parses the remaining tokens as one additive expression with no `;`
    ///
    /// The root of the returned tree is the expression itself.
    pub fn parse_expression(&mut self) -> Result<Ast> {
        let start = self.tokens.mark();
        let result = self.standalone_expression();
        self.finish_attempt(start, &result);
        result
    }

    fn finish_attempt(&mut self, start: usize, result: &Result<Ast>) {
        match result {
            Ok(ast) => {
                tracing::debug!(
                    root = %ast.root().kind(),
                    nodes = ast.len(),
                    "parse succeeded"
                );
            }
            Err(err) => {
                tracing::debug!(kind = ?err.syntax_kind(), "parse failed: {}", err);
                self.builder = AstBuilder::new();
                self.tokens.reset(start);
                self.depth = 0;
            }
        }
    }

    fn program(&mut self) -> Result<Ast> {
        let mut statements = Vec::new();

        while self.tokens.peek().is_some() {
            let statement = if let Some(node) = self.int_declaration()? {
                node
            } else if let Some(node) = self.expression_statement()? {
                node
            } else if let Some(node) = self.assignment_statement()? {
                node
            } else {
                return Err(self.expected_error(
                    SyntaxErrorKind::UnknownStatement,
                    "a declaration, assignment or expression statement",
                ));
            };
            statements.push(statement);
        }

        let root = self.builder.push(NodeKind::Program, "");
        for statement in statements {
            self.builder.attach(root, statement);
        }
        Ok(std::mem::take(&mut self.builder).finish(root))
    }

    fn standalone_expression(&mut self) -> Result<Ast> {
        let Some(expr) = self.additive()? else {
            return Err(self.expected_error(SyntaxErrorKind::MissingExpression, "an expression"));
        };
        if self.tokens.peek().is_some() {
            return Err(self.expected_error(SyntaxErrorKind::TrailingInput, "end of input"));
        }
        Ok(std::mem::take(&mut self.builder).finish(expr))
    }

    /// `int a;` or `int b = 2*3;`
    fn int_declaration(&mut self) -> Result<Option<NodeId>> {
        if !self.check(TokenKind::Int) {
            return Ok(None);
        }
        self.tokens.read()?;

        if !self.check(TokenKind::Identifier) {
            return Err(self.expected_error(
                SyntaxErrorKind::MissingIdentifier,
                "a variable name after `int`",
            ));
        }
        let name = self.tokens.read()?;

        let initializer = if self.accept(TokenKind::Assignment)? {
            match self.additive()? {
                Some(expr) => Some(expr),
                None => {
                    return Err(self.expected_error(
                        SyntaxErrorKind::MissingExpression,
                        "an expression to initialize the variable",
                    ))
                }
            }
        } else {
            None
        };

        self.expect_semicolon()?;

        let node = self.builder.push(NodeKind::IntDeclaration, name.text);
        if let Some(expr) = initializer {
            self.builder.attach(node, expr);
        }
        Ok(Some(node))
    }

    /// `age + 1;` - the expression node itself stands for the statement
    fn expression_statement(&mut self) -> Result<Option<NodeId>> {
        let checkpoint = self.checkpoint();

        let Some(expr) = self.additive()? else {
            return Ok(None);
        };
        if self.accept(TokenKind::SemiColon)? {
            return Ok(Some(expr));
        }

        tracing::trace!(
            position = checkpoint.position,
            "expression not followed by `;`, backtracking"
        );
        self.restore(checkpoint);
        Ok(None)
    }

    /// `age = 10*2;`
    fn assignment_statement(&mut self) -> Result<Option<NodeId>> {
        if !self.check(TokenKind::Identifier) {
            return Ok(None);
        }
        let name = self.tokens.read()?;

        if !self.accept(TokenKind::Assignment)? {
            tracing::trace!(name = %name.text, "identifier not followed by `=`, backtracking");
            self.tokens.unread();
            return Ok(None);
        }

        let Some(value) = self.additive()? else {
            return Err(self.expected_error(
                SyntaxErrorKind::MissingExpression,
                "an expression after `=`",
            ));
        };

        self.expect_semicolon()?;

        let node = self.builder.push(NodeKind::AssignmentStatement, name.text);
        self.builder.attach(node, value);
        Ok(Some(node))
    }

    fn additive(&mut self) -> Result<Option<NodeId>> {
        let Some(mut node) = self.multiplicative()? else {
            return Ok(None);
        };

        while self.tokens.peek_kind().is_some_and(|kind| kind.is_additive_op()) {
            let op = self.tokens.read()?;
            let Some(right) = self.multiplicative()? else {
                return Err(self.expected_error(
                    SyntaxErrorKind::MissingRightOperand,
                    &format!("a right operand after {}", op.kind),
                ));
            };
            // The accumulated tree becomes the left child, keeping `a-b-c` as `(a-b)-c`.
            node = self.builder.binary(NodeKind::Additive, op.text, node, right);
        }

        Ok(Some(node))
    }

    fn multiplicative(&mut self) -> Result<Option<NodeId>> {
        let Some(mut node) = self.primary()? else {
            return Ok(None);
        };

        while self
            .tokens
            .peek_kind()
            .is_some_and(|kind| kind.is_multiplicative_op())
        {
            let op = self.tokens.read()?;
            let Some(right) = self.primary()? else {
                return Err(self.expected_error(
                    SyntaxErrorKind::MissingRightOperand,
                    &format!("a right operand after {}", op.kind),
                ));
            };
            node = self.builder.binary(NodeKind::Multiplicative, op.text, node, right);
        }

        Ok(Some(node))
    }

    /// No node is built for `primary`; the matched operand is returned as is.
    fn primary(&mut self) -> Result<Option<NodeId>> {
        let Some(kind) = self.tokens.peek_kind() else {
            return Ok(None);
        };

        match kind {
            TokenKind::IntLiteral => {
                let token = self.tokens.read()?;
                Ok(Some(self.builder.push(NodeKind::IntLiteral, token.text)))
            }
            TokenKind::Identifier => {
                let token = self.tokens.read()?;
                Ok(Some(self.builder.push(NodeKind::Identifier, token.text)))
            }
            TokenKind::LeftParen => {
                if self.depth >= MAX_NESTING_DEPTH {
                    return Err(self.expected_error(
                        SyntaxErrorKind::NestingTooDeep,
                        &format!("at most {} nested parentheses", MAX_NESTING_DEPTH),
                    ));
                }
                self.tokens.read()?;
                self.depth += 1;
                let inner = self.additive()?;
                self.depth -= 1;
                let Some(inner) = inner else {
                    return Err(self.expected_error(
                        SyntaxErrorKind::MissingExpression,
                        "an expression inside parentheses",
                    ));
                };
                if !self.accept(TokenKind::RightParen)? {
                    return Err(self.expected_error(
                        SyntaxErrorKind::MissingRightParen,
                        "`)` to close the parenthesized expression",
                    ));
                }
                Ok(Some(inner))
            }
            _ => Ok(None),
        }
    }

    // Helper methods

    fn check(&self, kind: TokenKind) -> bool {
        self.tokens.peek_kind() == Some(kind)
    }

    /// Consumes the next token if it has the given kind
    fn accept(&mut self, kind: TokenKind) -> Result<bool> {
        if self.check(kind) {
            self.tokens.read()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect_semicolon(&mut self) -> Result<()> {
        if self.accept(TokenKind::SemiColon)? {
            Ok(())
        } else {
            Err(self.expected_error(
                SyntaxErrorKind::MissingSemicolon,
                "`;` to end the statement",
            ))
        }
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            position: self.tokens.mark(),
            nodes: self.builder.len(),
        }
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        self.tokens.reset(checkpoint.position);
        self.builder.truncate(checkpoint.nodes);
    }

    /// Syntax error at the current token, or at end of input
    fn expected_error(&self, kind: SyntaxErrorKind, expected: &str) -> Error {
        let (line, col, found) = match self.tokens.peek() {
            Some(token) => (token.line, token.column, token.to_string()),
            None => {
                let (line, col) = self.tokens.end_location();
                (line, col, "end of input".to_string())
            }
        };
        Error::syntax(kind, line, col, format!("Expected {}, found {}", expected, found))
    }
}
