//! PlayScript Parser Module
//!
//! Builds an arena-backed abstract syntax tree from a token stream by
//! recursive descent with backtracking.

mod ast;
mod script_parser;

pub use ast::{Ast, AstBuilder, Node, NodeId, NodeKind, NodeRef};
pub use script_parser::{ScriptParser, MAX_NESTING_DEPTH};
