//! AST collaborator: the already-parsed, already-resolved tree the flow
//! builder traverses.
//!
//! The node set is deliberately closed: statements and expressions are sum
//! types and every wiring rule in the builder matches exhaustively, so an
//! AST shape without a rule is a compile error rather than a silent
//! fallthrough. The tree is immutable during construction; nodes are
//! identified by [`AstId`], which is stable and usable as a map key.
//!
//! Name resolution has already happened upstream: call expressions carry a
//! [`CallKind`] annotation instead of being re-resolved here.

mod defs;
mod expr;
mod stmt;

pub use defs::{
    ContractDefinition, FunctionDefinition, ModifierDefinition, SourceUnit, VariableDeclaration,
};
pub use expr::{
    AssignmentExpr, BinaryExpr, BinaryOp, CallExpr, CallKind, ConditionalExpr, Expression,
    IdentifierExpr, IndexAccessExpr, LiteralExpr, MemberAccessExpr, TupleExpr, UnaryExpr, UnaryOp,
};
pub use stmt::{
    BlockStmt, BreakStmt, ContinueStmt, ExpressionStmt, ForStmt, IfStmt, InlineAssemblyStmt,
    PlaceholderStmt, ReturnStmt, Statement, ThrowStmt, VariableDeclarationStmt, WhileStmt,
};

use serde::Serialize;

/// Stable identity of an AST node, usable as a map key.
///
/// Identities are assigned by the upstream parser/resolver; the flow core
/// only compares and stores them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct AstId(pub u32);

/// Half-open byte range of a node in its source file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    /// Byte offset of the first byte of the node.
    pub start: usize,
    /// Byte offset one past the last byte of the node.
    pub end: usize,
}
