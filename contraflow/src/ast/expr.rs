#![allow(missing_docs)]

use compact_str::CompactString;

use super::{AstId, SourceLocation};

/// An expression node. Wrapper enum over per-kind structs so call sites can
/// match on the kind and still pass typed nodes around.
#[derive(Debug, Clone)]
pub enum Expression {
    Literal(LiteralExpr),
    Identifier(IdentifierExpr),
    Assignment(AssignmentExpr),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    Conditional(ConditionalExpr),
    Call(CallExpr),
    MemberAccess(MemberAccessExpr),
    IndexAccess(IndexAccessExpr),
    Tuple(TupleExpr),
}

impl Expression {
    /// Stable identity of this expression.
    #[must_use]
    pub fn id(&self) -> AstId {
        match self {
            Self::Literal(e) => e.id,
            Self::Identifier(e) => e.id,
            Self::Assignment(e) => e.id,
            Self::Unary(e) => e.id,
            Self::Binary(e) => e.id,
            Self::Conditional(e) => e.id,
            Self::Call(e) => e.id,
            Self::MemberAccess(e) => e.id,
            Self::IndexAccess(e) => e.id,
            Self::Tuple(e) => e.id,
        }
    }

    /// Source span of this expression.
    #[must_use]
    pub fn loc(&self) -> SourceLocation {
        match self {
            Self::Literal(e) => e.loc,
            Self::Identifier(e) => e.loc,
            Self::Assignment(e) => e.loc,
            Self::Unary(e) => e.loc,
            Self::Binary(e) => e.loc,
            Self::Conditional(e) => e.loc,
            Self::Call(e) => e.loc,
            Self::MemberAccess(e) => e.loc,
            Self::IndexAccess(e) => e.loc,
            Self::Tuple(e) => e.loc,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LiteralExpr {
    pub id: AstId,
    pub loc: SourceLocation,
    /// Token text of the literal.
    pub value: CompactString,
}

#[derive(Debug, Clone)]
pub struct IdentifierExpr {
    pub id: AstId,
    pub loc: SourceLocation,
    pub name: CompactString,
    /// Declaration this identifier was resolved to, if any.
    pub referenced_declaration: Option<AstId>,
}

#[derive(Debug, Clone)]
pub struct AssignmentExpr {
    pub id: AstId,
    pub loc: SourceLocation,
    pub lhs: Box<Expression>,
    pub rhs: Box<Expression>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Negate,
    BitNot,
    Increment,
    Decrement,
    Delete,
}

#[derive(Debug, Clone)]
pub struct UnaryExpr {
    pub id: AstId,
    pub loc: SourceLocation,
    pub op: UnaryOp,
    pub operand: Box<Expression>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    BitAnd,
    BitOr,
    BitXor,
    ShiftLeft,
    ShiftRight,
    /// Short-circuit logical AND.
    And,
    /// Short-circuit logical OR.
    Or,
}

impl BinaryOp {
    /// Whether the right operand is evaluated conditionally.
    #[must_use]
    pub fn is_short_circuit(self) -> bool {
        matches!(self, Self::And | Self::Or)
    }
}

#[derive(Debug, Clone)]
pub struct BinaryExpr {
    pub id: AstId,
    pub loc: SourceLocation,
    pub op: BinaryOp,
    pub lhs: Box<Expression>,
    pub rhs: Box<Expression>,
}

/// Ternary conditional, `condition ? true_expression : false_expression`.
#[derive(Debug, Clone)]
pub struct ConditionalExpr {
    pub id: AstId,
    pub loc: SourceLocation,
    pub condition: Box<Expression>,
    pub true_expression: Box<Expression>,
    pub false_expression: Box<Expression>,
}

/// Call classification filled in by the upstream resolver.
///
/// The flow core never resolves callees itself; this annotation is the only
/// thing it needs to know about a call target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    /// Same-contract call; cannot abort the caller on its own.
    Internal,
    /// Cross-contract or low-level call; may abort depending on policy.
    External,
    /// `require(...)`: continues on success, aborts otherwise.
    Require,
    /// `assert(...)`: continues on success, aborts otherwise.
    Assert,
    /// `revert(...)`: unconditionally aborts execution.
    Revert,
}

#[derive(Debug, Clone)]
pub struct CallExpr {
    pub id: AstId,
    pub loc: SourceLocation,
    pub callee: Box<Expression>,
    pub arguments: Vec<Expression>,
    pub kind: CallKind,
}

#[derive(Debug, Clone)]
pub struct MemberAccessExpr {
    pub id: AstId,
    pub loc: SourceLocation,
    pub object: Box<Expression>,
    pub member: CompactString,
}

#[derive(Debug, Clone)]
pub struct IndexAccessExpr {
    pub id: AstId,
    pub loc: SourceLocation,
    pub base: Box<Expression>,
    /// Absent for type-level uses such as `uint[]`.
    pub index: Option<Box<Expression>>,
}

/// Tuple expression; components may be empty holes, as in `(a, , b)`.
#[derive(Debug, Clone)]
pub struct TupleExpr {
    pub id: AstId,
    pub loc: SourceLocation,
    pub components: Vec<Option<Expression>>,
}
