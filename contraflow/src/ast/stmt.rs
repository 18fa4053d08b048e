#![allow(missing_docs)]

use compact_str::CompactString;

use super::{AstId, Expression, SourceLocation, VariableDeclaration};

/// A statement node.
#[derive(Debug, Clone)]
pub enum Statement {
    Block(BlockStmt),
    VariableDeclaration(VariableDeclarationStmt),
    Expression(ExpressionStmt),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    Break(BreakStmt),
    Continue(ContinueStmt),
    Return(ReturnStmt),
    Throw(ThrowStmt),
    Placeholder(PlaceholderStmt),
    InlineAssembly(InlineAssemblyStmt),
}

impl Statement {
    /// Stable identity of this statement.
    #[must_use]
    pub fn id(&self) -> AstId {
        match self {
            Self::Block(s) => s.id,
            Self::VariableDeclaration(s) => s.id,
            Self::Expression(s) => s.id,
            Self::If(s) => s.id,
            Self::While(s) => s.id,
            Self::For(s) => s.id,
            Self::Break(s) => s.id,
            Self::Continue(s) => s.id,
            Self::Return(s) => s.id,
            Self::Throw(s) => s.id,
            Self::Placeholder(s) => s.id,
            Self::InlineAssembly(s) => s.id,
        }
    }

    /// Source span of this statement.
    #[must_use]
    pub fn loc(&self) -> SourceLocation {
        match self {
            Self::Block(s) => s.loc,
            Self::VariableDeclaration(s) => s.loc,
            Self::Expression(s) => s.loc,
            Self::If(s) => s.loc,
            Self::While(s) => s.loc,
            Self::For(s) => s.loc,
            Self::Break(s) => s.loc,
            Self::Continue(s) => s.loc,
            Self::Return(s) => s.loc,
            Self::Throw(s) => s.loc,
            Self::Placeholder(s) => s.loc,
            Self::InlineAssembly(s) => s.loc,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BlockStmt {
    pub id: AstId,
    pub loc: SourceLocation,
    pub statements: Vec<Statement>,
}

/// `var x = value;`: declares exactly one variable, optionally initialized.
#[derive(Debug, Clone)]
pub struct VariableDeclarationStmt {
    pub id: AstId,
    pub loc: SourceLocation,
    pub declaration: VariableDeclaration,
    pub initial_value: Option<Expression>,
}

#[derive(Debug, Clone)]
pub struct ExpressionStmt {
    pub id: AstId,
    pub loc: SourceLocation,
    pub expression: Expression,
}

#[derive(Debug, Clone)]
pub struct IfStmt {
    pub id: AstId,
    pub loc: SourceLocation,
    pub condition: Expression,
    pub true_body: Box<Statement>,
    pub false_body: Option<Box<Statement>>,
}

/// `while` and `do`/`while` loops share a node; `is_do_while` selects the
/// body-first wiring.
#[derive(Debug, Clone)]
pub struct WhileStmt {
    pub id: AstId,
    pub loc: SourceLocation,
    pub condition: Expression,
    pub body: Box<Statement>,
    pub is_do_while: bool,
}

/// `for` loop; all three header slots are optional.
#[derive(Debug, Clone)]
pub struct ForStmt {
    pub id: AstId,
    pub loc: SourceLocation,
    pub init: Option<Box<Statement>>,
    pub condition: Option<Expression>,
    pub loop_expression: Option<Expression>,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone)]
pub struct BreakStmt {
    pub id: AstId,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone)]
pub struct ContinueStmt {
    pub id: AstId,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone)]
pub struct ReturnStmt {
    pub id: AstId,
    pub loc: SourceLocation,
    pub expression: Option<Expression>,
}

/// Legacy unconditional abort statement.
#[derive(Debug, Clone)]
pub struct ThrowStmt {
    pub id: AstId,
    pub loc: SourceLocation,
}

/// The `_` marker inside a modifier body where the wrapped subprogram is
/// spliced in by the linking phase.
#[derive(Debug, Clone)]
pub struct PlaceholderStmt {
    pub id: AstId,
    pub loc: SourceLocation,
}

/// Opaque inline-assembly block; recorded but never wired.
#[derive(Debug, Clone)]
pub struct InlineAssemblyStmt {
    pub id: AstId,
    pub loc: SourceLocation,
    pub text: CompactString,
}
