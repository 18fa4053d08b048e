use compact_str::CompactString;

use super::{AstId, BlockStmt, SourceLocation};

/// A named variable declaration (parameter, return value, or local).
#[derive(Debug, Clone)]
pub struct VariableDeclaration {
    /// Stable identity.
    pub id: AstId,
    /// Source span.
    pub loc: SourceLocation,
    /// Declared name; may be empty for unnamed return values.
    pub name: CompactString,
}

/// A function definition.
///
/// Functions without a body (interface members, abstract declarations) are
/// valid input; no flow is constructed for them.
#[derive(Debug, Clone)]
pub struct FunctionDefinition {
    /// Stable identity; the key under which the flow is registered.
    pub id: AstId,
    /// Source span.
    pub loc: SourceLocation,
    /// Function name; empty for the fallback function.
    pub name: CompactString,
    /// Declared parameters.
    pub parameters: Vec<VariableDeclaration>,
    /// Declared return values.
    pub returns: Vec<VariableDeclaration>,
    /// Body, absent for unimplemented functions.
    pub body: Option<BlockStmt>,
}

/// A modifier definition. Its body contains placeholder statements marking
/// where the wrapped subprogram executes.
#[derive(Debug, Clone)]
pub struct ModifierDefinition {
    /// Stable identity; the key under which the flow is registered.
    pub id: AstId,
    /// Source span.
    pub loc: SourceLocation,
    /// Modifier name.
    pub name: CompactString,
    /// Declared parameters.
    pub parameters: Vec<VariableDeclaration>,
    /// Modifier body.
    pub body: BlockStmt,
}

/// A contract definition holding the subprograms flow is built for.
#[derive(Debug, Clone)]
pub struct ContractDefinition {
    /// Stable identity.
    pub id: AstId,
    /// Source span.
    pub loc: SourceLocation,
    /// Contract name.
    pub name: CompactString,
    /// Function definitions in source order.
    pub functions: Vec<FunctionDefinition>,
    /// Modifier definitions in source order.
    pub modifiers: Vec<ModifierDefinition>,
}

/// Root of one compilation unit.
#[derive(Debug, Clone, Default)]
pub struct SourceUnit {
    /// Contract definitions in source order.
    pub contracts: Vec<ContractDefinition>,
}
