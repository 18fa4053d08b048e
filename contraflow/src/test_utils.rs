//! AST fixture helpers shared by the test suite.
//!
//! Parsing and name resolution are upstream concerns, so tests build the
//! resolved tree programmatically. [`AstBuilder`] hands out fresh ids and
//! synthetic source spans so every node keeps a distinct identity, the way
//! a real resolver would.

use compact_str::CompactString;

use crate::ast::{
    AssignmentExpr, AstId, BinaryExpr, BinaryOp, BlockStmt, BreakStmt, CallExpr, CallKind,
    ConditionalExpr, ContinueStmt, ContractDefinition, Expression, ExpressionStmt, ForStmt,
    FunctionDefinition, IdentifierExpr, IfStmt, IndexAccessExpr, InlineAssemblyStmt, LiteralExpr,
    MemberAccessExpr, ModifierDefinition, PlaceholderStmt, ReturnStmt, SourceLocation, SourceUnit,
    Statement, ThrowStmt, TupleExpr, UnaryExpr, UnaryOp, VariableDeclaration,
    VariableDeclarationStmt, WhileStmt,
};
use crate::cfg::{Cfg, FunctionFlow, NodeId};

/// Builds AST fixtures with fresh ids and source spans.
#[derive(Debug, Default)]
pub struct AstBuilder {
    next_id: u32,
    next_offset: usize,
}

impl AstBuilder {
    /// Creates a builder starting at id 0 and offset 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn next(&mut self) -> (AstId, SourceLocation) {
        let id = AstId(self.next_id);
        self.next_id += 1;
        let loc = SourceLocation {
            start: self.next_offset,
            end: self.next_offset + 1,
        };
        self.next_offset += 2;
        (id, loc)
    }

    /// An identifier expression, unresolved.
    pub fn identifier(&mut self, name: &str) -> Expression {
        let (id, loc) = self.next();
        Expression::Identifier(IdentifierExpr {
            id,
            loc,
            name: CompactString::new(name),
            referenced_declaration: None,
        })
    }

    /// A number literal expression.
    pub fn number(&mut self, value: &str) -> Expression {
        let (id, loc) = self.next();
        Expression::Literal(LiteralExpr {
            id,
            loc,
            value: CompactString::new(value),
        })
    }

    /// An assignment expression.
    pub fn assign(&mut self, lhs: Expression, rhs: Expression) -> Expression {
        let (id, loc) = self.next();
        Expression::Assignment(AssignmentExpr {
            id,
            loc,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
    }

    /// A binary expression with the given operator.
    pub fn binary(&mut self, op: BinaryOp, lhs: Expression, rhs: Expression) -> Expression {
        let (id, loc) = self.next();
        Expression::Binary(BinaryExpr {
            id,
            loc,
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
    }

    /// Short-circuit `lhs && rhs`.
    pub fn and(&mut self, lhs: Expression, rhs: Expression) -> Expression {
        self.binary(BinaryOp::And, lhs, rhs)
    }

    /// Short-circuit `lhs || rhs`.
    pub fn or(&mut self, lhs: Expression, rhs: Expression) -> Expression {
        self.binary(BinaryOp::Or, lhs, rhs)
    }

    /// Logical negation.
    pub fn not(&mut self, operand: Expression) -> Expression {
        let (id, loc) = self.next();
        Expression::Unary(UnaryExpr {
            id,
            loc,
            op: UnaryOp::Not,
            operand: Box::new(operand),
        })
    }

    /// Ternary `condition ? true_expression : false_expression`.
    pub fn ternary(
        &mut self,
        condition: Expression,
        true_expression: Expression,
        false_expression: Expression,
    ) -> Expression {
        let (id, loc) = self.next();
        Expression::Conditional(ConditionalExpr {
            id,
            loc,
            condition: Box::new(condition),
            true_expression: Box::new(true_expression),
            false_expression: Box::new(false_expression),
        })
    }

    /// Member access `object.member`.
    pub fn member_access(&mut self, object: Expression, member: &str) -> Expression {
        let (id, loc) = self.next();
        Expression::MemberAccess(MemberAccessExpr {
            id,
            loc,
            object: Box::new(object),
            member: CompactString::new(member),
        })
    }

    /// Index access `base[index]`.
    pub fn index_access(&mut self, base: Expression, index: Option<Expression>) -> Expression {
        let (id, loc) = self.next();
        Expression::IndexAccess(IndexAccessExpr {
            id,
            loc,
            base: Box::new(base),
            index: index.map(Box::new),
        })
    }

    /// Tuple expression; `None` components are holes.
    pub fn tuple(&mut self, components: Vec<Option<Expression>>) -> Expression {
        let (id, loc) = self.next();
        Expression::Tuple(TupleExpr {
            id,
            loc,
            components,
        })
    }

    /// A call to a named target with the given resolved kind.
    pub fn call(&mut self, kind: CallKind, name: &str, arguments: Vec<Expression>) -> Expression {
        let callee = self.identifier(name);
        let (id, loc) = self.next();
        Expression::Call(CallExpr {
            id,
            loc,
            callee: Box::new(callee),
            arguments,
            kind,
        })
    }

    /// An internal (same-contract) call.
    pub fn internal_call(&mut self, name: &str, arguments: Vec<Expression>) -> Expression {
        self.call(CallKind::Internal, name, arguments)
    }

    /// An external call.
    pub fn external_call(&mut self, name: &str, arguments: Vec<Expression>) -> Expression {
        self.call(CallKind::External, name, arguments)
    }

    /// `require(condition)`.
    pub fn require(&mut self, condition: Expression) -> Expression {
        self.call(CallKind::Require, "require", vec![condition])
    }

    /// `assert(condition)`.
    pub fn assert_call(&mut self, condition: Expression) -> Expression {
        self.call(CallKind::Assert, "assert", vec![condition])
    }

    /// `revert()`.
    pub fn revert_call(&mut self) -> Expression {
        self.call(CallKind::Revert, "revert", vec![])
    }

    /// Wraps an expression into a statement.
    pub fn expr_stmt(&mut self, expression: Expression) -> Statement {
        let (id, loc) = self.next();
        Statement::Expression(ExpressionStmt {
            id,
            loc,
            expression,
        })
    }

    /// `var name = initial_value;`
    pub fn var_decl(&mut self, name: &str, initial_value: Option<Expression>) -> Statement {
        let (decl_id, decl_loc) = self.next();
        let declaration = VariableDeclaration {
            id: decl_id,
            loc: decl_loc,
            name: CompactString::new(name),
        };
        let (id, loc) = self.next();
        Statement::VariableDeclaration(VariableDeclarationStmt {
            id,
            loc,
            declaration,
            initial_value,
        })
    }

    /// `return expression;`
    pub fn ret(&mut self, expression: Option<Expression>) -> Statement {
        let (id, loc) = self.next();
        Statement::Return(ReturnStmt {
            id,
            loc,
            expression,
        })
    }

    /// `break;`
    pub fn break_stmt(&mut self) -> Statement {
        let (id, loc) = self.next();
        Statement::Break(BreakStmt { id, loc })
    }

    /// `continue;`
    pub fn continue_stmt(&mut self) -> Statement {
        let (id, loc) = self.next();
        Statement::Continue(ContinueStmt { id, loc })
    }

    /// `throw;`
    pub fn throw_stmt(&mut self) -> Statement {
        let (id, loc) = self.next();
        Statement::Throw(ThrowStmt { id, loc })
    }

    /// The `_` placeholder statement.
    pub fn placeholder(&mut self) -> Statement {
        let (id, loc) = self.next();
        Statement::Placeholder(PlaceholderStmt { id, loc })
    }

    /// An inline assembly statement.
    pub fn asm(&mut self, text: &str) -> Statement {
        let (id, loc) = self.next();
        Statement::InlineAssembly(InlineAssemblyStmt {
            id,
            loc,
            text: CompactString::new(text),
        })
    }

    /// A block statement.
    pub fn block(&mut self, statements: Vec<Statement>) -> BlockStmt {
        let (id, loc) = self.next();
        BlockStmt {
            id,
            loc,
            statements,
        }
    }

    /// `if (condition) { ... } else { ... }`; bodies are given as statement
    /// lists and wrapped into blocks.
    pub fn if_stmt(
        &mut self,
        condition: Expression,
        true_body: Vec<Statement>,
        false_body: Option<Vec<Statement>>,
    ) -> Statement {
        let true_block = Statement::Block(self.block(true_body));
        let false_block = false_body.map(|body| Box::new(Statement::Block(self.block(body))));
        let (id, loc) = self.next();
        Statement::If(IfStmt {
            id,
            loc,
            condition,
            true_body: Box::new(true_block),
            false_body: false_block,
        })
    }

    /// `while (condition) { ... }`
    pub fn while_stmt(&mut self, condition: Expression, body: Vec<Statement>) -> Statement {
        let body_block = Statement::Block(self.block(body));
        let (id, loc) = self.next();
        Statement::While(WhileStmt {
            id,
            loc,
            condition,
            body: Box::new(body_block),
            is_do_while: false,
        })
    }

    /// `do { ... } while (condition);`
    pub fn do_while_stmt(&mut self, condition: Expression, body: Vec<Statement>) -> Statement {
        let body_block = Statement::Block(self.block(body));
        let (id, loc) = self.next();
        Statement::While(WhileStmt {
            id,
            loc,
            condition,
            body: Box::new(body_block),
            is_do_while: true,
        })
    }

    /// `for (init; condition; loop_expression) { ... }`
    pub fn for_stmt(
        &mut self,
        init: Option<Statement>,
        condition: Option<Expression>,
        loop_expression: Option<Expression>,
        body: Vec<Statement>,
    ) -> Statement {
        let body_block = Statement::Block(self.block(body));
        let (id, loc) = self.next();
        Statement::For(ForStmt {
            id,
            loc,
            init: init.map(Box::new),
            condition,
            loop_expression,
            body: Box::new(body_block),
        })
    }

    /// An implemented function with the given body statements.
    pub fn function(&mut self, name: &str, body: Vec<Statement>) -> FunctionDefinition {
        let body_block = self.block(body);
        let (id, loc) = self.next();
        FunctionDefinition {
            id,
            loc,
            name: CompactString::new(name),
            parameters: vec![],
            returns: vec![],
            body: Some(body_block),
        }
    }

    /// A function declaration without a body.
    pub fn function_decl(&mut self, name: &str) -> FunctionDefinition {
        let (id, loc) = self.next();
        FunctionDefinition {
            id,
            loc,
            name: CompactString::new(name),
            parameters: vec![],
            returns: vec![],
            body: None,
        }
    }

    /// A modifier with the given body statements.
    pub fn modifier(&mut self, name: &str, body: Vec<Statement>) -> ModifierDefinition {
        let body_block = self.block(body);
        let (id, loc) = self.next();
        ModifierDefinition {
            id,
            loc,
            name: CompactString::new(name),
            parameters: vec![],
            body: body_block,
        }
    }

    /// A contract definition.
    pub fn contract(
        &mut self,
        name: &str,
        functions: Vec<FunctionDefinition>,
        modifiers: Vec<ModifierDefinition>,
    ) -> ContractDefinition {
        let (id, loc) = self.next();
        ContractDefinition {
            id,
            loc,
            name: CompactString::new(name),
            functions,
            modifiers,
        }
    }

    /// A source unit holding the given contracts.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn unit(&mut self, contracts: Vec<ContractDefinition>) -> SourceUnit {
        SourceUnit { contracts }
    }
}

/// Asserts the paired-edge invariant over the whole graph: a node is in
/// another's `exits` exactly when the other is in its `entries`.
pub fn assert_edge_symmetry(cfg: &Cfg) {
    for (id, node) in cfg.nodes() {
        for &successor in &node.exits {
            assert!(
                cfg.node(successor).entries.contains(&id),
                "edge {id:?} -> {successor:?} missing its entry half"
            );
        }
        for &predecessor in &node.entries {
            assert!(
                cfg.node(predecessor).exits.contains(&id),
                "edge {predecessor:?} -> {id:?} missing its exit half"
            );
        }
    }
}

/// Asserts the anchor-shape invariant of one subprogram flow: the entry has
/// no entries, and neither exit anchor has exits.
pub fn assert_anchor_shape(cfg: &Cfg, flow: &FunctionFlow) {
    assert!(
        cfg.node(flow.entry).entries.is_empty(),
        "entry anchor must not have entries"
    );
    assert_eq!(
        cfg.node(flow.entry).exits.len(),
        1,
        "entry anchor must have exactly one exit"
    );
    assert!(
        cfg.node(flow.exit).exits.is_empty(),
        "exit anchor must not have exits"
    );
    assert!(
        cfg.node(flow.exception).exits.is_empty(),
        "exception anchor must not have exits"
    );
}

/// The single node whose block records the given expression.
#[allow(clippy::panic)]
pub fn find_node_with_expression(cfg: &Cfg, id: AstId) -> NodeId {
    let mut found = None;
    for (node_id, node) in cfg.nodes() {
        if node.block.expressions.contains(&id) {
            assert!(
                found.is_none(),
                "expression {id:?} recorded in more than one node"
            );
            found = Some(node_id);
        }
    }
    match found {
        Some(node_id) => node_id,
        None => panic!("expression {id:?} not recorded in any node"),
    }
}
