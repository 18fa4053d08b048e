use crate::ast::{
    AstId, BreakStmt, CallExpr, CallKind, ConditionalExpr, ContinueStmt, Expression, ForStmt,
    IfStmt, PlaceholderStmt, ReturnStmt, SourceLocation, Statement, WhileStmt,
};
use crate::cfg::types::PlaceholderCut;
use crate::constants::MAX_RECURSION_DEPTH;

use super::CfgBuilder;

impl CfgBuilder<'_> {
    /// Statement dispatch. Simple statements record their contents into
    /// the current node; control-flow statements delegate to the wiring
    /// rules below.
    pub(super) fn visit_stmt(&mut self, stmt: &Statement) {
        if !self.enter(stmt.loc()) {
            return;
        }
        match stmt {
            Statement::Block(block) => {
                for statement in &block.statements {
                    self.visit_stmt(statement);
                }
            }
            Statement::VariableDeclaration(decl_stmt) => {
                // The initializer runs before the name is bound.
                if let Some(value) = &decl_stmt.initial_value {
                    self.visit_expr(value);
                }
                let declaration = decl_stmt.declaration.id;
                self.block_mut().variable_declarations.push(declaration);
            }
            Statement::Expression(expr_stmt) => self.visit_expr(&expr_stmt.expression),
            Statement::If(if_stmt) => self.visit_if(if_stmt),
            Statement::While(while_stmt) if while_stmt.is_do_while => {
                self.visit_do_while(while_stmt);
            }
            Statement::While(while_stmt) => self.visit_while(while_stmt),
            Statement::For(for_stmt) => self.visit_for(for_stmt),
            Statement::Break(break_stmt) => self.visit_break(break_stmt),
            Statement::Continue(continue_stmt) => self.visit_continue(continue_stmt),
            Statement::Return(return_stmt) => self.visit_return(return_stmt),
            Statement::Throw(_) => {
                self.graph.add_edge(self.current, self.exception_jump);
                self.diverge();
            }
            Statement::Placeholder(placeholder) => self.visit_placeholder(placeholder),
            Statement::InlineAssembly(asm) => {
                let id = asm.id;
                self.block_mut().assembly_statements.push(id);
            }
        }
        self.leave();
    }

    /// Expression dispatch. Subexpressions are visited depth-first in
    /// evaluation order; each expression is recorded after its children,
    /// so block contents read in the order they execute.
    pub(super) fn visit_expr(&mut self, expr: &Expression) {
        if !self.enter(expr.loc()) {
            return;
        }
        match expr {
            Expression::Literal(lit) => self.record_expression(lit.id),
            Expression::Identifier(ident) => self.record_expression(ident.id),
            Expression::Assignment(assign) => {
                // The right-hand side is evaluated first.
                self.visit_expr(&assign.rhs);
                self.visit_expr(&assign.lhs);
                self.record_expression(assign.id);
            }
            Expression::Unary(unary) => {
                self.visit_expr(&unary.operand);
                self.record_expression(unary.id);
            }
            Expression::Binary(binary) if binary.op.is_short_circuit() => {
                self.visit_short_circuit(binary.id, &binary.lhs, &binary.rhs);
            }
            Expression::Binary(binary) => {
                self.visit_expr(&binary.lhs);
                self.visit_expr(&binary.rhs);
                self.record_expression(binary.id);
            }
            Expression::Conditional(conditional) => self.visit_conditional(conditional),
            Expression::Call(call) => self.visit_call(call),
            Expression::MemberAccess(member) => {
                self.visit_expr(&member.object);
                self.record_expression(member.id);
            }
            Expression::IndexAccess(index_access) => {
                self.visit_expr(&index_access.base);
                if let Some(index) = &index_access.index {
                    self.visit_expr(index);
                }
                self.record_expression(index_access.id);
            }
            Expression::Tuple(tuple) => {
                for component in tuple.components.iter().flatten() {
                    self.visit_expr(component);
                }
                self.record_expression(tuple.id);
            }
        }
        self.leave();
    }

    /// `if`: fork the condition node into the branch nodes, traverse each
    /// branch, and reconnect into a merge node, but only from branches
    /// that did not diverge. When both diverge the merge node keeps zero
    /// entries and everything after the conditional is unreachable, which
    /// is exactly how "all paths return" becomes visible as graph shape.
    fn visit_if(&mut self, stmt: &IfStmt) {
        self.visit_expr(&stmt.condition);
        let condition_node = self.current;
        let true_node = self.graph.new_node();
        self.graph.add_edge(condition_node, true_node);

        if let Some(false_body) = &stmt.false_body {
            let false_node = self.graph.new_node();
            self.graph.add_edge(condition_node, false_node);
            let merge = self.graph.new_node();

            self.current = true_node;
            self.diverged = false;
            self.visit_stmt(&stmt.true_body);
            if !self.diverged {
                self.graph.add_edge(self.current, merge);
            }

            self.current = false_node;
            self.diverged = false;
            self.visit_stmt(false_body);
            if !self.diverged {
                self.graph.add_edge(self.current, merge);
            }

            self.current = merge;
            self.diverged = self.graph.node(merge).entries.is_empty();
        } else {
            // Without an explicit false body the merge node doubles as the
            // false branch, so it always stays reachable.
            let merge = self.graph.new_node();
            self.graph.add_edge(condition_node, merge);

            self.current = true_node;
            self.diverged = false;
            self.visit_stmt(&stmt.true_body);
            if !self.diverged {
                self.graph.add_edge(self.current, merge);
            }

            self.current = merge;
            self.diverged = false;
        }
    }

    /// Ternary conditional: same branch/merge shape as `if`, at expression
    /// granularity. The operands are recorded on their branch nodes; the
    /// conditional itself, i.e. the chosen value, lands on the merge node.
    fn visit_conditional(&mut self, expr: &ConditionalExpr) {
        self.visit_expr(&expr.condition);
        let condition_node = self.current;
        let true_node = self.graph.new_node();
        let false_node = self.graph.new_node();
        self.graph.add_edge(condition_node, true_node);
        self.graph.add_edge(condition_node, false_node);
        let merge = self.graph.new_node();

        self.current = true_node;
        self.diverged = false;
        self.visit_expr(&expr.true_expression);
        if !self.diverged {
            self.graph.add_edge(self.current, merge);
        }

        self.current = false_node;
        self.diverged = false;
        self.visit_expr(&expr.false_expression);
        if !self.diverged {
            self.graph.add_edge(self.current, merge);
        }

        self.current = merge;
        self.diverged = self.graph.node(merge).entries.is_empty();
        self.record_expression(expr.id);
    }

    /// Short-circuit `&&`/`||`: after the left operand the flow forks into
    /// a node evaluating the right operand and a direct edge to the merge
    /// node for the skipping path. Side effects of the right operand are
    /// thereby visible as conditional to later analyses.
    fn visit_short_circuit(&mut self, id: AstId, lhs: &Expression, rhs: &Expression) {
        self.visit_expr(lhs);
        let fork = self.current;
        let rhs_node = self.graph.new_node();
        let merge = self.graph.new_node();
        self.graph.add_edge(fork, rhs_node);
        self.graph.add_edge(fork, merge);

        self.current = rhs_node;
        self.diverged = false;
        self.visit_expr(rhs);
        if !self.diverged {
            self.graph.add_edge(self.current, merge);
        }

        self.current = merge;
        self.diverged = false;
        self.record_expression(id);
    }

    /// `while`: condition node, loop-exit node (the `break` target) and
    /// the condition itself as `continue` target. The body's terminal node
    /// closes the back edge unless it diverged.
    fn visit_while(&mut self, stmt: &WhileStmt) {
        let condition_start = self.graph.new_node();
        self.graph.add_edge(self.current, condition_start);
        self.current = condition_start;
        self.diverged = false;
        self.visit_expr(&stmt.condition);
        let condition_end = self.current;

        let body_node = self.graph.new_node();
        let exit_node = self.graph.new_node();
        self.graph.add_edge(condition_end, body_node);
        self.graph.add_edge(condition_end, exit_node);

        self.break_jumps.push(exit_node);
        self.continue_jumps.push(condition_start);

        self.current = body_node;
        self.diverged = false;
        self.visit_stmt(&stmt.body);
        if !self.diverged {
            self.graph.add_edge(self.current, condition_start);
        }

        self.break_jumps.pop();
        self.continue_jumps.pop();

        self.current = exit_node;
        self.diverged = false;
    }

    /// `do`/`while`: the body runs unconditionally first; the condition
    /// node after it is the `continue` target and closes the back edge.
    fn visit_do_while(&mut self, stmt: &WhileStmt) {
        let body_node = self.graph.new_node();
        self.graph.add_edge(self.current, body_node);
        let condition_start = self.graph.new_node();
        let exit_node = self.graph.new_node();

        self.break_jumps.push(exit_node);
        self.continue_jumps.push(condition_start);

        self.current = body_node;
        self.diverged = false;
        self.visit_stmt(&stmt.body);
        if !self.diverged {
            self.graph.add_edge(self.current, condition_start);
        }

        self.break_jumps.pop();
        self.continue_jumps.pop();

        self.current = condition_start;
        self.diverged = false;
        self.visit_expr(&stmt.condition);
        self.graph.add_edge(self.current, body_node);
        self.graph.add_edge(self.current, exit_node);

        self.current = exit_node;
        self.diverged = false;
    }

    /// `for`: like `while`, with a separate continuation node for the loop
    /// expression as `continue` target. The false edge from the condition
    /// node is created even for `for (;;)`.
    fn visit_for(&mut self, stmt: &ForStmt) {
        if let Some(init) = &stmt.init {
            self.visit_stmt(init);
        }

        let condition_start = self.graph.new_node();
        self.graph.add_edge(self.current, condition_start);
        self.current = condition_start;
        self.diverged = false;
        if let Some(condition) = &stmt.condition {
            self.visit_expr(condition);
        }
        let condition_end = self.current;

        let body_node = self.graph.new_node();
        let exit_node = self.graph.new_node();
        let increment_node = self.graph.new_node();
        self.graph.add_edge(condition_end, body_node);
        self.graph.add_edge(condition_end, exit_node);

        self.break_jumps.push(exit_node);
        self.continue_jumps.push(increment_node);

        self.current = body_node;
        self.diverged = false;
        self.visit_stmt(&stmt.body);
        if !self.diverged {
            self.graph.add_edge(self.current, increment_node);
        }

        self.break_jumps.pop();
        self.continue_jumps.pop();

        self.current = increment_node;
        self.diverged = false;
        if let Some(loop_expression) = &stmt.loop_expression {
            self.visit_expr(loop_expression);
        }
        if !self.diverged {
            self.graph.add_edge(self.current, condition_start);
        }

        self.current = exit_node;
        self.diverged = false;
    }

    fn visit_break(&mut self, stmt: &BreakStmt) {
        let Some(&target) = self.break_jumps.last() else {
            self.sink.error(stmt.loc, "\"break\" outside of a loop");
            return;
        };
        self.graph.add_edge(self.current, target);
        self.diverge();
    }

    fn visit_continue(&mut self, stmt: &ContinueStmt) {
        let Some(&target) = self.continue_jumps.last() else {
            self.sink.error(stmt.loc, "\"continue\" outside of a loop");
            return;
        };
        self.graph.add_edge(self.current, target);
        self.diverge();
    }

    fn visit_return(&mut self, stmt: &ReturnStmt) {
        if let Some(expression) = &stmt.expression {
            self.visit_expr(expression);
        }
        if self.block_mut().return_statement.is_some() {
            // A block terminated by a return cannot receive a second one;
            // report instead of corrupting the marker.
            self.sink
                .error(stmt.loc, "control flow block is already terminated");
            return;
        }
        self.block_mut().return_statement = Some(stmt.id);
        self.graph.add_edge(self.current, self.return_jump);
        self.diverge();
    }

    /// Placeholder: record a cut between the current node and a fresh
    /// after-node, deliberately left unconnected. The linking phase later
    /// splices the wrapped subprogram's anchors into the gap.
    fn visit_placeholder(&mut self, stmt: &PlaceholderStmt) {
        if self.placeholders.is_none() {
            self.sink
                .error(stmt.loc, "placeholder statement outside of a modifier");
            return;
        }
        let before = self.current;
        let after = self.graph.new_node();
        if let Some(cuts) = &mut self.placeholders {
            cuts.push(PlaceholderCut { before, after });
        }
        self.current = after;
        self.diverged = false;
    }

    /// Calls are recorded like any other expression; calls that can abort
    /// at runtime additionally fan out to the exception anchor. `revert`
    /// aborts unconditionally and diverges instead.
    fn visit_call(&mut self, call: &CallExpr) {
        self.visit_expr(&call.callee);
        for argument in &call.arguments {
            self.visit_expr(argument);
        }
        self.record_expression(call.id);

        if call.kind == CallKind::Revert {
            self.graph.add_edge(self.current, self.exception_jump);
            self.diverge();
        } else if self.graph.config.may_fail(call.kind) {
            // Two exits: the failure path to the exception anchor and the
            // normal continuation, regardless of how the call's result is
            // used afterwards.
            self.graph.add_edge(self.current, self.exception_jump);
            let next = self.graph.new_node();
            self.graph.add_edge(self.current, next);
            self.current = next;
        }
    }

    fn record_expression(&mut self, id: AstId) {
        self.block_mut().expressions.push(id);
    }

    /// Depth guard shared by statement and expression dispatch. Reports
    /// once and cuts the traversal short instead of overflowing the stack.
    fn enter(&mut self, loc: SourceLocation) -> bool {
        if self.depth >= MAX_RECURSION_DEPTH {
            if !self.recursion_limit_hit {
                self.recursion_limit_hit = true;
                self.sink
                    .error(loc, "nesting too deep; control flow not fully analyzed");
            }
            return false;
        }
        self.depth += 1;
        true
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }
}
