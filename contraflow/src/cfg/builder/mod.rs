mod visits;

use smallvec::SmallVec;

use crate::ast::{BlockStmt, FunctionDefinition, ModifierDefinition, SourceUnit};
use crate::diagnostics::DiagnosticSink;

use super::graph::Cfg;
use super::types::{ControlFlowBlock, FunctionFlow, ModifierFlow, NodeId, PlaceholderCut};

/// Traversal engine constructing control flow into a [`Cfg`].
///
/// Walks the AST once. All fields below `sink` are per-subprogram state:
/// they are reset when a function or modifier definition is entered and
/// restored stack-like when traversal returns to the enclosing context.
pub(super) struct CfgBuilder<'a> {
    graph: &'a mut Cfg,
    sink: &'a mut DiagnosticSink,
    /// Node newly visited constructs attach to. After a divergence this is
    /// a fresh node nothing flows into, so trailing code is recorded but
    /// stays disconnected. Only meaningful while a subprogram is built.
    current: NodeId,
    /// Whether the current lexical position is past a divergence point.
    diverged: bool,
    /// The current subprogram's exit anchor.
    return_jump: NodeId,
    /// The current subprogram's exception anchor.
    exception_jump: NodeId,
    /// Jump targets for `break`, one frame per enclosing loop.
    break_jumps: SmallVec<[NodeId; 4]>,
    /// Jump targets for `continue`, one frame per enclosing loop.
    continue_jumps: SmallVec<[NodeId; 4]>,
    /// Placeholder cuts collected so far; `Some` only inside a modifier.
    placeholders: Option<Vec<PlaceholderCut>>,
    /// Current traversal depth, shared between statements and expressions.
    depth: usize,
    /// Whether the depth limit diagnostic has already been reported.
    recursion_limit_hit: bool,
}

impl<'a> CfgBuilder<'a> {
    pub(super) fn new(graph: &'a mut Cfg, sink: &'a mut DiagnosticSink) -> Self {
        let current = NodeId(0);
        Self {
            graph,
            sink,
            current,
            diverged: false,
            return_jump: current,
            exception_jump: current,
            break_jumps: SmallVec::new(),
            continue_jumps: SmallVec::new(),
            placeholders: None,
            depth: 0,
            recursion_limit_hit: false,
        }
    }

    pub(super) fn visit_source_unit(&mut self, unit: &SourceUnit) {
        for contract in &unit.contracts {
            for modifier in &contract.modifiers {
                self.visit_modifier(modifier);
            }
            for function in &contract.functions {
                self.visit_function(function);
            }
        }
    }

    /// Builds the flow of one function. Functions without a body are
    /// skipped entirely; nothing is registered for them.
    fn visit_function(&mut self, function: &FunctionDefinition) {
        let Some(body) = &function.body else { return };
        let (flow, _) = self.build_subprogram(body, false);
        self.graph.function_flows.insert(function.id, flow);
    }

    /// Builds the flow of one modifier, collecting placeholder cuts.
    fn visit_modifier(&mut self, modifier: &ModifierDefinition) {
        let (flow, cuts) = self.build_subprogram(&modifier.body, true);
        self.graph.modifier_flows.insert(
            modifier.id,
            ModifierFlow {
                flow,
                placeholders: cuts.unwrap_or_default(),
            },
        );
    }

    /// Allocates the anchor triple, traverses `body` with fresh
    /// per-subprogram state, and wires the implicit fallthrough to the
    /// exit anchor. The enclosing state is restored before returning.
    fn build_subprogram(
        &mut self,
        body: &BlockStmt,
        collect_placeholders: bool,
    ) -> (FunctionFlow, Option<Vec<PlaceholderCut>>) {
        let entry = self.graph.new_node();
        let exit = self.graph.new_node();
        let exception = self.graph.new_node();

        let saved_current = self.current;
        let saved_diverged = self.diverged;
        let saved_return = self.return_jump;
        let saved_exception = self.exception_jump;
        let saved_breaks = std::mem::take(&mut self.break_jumps);
        let saved_continues = std::mem::take(&mut self.continue_jumps);
        let saved_placeholders = self.placeholders.take();

        self.return_jump = exit;
        self.exception_jump = exception;
        self.placeholders = collect_placeholders.then(Vec::new);

        let first = self.graph.new_node();
        self.graph.add_edge(entry, first);
        self.current = first;
        self.diverged = false;

        for statement in &body.statements {
            self.visit_stmt(statement);
        }
        // Implicit valueless return at the end of the body.
        if !self.diverged {
            self.graph.add_edge(self.current, exit);
        }

        let cuts = self.placeholders.take();

        self.current = saved_current;
        self.diverged = saved_diverged;
        self.return_jump = saved_return;
        self.exception_jump = saved_exception;
        self.break_jumps = saved_breaks;
        self.continue_jumps = saved_continues;
        self.placeholders = saved_placeholders;

        (
            FunctionFlow {
                entry,
                exit,
                exception,
            },
            cuts,
        )
    }

    /// The block of the node under construction.
    fn block_mut(&mut self) -> &mut ControlFlowBlock {
        &mut self.graph.nodes[self.current.index()].block
    }

    /// Marks the current lexical position as unreachable: subsequent
    /// content is recorded into a fresh node nothing flows into.
    fn diverge(&mut self) {
        self.current = self.graph.new_node();
        self.diverged = true;
    }
}
