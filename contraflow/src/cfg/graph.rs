use std::fmt::Write as _;

use rustc_hash::FxHashMap;

use crate::ast::{AstId, FunctionDefinition, ModifierDefinition, SourceUnit};
use crate::config::FlowConfig;
use crate::diagnostics::DiagnosticSink;

use super::builder::CfgBuilder;
use super::types::{CfgNode, FunctionFlow, ModifierFlow, NodeId};

/// The control-flow graph of a compilation unit.
///
/// Owns the node arena exclusively and the per-subprogram flow tables.
/// Construction mutates it through [`Cfg::construct_flow`]; afterwards the
/// graph is read-only and may be shared freely between analyses.
#[derive(Debug, Default)]
pub struct Cfg {
    pub(super) nodes: Vec<CfgNode>,
    pub(super) function_flows: FxHashMap<AstId, FunctionFlow>,
    pub(super) modifier_flows: FxHashMap<AstId, ModifierFlow>,
    pub(super) config: FlowConfig,
}

impl Cfg {
    /// Creates an empty graph with the given construction policy.
    #[must_use]
    pub fn new(config: FlowConfig) -> Self {
        Self {
            nodes: Vec::new(),
            function_flows: FxHashMap::default(),
            modifier_flows: FxHashMap::default(),
            config,
        }
    }

    /// Builds control flow for every implemented function and modifier
    /// reachable from `root`.
    ///
    /// Recoverable problems are reported into `sink` and construction
    /// continues past them; the graph is populated to the extent traversal
    /// could reach. Returns `true` iff this call reported no
    /// error-severity diagnostic. A subprogram's flow only becomes
    /// queryable once all of its nodes and edges are wired.
    pub fn construct_flow(&mut self, root: &SourceUnit, sink: &mut DiagnosticSink) -> bool {
        let errors_before = sink.error_count();
        CfgBuilder::new(self, sink).visit_source_unit(root);
        sink.error_count() == errors_before
    }

    /// The previously constructed flow of `function`.
    ///
    /// # Panics
    ///
    /// Querying a function that construction has not processed (an
    /// unimplemented function, a definition outside the traversed unit, or
    /// a call before [`Cfg::construct_flow`]) is a caller bug, not a
    /// recoverable condition, and panics.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn function_flow(&self, function: &FunctionDefinition) -> &FunctionFlow {
        self.function_flows
            .get(&function.id)
            .expect("control flow queried for a function that was never constructed")
    }

    /// The previously constructed flow of `modifier`.
    ///
    /// # Panics
    ///
    /// Same precondition as [`Cfg::function_flow`].
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn modifier_flow(&self, modifier: &ModifierDefinition) -> &ModifierFlow {
        self.modifier_flows
            .get(&modifier.id)
            .expect("control flow queried for a modifier that was never constructed")
    }

    /// The node behind an id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &CfgNode {
        &self.nodes[id.0]
    }

    /// Number of nodes allocated so far, across all subprograms.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All nodes with their ids, in allocation order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &CfgNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Allocates a fresh, unconnected node.
    pub(super) fn new_node(&mut self) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(CfgNode::default());
        id
    }

    /// Adds the edge `from -> to`, keeping both edge lists in sync.
    /// Duplicate edges are collapsed; an edge is in one list iff it is in
    /// the other.
    pub(super) fn add_edge(&mut self, from: NodeId, to: NodeId) {
        let exits = &mut self.nodes[from.0].exits;
        if exits.contains(&to) {
            return;
        }
        exits.push(to);
        self.nodes[to.0].entries.push(from);
    }

    /// Deterministic textual rendering of the arena and the registered
    /// flows, for debugging and snapshot tests.
    #[must_use]
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for (index, node) in self.nodes.iter().enumerate() {
            let entries: Vec<usize> = node.entries.iter().map(|n| n.0).collect();
            let exits: Vec<usize> = node.exits.iter().map(|n| n.0).collect();
            let ret = if node.block.return_statement.is_some() {
                " ret"
            } else {
                ""
            };
            let _ = writeln!(
                out,
                "node {index}: entries={entries:?} exits={exits:?} decls={} exprs={} asm={}{ret}",
                node.block.variable_declarations.len(),
                node.block.expressions.len(),
                node.block.assembly_statements.len(),
            );
        }

        let mut functions: Vec<_> = self.function_flows.iter().collect();
        functions.sort_by_key(|(id, _)| **id);
        for (id, flow) in functions {
            let _ = writeln!(
                out,
                "function #{}: entry={} exit={} exception={}",
                id.0, flow.entry.0, flow.exit.0, flow.exception.0,
            );
        }

        let mut modifiers: Vec<_> = self.modifier_flows.iter().collect();
        modifiers.sort_by_key(|(id, _)| **id);
        for (id, modifier) in modifiers {
            let cuts: Vec<(usize, usize)> = modifier
                .placeholders
                .iter()
                .map(|cut| (cut.before.0, cut.after.0))
                .collect();
            let _ = writeln!(
                out,
                "modifier #{}: entry={} exit={} exception={} cuts={cuts:?}",
                id.0,
                modifier.flow.entry.0,
                modifier.flow.exit.0,
                modifier.flow.exception.0,
            );
        }

        out
    }
}
