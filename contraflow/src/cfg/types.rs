use crate::ast::AstId;

/// Index of a node in the graph-owned arena.
///
/// Nodes are allocated exactly once, never freed or moved individually, and
/// released together when the owning [`super::Cfg`] is dropped; an index
/// therefore stays valid for the life of the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(super) usize);

impl NodeId {
    /// Position of the node in the arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// The linear contents of one basic block: everything executed between two
/// control transfers, in evaluation order. Immutable once the node is
/// finished.
#[derive(Debug, Clone, Default)]
pub struct ControlFlowBlock {
    /// Variable declarations executed in this block.
    pub variable_declarations: Vec<AstId>,
    /// Expressions executed in this block. Includes every subexpression,
    /// flattened in evaluation order, not just statement-level expressions.
    pub expressions: Vec<AstId>,
    /// Inline-assembly statements executed in this block.
    pub assembly_statements: Vec<AstId>,
    /// The return statement terminating this block, if any. When set it is
    /// the last construct executed on this path.
    pub return_statement: Option<AstId>,
}

/// A node of the control-flow graph. An edge between two nodes means
/// control may move from the first to the second during execution.
///
/// Edges are always symmetric: a node appears in another's `exits` exactly
/// when the other appears in its `entries`. A node with no entries, other
/// than a subprogram's entry anchor, is unreachable code.
#[derive(Debug, Clone, Default)]
pub struct CfgNode {
    /// Nodes control flow may arrive from.
    pub entries: Vec<NodeId>,
    /// Nodes control flow may continue to.
    pub exits: Vec<NodeId>,
    /// Straight-line contents of the node.
    pub block: ControlFlowBlock,
}

/// The fixed anchors of one function's control flow.
#[derive(Debug, Clone, Copy)]
pub struct FunctionFlow {
    /// Where control flow starts. Never has entries and has exactly one
    /// exit, the first statement node.
    pub entry: NodeId,
    /// Where control flow ends normally. Never has exits; one entry per
    /// return or implicit fallthrough point.
    pub exit: NodeId,
    /// Where control flow ends on abort. Never has exits; one entry per
    /// revert, throw, or potentially failing call.
    pub exception: NodeId,
}

/// A deliberate gap in a modifier's flow where the wrapped subprogram is
/// spliced in later.
///
/// `before` and `after` are never connected to each other at construction
/// time; the linking phase inserts `before -> callee entry` and
/// `callee exit -> after` when composing a function with its modifiers.
#[derive(Debug, Clone, Copy)]
pub struct PlaceholderCut {
    /// Last node executed before the wrapped subprogram runs.
    pub before: NodeId,
    /// First node executed after the wrapped subprogram returns.
    pub after: NodeId,
}

/// The control flow of a modifier: function-shaped anchors plus the
/// placeholder cuts, in source order of the placeholder statements.
#[derive(Debug, Clone)]
pub struct ModifierFlow {
    /// Anchor nodes, same shape as a function's.
    pub flow: FunctionFlow,
    /// One cut per placeholder statement, in encounter order.
    pub placeholders: Vec<PlaceholderCut>,
}
