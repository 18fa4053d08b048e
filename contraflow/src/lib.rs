//! Control-flow graph construction for contract-language subprograms.
//!
//! `contraflow` turns the already-parsed, already-resolved AST of a smart
//! contract into one control-flow graph per function and per modifier, as
//! the substrate for downstream static analyses (unreachable code,
//! "returns on all paths", uninitialized storage reads, ...). It builds the
//! graph in a single traversal and keeps going after recoverable problems,
//! so one pass can surface many diagnostics.
//!
//! The core produces graph *shape* only:
//!
//! - Branches, ternaries and short-circuit operators fork and re-merge.
//! - Loops get a condition node, an exit node and a continuation node.
//! - `return`/`break`/`continue`/`throw` divert flow to their targets and
//!   make the rest of the lexical scope unreachable.
//! - Calls that can abort at runtime fan out to the subprogram's exception
//!   anchor as a second exit.
//! - Modifier placeholders become deliberately unconnected cut points,
//!   spliced later by a separate linking phase.
//!
//! No dataflow facts are computed here and the graph is never simplified;
//! consumers read the finished [`Cfg`] concurrently once construction
//! returns.
//!
//! ```
//! use contraflow::{Cfg, DiagnosticSink};
//! use contraflow::test_utils::AstBuilder;
//!
//! let mut b = AstBuilder::new();
//! let value = b.number("1");
//! let stmt = b.expr_stmt(value);
//! let function = b.function("f", vec![stmt]);
//! let contract = b.contract("C", vec![function], vec![]);
//! let unit = b.unit(vec![contract]);
//!
//! let mut cfg = Cfg::default();
//! let mut sink = DiagnosticSink::default();
//! assert!(cfg.construct_flow(&unit, &mut sink));
//!
//! let flow = cfg.function_flow(&unit.contracts[0].functions[0]);
//! assert!(cfg.node(flow.entry).entries.is_empty());
//! assert!(cfg.node(flow.exit).exits.is_empty());
//! ```

/// AST node types the builder traverses.
pub mod ast;
/// Graph data model and the construction engine.
pub mod cfg;
/// Construction policy configuration.
pub mod config;
/// Crate-wide limits and file names.
pub mod constants;
/// Diagnostic records and their collector.
pub mod diagnostics;
/// AST fixture helpers shared by the test suite.
pub mod test_utils;
/// Small presentation utilities.
pub mod utils;

pub use cfg::{Cfg, CfgNode, ControlFlowBlock, FunctionFlow, ModifierFlow, NodeId, PlaceholderCut};
pub use config::{CallFailurePolicy, FlowConfig};
pub use diagnostics::{Diagnostic, DiagnosticSink, Severity};
