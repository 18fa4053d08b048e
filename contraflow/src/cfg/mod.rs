//! Control-flow graph construction.
//!
//! This module turns resolved subprogram bodies into per-function and
//! per-modifier flow graphs:
//!
//! - [`ControlFlowBlock`]: the linear contents of one basic block
//! - [`CfgNode`]: a block plus symmetric entry/exit edge lists
//! - [`FunctionFlow`] / [`ModifierFlow`]: the fixed entry/exit/exception
//!   anchors of one subprogram, plus placeholder cuts for modifiers
//! - [`Cfg`]: the arena-owning graph with the construction entry point and
//!   the read-only query surface
//!
//! # Design Principles
//!
//! - **One traversal**: each statement and expression is visited once, in
//!   source order, subexpressions depth-first
//! - **Shape only**: no dataflow facts, no block merging, no
//!   simplification; unreachable code stays visible as nodes without entries
//! - **Best effort**: recoverable problems are reported through the
//!   diagnostic sink and construction continues

mod builder;
mod graph;
mod types;

pub use graph::Cfg;
pub use types::{CfgNode, ControlFlowBlock, FunctionFlow, ModifierFlow, NodeId, PlaceholderCut};
