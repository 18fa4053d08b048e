//! End-to-end tests for the flow shapes the builder produces.

use contraflow::test_utils::{
    assert_anchor_shape, assert_edge_symmetry, find_node_with_expression, AstBuilder,
};
use contraflow::{Cfg, DiagnosticSink};

#[test]
fn total_divergence_propagates_to_the_merge_node() {
    let mut b = AstBuilder::new();
    let condition = b.identifier("a");
    let ret = b.ret(None);
    let revert = b.revert_call();
    let revert_stmt = b.expr_stmt(revert);
    let branch = b.if_stmt(condition, vec![ret], Some(vec![revert_stmt]));
    let after = b.identifier("after");
    let after_id = after.id();
    let after_stmt = b.expr_stmt(after);
    let function = b.function("f", vec![branch, after_stmt]);
    let contract = b.contract("C", vec![function], vec![]);
    let unit = b.unit(vec![contract]);

    let mut cfg = Cfg::default();
    let mut sink = DiagnosticSink::new();
    assert!(cfg.construct_flow(&unit, &mut sink));
    assert_edge_symmetry(&cfg);

    let flow = cfg.function_flow(&unit.contracts[0].functions[0]);
    assert_anchor_shape(&cfg, flow);
    // one entry from the returning branch, one from the reverting branch
    assert_eq!(cfg.node(flow.exit).entries.len(), 1);
    assert_eq!(cfg.node(flow.exception).entries.len(), 1);
    // the statement after the conditional lands in a node nothing reaches
    let dead = find_node_with_expression(&cfg, after_id);
    assert!(cfg.node(dead).entries.is_empty());
}

#[test]
fn break_routes_to_the_loop_exit() {
    let mut b = AstBuilder::new();
    let condition = b.identifier("cond");
    let guard = b.identifier("x");
    let guard_id = guard.id();
    let break_stmt = b.break_stmt();
    let guarded_break = b.if_stmt(guard, vec![break_stmt], None);
    let work = b.identifier("stmtA");
    let work_id = work.id();
    let work_stmt = b.expr_stmt(work);
    let loop_stmt = b.while_stmt(condition, vec![guarded_break, work_stmt]);
    let trailing = b.identifier("trailing");
    let trailing_id = trailing.id();
    let trailing_stmt = b.expr_stmt(trailing);
    let function = b.function("f", vec![loop_stmt, trailing_stmt]);
    let contract = b.contract("C", vec![function], vec![]);
    let unit = b.unit(vec![contract]);

    let mut cfg = Cfg::default();
    let mut sink = DiagnosticSink::new();
    assert!(cfg.construct_flow(&unit, &mut sink));
    assert_edge_symmetry(&cfg);

    // the loop exit collects the false-condition edge and the break
    let loop_exit = find_node_with_expression(&cfg, trailing_id);
    assert_eq!(cfg.node(loop_exit).entries.len(), 2);

    // stmtA is only reached through the false branch of the inner if
    let work_node = find_node_with_expression(&cfg, work_id);
    let guard_node = find_node_with_expression(&cfg, guard_id);
    assert_eq!(cfg.node(work_node).entries, vec![guard_node]);
}

#[test]
fn short_circuit_exposes_the_conditional_right_operand() {
    let mut b = AstBuilder::new();
    let left = b.identifier("a");
    let left_id = left.id();
    let call = b.internal_call("f", vec![]);
    let call_id = call.id();
    let and = b.and(left, call);
    let and_id = and.id();
    let stmt = b.expr_stmt(and);
    let function = b.function("g", vec![stmt]);
    let contract = b.contract("C", vec![function], vec![]);
    let unit = b.unit(vec![contract]);

    let mut cfg = Cfg::default();
    let mut sink = DiagnosticSink::new();
    assert!(cfg.construct_flow(&unit, &mut sink));
    assert_edge_symmetry(&cfg);

    let fork = find_node_with_expression(&cfg, left_id);
    let rhs_node = find_node_with_expression(&cfg, call_id);
    let merge = find_node_with_expression(&cfg, and_id);

    // f() is evaluated only along one of the fork's two exits
    assert_eq!(cfg.node(rhs_node).entries, vec![fork]);
    assert_eq!(cfg.node(merge).entries.len(), 2);
    assert!(cfg.node(merge).entries.contains(&fork));
    assert!(cfg.node(merge).entries.contains(&rhs_node));
}

#[test]
fn or_skips_the_right_operand_on_truth() {
    let mut b = AstBuilder::new();
    let left = b.identifier("ok");
    let checked = b.identifier("cond");
    let rhs = b.require(checked);
    let rhs_id = rhs.id();
    let or = b.or(left, rhs);
    let or_id = or.id();
    let stmt = b.expr_stmt(or);
    let function = b.function("g", vec![stmt]);
    let contract = b.contract("C", vec![function], vec![]);
    let unit = b.unit(vec![contract]);

    let mut cfg = Cfg::default();
    let mut sink = DiagnosticSink::new();
    assert!(cfg.construct_flow(&unit, &mut sink));
    assert_edge_symmetry(&cfg);

    // the require only aborts on the evaluating path
    let flow = cfg.function_flow(&unit.contracts[0].functions[0]);
    let rhs_node = find_node_with_expression(&cfg, rhs_id);
    assert!(cfg.node(rhs_node).exits.contains(&flow.exception));
    let merge = find_node_with_expression(&cfg, or_id);
    assert_eq!(cfg.node(merge).entries.len(), 2);
}

#[test]
fn failing_call_fans_out_to_the_exception_anchor() {
    let mut b = AstBuilder::new();
    let condition = b.identifier("x");
    let require = b.require(condition);
    let require_id = require.id();
    let require_stmt = b.expr_stmt(require);
    let after = b.identifier("after");
    let after_id = after.id();
    let after_stmt = b.expr_stmt(after);
    let function = b.function("f", vec![require_stmt, after_stmt]);
    let contract = b.contract("C", vec![function], vec![]);
    let unit = b.unit(vec![contract]);

    let mut cfg = Cfg::default();
    let mut sink = DiagnosticSink::new();
    assert!(cfg.construct_flow(&unit, &mut sink));
    assert_edge_symmetry(&cfg);

    let flow = cfg.function_flow(&unit.contracts[0].functions[0]);
    let call_node = find_node_with_expression(&cfg, require_id);
    let continuation = find_node_with_expression(&cfg, after_id);

    // two exits: the normal continuation and the exception anchor
    assert_eq!(cfg.node(call_node).exits.len(), 2);
    assert!(cfg.node(call_node).exits.contains(&flow.exception));
    assert!(cfg.node(call_node).exits.contains(&continuation));
    // the continuation still falls through to the exit
    assert_eq!(cfg.node(flow.exit).entries, vec![continuation]);
}

#[test]
fn revert_diverges_instead_of_continuing() {
    let mut b = AstBuilder::new();
    let revert = b.revert_call();
    let revert_id = revert.id();
    let revert_stmt = b.expr_stmt(revert);
    let after = b.identifier("after");
    let after_id = after.id();
    let after_stmt = b.expr_stmt(after);
    let function = b.function("f", vec![revert_stmt, after_stmt]);
    let contract = b.contract("C", vec![function], vec![]);
    let unit = b.unit(vec![contract]);

    let mut cfg = Cfg::default();
    let mut sink = DiagnosticSink::new();
    assert!(cfg.construct_flow(&unit, &mut sink));
    assert_edge_symmetry(&cfg);

    let flow = cfg.function_flow(&unit.contracts[0].functions[0]);
    let revert_node = find_node_with_expression(&cfg, revert_id);
    // only the failure edge leaves the reverting node
    assert_eq!(cfg.node(revert_node).exits, vec![flow.exception]);
    assert!(cfg.node(flow.exit).entries.is_empty());
    let dead = find_node_with_expression(&cfg, after_id);
    assert!(cfg.node(dead).entries.is_empty());
}

#[test]
fn ternary_merges_both_operand_paths() {
    let mut b = AstBuilder::new();
    let condition = b.identifier("c");
    let condition_id = condition.id();
    let true_value = b.identifier("t");
    let true_id = true_value.id();
    let false_value = b.identifier("f");
    let false_id = false_value.id();
    let ternary = b.ternary(condition, true_value, false_value);
    let ternary_id = ternary.id();
    let stmt = b.expr_stmt(ternary);
    let function = b.function("pick", vec![stmt]);
    let contract = b.contract("C", vec![function], vec![]);
    let unit = b.unit(vec![contract]);

    let mut cfg = Cfg::default();
    let mut sink = DiagnosticSink::new();
    assert!(cfg.construct_flow(&unit, &mut sink));
    assert_edge_symmetry(&cfg);

    let condition_node = find_node_with_expression(&cfg, condition_id);
    let true_node = find_node_with_expression(&cfg, true_id);
    let false_node = find_node_with_expression(&cfg, false_id);
    let merge = find_node_with_expression(&cfg, ternary_id);

    // operands sit on their own branch nodes, the chosen value on the merge
    assert_eq!(cfg.node(true_node).entries, vec![condition_node]);
    assert_eq!(cfg.node(false_node).entries, vec![condition_node]);
    assert_eq!(cfg.node(merge).entries.len(), 2);
}

#[test]
fn ternary_with_reverting_arm_keeps_one_path() {
    let mut b = AstBuilder::new();
    let condition = b.identifier("c");
    let reverting = b.revert_call();
    let value = b.number("2");
    let ternary = b.ternary(condition, reverting, value);
    let ternary_id = ternary.id();
    let stmt = b.expr_stmt(ternary);
    let function = b.function("pick", vec![stmt]);
    let contract = b.contract("C", vec![function], vec![]);
    let unit = b.unit(vec![contract]);

    let mut cfg = Cfg::default();
    let mut sink = DiagnosticSink::new();
    assert!(cfg.construct_flow(&unit, &mut sink));
    assert_edge_symmetry(&cfg);

    // only the non-reverting arm reaches the merge
    let merge = find_node_with_expression(&cfg, ternary_id);
    assert_eq!(cfg.node(merge).entries.len(), 1);
    let flow = cfg.function_flow(&unit.contracts[0].functions[0]);
    assert_eq!(cfg.node(flow.exception).entries.len(), 1);
}

#[test]
fn while_loop_closes_the_back_edge() {
    let mut b = AstBuilder::new();
    let condition = b.identifier("c");
    let condition_id = condition.id();
    let work = b.identifier("work");
    let work_id = work.id();
    let work_stmt = b.expr_stmt(work);
    let loop_stmt = b.while_stmt(condition, vec![work_stmt]);
    let function = b.function("f", vec![loop_stmt]);
    let contract = b.contract("C", vec![function], vec![]);
    let unit = b.unit(vec![contract]);

    let mut cfg = Cfg::default();
    let mut sink = DiagnosticSink::new();
    assert!(cfg.construct_flow(&unit, &mut sink));
    assert_edge_symmetry(&cfg);

    let condition_node = find_node_with_expression(&cfg, condition_id);
    let body_node = find_node_with_expression(&cfg, work_id);
    // entered from before the loop and via the body's back edge
    assert_eq!(cfg.node(condition_node).entries.len(), 2);
    assert!(cfg.node(condition_node).entries.contains(&body_node));
}

#[test]
fn for_loop_continue_targets_the_increment() {
    let mut b = AstBuilder::new();
    let zero = b.number("0");
    let init = b.var_decl("i", Some(zero));
    let condition = b.identifier("more");
    let increment = b.identifier("bump");
    let increment_id = increment.id();
    let guard = b.identifier("skip");
    let continue_stmt = b.continue_stmt();
    let guarded = b.if_stmt(guard, vec![continue_stmt], None);
    let work = b.identifier("work");
    let work_stmt = b.expr_stmt(work);
    let loop_stmt = b.for_stmt(
        Some(init),
        Some(condition),
        Some(increment),
        vec![guarded, work_stmt],
    );
    let function = b.function("f", vec![loop_stmt]);
    let contract = b.contract("C", vec![function], vec![]);
    let unit = b.unit(vec![contract]);

    let mut cfg = Cfg::default();
    let mut sink = DiagnosticSink::new();
    assert!(cfg.construct_flow(&unit, &mut sink));
    assert_edge_symmetry(&cfg);

    // the increment node collects the body terminal and the continue
    let increment_node = find_node_with_expression(&cfg, increment_id);
    assert_eq!(cfg.node(increment_node).entries.len(), 2);
}

#[test]
fn return_terminates_its_block() {
    let mut b = AstBuilder::new();
    let value = b.number("7");
    let ret = b.ret(Some(value));
    let ret_id = ret.id();
    let function = b.function("f", vec![ret]);
    let contract = b.contract("C", vec![function], vec![]);
    let unit = b.unit(vec![contract]);

    let mut cfg = Cfg::default();
    let mut sink = DiagnosticSink::new();
    assert!(cfg.construct_flow(&unit, &mut sink));

    let flow = cfg.function_flow(&unit.contracts[0].functions[0]);
    let first = cfg.node(flow.entry).exits[0];
    assert_eq!(cfg.node(first).block.return_statement, Some(ret_id));
    assert_eq!(cfg.node(flow.exit).entries, vec![first]);
}

#[test]
fn whole_graph_stays_symmetric_across_subprograms() {
    let mut b = AstBuilder::new();

    let condition = b.identifier("a");
    let ret = b.ret(None);
    let branch = b.if_stmt(condition, vec![ret], None);
    let first_fn = b.function("f", vec![branch]);

    let loop_condition = b.identifier("c");
    let guard = b.identifier("x");
    let break_stmt = b.break_stmt();
    let guarded = b.if_stmt(guard, vec![break_stmt], None);
    let loop_stmt = b.while_stmt(loop_condition, vec![guarded]);
    let second_fn = b.function("g", vec![loop_stmt]);

    let placeholder = b.placeholder();
    let modifier = b.modifier("guarded", vec![placeholder]);

    let contract = b.contract("C", vec![first_fn, second_fn], vec![modifier]);
    let unit = b.unit(vec![contract]);

    let mut cfg = Cfg::default();
    let mut sink = DiagnosticSink::new();
    assert!(cfg.construct_flow(&unit, &mut sink));
    assert_edge_symmetry(&cfg);

    for function in &unit.contracts[0].functions {
        assert_anchor_shape(&cfg, cfg.function_flow(function));
    }
    let modifier_flow = cfg.modifier_flow(&unit.contracts[0].modifiers[0]);
    assert!(cfg.node(modifier_flow.flow.exit).exits.is_empty());
}
