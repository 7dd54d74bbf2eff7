// Copyright (c) The unmangle contributors.
// Licensed under the MIT License.

use super::solve;
use crate::oracle::Candidate;
use indoc::indoc;
use rustc_hash::FxHashMap;
use umc_ast::ast::SourceType;
use umc_frontend::{
    analyze::{analyze, AnalysisUnit},
    resolve::BindingId,
};

fn unit(input: &str) -> AnalysisUnit {
    analyze(input, SourceType::Module).expect("source should analyze")
}

fn binding(unit: &AnalysisUnit, name: &str) -> BindingId {
    unit.bindings
        .iter()
        .find(|b| b.name.as_ref() == name)
        .expect("binding should exist")
        .id
}

/// Builds a candidate table from `(original, [(proposal, confidence)])` rules.
fn candidates(
    unit: &AnalysisUnit,
    rules: &[(&str, &[(&str, f64)])],
) -> FxHashMap<BindingId, Vec<Candidate>> {
    let mut table = FxHashMap::default();
    for (name, proposals) in rules {
        table.insert(
            binding(unit, name),
            proposals
                .iter()
                .map(|(proposal, confidence)| Candidate {
                    name: (*proposal).to_string(),
                    confidence: *confidence,
                    rationale: None,
                })
                .collect(),
        );
    }
    table
}

fn final_name(unit: &AnalysisUnit, plan: &super::RenamePlan, name: &str) -> String {
    plan.final_name(binding(unit, name))
        .expect("plan should be total")
        .to_string()
}

#[test]
fn best_candidate_wins() {
    let unit = unit("const a = 1;");
    let table = candidates(&unit, &[("a", &[("count", 0.4), ("total", 0.9)])]);
    let plan = solve(&unit, &table);

    assert_eq!(final_name(&unit, &plan, "a"), "total");
}

#[test]
fn missing_candidates_keep_the_original() {
    let unit = unit("const a = 1; const b = 2;");
    let table = candidates(&unit, &[("a", &[("value", 0.9)])]);
    let plan = solve(&unit, &table);

    assert_eq!(final_name(&unit, &plan, "a"), "value");
    assert_eq!(final_name(&unit, &plan, "b"), "b");
}

#[test]
fn collision_with_a_kept_sibling_disambiguates() {
    let unit = unit("const foo = 1; const bar = 2;");
    let table = candidates(&unit, &[("foo", &[("bar", 0.9)])]);
    let plan = solve(&unit, &table);

    assert_eq!(final_name(&unit, &plan, "foo"), "_bar");
    assert_eq!(final_name(&unit, &plan, "bar"), "bar");
}

#[test]
fn swaps_within_a_scope_are_allowed() {
    let unit = unit("const a = 1; const b = 2;");
    let table = candidates(&unit, &[("a", &[("b", 0.9)]), ("b", &[("a", 0.9)])]);
    let plan = solve(&unit, &table);

    assert_eq!(final_name(&unit, &plan, "a"), "b");
    assert_eq!(final_name(&unit, &plan, "b"), "a");
}

#[test]
fn descendant_originals_are_not_shadowed() {
    let unit = unit(indoc! {"
        const a = 1;
        function f() { const b = a; return b; }
    "});
    let table = candidates(&unit, &[("a", &[("b", 0.9), ("best", 0.5)])]);
    let plan = solve(&unit, &table);

    // Taking `b` would make the inner `b` shadow the renamed outer binding.
    assert_eq!(final_name(&unit, &plan, "a"), "best");
}

#[test]
fn free_globals_are_never_captured() {
    let unit = unit("const a = 1;\nconsole.log(a);\n");
    let table = candidates(&unit, &[("a", &[("console", 0.9)])]);
    let plan = solve(&unit, &table);

    assert_eq!(final_name(&unit, &plan, "a"), "_console");
}

#[test]
fn ancestor_finals_block_inner_choices() {
    let unit = unit(indoc! {"
        const a = 1;
        function f(x) { return a + x; }
    "});
    let table = candidates(
        &unit,
        &[("a", &[("value", 0.9)]), ("x", &[("value", 0.8), ("delta", 0.5)])],
    );
    let plan = solve(&unit, &table);

    assert_eq!(final_name(&unit, &plan, "a"), "value");
    assert_eq!(final_name(&unit, &plan, "x"), "delta");
}

#[test]
fn unrelated_scopes_may_share_names() {
    let unit = unit(indoc! {"
        function f(x) { return x; }
        function g(y) { return y; }
    "});
    let table = candidates(
        &unit,
        &[("x", &[("value", 0.9)]), ("y", &[("value", 0.9)])],
    );
    let plan = solve(&unit, &table);

    assert_eq!(final_name(&unit, &plan, "x"), "value");
    assert_eq!(final_name(&unit, &plan, "y"), "value");
}

#[test]
fn tainted_bindings_are_counted_and_kept() {
    let unit = unit("function foo() { let a = 1; eval(\"a\"); return a; }");
    let table = candidates(
        &unit,
        &[("a", &[("value", 0.9)]), ("foo", &[("doThing", 0.9)])],
    );
    let plan = solve(&unit, &table);

    assert_eq!(final_name(&unit, &plan, "a"), "a");
    assert_eq!(final_name(&unit, &plan, "foo"), "foo");
    assert_eq!(plan.skipped_tainted, 2);
}

#[test]
fn candidates_are_style_coerced() {
    let unit = unit("class a {}\nconst b = new a();\n");
    let table = candidates(
        &unit,
        &[("a", &[("http client", 0.9)]), ("b", &[("the client", 0.9)])],
    );

    let mut unit = unit;
    let usage = crate::dossier::collect_usage(&unit);
    crate::style::infer_styles(&mut unit, &usage);
    let plan = solve(&unit, &table);

    assert_eq!(final_name(&unit, &plan, "a"), "HttpClient");
    assert_eq!(final_name(&unit, &plan, "b"), "theClient");
}

#[test]
fn underscore_candidates_take_numeric_suffixes() {
    let unit = unit("const _a = 1; const b = 2;");
    let table = candidates(&unit, &[("b", &[("_a", 0.9)])]);
    let plan = solve(&unit, &table);

    assert_eq!(final_name(&unit, &plan, "b"), "_a2");
}

#[test]
fn solving_is_deterministic() {
    let source = indoc! {"
        const a = 1;
        const b = 2;
        function f(x, y) { return a + b + x + y; }
    "};
    let unit = unit(source);
    let table = candidates(
        &unit,
        &[
            ("a", &[("first", 0.5), ("alpha", 0.5)]),
            ("b", &[("first", 0.5), ("beta", 0.5)]),
            ("x", &[("left", 0.7)]),
            ("y", &[("left", 0.6), ("right", 0.6)]),
        ],
    );

    let first = solve(&unit, &table);
    let second = solve(&unit, &table);
    let mut names_first: Vec<_> = first.iter().map(|(id, n)| (id, n.to_string())).collect();
    let mut names_second: Vec<_> = second.iter().map(|(id, n)| (id, n.to_string())).collect();
    names_first.sort();
    names_second.sort();
    assert_eq!(names_first, names_second);

    // Equal confidence breaks alphabetically.
    assert_eq!(final_name(&unit, &first, "a"), "alpha");
}
