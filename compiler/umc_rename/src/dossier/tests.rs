// Copyright (c) The unmangle contributors.
// Licensed under the MIT License.

use super::{build, collect_usage, truncate, UsageSummary};
use indoc::indoc;
use umc_ast::ast::SourceType;
use umc_frontend::analyze::{analyze, AnalysisUnit};

fn unit(input: &str) -> AnalysisUnit {
    analyze(input, SourceType::Module).expect("source should analyze")
}

fn summary(unit: &AnalysisUnit, usage: &super::UsageTable, name: &str) -> UsageSummary {
    let binding = unit
        .bindings
        .iter()
        .find(|b| b.name.as_ref() == name)
        .expect("binding should exist");
    usage
        .summary(binding.id)
        .cloned()
        .expect("summary should exist")
}

fn sorted(set: &std::collections::BTreeSet<String>) -> Vec<&str> {
    set.iter().map(String::as_str).collect()
}

#[test]
fn methods_and_members() {
    let unit = unit(indoc! {"
        const a = [];
        a.push(1);
        const n = a.length;
        a.flags = n;
    "});
    let usage = collect_usage(&unit);
    let summary = summary(&unit, &usage, "a");

    assert_eq!(sorted(&summary.called_methods), ["push"]);
    assert_eq!(sorted(&summary.member_reads), ["length"]);
    assert_eq!(sorted(&summary.member_writes), ["flags"]);
    assert_eq!(summary.reference_count, 3);
    assert!(!summary.is_assigned_to);
}

#[test]
fn chained_calls_attribute_to_the_root() {
    let unit = unit("const out = xs.map(f).filter(g);\nconst xs = [];\n");
    let usage = collect_usage(&unit);
    let summary = summary(&unit, &usage, "xs");

    assert_eq!(sorted(&summary.called_methods), ["filter", "map"]);
}

#[test]
fn call_construct_await_iterate() {
    let unit = unit(indoc! {"
        async function go(make, job, items) {
            const t = new make();
            job();
            await job;
            for (const item of items) { use(item); }
            return t;
        }
    "});
    let usage = collect_usage(&unit);

    assert!(summary(&unit, &usage, "make").is_constructed);
    assert!(!summary(&unit, &usage, "make").is_called);
    let job = summary(&unit, &usage, "job");
    assert!(job.is_called);
    assert!(job.is_awaited);
    assert!(summary(&unit, &usage, "items").is_iterated);
    assert!(summary(&unit, &usage, "t").is_returned);
}

#[test]
fn operators_and_compared_literals() {
    let unit = unit(indoc! {"
        function f(t) {
            if (typeof t === 'string') { return t === 42 || !t; }
            return t - 1;
        }
    "});
    let usage = collect_usage(&unit);
    let summary = summary(&unit, &usage, "t");

    assert_eq!(sorted(&summary.unary_operators), ["!", "typeof"]);
    assert_eq!(sorted(&summary.binary_operators), ["-", "==="]);
    assert_eq!(sorted(&summary.compared_literals), ["42"]);
}

#[test]
fn hints_follow_usage() {
    let unit = unit(indoc! {"
        function f(xs, p) {
            xs.push(1);
            const n = xs.length;
            return p.then(go).catch(stop);
        }
    "});
    let usage = collect_usage(&unit);
    let dossiers = build(&unit, &usage, 200);

    let hints = |name: &str| -> Vec<String> {
        let binding = unit
            .bindings
            .iter()
            .find(|b| b.name.as_ref() == name)
            .expect("binding should exist");
        dossiers
            .iter()
            .find(|d| d.binding == binding.id)
            .expect("dossier should exist")
            .hints
            .clone()
    };

    assert!(hints("xs").contains(&"array-like".to_string()));
    assert!(hints("xs").contains(&"array/string-like".to_string()));
    assert!(hints("p").contains(&"promise-like".to_string()));
}

#[test]
fn snippets_are_truncated_on_char_boundaries() {
    assert_eq!(truncate("abcdef", 10), "abcdef");
    assert_eq!(truncate("abcdef", 4), "abcd…");
    assert_eq!(truncate("héllo", 2), "h…");
}

#[test]
fn dossiers_cover_only_renameable_bindings() {
    let unit = unit(indoc! {r#"
        import { x } from 'm';
        const a = 1;
        function risky() { eval("a"); }
    "#});
    let usage = collect_usage(&unit);
    let dossiers = build(&unit, &usage, 200);

    // `x` is imported and everything else sits in the tainted root scope.
    assert!(dossiers.is_empty());
}
