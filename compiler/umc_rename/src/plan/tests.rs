// Copyright (c) The unmangle contributors.
// Licensed under the MIT License.

use super::{plan_jobs, Budgets, Error};
use crate::dossier;
use indoc::indoc;
use umc_ast::ast::SourceType;
use umc_frontend::analyze::{analyze, AnalysisUnit};

const SOURCE: &str = indoc! {"
    const top = 1;
    function first(a, b) { return a + b; }
    function second(c) {
        function inner(d) { return d; }
        return inner(c);
    }
"};

fn unit() -> AnalysisUnit {
    analyze(SOURCE, SourceType::Module).expect("source should analyze")
}

fn budgets(max_symbols: usize, max_tokens: usize) -> Budgets {
    Budgets {
        max_symbols_per_job: max_symbols,
        max_input_tokens: max_tokens,
        context_window_size: 400,
        max_candidates: 3,
    }
}

fn names(unit: &AnalysisUnit, job: &super::Job) -> Vec<String> {
    job.symbols
        .iter()
        .map(|&id| unit.bindings.get(id).name.to_string())
        .collect()
}

#[test]
fn everything_fits_in_one_job() {
    let unit = unit();
    let usage = dossier::collect_usage(&unit);
    let dossiers = dossier::build(&unit, &usage, 400);

    let jobs = plan_jobs(&unit, &dossiers, &budgets(32, 10_000), &|r| r.symbols.len())
        .expect("planning should succeed");

    assert_eq!(jobs.len(), 1);
    // Subtree symbols are ordered by binding id, which follows declaration order.
    assert_eq!(
        names(&unit, &jobs[0]),
        ["top", "first", "a", "b", "second", "c", "inner", "d"],
    );
}

#[test]
fn symbol_budget_splits_by_chunk() {
    let unit = unit();
    let usage = dossier::collect_usage(&unit);
    let dossiers = dossier::build(&unit, &usage, 400);

    let jobs = plan_jobs(&unit, &dossiers, &budgets(3, 10_000), &|r| r.symbols.len())
        .expect("planning should succeed");

    // The root overflows, so its direct bindings batch together and each function chunk is
    // proposed independently.
    let grouped: Vec<Vec<String>> = jobs.iter().map(|j| names(&unit, j)).collect();
    assert_eq!(
        grouped,
        [
            vec!["top".to_string(), "first".to_string(), "second".to_string()],
            vec!["a".to_string(), "b".to_string()],
            vec!["c".to_string(), "inner".to_string(), "d".to_string()],
        ],
    );
}

#[test]
fn token_budget_halves_batches() {
    let unit = unit();
    let usage = dossier::collect_usage(&unit);
    let dossiers = dossier::build(&unit, &usage, 400);

    // Two symbols per request at most, despite the generous symbol budget.
    let jobs = plan_jobs(&unit, &dossiers, &budgets(32, 2), &|r| r.symbols.len())
        .expect("planning should succeed");

    assert!(jobs.iter().all(|j| j.symbols.len() <= 2));
    let total: usize = jobs.iter().map(|j| j.symbols.len()).sum();
    assert_eq!(total, 8);
}

#[test]
fn oversize_summary_is_binary_searched() {
    let unit = unit();
    let usage = dossier::collect_usage(&unit);
    let dossiers = dossier::build(&unit, &usage, 400);

    // Cost model: one token per summary byte plus ten per symbol. A full summary never
    // fits, so every job must shrink its summary instead.
    let measure = |r: &super::SuggestRequest| r.chunk_summary.len() + 10 * r.symbols.len();
    let jobs = plan_jobs(&unit, &dossiers, &budgets(1, 40), &measure)
        .expect("planning should succeed");

    assert_eq!(jobs.iter().map(|j| j.symbols.len()).sum::<usize>(), 8);
    assert!(jobs.iter().all(|j| measure(&j.request) <= 40));
    assert!(jobs.iter().all(|j| !j.request.chunk_summary.is_empty()));
}

#[test]
fn impossible_planning_names_the_symbol() {
    let unit = unit();
    let usage = dossier::collect_usage(&unit);
    let dossiers = dossier::build(&unit, &usage, 400);

    let error = plan_jobs(&unit, &dossiers, &budgets(32, 5), &|_| usize::MAX)
        .expect_err("planning should fail");
    let Error::JobPlanningImpossible { symbol, .. } = error;
    assert_eq!(symbol, "top");
}
