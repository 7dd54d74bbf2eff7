// Copyright (c) The unmangle contributors.
// Licensed under the MIT License.

//! The rename core of a JavaScript deobfuscator.
//!
//! Given minified module source and a naming oracle, [`rename_module`] computes a safe,
//! semantics-preserving renaming of every user-declared binding and emits the transformed
//! source: parse → analyze → dossiers → plan → oracle → solve → rewrite → validate → emit.
//! Nothing flows backward; the solver never consults the oracle.

mod error;
#[cfg(test)]
mod tests;
mod validate;

pub use error::{Error, RewriteValidationFailure};
pub use umc_rename::oracle::{
    Candidate, NameOracle, OracleError, SuggestRequest, SuggestResponse, SymbolInfo,
};

use futures::StreamExt;
use rustc_hash::FxHashMap;
use umc_ast::ast::SourceType;
use umc_frontend::{analyze, resolve::BindingId};
use umc_rename::{
    dossier, plan,
    plan::{Budgets, Job},
    solve, style,
};

/// The configuration of one rename run.
#[derive(Clone, Copy, Debug)]
pub struct RenameOptions {
    /// Byte budget for declaration snippets and scope summaries.
    pub context_window_size: usize,
    /// Upper bound on bindings per oracle request.
    pub max_symbols_per_job: usize,
    /// Token budget per oracle request.
    pub max_input_tokens: usize,
    /// Maximum in-flight oracle jobs.
    pub oracle_concurrency: usize,
    /// Candidate count requested per symbol.
    pub max_candidates: usize,
    /// The parse goal of the source.
    pub source_type: SourceType,
}

impl Default for RenameOptions {
    fn default() -> Self {
        Self {
            context_window_size: 2048,
            max_symbols_per_job: 32,
            max_input_tokens: 8192,
            oracle_concurrency: 4,
            max_candidates: 5,
            source_type: SourceType::Module,
        }
    }
}

/// Counters and warnings from a successful run. Everything here degraded gracefully rather
/// than failing the pipeline.
#[derive(Debug, Default)]
pub struct Diagnostics {
    /// Bindings that kept their names because their scope is tainted.
    pub tainted_bindings_skipped: usize,
    /// Oracle jobs that failed and were treated as returning no candidates.
    pub failed_jobs: usize,
    /// Set when post-emit validation failed and the original source was returned.
    pub validation_failure: Option<RewriteValidationFailure>,
}

/// The result of a rename run: the transformed source, or the original source when post-emit
/// validation rejected the rewrite.
#[derive(Debug)]
pub struct RenameOutput {
    pub source: String,
    pub diagnostics: Diagnostics,
}

/// A deterministic token estimate for an oracle request, for callers without a real
/// tokenizer: one token per four bytes of the serialized request.
#[must_use]
pub fn approximate_tokens(request: &SuggestRequest) -> usize {
    serde_json::to_string(request).map_or(usize::MAX, |json| json.len().div_ceil(4))
}

/// Renames every user-declared binding of `source` to names chosen by the oracle.
///
/// The oracle phase is the only concurrent part: jobs have disjoint symbol sets and are
/// dispatched with a bounded fan-out, and their responses merge keyed by binding, so any
/// completion order produces the same plan. Dropping the returned future cancels the run and
/// discards partial oracle results.
pub async fn rename_module(
    source: &str,
    oracle: &dyn NameOracle,
    measure_tokens: impl Fn(&SuggestRequest) -> usize,
    options: &RenameOptions,
) -> Result<RenameOutput, Error> {
    let mut unit = analyze::analyze(source, options.source_type)?;
    let mut diagnostics = Diagnostics::default();

    let usage = dossier::collect_usage(&unit);
    style::infer_styles(&mut unit, &usage);
    let dossiers = dossier::build(&unit, &usage, options.context_window_size);

    let budgets = Budgets {
        max_symbols_per_job: options.max_symbols_per_job,
        max_input_tokens: options.max_input_tokens,
        context_window_size: options.context_window_size,
        max_candidates: options.max_candidates,
    };
    let jobs = plan::plan_jobs(&unit, &dossiers, &budgets, &measure_tokens)?;

    let candidates = dispatch(oracle, jobs, options.oracle_concurrency, &mut diagnostics).await;

    let plan = solve::solve(&unit, &candidates);
    diagnostics.tainted_bindings_skipped = plan.skipped_tainted;

    umc_passes::run_rewrite_passes(&mut unit, &plan);
    let emitted = umc_codegen::emit(&unit.module);

    match validate::validate(&emitted, &unit.module, options.source_type) {
        Ok(()) => Ok(RenameOutput {
            source: emitted,
            diagnostics,
        }),
        Err(failure) => {
            log::warn!("{failure}");
            diagnostics.validation_failure = Some(failure);
            Ok(RenameOutput {
                source: source.to_string(),
                diagnostics,
            })
        }
    }
}

/// Runs the oracle jobs with bounded concurrency and merges their answers into the global
/// candidate table. A failed job contributes nothing; unknown symbol IDs are dropped.
async fn dispatch(
    oracle: &dyn NameOracle,
    jobs: Vec<Job>,
    concurrency: usize,
    diagnostics: &mut Diagnostics,
) -> FxHashMap<BindingId, Vec<Candidate>> {
    let results: Vec<(Job, Result<SuggestResponse, OracleError>)> =
        futures::stream::iter(jobs.into_iter().map(|job| async move {
            let response = oracle.suggest_names(job.request.clone()).await;
            (job, response)
        }))
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;

    let mut candidates = FxHashMap::default();
    for (job, result) in results {
        match result {
            Ok(response) => {
                for &symbol in &job.symbols {
                    let key = usize::from(symbol).to_string();
                    if let Some(list) = response.candidates.get(&key) {
                        if !list.is_empty() {
                            candidates.insert(symbol, list.clone());
                        }
                    }
                }
            }
            Err(error) => {
                log::warn!("oracle job failed, keeping original names: {error}");
                diagnostics.failed_jobs += 1;
            }
        }
    }

    candidates
}
