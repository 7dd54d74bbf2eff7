// Copyright (c) The unmangle contributors.
// Licensed under the MIT License.

//! Partitions renameable bindings into oracle jobs that respect two hard budgets: a symbol
//! count per job and a token budget per request.
//!
//! The planner works over the chunk-scope tree (the program scope plus every function and
//! class scope). Each chunk is first proposed whole — its entire subtree of bindings as one
//! job. If that busts a budget, the chunk's direct bindings are batched by symbol count,
//! over-budget batches split in half, and the children planned independently. A single symbol
//! that still cannot fit has its chunk summary cut down by binary search; if even a minimal
//! summary will not fit, planning fails naming the symbol.
//!
//! Token measurement is an opaque callback, so the planner is independent of any particular
//! tokenizer.

#[cfg(test)]
mod tests;

use crate::{
    dossier::{truncate, Dossier},
    oracle::{SuggestRequest, SymbolInfo},
};
use miette::Diagnostic;
use rustc_hash::FxHashMap;
use thiserror::Error;
use umc_frontend::{
    analyze::AnalysisUnit,
    resolve::{BindingId, ScopeId},
};

/// The measurement callback: deterministic token count for a request within one run.
pub type MeasureTokens<'a> = dyn Fn(&SuggestRequest) -> usize + 'a;

#[derive(Clone, Debug, Diagnostic, Error)]
pub enum Error {
    /// Even a one-symbol job with a minimal summary exceeds the token budget.
    #[error("cannot plan a job for symbol `{symbol}` within {max_input_tokens} tokens")]
    #[diagnostic(code("umc.rename.job_planning_impossible"))]
    JobPlanningImpossible {
        symbol: String,
        max_input_tokens: usize,
    },
}

/// The planner's budgets.
#[derive(Clone, Copy, Debug)]
pub struct Budgets {
    pub max_symbols_per_job: usize,
    pub max_input_tokens: usize,
    /// Byte budget for chunk summaries.
    pub context_window_size: usize,
    /// Candidate count requested from the oracle.
    pub max_candidates: usize,
}

/// One planned oracle request. `symbols` parallels `request.symbols`.
#[derive(Clone, Debug)]
pub struct Job {
    pub chunk: ScopeId,
    pub symbols: Vec<BindingId>,
    pub request: SuggestRequest,
}

/// Plans the full set of jobs for a module. Jobs have pairwise-disjoint symbol sets, so they
/// may be dispatched concurrently in any order.
pub fn plan_jobs(
    unit: &AnalysisUnit,
    dossiers: &[Dossier],
    budgets: &Budgets,
    measure: &MeasureTokens,
) -> Result<Vec<Job>, Error> {
    let by_binding: FxHashMap<BindingId, &Dossier> =
        dossiers.iter().map(|d| (d.binding, d)).collect();

    let planner = Planner {
        unit,
        by_binding,
        budgets,
        measure,
    };

    let mut jobs = Vec::new();
    let root = chunk_of(unit, ScopeId::root());
    planner.plan_chunk(root, &mut jobs)?;

    log::debug!("planned {} oracle jobs", jobs.len());
    Ok(jobs)
}

/// The nearest enclosing chunk scope, including the scope itself.
fn chunk_of(unit: &AnalysisUnit, scope: ScopeId) -> ScopeId {
    unit.scopes
        .ancestors(scope)
        .find(|s| s.is_chunk())
        .expect("the root scope is a chunk")
        .id
}

struct Planner<'a> {
    unit: &'a AnalysisUnit,
    by_binding: FxHashMap<BindingId, &'a Dossier>,
    budgets: &'a Budgets,
    measure: &'a MeasureTokens<'a>,
}

impl Planner<'_> {
    /// Renameable bindings that belong directly to this chunk: declared in the chunk scope or
    /// any non-chunk scope between it and the next chunk down.
    fn direct_symbols(&self, chunk: ScopeId) -> Vec<BindingId> {
        let mut symbols = Vec::new();
        self.collect_direct(chunk, chunk, &mut symbols);
        symbols.sort_unstable();
        symbols
    }

    fn collect_direct(&self, chunk: ScopeId, scope: ScopeId, symbols: &mut Vec<BindingId>) {
        let scope = self.unit.scopes.get(scope);
        if scope.id != chunk && scope.is_chunk() {
            return;
        }
        symbols.extend(
            scope
                .declared
                .iter()
                .filter(|id| self.by_binding.contains_key(id)),
        );
        for &child in &scope.children {
            self.collect_direct(chunk, child, symbols);
        }
    }

    /// Chunk scopes directly nested in this chunk.
    fn child_chunks(&self, chunk: ScopeId) -> Vec<ScopeId> {
        let mut chunks = Vec::new();
        self.collect_child_chunks(chunk, chunk, &mut chunks);
        chunks
    }

    fn collect_child_chunks(&self, chunk: ScopeId, scope: ScopeId, chunks: &mut Vec<ScopeId>) {
        let scope = self.unit.scopes.get(scope);
        if scope.id != chunk && scope.is_chunk() {
            chunks.push(scope.id);
            return;
        }
        for &child in &scope.children {
            self.collect_child_chunks(chunk, child, chunks);
        }
    }

    fn subtree_symbols(&self, chunk: ScopeId) -> Vec<BindingId> {
        let mut symbols = self.direct_symbols(chunk);
        for child in self.child_chunks(chunk) {
            symbols.extend(self.subtree_symbols(child));
        }
        symbols.sort_unstable();
        symbols
    }

    fn summary(&self, chunk: ScopeId, budget: usize) -> String {
        let span = self.unit.scopes.get(chunk).span;
        truncate(self.unit.text(span), budget)
    }

    fn request(&self, chunk: ScopeId, symbols: &[BindingId], summary_budget: usize) -> SuggestRequest {
        let symbols = symbols
            .iter()
            .map(|id| {
                let dossier = self.by_binding[id];
                let binding = self.unit.bindings.get(*id);
                SymbolInfo {
                    symbol_id: usize::from(*id).to_string(),
                    original_name: binding.name.to_string(),
                    kind: binding.kind.into(),
                    desired_style: binding.desired_style.into(),
                    declaration_snippet: dossier.snippet.clone(),
                    usage_summary: dossier.summary.clone(),
                    type_hints: dossier.hints.clone(),
                }
            })
            .collect();

        SuggestRequest {
            chunk_summary: self.summary(chunk, summary_budget),
            symbols,
            max_candidates: self.budgets.max_candidates,
        }
    }

    fn fits(&self, request: &SuggestRequest) -> bool {
        (self.measure)(request) <= self.budgets.max_input_tokens
    }

    fn emit(&self, chunk: ScopeId, symbols: Vec<BindingId>, request: SuggestRequest, jobs: &mut Vec<Job>) {
        jobs.push(Job {
            chunk,
            symbols,
            request,
        });
    }

    fn plan_chunk(&self, chunk: ScopeId, jobs: &mut Vec<Job>) -> Result<(), Error> {
        let subtree = self.subtree_symbols(chunk);
        if !subtree.is_empty() && subtree.len() <= self.budgets.max_symbols_per_job {
            let request = self.request(chunk, &subtree, self.budgets.context_window_size);
            if self.fits(&request) {
                self.emit(chunk, subtree, request, jobs);
                return Ok(());
            }
        }

        let direct = self.direct_symbols(chunk);
        for batch in direct.chunks(self.budgets.max_symbols_per_job.max(1)) {
            self.plan_batch(chunk, batch, jobs)?;
        }

        for child in self.child_chunks(chunk) {
            self.plan_chunk(child, jobs)?;
        }

        Ok(())
    }

    /// Emits a batch, halving it as long as it exceeds the token budget.
    fn plan_batch(&self, chunk: ScopeId, batch: &[BindingId], jobs: &mut Vec<Job>) -> Result<(), Error> {
        if batch.is_empty() {
            return Ok(());
        }

        let request = self.request(chunk, batch, self.budgets.context_window_size);
        if self.fits(&request) {
            self.emit(chunk, batch.to_vec(), request, jobs);
            return Ok(());
        }

        if batch.len() > 1 {
            let (left, right) = batch.split_at(batch.len() / 2);
            self.plan_batch(chunk, left, jobs)?;
            self.plan_batch(chunk, right, jobs)?;
            return Ok(());
        }

        self.plan_single(chunk, batch[0], jobs)
    }

    /// A single symbol that exceeds the budget with a full summary: binary-search the longest
    /// summary prefix that fits, keeping at least one byte of it.
    fn plan_single(&self, chunk: ScopeId, symbol: BindingId, jobs: &mut Vec<Job>) -> Result<(), Error> {
        let full = self.budgets.context_window_size;
        let (mut lo, mut hi) = (0usize, full);
        let mut best = None;

        while lo < hi {
            let mid = lo + (hi - lo + 1) / 2;
            let request = self.request(chunk, &[symbol], mid);
            if self.fits(&request) {
                best = Some(request);
                lo = mid;
            } else {
                hi = mid - 1;
            }
        }

        match best {
            Some(request) if lo > 0 => {
                self.emit(chunk, vec![symbol], request, jobs);
                Ok(())
            }
            _ => {
                // One last try with the minimal non-empty prefix before giving up.
                let request = self.request(chunk, &[symbol], 1);
                if self.fits(&request) {
                    self.emit(chunk, vec![symbol], request, jobs);
                    Ok(())
                } else {
                    Err(Error::JobPlanningImpossible {
                        symbol: self.unit.bindings.get(symbol).name.to_string(),
                        max_input_tokens: self.budgets.max_input_tokens,
                    })
                }
            }
        }
    }
}
