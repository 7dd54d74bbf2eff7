// Copyright (c) The unmangle contributors.
// Licensed under the MIT License.

//! The constraint solver: a pure, deterministic assignment of final names.
//!
//! Scopes are processed outer-first. Within a scope, names that are not in play are reserved
//! up front: tainted bindings, imports, and bindings the oracle returned nothing for all keep
//! their original names. The remaining bindings are ordered (oracle endorsed the original
//! name first, then by reference count, then by declaration offset) and each takes its best
//! candidate that does not collide with anything already allocated on the scope chain, with
//! the names of strict-descendant bindings and every free (global) name reserved as well so a
//! rename can neither shadow nor capture. When every candidate collides, the top candidate is
//! disambiguated by prepending `_` until unique — or, if it already starts with `_`, by
//! appending `2`, `3`, and so on.
//!
//! The solver cannot fail; in the worst case every binding keeps its original name.

#[cfg(test)]
mod tests;

use crate::{oracle::Candidate, style};
use rustc_hash::{FxHashMap, FxHashSet};
use std::rc::Rc;
use umc_frontend::{
    analyze::AnalysisUnit,
    resolve::{Binding, BindingId, ScopeId},
};

/// The solver's output: a total mapping from bindings to final names.
#[derive(Debug, Default)]
pub struct RenamePlan {
    names: FxHashMap<BindingId, Rc<str>>,
    /// Bindings left untouched because their scope is tainted.
    pub skipped_tainted: usize,
}

impl RenamePlan {
    /// The final name of a binding.
    #[must_use]
    pub fn final_name(&self, binding: BindingId) -> Option<&Rc<str>> {
        self.names.get(&binding)
    }

    /// True if the plan renames the binding to something other than its original name.
    #[must_use]
    pub fn is_renamed(&self, binding: &Binding) -> bool {
        self.final_name(binding.id)
            .is_some_and(|name| **name != *binding.name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (BindingId, &Rc<str>)> {
        self.names.iter().map(|(id, name)| (*id, name))
    }
}

/// Solves the renaming constraints for a module given the oracle's candidates.
#[must_use]
pub fn solve(
    unit: &AnalysisUnit,
    candidates: &FxHashMap<BindingId, Vec<Candidate>>,
) -> RenamePlan {
    let mut plan = RenamePlan::default();
    let mut allocated: FxHashMap<ScopeId, FxHashSet<Rc<str>>> = FxHashMap::default();

    // Outer scopes first; ties broken by scope id for a stable order.
    let mut order: Vec<(usize, ScopeId)> = unit
        .scopes
        .iter()
        .map(|scope| (unit.scopes.depth(scope.id), scope.id))
        .collect();
    order.sort_unstable();

    for (_, scope_id) in order {
        solve_scope(unit, candidates, scope_id, &mut allocated, &mut plan);
    }

    log::debug!(
        "solved {} bindings ({} kept by taint)",
        plan.names.len(),
        plan.skipped_tainted,
    );
    plan
}

fn solve_scope(
    unit: &AnalysisUnit,
    candidates: &FxHashMap<BindingId, Vec<Candidate>>,
    scope_id: ScopeId,
    allocated: &mut FxHashMap<ScopeId, FxHashSet<Rc<str>>>,
    plan: &mut RenamePlan,
) {
    let scope = unit.scopes.get(scope_id);

    // Names a new binding name in this scope must avoid: everything finalized on the
    // ancestor chain, every free (global) name referenced in this subtree, and the original
    // names of strict-descendant bindings that have not been renamed yet.
    let mut taken: FxHashSet<Rc<str>> = scope.free_names.clone();
    for ancestor in unit.scopes.ancestors(scope_id).skip(1) {
        if let Some(names) = allocated.get(&ancestor.id) {
            taken.extend(names.iter().map(Rc::clone));
        }
    }
    collect_descendant_names(unit, scope_id, &mut taken);

    let mut local = FxHashSet::default();
    let mut renameable = Vec::new();

    // Reserve the names that are not in play before assigning anything.
    for &binding_id in &scope.declared {
        let binding = unit.bindings.get(binding_id);
        let has_candidates = candidates
            .get(&binding_id)
            .is_some_and(|list| !list.is_empty());

        if unit.is_renameable(binding) && has_candidates {
            renameable.push(binding);
        } else {
            if binding.is_unsafe(&unit.scopes) {
                plan.skipped_tainted += 1;
            }
            plan.names.insert(binding_id, Rc::clone(&binding.name));
            local.insert(Rc::clone(&binding.name));
        }
    }

    // Oracle-endorsed originals first, then the most-referenced, then source order.
    renameable.sort_by(|a, b| {
        let endorse_a = endorses_original(a, candidates);
        let endorse_b = endorses_original(b, candidates);
        endorse_b
            .cmp(&endorse_a)
            .then_with(|| b.references.len().cmp(&a.references.len()))
            .then_with(|| a.decl_span.lo.cmp(&b.decl_span.lo))
    });

    for binding in renameable {
        let list = normalized_candidates(binding, candidates);
        let mut chosen = None;
        for (name, _) in &list {
            if !taken.contains(&**name) && !local.contains(&**name) {
                chosen = Some(Rc::clone(name));
                break;
            }
        }
        let chosen = chosen.unwrap_or_else(|| disambiguate(&list[0].0, &taken, &local));

        local.insert(Rc::clone(&chosen));
        plan.names.insert(binding.id, chosen);
    }

    allocated.insert(scope_id, local);
}

/// Adds the original names of every binding declared strictly below the scope.
fn collect_descendant_names(unit: &AnalysisUnit, scope_id: ScopeId, taken: &mut FxHashSet<Rc<str>>) {
    for &child in &unit.scopes.get(scope_id).children {
        let scope = unit.scopes.get(child);
        for &binding in &scope.declared {
            taken.insert(Rc::clone(&unit.bindings.get(binding).name));
        }
        collect_descendant_names(unit, child, taken);
    }
}

/// True if any candidate keeps the original name with non-zero confidence.
fn endorses_original(binding: &Binding, candidates: &FxHashMap<BindingId, Vec<Candidate>>) -> bool {
    candidates.get(&binding.id).is_some_and(|list| {
        list.iter().any(|c| {
            c.confidence > 0.0
                && style::normalize(&c.name, binding.desired_style) == *binding.name
        })
    })
}

/// Normalized, deduplicated candidates, best first. Duplicates keep their highest
/// confidence; ties in confidence break alphabetically.
fn normalized_candidates(
    binding: &Binding,
    candidates: &FxHashMap<BindingId, Vec<Candidate>>,
) -> Vec<(Rc<str>, f64)> {
    let mut best: FxHashMap<String, f64> = FxHashMap::default();
    for candidate in candidates.get(&binding.id).map_or(&[][..], Vec::as_slice) {
        let name = style::normalize(&candidate.name, binding.desired_style);
        let entry = best.entry(name).or_insert(f64::MIN);
        if candidate.confidence > *entry {
            *entry = candidate.confidence;
        }
    }

    let mut list: Vec<(Rc<str>, f64)> = best
        .into_iter()
        .map(|(name, confidence)| (Rc::from(name.as_str()), confidence))
        .collect();
    list.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    list
}

/// Makes a colliding name unique: underscores are prepended, unless the name already starts
/// with one, in which case a numeric suffix counts up. The rule is fixed so reruns reproduce
/// the same output.
fn disambiguate(name: &Rc<str>, taken: &FxHashSet<Rc<str>>, local: &FxHashSet<Rc<str>>) -> Rc<str> {
    let collides = |n: &str| taken.contains(n) || local.contains(n);

    if name.starts_with('_') {
        let mut counter = 2u32;
        loop {
            let attempt = format!("{name}{counter}");
            if !collides(&attempt) {
                return Rc::from(attempt.as_str());
            }
            counter += 1;
        }
    }

    let mut attempt = format!("_{name}");
    while collides(&attempt) {
        attempt.insert(0, '_');
    }
    Rc::from(attempt.as_str())
}
