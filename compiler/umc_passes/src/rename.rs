// Copyright (c) The unmangle contributors.
// Licensed under the MIT License.

//! The two-phase renamer. Phase one moves every scheduled binding — its declaring identifier
//! and all recorded references — to a reserved temporary name; phase two moves the
//! temporaries to the final names. Going through temporaries makes swaps (`a` ↔ `b` in one
//! scope) safe.
//!
//! Which identifier nodes belong to which binding comes from the reference lists captured
//! during analysis, never from re-resolving the mutating tree.

use rustc_hash::{FxHashMap, FxHashSet};
use std::rc::Rc;
use umc_ast::{
    ast::{Ident, Module, NodeId},
    mut_visit::{self, MutVisitor},
};
use umc_frontend::analyze::AnalysisUnit;
use umc_rename::solve::RenamePlan;

pub(crate) fn apply(unit: &mut AnalysisUnit, plan: &RenamePlan) {
    // The temporary prefix must collide with nothing: no original name, no final name, and
    // no existing binding may start with it.
    let mut in_use: FxHashSet<Rc<str>> = unit.bindings.iter().map(|b| Rc::clone(&b.name)).collect();
    for (_, name) in plan.iter() {
        in_use.insert(Rc::clone(name));
    }
    for scope in unit.scopes.iter() {
        in_use.extend(scope.free_names.iter().map(Rc::clone));
    }

    let mut prefix = String::from("__tmp");
    while in_use.iter().any(|name| name.starts_with(&prefix)) {
        prefix.push('_');
    }

    let mut to_temp: FxHashMap<NodeId, Rc<str>> = FxHashMap::default();
    let mut to_final: FxHashMap<NodeId, Rc<str>> = FxHashMap::default();

    for binding in unit.bindings.iter() {
        if !plan.is_renamed(binding) {
            continue;
        }
        let Some(final_name) = plan.final_name(binding.id) else {
            continue;
        };

        let temp: Rc<str> = format!("{prefix}{}", usize::from(binding.id)).into();
        let mut nodes = vec![binding.decl_node];
        nodes.extend(binding.references.iter().map(|r| r.node));

        for node in nodes {
            to_temp.insert(node, Rc::clone(&temp));
            to_final.insert(node, Rc::clone(final_name));
        }
    }

    if to_temp.is_empty() {
        return;
    }

    log::debug!("renaming {} identifier nodes", to_temp.len());
    rename_nodes(&mut unit.module, &to_temp);
    rename_nodes(&mut unit.module, &to_final);
}

fn rename_nodes(module: &mut Module, names: &FxHashMap<NodeId, Rc<str>>) {
    let mut renamer = Renamer { names };
    renamer.visit_module(module);
}

struct Renamer<'a> {
    names: &'a FxHashMap<NodeId, Rc<str>>,
}

impl MutVisitor for Renamer<'_> {
    fn visit_ident(&mut self, ident: &mut Ident) {
        if let Some(name) = self.names.get(&ident.id) {
            ident.name = Rc::clone(name);
        }
        mut_visit::walk_ident(self, ident);
    }
}
