// Copyright (c) The unmangle contributors.
// Licensed under the MIT License.

//! Shorthand expansion: `{ a }` becomes `{ a: a }` (and `{ a }` patterns become
//! `{ a: a }`) for every shorthand property whose identifier is scheduled for a rename. The
//! key is cloned as a fresh name-only node, so renaming the value leaves the object's shape
//! untouched.

use umc_ast::{
    assigner::Assigner,
    ast::{
        Expr, ExprKind, Ident, Name, ObjectPatProp, ObjectPatPropKind, Pat, PatKind, Prop,
        PropKey, PropKind,
    },
    mut_visit::{self, MutVisitor},
};
use umc_frontend::{
    analyze::AnalysisUnit,
    resolve::{BindingTable, Names},
};
use umc_rename::solve::RenamePlan;

pub(crate) fn expand(unit: &mut AnalysisUnit, plan: &RenamePlan) {
    let AnalysisUnit {
        module,
        bindings,
        names,
        assigner,
        ..
    } = unit;

    let mut expander = Expander {
        names,
        bindings,
        plan,
        assigner,
    };
    expander.visit_module(module);
}

struct Expander<'a> {
    names: &'a Names,
    bindings: &'a BindingTable,
    plan: &'a RenamePlan,
    assigner: &'a mut Assigner,
}

impl Expander<'_> {
    fn needs_expansion(&self, ident: &Ident) -> bool {
        self.names
            .get(ident.id)
            .is_some_and(|&binding| self.plan.is_renamed(self.bindings.get(binding)))
    }

    /// A fresh key node spelling the original property name.
    fn key_for(&mut self, ident: &Ident) -> PropKey {
        PropKey::Name(Box::new(Name {
            id: self.assigner.next_id(),
            span: ident.span,
            name: ident.name.clone(),
        }))
    }
}

impl MutVisitor for Expander<'_> {
    fn visit_prop(&mut self, prop: &mut Prop) {
        if let PropKind::Shorthand(ident, _) = &prop.kind {
            if self.needs_expansion(ident) {
                let PropKind::Shorthand(ident, default) =
                    std::mem::replace(&mut prop.kind, PropKind::Spread(Box::default()))
                else {
                    unreachable!("kind was just matched as shorthand");
                };

                let key = self.key_for(&ident);
                let span = ident.span;
                let value = Box::new(Expr {
                    id: self.assigner.next_id(),
                    span,
                    kind: Box::new(ExprKind::Ident(ident)),
                });

                // In an assignment-target object, a shorthand default becomes an assignment
                // on the expanded value.
                let value = match default {
                    Some(default) => Box::new(Expr {
                        id: self.assigner.next_id(),
                        span,
                        kind: Box::new(ExprKind::Assign(None, value, default)),
                    }),
                    None => value,
                };

                prop.kind = PropKind::KeyValue(key, value);
            }
        }

        mut_visit::walk_prop(self, prop);
    }

    fn visit_object_pat_prop(&mut self, prop: &mut ObjectPatProp) {
        if let ObjectPatPropKind::Shorthand(ident, _) = &prop.kind {
            if self.needs_expansion(ident) {
                let ObjectPatPropKind::Shorthand(ident, default) =
                    std::mem::replace(&mut prop.kind, ObjectPatPropKind::Rest(Box::default()))
                else {
                    unreachable!("kind was just matched as shorthand");
                };

                let key = self.key_for(&ident);
                let span = ident.span;
                let value = Box::new(Pat {
                    id: self.assigner.next_id(),
                    span,
                    kind: Box::new(PatKind::Ident(ident)),
                });

                let value = match default {
                    Some(default) => Box::new(Pat {
                        id: self.assigner.next_id(),
                        span,
                        kind: Box::new(PatKind::Assign(value, default)),
                    }),
                    None => value,
                };

                prop.kind = ObjectPatPropKind::KeyValue(key, value);
            }
        }

        mut_visit::walk_object_pat_prop(self, prop);
    }
}
