// Copyright (c) The unmangle contributors.
// Licensed under the MIT License.

//! Keeps the module's external interface stable under renaming.
//!
//! `export <declaration>` statements whose bindings are being renamed split into the bare
//! declaration followed by `export { newName as originalName };`. Shorthand specifiers in
//! `export { x }` and `import { x }` gain an explicit external name token first, so the
//! external side survives any rename of the local side. Default exports need nothing: their
//! external name is positional.

use umc_ast::ast::{
    ExportNamed, ExportSpecifier, Ident, ImportSpecifierKind, Name, NodeId, Pat, Stmt, StmtKind,
    VarDecl,
};
use umc_data_structures::span::Span;
use umc_frontend::{
    analyze::AnalysisUnit,
    resolve::{Access, Reference},
};
use umc_rename::solve::RenamePlan;

pub(crate) fn split(unit: &mut AnalysisUnit, plan: &RenamePlan) {
    detach_specifiers(unit, plan);

    let stmts = std::mem::take(&mut unit.module.stmts).into_vec();
    let mut rewritten = Vec::with_capacity(stmts.len());

    for stmt in stmts {
        match *stmt.kind {
            StmtKind::ExportDecl(export) if decl_is_renamed(unit, plan, &export.decl) => {
                let span = export.span;
                let specifiers = specifiers_for(unit, plan, &export.decl);
                rewritten.push(export.decl);
                rewritten.push(Box::new(Stmt {
                    id: unit.assigner.next_id(),
                    span,
                    kind: Box::new(StmtKind::ExportNamed(Box::new(ExportNamed {
                        id: unit.assigner.next_id(),
                        span,
                        specifiers: specifiers.into_boxed_slice(),
                        source: None,
                    }))),
                }));
            }
            kind => rewritten.push(Box::new(Stmt {
                id: stmt.id,
                span: stmt.span,
                kind: Box::new(kind),
            })),
        }
    }

    unit.module.stmts = rewritten.into_boxed_slice();
}

/// Gives shorthand import/export specifiers an explicit external name when their local side
/// is scheduled for renaming.
fn detach_specifiers(unit: &mut AnalysisUnit, plan: &RenamePlan) {
    let AnalysisUnit {
        module,
        bindings,
        names,
        assigner,
        ..
    } = unit;

    let renamed = |local: &Ident| {
        names
            .get(local.id)
            .is_some_and(|&binding| plan.is_renamed(bindings.get(binding)))
    };

    for stmt in module.stmts.iter_mut() {
        match &mut *stmt.kind {
            StmtKind::ExportNamed(export) if export.source.is_none() => {
                for specifier in export.specifiers.iter_mut() {
                    if specifier.exported.is_none() && renamed(&specifier.local) {
                        specifier.exported = Some(Box::new(Name {
                            id: assigner.next_id(),
                            span: specifier.local.span,
                            name: specifier.local.name.clone(),
                        }));
                    }
                }
            }
            StmtKind::Import(decl) => {
                for specifier in decl.specifiers.iter_mut() {
                    if let ImportSpecifierKind::Named(imported, local) = &mut specifier.kind {
                        if imported.is_none() && renamed(local) {
                            *imported = Some(Box::new(Name {
                                id: assigner.next_id(),
                                span: local.span,
                                name: local.name.clone(),
                            }));
                        }
                    }
                }
            }
            _ => {}
        }
    }
}

/// True if any binding declared by the statement is scheduled for a rename.
fn decl_is_renamed(unit: &AnalysisUnit, plan: &RenamePlan, decl: &Stmt) -> bool {
    declared_idents(decl)
        .iter()
        .any(|ident| ident_is_renamed(unit, plan, ident))
}

fn ident_is_renamed(unit: &AnalysisUnit, plan: &RenamePlan, ident: &Ident) -> bool {
    unit.names
        .get(ident.id)
        .is_some_and(|&binding| plan.is_renamed(unit.bindings.get(binding)))
}

/// Builds `newName as originalName` specifiers for every binding the declaration exported.
/// The fresh local identifiers are registered as references so the renamer reaches them.
fn specifiers_for(unit: &mut AnalysisUnit, plan: &RenamePlan, decl: &Stmt) -> Vec<ExportSpecifier> {
    let idents: Vec<(NodeId, Span, std::rc::Rc<str>)> = declared_idents(decl)
        .iter()
        .map(|ident| (ident.id, ident.span, ident.name.clone()))
        .collect();

    let mut specifiers = Vec::new();
    for (node, span, name) in idents {
        let Some(&binding) = unit.names.get(node) else {
            continue;
        };

        let local_id = unit.assigner.next_id();
        let local = Box::new(Ident {
            id: local_id,
            span,
            name: name.clone(),
        });

        // The synthesized local is a new occurrence of the binding.
        unit.names.insert(local_id, binding);
        unit.bindings.get_mut(binding).references.push(Reference {
            node: local_id,
            span,
            access: Access::Read,
        });

        let exported = if plan.is_renamed(unit.bindings.get(binding)) {
            Some(Box::new(Name {
                id: unit.assigner.next_id(),
                span,
                name,
            }))
        } else {
            None
        };

        specifiers.push(ExportSpecifier {
            id: unit.assigner.next_id(),
            span,
            local,
            exported,
        });
    }

    specifiers
}

/// All identifiers declared by a variable, function, or class declaration statement.
fn declared_idents(decl: &Stmt) -> Vec<&Ident> {
    match &*decl.kind {
        StmtKind::Var(var) => var_idents(var),
        StmtKind::Func(func) => vec![&func.name],
        StmtKind::Class(class) => vec![&class.name],
        _ => Vec::new(),
    }
}

fn var_idents(decl: &VarDecl) -> Vec<&Ident> {
    let mut idents = Vec::new();
    for declarator in decl.decls.iter() {
        pat_idents(&declarator.pat, &mut idents);
    }
    idents
}

fn pat_idents<'a>(pat: &'a Pat, idents: &mut Vec<&'a Ident>) {
    use umc_ast::ast::{ObjectPatPropKind, PatKind};
    match &*pat.kind {
        PatKind::Ident(ident) => idents.push(ident),
        PatKind::Array(elements) => {
            for element in elements.iter().flatten() {
                pat_idents(element, idents);
            }
        }
        PatKind::Object(props) => {
            for prop in props.iter() {
                match &prop.kind {
                    ObjectPatPropKind::Shorthand(ident, _) => idents.push(ident),
                    ObjectPatPropKind::KeyValue(_, value) => pat_idents(value, idents),
                    ObjectPatPropKind::Rest(inner) => pat_idents(inner, idents),
                }
            }
        }
        PatKind::Assign(inner, _) | PatKind::Rest(inner) => pat_idents(inner, idents),
        PatKind::Err => {}
    }
}
