// Copyright (c) The unmangle contributors.
// Licensed under the MIT License.

//! Export and import metadata: which bindings the module's external interface mentions, and
//! under which external names. The rewrite engine uses these pairs to keep the interface
//! byte-for-byte stable while local names change.

use crate::resolve::{BindingId, BindingTable, ExportStatus, Names};
use std::rc::Rc;
use umc_ast::ast::{
    ExportDefaultKind, Ident, ImportSpecifierKind, Module, Pat, StmtKind, VarDecl,
};
use umc_data_structures::span::Span;

/// One named export: the local binding and the name the module exposes it under.
#[derive(Clone, Debug)]
pub struct ExportEntry {
    pub binding: BindingId,
    pub exported: Rc<str>,
    pub span: Span,
}

/// One import specifier: the local binding and the external name it came from.
#[derive(Clone, Debug)]
pub struct ImportEntry {
    pub binding: BindingId,
    pub imported: Rc<str>,
    pub span: Span,
}

/// Collects export/import metadata from the module's top level and stamps each binding's
/// export status. The status is final after this pass.
pub fn collect(
    module: &Module,
    names: &Names,
    bindings: &mut BindingTable,
) -> (Vec<ExportEntry>, Vec<ImportEntry>) {
    let mut exports = Vec::new();
    let mut imports = Vec::new();

    for stmt in module.stmts.iter() {
        match &*stmt.kind {
            StmtKind::ExportDecl(export) => match &*export.decl.kind {
                StmtKind::Var(decl) => {
                    for ident in declared_idents(decl) {
                        push_export(
                            &mut exports,
                            names,
                            bindings,
                            ident,
                            Rc::clone(&ident.name),
                            ExportStatus::ByDeclaration,
                        );
                    }
                }
                StmtKind::Func(decl) => push_export(
                    &mut exports,
                    names,
                    bindings,
                    &decl.name,
                    Rc::clone(&decl.name.name),
                    ExportStatus::ByDeclaration,
                ),
                StmtKind::Class(decl) => push_export(
                    &mut exports,
                    names,
                    bindings,
                    &decl.name,
                    Rc::clone(&decl.name.name),
                    ExportStatus::ByDeclaration,
                ),
                _ => {}
            },
            StmtKind::ExportNamed(export) if export.source.is_none() => {
                for specifier in export.specifiers.iter() {
                    let exported = specifier
                        .exported
                        .as_ref()
                        .map_or_else(|| Rc::clone(&specifier.local.name), |n| Rc::clone(&n.name));
                    push_export(
                        &mut exports,
                        names,
                        bindings,
                        &specifier.local,
                        exported,
                        ExportStatus::BySpecifier,
                    );
                }
            }
            StmtKind::ExportDefault(export) => match &export.kind {
                ExportDefaultKind::Func(Some(name), _)
                | ExportDefaultKind::Class(Some(name), _) => push_export(
                    &mut exports,
                    names,
                    bindings,
                    name,
                    "default".into(),
                    ExportStatus::ByDeclaration,
                ),
                _ => {}
            },
            StmtKind::Import(decl) => {
                for specifier in decl.specifiers.iter() {
                    let (imported, local): (Rc<str>, &Ident) = match &specifier.kind {
                        ImportSpecifierKind::Named(Some(imported), local) => {
                            (Rc::clone(&imported.name), local)
                        }
                        ImportSpecifierKind::Named(None, local) => {
                            (Rc::clone(&local.name), local)
                        }
                        ImportSpecifierKind::Default(local) => ("default".into(), local),
                        ImportSpecifierKind::Namespace(local) => ("*".into(), local),
                    };
                    if let Some(&binding) = names.get(local.id) {
                        imports.push(ImportEntry {
                            binding,
                            imported,
                            span: specifier.span,
                        });
                    }
                }
            }
            _ => {}
        }
    }

    (exports, imports)
}

fn push_export(
    exports: &mut Vec<ExportEntry>,
    names: &Names,
    bindings: &mut BindingTable,
    local: &Ident,
    exported: Rc<str>,
    status: ExportStatus,
) {
    let Some(&binding) = names.get(local.id) else {
        return;
    };

    let entry = bindings.get_mut(binding);
    if entry.export_status == ExportStatus::NotExported {
        entry.export_status = status;
    }

    exports.push(ExportEntry {
        binding,
        exported,
        span: local.span,
    });
}

/// All identifiers declared by a variable declaration, across its patterns.
fn declared_idents(decl: &VarDecl) -> Vec<&Ident> {
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
